//! Range-compressed description of a file collection

use std::fmt;

/// Closed range of raw values observed for one numeric dimension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionRange {
    /// Dimension name
    pub dimension: String,
    /// Smallest observed raw value
    pub min: String,
    /// Largest observed raw value
    pub max: String,
}

impl DimensionRange {
    /// Whether `value` has the range's width and lies within its bounds
    pub fn contains(&self, value: &str) -> bool {
        value.len() == self.min.len()
            && value.bytes().all(|b| b.is_ascii_digit())
            && self.min.as_str() <= value
            && value <= self.max.as_str()
    }
}

/// One piece of a rendered pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternPart {
    /// Text shared by every file
    Literal(String),
    /// Numeric dimension rendered as `<min-max>`
    Range(DimensionRange),
    /// Enumerated dimension rendered from its full alphabet
    Alphabet {
        /// Dimension name
        dimension: String,
        /// Allowed symbols in display order
        symbols: Vec<String>,
    },
}

impl fmt::Display for PatternPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.write_str(text),
            Self::Range(range) => write!(f, "<{}-{}>", range.min, range.max),
            Self::Alphabet { symbols, .. } => match digit_run(symbols) {
                Some((first, last)) => write!(f, "<{first}-{last}>"),
                None => write!(f, "<{}>", symbols.join(",")),
            },
        }
    }
}

// Consecutive ascending single digits collapse into a range
fn digit_run(symbols: &[String]) -> Option<(&str, &str)> {
    let digits: Vec<u8> = symbols
        .iter()
        .map(|symbol| match symbol.as_bytes() {
            [digit] if digit.is_ascii_digit() => Some(*digit),
            _ => None,
        })
        .collect::<Option<_>>()?;

    let consecutive = digits
        .windows(2)
        .all(|pair| pair.first().map(|d| d + 1) == pair.get(1).copied());
    if digits.len() < 2 || !consecutive {
        return None;
    }

    Some((symbols.first()?.as_str(), symbols.last()?.as_str()))
}

/// Synthesized pattern standing in for every file of a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    parts: Vec<PatternPart>,
}

impl Pattern {
    /// Assemble a pattern from its parts, merging adjacent literals
    pub fn new(parts: Vec<PatternPart>) -> Self {
        let mut merged: Vec<PatternPart> = Vec::with_capacity(parts.len());
        for part in parts {
            if let (PatternPart::Literal(text), Some(PatternPart::Literal(previous))) =
                (&part, merged.last_mut())
            {
                previous.push_str(text);
                continue;
            }
            merged.push(part);
        }
        Self { parts: merged }
    }

    /// Parts in filename order
    pub fn parts(&self) -> &[PatternPart] {
        &self.parts
    }

    /// Observed range of a numeric dimension
    pub fn range(&self, dimension: &str) -> Option<&DimensionRange> {
        self.parts.iter().find_map(|part| match part {
            PatternPart::Range(range) if range.dimension == dimension => Some(range),
            _ => None,
        })
    }

    /// Names of every variable and enumerated dimension, in order
    pub fn dimensions(&self) -> Vec<&str> {
        self.parts
            .iter()
            .filter_map(|part| match part {
                PatternPart::Range(range) => Some(range.dimension.as_str()),
                PatternPart::Alphabet { dimension, .. } => Some(dimension.as_str()),
                PatternPart::Literal(_) => None,
            })
            .collect()
    }

    /// Substitute concrete dimension values to get one conforming file name
    ///
    /// Returns `None` if a dimension has no value, or if a value lies outside
    /// the observed range or the alphabet.
    pub fn instantiate(&self, values: &[(&str, &str)]) -> Option<String> {
        let lookup = |dimension: &str| {
            values
                .iter()
                .find(|(name, _)| *name == dimension)
                .map(|(_, value)| *value)
        };

        let mut name = String::new();
        for part in &self.parts {
            match part {
                PatternPart::Literal(text) => name.push_str(text),
                PatternPart::Range(range) => {
                    let value = lookup(range.dimension.as_str())?;
                    if !range.contains(value) {
                        return None;
                    }
                    name.push_str(value);
                }
                PatternPart::Alphabet { dimension, symbols } => {
                    let value = lookup(dimension.as_str())?;
                    if !symbols.iter().any(|symbol| symbol == value) {
                        return None;
                    }
                    name.push_str(value);
                }
            }
        }
        Some(name)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.parts.iter().try_for_each(|part| write!(f, "{part}"))
    }
}
