//! Segment roles making up a filename grammar and the values they capture

/// Role of one portion of a filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentRole {
    /// Free text that must be identical across every file of a directory
    Fixed,
    /// Text spelled out by the grammar itself, never captured
    Literal(String),
    /// Zero-padded digit run indexing one dimension
    Variable {
        /// Dimension name, e.g. `t`
        dimension: String,
    },
    /// One symbol out of a small fixed alphabet
    Enumerated {
        /// Dimension name, e.g. `c`
        dimension: String,
        /// Allowed symbols in display order
        alphabet: Vec<String>,
    },
}

impl SegmentRole {
    /// Shorthand for a [`SegmentRole::Literal`]
    pub fn literal(text: &str) -> Self {
        Self::Literal(text.to_string())
    }

    /// Shorthand for a [`SegmentRole::Variable`]
    pub fn variable(dimension: &str) -> Self {
        Self::Variable {
            dimension: dimension.to_string(),
        }
    }

    /// Shorthand for a [`SegmentRole::Enumerated`]
    pub fn enumerated(dimension: &str, alphabet: &[&str]) -> Self {
        Self::Enumerated {
            dimension: dimension.to_string(),
            alphabet: alphabet.iter().map(ToString::to_string).collect(),
        }
    }

    /// Whether the matcher captures text for this role
    pub const fn is_captured(&self) -> bool {
        !matches!(self, Self::Literal(_))
    }

    /// Dimension name for variable and enumerated roles
    pub fn dimension(&self) -> Option<&str> {
        match self {
            Self::Variable { dimension } | Self::Enumerated { dimension, .. } => {
                Some(dimension.as_str())
            }
            Self::Fixed | Self::Literal(_) => None,
        }
    }

    /// Regex fragment matching this role
    pub fn regex_fragment(&self) -> String {
        match self {
            Self::Fixed => "(.+)".to_string(),
            Self::Literal(text) => regex::escape(text),
            // ASCII only: byte width must equal digit count
            Self::Variable { .. } => "([0-9]+)".to_string(),
            Self::Enumerated { alphabet, .. } => {
                let choices: Vec<String> = alphabet.iter().map(|s| regex::escape(s)).collect();
                format!("({})", choices.join("|"))
            }
        }
    }
}

/// Text captured for one role of a matched filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentValue {
    /// Text captured by a [`SegmentRole::Fixed`] role
    Fixed(String),
    /// Raw text captured by a variable or enumerated role
    Dimension {
        /// Dimension the value belongs to
        dimension: String,
        /// Raw captured text, original padding preserved
        value: String,
    },
}

impl SegmentValue {
    /// The captured text
    pub fn as_str(&self) -> &str {
        match self {
            Self::Fixed(text) => text,
            Self::Dimension { value, .. } => value,
        }
    }
}
