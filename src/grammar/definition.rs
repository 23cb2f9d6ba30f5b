//! Grammar definitions: ordered segment roles compiled into one matcher

use crate::grammar::filter::FileFilter;
use crate::grammar::segment::{SegmentRole, SegmentValue};
use crate::io::configuration::IMAGE_EXTENSION;
use crate::io::error::{Result, ScreenError};
use regex::Regex;
use std::collections::HashSet;

/// Where a grammar's files live relative to a cell directory, and how its wells are annotated
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DatasetLayout {
    /// Path components to descend into below the cell directory
    pub nested: Vec<String>,
    /// Key/value annotations attached to every well of the plate
    pub annotations: Vec<(String, String)>,
}

impl DatasetLayout {
    /// Layout with the given nested path and no annotations
    pub fn nested(components: &[&str]) -> Self {
        Self {
            nested: components.iter().map(ToString::to_string).collect(),
            annotations: Vec::new(),
        }
    }

    /// Add an annotation to every well using this layout
    #[must_use]
    pub fn annotated(mut self, key: &str, value: &str) -> Self {
        self.annotations.push((key.to_string(), value.to_string()));
        self
    }
}

/// A named, immutable filename family
///
/// Every captured role corresponds to exactly one regex group, in order, so
/// a match can be split back into [`SegmentValue`]s without per-grammar code.
#[derive(Debug, Clone)]
pub struct Grammar {
    name: String,
    roles: Vec<SegmentRole>,
    matcher: Regex,
    extension: String,
    filter: FileFilter,
    layout: DatasetLayout,
}

impl Grammar {
    /// Compile a grammar from its ordered segment roles
    ///
    /// Files must carry the image extension and pass `filter` to be
    /// considered at all.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::InvalidGrammar`] if:
    /// - The grammar has no roles
    /// - An enumerated role has an empty alphabet
    /// - Two roles share a dimension name
    /// - The generated matcher fails to compile
    pub fn new(
        name: &str,
        roles: Vec<SegmentRole>,
        filter: FileFilter,
        layout: DatasetLayout,
    ) -> Result<Self> {
        let invalid = |reason: String| ScreenError::InvalidGrammar {
            grammar: name.to_string(),
            reason,
        };

        if roles.is_empty() {
            return Err(invalid("no segment roles".to_string()));
        }

        let mut dimensions = HashSet::new();
        for role in &roles {
            if let SegmentRole::Enumerated {
                dimension,
                alphabet,
            } = role
            {
                if alphabet.is_empty() {
                    return Err(invalid(format!("dimension '{dimension}' has no symbols")));
                }
            }
            if let Some(dimension) = role.dimension() {
                if !dimensions.insert(dimension) {
                    return Err(invalid(format!("dimension '{dimension}' appears twice")));
                }
            }
        }

        let body: String = roles.iter().map(SegmentRole::regex_fragment).collect();
        let matcher = Regex::new(&format!("^{body}$")).map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            name: name.to_string(),
            roles,
            matcher,
            extension: IMAGE_EXTENSION.to_string(),
            filter,
            layout,
        })
    }

    /// Human-readable grammar name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Segment roles in filename order
    pub fn roles(&self) -> &[SegmentRole] {
        &self.roles
    }

    /// Extension every candidate file must carry
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Default predicate applied before matching
    pub const fn filter(&self) -> &FileFilter {
        &self.filter
    }

    /// Nested directory and annotations used when placing this grammar on a plate
    pub const fn layout(&self) -> &DatasetLayout {
        &self.layout
    }

    /// Split a filename into segment values, or `None` if it is not an instance
    pub fn match_name(&self, name: &str) -> Option<Vec<SegmentValue>> {
        let captures = self.matcher.captures(name)?;
        let mut groups = captures.iter().skip(1);
        let mut values = Vec::new();

        for role in &self.roles {
            let text = match role {
                SegmentRole::Literal(_) => continue,
                _ => groups.next()??.as_str().to_string(),
            };
            values.push(match role.dimension() {
                Some(dimension) => SegmentValue::Dimension {
                    dimension: dimension.to_string(),
                    value: text,
                },
                None => SegmentValue::Fixed(text),
            });
        }

        Some(values)
    }
}
