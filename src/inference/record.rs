//! Matched files split into their segment values

use crate::grammar::definition::Grammar;
use crate::grammar::segment::SegmentValue;

/// One file that matched a grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    name: String,
    segments: Vec<SegmentValue>,
}

impl FileRecord {
    /// Match `name` against `grammar`
    pub fn from_name(name: &str, grammar: &Grammar) -> Option<Self> {
        grammar.match_name(name).map(|segments| Self {
            name: name.to_string(),
            segments,
        })
    }

    /// Original file name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Captured values in grammar order
    pub fn segments(&self) -> &[SegmentValue] {
        &self.segments
    }

    /// Values of the fixed segments, in order
    pub fn fixed_segments(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                SegmentValue::Fixed(text) => Some(text.as_str()),
                SegmentValue::Dimension { .. } => None,
            })
            .collect()
    }

    /// Raw value captured for `dimension`
    pub fn value_of(&self, dimension: &str) -> Option<&str> {
        self.segments.iter().find_map(|segment| match segment {
            SegmentValue::Dimension {
                dimension: name,
                value,
            } if name == dimension => Some(value.as_str()),
            _ => None,
        })
    }
}
