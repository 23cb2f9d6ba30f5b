//! File name predicates applied before grammar matching

/// Decides which candidate files take part in inference
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FileFilter {
    /// Keep every file
    #[default]
    All,
    /// Drop files whose name starts with the given text
    ExcludePrefix(String),
    /// Keep only files whose name, minus its extension, ends with the given text
    StemSuffix(String),
}

impl FileFilter {
    /// Whether `name` passes the filter
    pub fn accepts(&self, name: &str) -> bool {
        match self {
            Self::All => true,
            Self::ExcludePrefix(prefix) => !name.starts_with(prefix.as_str()),
            Self::StemSuffix(suffix) => stem(name).ends_with(suffix.as_str()),
        }
    }
}

// Everything before the last dot; dotfiles keep their full name
fn stem(name: &str) -> &str {
    match name.rfind('.') {
        Some(0) | None => name,
        Some(dot) => name.get(..dot).unwrap_or(name),
    }
}
