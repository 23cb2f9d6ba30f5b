//! Error types for grammar selection, well mapping and pattern inference

use crate::grammar::registry::GrammarSelector;
use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all screen-building operations
#[derive(Debug)]
pub enum ScreenError {
    /// No grammar is registered for the requested selector
    UnsupportedGrammar {
        /// The level or tag that was requested
        selector: GrammarSelector,
    },

    /// A grammar definition could not be turned into a matcher
    InvalidGrammar {
        /// Name of the grammar being defined
        grammar: String,
        /// Description of what is wrong with the definition
        reason: String,
    },

    /// A subdirectory name does not end with an integer cell id
    MalformedId {
        /// The offending subdirectory name
        subdirectory: String,
    },

    /// Two subdirectories carry the same cell id
    ///
    /// Placing both would merge two distinct samples into one well.
    DuplicateId {
        /// The shared cell id
        id: i64,
        /// Subdirectory that claimed the id first
        first: String,
        /// Subdirectory that claimed it again
        second: String,
    },

    /// A cell id does not address any well of the plate
    WellIndexOutOfRange {
        /// The cell id taken from the subdirectory name
        id: i64,
        /// Subdirectory the id came from
        subdirectory: String,
        /// Number of wells on the plate
        well_count: usize,
    },

    /// A dataset directory holds no file the grammar could describe
    EmptyCollection {
        /// Directory that was scanned
        directory: PathBuf,
        /// Extension files were required to have
        extension: String,
        /// Number of candidate files that failed to match the grammar
        unmatched: usize,
    },

    /// Files from different naming families are mixed in one directory
    InconsistentGrammar {
        /// Directory that was scanned
        directory: PathBuf,
        /// First file whose fixed segments differ from the expected ones
        file: String,
        /// Fixed segments of the first matched file
        expected: Vec<String>,
        /// Fixed segments of the offending file
        found: Vec<String>,
    },

    /// A numeric dimension is not zero-padded to a single width
    InconsistentWidth {
        /// Directory that was scanned
        directory: PathBuf,
        /// Dimension whose values disagree
        dimension: String,
        /// Distinct widths observed, ascending
        widths: Vec<usize>,
    },

    /// Runtime parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The screen was written but some wells could not be described
    IncompleteScreen {
        /// Number of wells whose inference failed
        failed: usize,
    },
}

impl ScreenError {
    /// Whether this error invalidates the whole run rather than a single well
    ///
    /// Grammar selection, subdirectory naming and parameter problems leave no
    /// trustworthy plate layout, so they stop everything. Inference problems
    /// only affect the well being described.
    pub const fn aborts_run(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedGrammar { .. }
                | Self::InvalidGrammar { .. }
                | Self::MalformedId { .. }
                | Self::DuplicateId { .. }
                | Self::WellIndexOutOfRange { .. }
                | Self::InvalidParameter { .. }
        )
    }
}

impl fmt::Display for ScreenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedGrammar { selector } => {
                write!(f, "Unsupported grammar selector: {selector}")
            }
            Self::InvalidGrammar { grammar, reason } => {
                write!(f, "Invalid grammar '{grammar}': {reason}")
            }
            Self::MalformedId { subdirectory } => {
                write!(
                    f,
                    "Subdirectory '{subdirectory}' does not end with an integer cell id"
                )
            }
            Self::DuplicateId { id, first, second } => {
                write!(
                    f,
                    "Cell id {id} is claimed by both '{first}' and '{second}'"
                )
            }
            Self::WellIndexOutOfRange {
                id,
                subdirectory,
                well_count,
            } => {
                write!(
                    f,
                    "Cell id {id} from '{subdirectory}' is outside the plate ({well_count} wells)"
                )
            }
            Self::EmptyCollection {
                directory,
                extension,
                unmatched,
            } => {
                write!(
                    f,
                    "No matching '{extension}' files in '{}'",
                    directory.display()
                )?;
                if *unmatched > 0 {
                    write!(f, " ({unmatched} did not fit the grammar)")?;
                }
                Ok(())
            }
            Self::InconsistentGrammar {
                directory,
                file,
                expected,
                found,
            } => {
                write!(
                    f,
                    "'{file}' in '{}' has fixed segments {found:?}, expected {expected:?}",
                    directory.display()
                )
            }
            Self::InconsistentWidth {
                directory,
                dimension,
                widths,
            } => {
                write!(
                    f,
                    "Dimension '{dimension}' in '{}' mixes digit widths {widths:?}",
                    directory.display()
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::IncompleteScreen { failed } => {
                write!(f, "{failed} well(s) could not be described")
            }
        }
    }
}

impl std::error::Error for ScreenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for screen-building results
pub type Result<T> = std::result::Result<T, ScreenError>;

impl From<std::io::Error> for ScreenError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> ScreenError {
    ScreenError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Build a `map_err` adapter attaching a path and operation to an I/O error
pub fn file_system(
    path: &Path,
    operation: &'static str,
) -> impl FnOnce(std::io::Error) -> ScreenError {
    let path = path.to_path_buf();
    move |source| ScreenError::FileSystem {
        path,
        operation,
        source,
    }
}
