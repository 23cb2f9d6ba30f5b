//! Input/output operations, configuration and error handling

/// Command-line parsing and run driver
pub mod cli;
/// Plate geometry defaults and dataset layout constants
pub mod configuration;
/// Error types and helpers
pub mod error;
/// Well-by-well progress display
pub mod progress;
/// Grid writer sink and `.screen` file rendering
pub mod screen;
