//! Filename pattern inference for per-cell microscopy image collections
//!
//! Each cell directory is mapped onto a well of a virtual plate through the
//! numeric id at the end of its name. The files inside are matched against a
//! registered naming grammar and summarized as one range-compressed pattern,
//! such as `a_t<000-599>_b_c<1-3>.tif`, that a plate viewer can expand.

#![forbid(unsafe_code)]

/// Filename grammars expressed as segment roles
pub mod grammar;
/// Pattern inference over a directory of image files
pub mod inference;
/// Input/output operations and error handling
pub mod io;
/// Plate geometry, cell-to-well mapping and screen orchestration
pub mod plate;

pub use io::error::{Result, ScreenError};
