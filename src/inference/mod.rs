//! Filename pattern inference for image collections

/// Directory scanning, consistency checks and pattern synthesis
pub mod engine;
/// Synthesized patterns and their parts
pub mod pattern;
/// Files split into segment values
pub mod record;
