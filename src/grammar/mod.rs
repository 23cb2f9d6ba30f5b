//! Filename grammars expressed as data

/// Grammar definitions compiled from segment roles
pub mod definition;
/// File name predicates applied before matching
pub mod filter;
/// Selectors and the grammar registry
pub mod registry;
/// Segment roles and captured values
pub mod segment;
