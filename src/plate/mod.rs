//! Virtual plate layout: geometry, cell-to-well mapping and orchestration

/// Plate dimensions and well addressing
pub mod geometry;
/// Cell subdirectories mapped to wells
pub mod mapper;
/// Well-by-well screen construction
pub mod orchestrator;
