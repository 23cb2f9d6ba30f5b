//! Plate geometry defaults and dataset layout constants

// Cells were imaged separately; each one is mapped onto a virtual 96-well plate
/// Default number of plate rows
pub const DEFAULT_ROWS: usize = 8;
/// Default number of plate columns
pub const DEFAULT_COLUMNS: usize = 12;
/// Default number of fields per well
pub const DEFAULT_FIELDS: usize = 1;

/// Cell id that lands in the first well
pub const DEFAULT_INDEX_BASE: i64 = 0;

/// Extension shared by every image file the grammars describe
pub const IMAGE_EXTENSION: &str = ".tif";

// Input dataset layout, one nesting level per grammar level
/// Bilateral-filtered data below each cell directory
pub const FILTERED_SUBDIR: &str = "BilatFilteredNonStand";
/// RGB ratio movies below the filtered directory
pub const RATIO_SUBDIR: &str = "RatioIm";

// Output dataset layout
/// Per-cell sample directory holding all post-processing products
pub const SAMPLE_SUBDIR: &str = "Sample1";
/// Shared directory for every tagged product except the default one
pub const RESULTS_SUBDIR: &str = "results";
/// Output tag selected when none is given
pub const DEFAULT_TAG: &str = "0001";

/// Prefix of the computed CY channel, which is derived from C and Y
pub const DERIVED_CHANNEL_PREFIX: &str = "bilaf_CY";

/// Annotation key describing the axis order of a well's images
pub const AXIS_TYPES_KEY: &str = "AxisTypes";
/// Channel-then-time axis order
pub const AXIS_TYPES_CT: &str = "CT";

// Progress bar display settings
/// Width of the well progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
