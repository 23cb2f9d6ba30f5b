//! Walks the virtual plate and describes every populated well

use crate::grammar::definition::Grammar;
use crate::grammar::registry::{GrammarRegistry, GrammarSelector};
use crate::inference::engine::infer_pattern;
use crate::io::configuration::DEFAULT_INDEX_BASE;
use crate::io::error::{Result, ScreenError};
use crate::io::progress::ProgressManager;
use crate::io::screen::{GridWriter, WellRecord};
use crate::plate::geometry::{PlateGeometry, WellPosition};
use crate::plate::mapper::{WellMap, WellResolution};
use std::path::{Path, PathBuf};

/// Everything that shapes one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenConfig {
    /// Virtual plate dimensions
    pub geometry: PlateGeometry,
    /// Which grammar describes the files
    pub selector: GrammarSelector,
    /// Policy for cell ids outside the plate
    pub resolution: WellResolution,
    /// Cell id that lands in the first well
    pub index_base: i64,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            geometry: PlateGeometry::default(),
            selector: GrammarSelector::Level(0),
            resolution: WellResolution::Strict,
            index_base: DEFAULT_INDEX_BASE,
        }
    }
}

/// Anomaly that did not stop the run
#[derive(Debug)]
pub enum RunWarning {
    /// Files in a well's directory that the grammar could not describe
    UnmatchedFiles {
        /// Well the directory belongs to
        position: WellPosition,
        /// Directory that was scanned
        directory: PathBuf,
        /// Names of the files left out of the pattern
        names: Vec<String>,
    },
    /// Cell left off the plate under lenient resolution
    CellSkipped {
        /// Id taken from the subdirectory name
        id: i64,
        /// Subdirectory holding the cell
        subdirectory: String,
    },
    /// Well rendered empty because its pattern could not be inferred
    WellFailed {
        /// Well that was left empty
        position: WellPosition,
        /// Why inference failed
        error: ScreenError,
    },
}

impl std::fmt::Display for RunWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnmatchedFiles {
                position,
                directory,
                names,
            } => write!(
                f,
                "well {}: {} file(s) in '{}' do not fit the grammar: {}",
                position.label(),
                names.len(),
                directory.display(),
                names.join(", ")
            ),
            Self::CellSkipped { id, subdirectory } => {
                write!(f, "cell {id} ('{subdirectory}') addresses no well, skipped")
            }
            Self::WellFailed { position, error } => {
                write!(f, "well {} left empty: {error}", position.label())
            }
        }
    }
}

/// Summary of a completed run
#[derive(Debug, Default)]
pub struct RunReport {
    /// Wells that received at least one field
    pub populated: usize,
    /// Every anomaly seen, in plate order
    pub warnings: Vec<RunWarning>,
}

impl RunReport {
    /// Number of wells rendered empty after a failure
    pub fn failures(&self) -> usize {
        self.warnings
            .iter()
            .filter(|warning| matches!(warning, RunWarning::WellFailed { .. }))
            .count()
    }
}

/// Describes every well of the plate through a grid writer
pub struct ScreenBuilder {
    config: ScreenConfig,
    registry: GrammarRegistry,
    progress_manager: Option<ProgressManager>,
}

impl ScreenBuilder {
    /// Create a builder; nothing touches the filesystem until [`build`](Self::build)
    pub const fn new(config: ScreenConfig, registry: GrammarRegistry) -> Self {
        Self {
            config,
            registry,
            progress_manager: None,
        }
    }

    /// Report progress well by well
    #[must_use]
    pub fn with_progress(mut self, progress_manager: ProgressManager) -> Self {
        self.progress_manager = Some(progress_manager);
        self
    }

    /// Run configuration
    pub const fn config(&self) -> &ScreenConfig {
        &self.config
    }

    /// Map the cell directories below `root` and hand every well to `writer`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No grammar is registered for the configured selector
    /// - The cell directories cannot be mapped onto the plate
    /// - The writer rejects a well
    ///
    /// Inference failures only empty the affected well; they are listed in
    /// the returned report.
    pub fn build<W: GridWriter>(&mut self, root: &Path, writer: &mut W) -> Result<RunReport> {
        let grammar = self.registry.lookup(&self.config.selector)?;
        let geometry = self.config.geometry;

        let placement = WellMap::from_directory(root)?.place(
            &geometry,
            self.config.index_base,
            self.config.resolution,
        )?;

        let mut report = RunReport::default();
        for (id, subdirectory) in placement.skipped() {
            report.warnings.push(RunWarning::CellSkipped {
                id: *id,
                subdirectory: subdirectory.clone(),
            });
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(geometry.well_count());
        }

        for position in geometry.positions() {
            let subdirectory = placement.subdirectory(position.index);
            if let Some(ref pm) = self.progress_manager {
                pm.start_well(&position, subdirectory);
            }

            let warnings_before = report.warnings.len();
            let fields = match subdirectory {
                Some(name) => {
                    let directory = dataset_directory(root, name, grammar);
                    describe_well(&directory, grammar, position, geometry.fields(), &mut report)?
                }
                None => Vec::new(),
            };
            if !fields.is_empty() {
                report.populated += 1;
            }

            writer.add_well(WellRecord {
                position,
                fields,
                annotations: grammar.layout().annotations.clone(),
            })?;

            if let Some(ref mut pm) = self.progress_manager {
                pm.complete_well(report.warnings.len() - warnings_before);
            }
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(report)
    }
}

/// Directory holding a cell's files for the given grammar
pub fn dataset_directory(root: &Path, subdirectory: &str, grammar: &Grammar) -> PathBuf {
    grammar
        .layout()
        .nested
        .iter()
        .fold(root.join(subdirectory), |path, component| path.join(component))
}

// Every field of a well shows the same collection
fn describe_well(
    directory: &Path,
    grammar: &Grammar,
    position: WellPosition,
    field_count: usize,
    report: &mut RunReport,
) -> Result<Vec<String>> {
    match infer_pattern(directory, grammar) {
        Ok(inference) => {
            if !inference.unmatched.is_empty() {
                report.warnings.push(RunWarning::UnmatchedFiles {
                    position,
                    directory: directory.to_path_buf(),
                    names: inference.unmatched,
                });
            }
            let field = directory.join(inference.pattern.to_string());
            Ok(vec![field.to_string_lossy().into_owned(); field_count])
        }
        Err(error) if error.aborts_run() => Err(error),
        Err(error) => {
            tracing::debug!(well = %position.label(), "inference failed: {error}");
            report
                .warnings
                .push(RunWarning::WellFailed { position, error });
            Ok(Vec::new())
        }
    }
}
