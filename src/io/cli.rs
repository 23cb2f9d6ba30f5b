//! Command-line interface for describing a cell directory tree as a plate screen

use crate::grammar::registry::{GrammarRegistry, GrammarSelector};
use crate::io::configuration::{DEFAULT_COLUMNS, DEFAULT_FIELDS, DEFAULT_INDEX_BASE, DEFAULT_ROWS};
use crate::io::error::{Result, ScreenError};
use crate::io::progress::ProgressManager;
use crate::io::screen::ScreenWriter;
use crate::plate::geometry::PlateGeometry;
use crate::plate::mapper::WellResolution;
use crate::plate::orchestrator::{RunReport, ScreenBuilder, ScreenConfig};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "platepattern")]
#[command(
    author,
    version,
    about = "Describe per-cell microscopy image directories as a virtual plate screen"
)]
/// Command-line arguments for screen generation
pub struct Cli {
    /// Directory holding one subdirectory per cell
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Write the screen description here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Plate name (defaults to the directory name)
    #[arg(short, long, value_name = "PLATE")]
    pub plate: Option<String>,

    /// Screen the plate belongs to
    #[arg(short, long, value_name = "SCREEN")]
    pub screen: Option<String>,

    /// Subdirectory level of input datasets (0 raw, 1 filtered, 2 RGB movie)
    #[arg(short, long, value_name = "INT", conflicts_with = "tag")]
    pub level: Option<u32>,

    /// Tag of output datasets, e.g. 0001, Overlay, DynOverlay, mosaic, patch_label, roi_label
    #[arg(short, long, value_name = "TAG")]
    pub tag: Option<String>,

    /// Plate rows
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    pub rows: usize,

    /// Plate columns
    #[arg(long, default_value_t = DEFAULT_COLUMNS)]
    pub columns: usize,

    /// Fields per well
    #[arg(long, default_value_t = DEFAULT_FIELDS)]
    pub fields: usize,

    /// Cell id placed in the first well
    #[arg(long, default_value_t = DEFAULT_INDEX_BASE, allow_negative_numbers = true)]
    pub index_base: i64,

    /// Skip cells whose id addresses no well instead of failing
    #[arg(long)]
    pub lenient: bool,

    /// Suppress progress output and informational logging
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Grammar selected by `--tag`, else by `--level` (default level 0)
    pub fn selector(&self) -> GrammarSelector {
        match (&self.tag, self.level) {
            (Some(tag), _) => GrammarSelector::Tag(tag.clone()),
            (None, level) => GrammarSelector::Level(level.unwrap_or(0)),
        }
    }

    /// Plate name, falling back to the directory's base name
    pub fn plate_name(&self) -> String {
        self.plate.clone().unwrap_or_else(|| {
            self.dir
                .file_name()
                .map_or_else(|| "plate".to_string(), |name| name.to_string_lossy().into_owned())
        })
    }

    /// Run configuration described by the arguments
    ///
    /// # Errors
    ///
    /// Returns an error if a plate dimension is zero
    pub fn screen_config(&self) -> Result<ScreenConfig> {
        Ok(ScreenConfig {
            geometry: PlateGeometry::new(self.rows, self.columns, self.fields)?,
            selector: self.selector(),
            resolution: if self.lenient {
                WellResolution::Lenient
            } else {
                WellResolution::Strict
            },
            index_base: self.index_base,
        })
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Drives one run from parsed arguments to a written screen
pub struct ScreenProcessor {
    cli: Cli,
}

impl ScreenProcessor {
    /// Create a processor for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Build the screen, write it out and report every anomaly
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The selected grammar is unknown or the geometry is invalid
    /// - The cell directories cannot be mapped onto the plate
    /// - The screen cannot be written
    /// - Any well had to be left empty ([`ScreenError::IncompleteScreen`],
    ///   returned after the screen has been written)
    pub fn process(&self) -> Result<()> {
        let config = self.cli.screen_config()?;
        let mut writer = ScreenWriter::new(&self.cli.plate_name(), config.geometry);
        if let Some(screen) = &self.cli.screen {
            writer = writer.with_screen(screen);
        }

        let mut builder = ScreenBuilder::new(config, GrammarRegistry::builtin()?);
        if self.cli.should_show_progress() {
            builder = builder.with_progress(ProgressManager::new());
        }
        tracing::info!(
            dir = %self.cli.dir.display(),
            "describing cells with {}",
            builder.config().selector
        );

        let report = builder.build(&self.cli.dir, &mut writer)?;

        match &self.cli.output {
            Some(path) => {
                tracing::info!("writing to {}", path.display());
                writer.write_file(path)?;
            }
            None => writer.write_to(&mut std::io::stdout().lock())?,
        }

        Self::log_report(&report);

        match report.failures() {
            0 => Ok(()),
            failed => Err(ScreenError::IncompleteScreen { failed }),
        }
    }

    fn log_report(report: &RunReport) {
        for warning in &report.warnings {
            tracing::warn!("{warning}");
        }
        tracing::info!(
            populated = report.populated,
            warnings = report.warnings.len(),
            "screen complete"
        );
    }
}
