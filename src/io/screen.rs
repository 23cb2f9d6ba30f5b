//! Plate description sink and the `.screen` file format

use crate::io::error::{Result, file_system};
use crate::plate::geometry::{PlateGeometry, WellPosition};
use std::io::Write;
use std::path::Path;

/// Everything the grid writer learns about one well
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WellRecord {
    /// Where the well sits on the plate
    pub position: WellPosition,
    /// One pattern path per field; empty for unpopulated wells
    pub fields: Vec<String>,
    /// Extra key/value pairs, e.g. `AxisTypes = CT`
    pub annotations: Vec<(String, String)>,
}

/// Receives wells in row-major order
pub trait GridWriter {
    /// Record one well
    ///
    /// # Errors
    ///
    /// Implementations may fail if the well cannot be recorded
    fn add_well(&mut self, well: WellRecord) -> Result<()>;
}

/// Collects wells and renders them as an INI-style screen description
#[derive(Debug, Clone)]
pub struct ScreenWriter {
    plate: String,
    screen: Option<String>,
    geometry: PlateGeometry,
    wells: Vec<WellRecord>,
}

impl ScreenWriter {
    /// Create a writer for one plate
    pub fn new(plate: &str, geometry: PlateGeometry) -> Self {
        Self {
            plate: plate.to_string(),
            screen: None,
            geometry,
            wells: Vec::new(),
        }
    }

    /// Place the plate inside a named screen
    #[must_use]
    pub fn with_screen(mut self, screen: &str) -> Self {
        self.screen = Some(screen.to_string());
        self
    }

    /// Wells recorded so far
    pub fn wells(&self) -> &[WellRecord] {
        &self.wells
    }

    /// Render the screen description
    pub fn render(&self) -> String {
        let mut out = String::new();

        if let Some(screen) = &self.screen {
            out.push_str(&format!("[Screen]\nName = {screen}\n\n"));
        }

        out.push_str(&format!(
            "[Plate]\nName = {}\nRows = {}\nColumns = {}\nFields = {}\n",
            self.plate,
            self.geometry.rows(),
            self.geometry.columns(),
            self.geometry.fields()
        ));

        for well in &self.wells {
            let position = well.position;
            out.push_str(&format!(
                "\n[Well {}]\nRow = {}\nColumn = {}\n",
                position.index, position.row, position.column
            ));
            for (field, value) in well.fields.iter().enumerate() {
                out.push_str(&format!("Field_{field} = {value}\n"));
            }
            for (key, value) in &well.annotations {
                out.push_str(&format!("{key} = {value}\n"));
            }
        }

        out
    }

    /// Write the rendered description to `out`
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        out.write_all(self.render().as_bytes())?;
        out.flush()?;
        Ok(())
    }

    /// Write the rendered description to a file, replacing it
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn write_file(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.render()).map_err(file_system(path, "write screen"))
    }
}

impl GridWriter for ScreenWriter {
    fn add_well(&mut self, well: WellRecord) -> Result<()> {
        self.wells.push(well);
        Ok(())
    }
}
