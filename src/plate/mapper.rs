//! Cell subdirectories mapped to wells through their trailing numeric id

use crate::io::error::{Result, ScreenError, file_system};
use crate::plate::geometry::PlateGeometry;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fs;
use std::path::Path;

/// What to do with a cell id that addresses no well of the plate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WellResolution {
    /// Fail the run
    #[default]
    Strict,
    /// Leave the cell off the plate and report it
    Lenient,
}

/// Extract the cell id at the end of a subdirectory name
///
/// The last whitespace-delimited token is used as-is when it is an integer;
/// otherwise its trailing digits are (`Sample12` gives 12).
pub fn parse_cell_id(name: &str) -> Option<i64> {
    let token = name.split_whitespace().last()?;
    if let Ok(id) = token.parse() {
        return Some(id);
    }
    let digits_start = token
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(index, _)| index)?;
    token.get(digits_start..)?.parse().ok()
}

/// Injective mapping from cell id to subdirectory name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WellMap {
    cells: BTreeMap<i64, String>,
}

impl WellMap {
    /// Map every immediate subdirectory of `root`
    ///
    /// Hidden entries (names starting with `.`) are ignored, and so are
    /// entries whose names are not valid UTF-8.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The directory cannot be listed
    /// - A subdirectory name has no trailing integer
    /// - Two subdirectories share an id
    pub fn from_directory(root: &Path) -> Result<Self> {
        let mut names = Vec::new();
        for entry in fs::read_dir(root).map_err(file_system(root, "list directory"))? {
            let entry = entry.map_err(file_system(root, "read directory entry"))?;
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    tracing::warn!(
                        root = %root.display(),
                        "skipping entry with non-UTF-8 name {}",
                        raw.to_string_lossy()
                    );
                    continue;
                }
            };
            if !name.starts_with('.') && entry.path().is_dir() {
                names.push(name);
            }
        }
        // Stable order so duplicate reports name the same pair every time
        names.sort_unstable();
        Self::from_names(names)
    }

    /// Map the given subdirectory names
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::MalformedId`] or [`ScreenError::DuplicateId`]
    pub fn from_names<I>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut cells = BTreeMap::new();
        for name in names {
            let Some(id) = parse_cell_id(&name) else {
                return Err(ScreenError::MalformedId { subdirectory: name });
            };
            match cells.entry(id) {
                Entry::Vacant(slot) => {
                    slot.insert(name);
                }
                Entry::Occupied(existing) => {
                    return Err(ScreenError::DuplicateId {
                        id,
                        first: existing.get().clone(),
                        second: name,
                    });
                }
            }
        }
        Ok(Self { cells })
    }

    /// Subdirectory holding cell `id`
    pub fn get(&self, id: i64) -> Option<&str> {
        self.cells.get(&id).map(String::as_str)
    }

    /// Number of mapped cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cell was found
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = (i64, &str)> {
        self.cells.iter().map(|(id, name)| (*id, name.as_str()))
    }

    /// Assign cells to wells; well index is `id - index_base`
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::WellIndexOutOfRange`] for the first id outside
    /// the plate when `resolution` is strict
    pub fn place(
        &self,
        geometry: &PlateGeometry,
        index_base: i64,
        resolution: WellResolution,
    ) -> Result<Placement> {
        let mut placement = Placement::default();
        for (id, name) in self.iter() {
            let index = id
                .checked_sub(index_base)
                .and_then(|offset| usize::try_from(offset).ok())
                .filter(|index| *index < geometry.well_count());

            match (index, resolution) {
                (Some(index), _) => {
                    placement.wells.insert(index, name.to_string());
                }
                (None, WellResolution::Lenient) => {
                    placement.skipped.push((id, name.to_string()));
                }
                (None, WellResolution::Strict) => {
                    return Err(ScreenError::WellIndexOutOfRange {
                        id,
                        subdirectory: name.to_string(),
                        well_count: geometry.well_count(),
                    });
                }
            }
        }
        Ok(placement)
    }
}

/// Cells assigned to wells, plus those left off the plate
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placement {
    wells: BTreeMap<usize, String>,
    skipped: Vec<(i64, String)>,
}

impl Placement {
    /// Subdirectory placed in the well at row-major `index`
    pub fn subdirectory(&self, index: usize) -> Option<&str> {
        self.wells.get(&index).map(String::as_str)
    }

    /// Number of populated wells
    pub fn populated(&self) -> usize {
        self.wells.len()
    }

    /// Cells whose id addressed no well, with their subdirectory
    pub fn skipped(&self) -> &[(i64, String)] {
        &self.skipped
    }
}
