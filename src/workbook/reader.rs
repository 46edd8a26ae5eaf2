use calamine::{open_workbook_auto, Reader, Sheets};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::LoadError;
use crate::parser::{cell_text, parse_essence, parse_harvest, parse_recipes};
use crate::schema::{Cell, Dataset, ESSENCE, HARVEST, RECIPES};
use crate::ui::{Phase, Ui};

pub struct WorkbookReader {
    sheets: Sheets<BufReader<File>>,
}

impl WorkbookReader {
    pub fn open(path: &Path) -> Result<Self, LoadError> {
        if !path.is_file() {
            return Err(LoadError::MissingFile(path.to_path_buf()));
        }

        let sheets = open_workbook_auto(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self { sheets })
    }

    /// Read a sheet as a grid of display cells, header row included
    pub fn grid(&mut self, name: &str) -> Result<Vec<Vec<Cell>>, LoadError> {
        if !self.sheets.sheet_names().iter().any(|s| s == name) {
            return Err(LoadError::MissingSheet(name.to_string()));
        }

        let range = self
            .sheets
            .worksheet_range(name)
            .map_err(|source| LoadError::ReadSheet {
                sheet: name.to_string(),
                source,
            })?;

        Ok(range
            .rows()
            .map(|row| row.iter().map(cell_text).collect())
            .collect())
    }
}

/// Load the three sheets of a crafting workbook
pub fn load_dataset(path: &Path, ui: &mut impl Ui) -> Result<Dataset, LoadError> {
    ui.set_phase(Phase::Opening);
    ui.set_info(path.display().to_string());
    tracing::info!(path = %path.display(), "opening workbook");

    let mut reader = WorkbookReader::open(path)?;

    ui.set_phase(Phase::Reading);
    let essence = parse_essence(reader.grid(ESSENCE.name)?)?;
    ui.log(format!("{}: {} rows", ESSENCE.name, essence.len()));

    let harvest = parse_harvest(reader.grid(HARVEST.name)?)?;
    ui.log(format!("{}: {} rows", HARVEST.name, harvest.len()));

    let recipes = parse_recipes(reader.grid(RECIPES.name)?)?;
    ui.log(format!("{}: {} rows", RECIPES.name, recipes.len()));

    tracing::info!(
        essence = essence.len(),
        harvest = harvest.len(),
        recipes = recipes.len(),
        "workbook loaded"
    );
    ui.set_phase(Phase::Ready);

    Ok(Dataset {
        essence,
        harvest,
        recipes,
    })
}

/// Read the optional text banner shown above the filters.
///
/// A missing banner is only worth a warning.
pub fn load_logo(path: &Path, ui: &mut impl Ui) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "logo banner not available");
            ui.log(format!("Logo not found: {}", path.display()));
            None
        }
    }
}
