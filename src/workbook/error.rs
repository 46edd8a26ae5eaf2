use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop a workbook from loading. None of these are recoverable
/// within a session.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Fatal Error: the data file '{}' was not found", .0.display())]
    MissingFile(PathBuf),

    #[error("Failed to open workbook '{}'", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("Sheet '{0}' not found in workbook")]
    MissingSheet(String),

    #[error("Failed to read sheet '{sheet}'")]
    ReadSheet {
        sheet: String,
        #[source]
        source: calamine::Error,
    },

    #[error("Sheet '{sheet}' has no '{column}' column")]
    MissingColumn { sheet: String, column: String },

    #[error("Sheet '{0}' has no header row")]
    EmptySheet(String),
}
