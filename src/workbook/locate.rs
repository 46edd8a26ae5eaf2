use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub const DEFAULT_WORKBOOK: &str = "Heliana's Recipes.xlsx";
pub const DEFAULT_LOGO: &str = "logo.txt";
pub const DEFAULT_LOG_FILE: &str = "crafting-explorer.log";

/// Default locations for the workbook, banner and log file
pub struct Locations {
    working_dir: PathBuf,
    data_dir: Option<PathBuf>,
    cache_dir: Option<PathBuf>,
}

impl Locations {
    /// Use the working directory and the platform's project directories
    pub fn new() -> Self {
        let proj_dirs = ProjectDirs::from("", "", "crafting-explorer");
        Self {
            working_dir: PathBuf::from("."),
            data_dir: proj_dirs.as_ref().map(|d| d.data_dir().to_path_buf()),
            cache_dir: proj_dirs.as_ref().map(|d| d.cache_dir().to_path_buf()),
        }
    }

    pub fn with_dirs(working_dir: PathBuf, data_dir: Option<PathBuf>, cache_dir: Option<PathBuf>) -> Self {
        Self {
            working_dir,
            data_dir,
            cache_dir,
        }
    }

    /// Explicit path, else the first existing default, else the working
    /// directory default so the missing-file error names it
    pub fn workbook(&self, explicit: Option<PathBuf>) -> PathBuf {
        if let Some(path) = explicit {
            return path;
        }

        let local = self.working_dir.join(DEFAULT_WORKBOOK);
        if local.is_file() {
            return local;
        }

        match &self.data_dir {
            Some(dir) if dir.join(DEFAULT_WORKBOOK).is_file() => dir.join(DEFAULT_WORKBOOK),
            _ => local,
        }
    }

    /// Explicit path, else the banner next to the workbook
    pub fn logo(&self, explicit: Option<PathBuf>, workbook: &Path) -> PathBuf {
        explicit.unwrap_or_else(|| {
            workbook
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join(DEFAULT_LOGO)
        })
    }

    /// Explicit path, else the platform cache directory
    pub fn log_file(&self, explicit: Option<PathBuf>) -> PathBuf {
        explicit.unwrap_or_else(|| {
            self.cache_dir
                .clone()
                .unwrap_or_else(|| self.working_dir.clone())
                .join(DEFAULT_LOG_FILE)
        })
    }
}

impl Default for Locations {
    fn default() -> Self {
        Self::new()
    }
}
