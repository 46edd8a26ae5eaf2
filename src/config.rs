use std::path::PathBuf;

use crate::cli::Cli;
use crate::workbook::Locations;

/// Log filter variable checked before `RUST_LOG`
pub const ENV_LOG: &str = "CRAFTING_LOG";

/// Paths resolved from arguments, environment and platform defaults
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub workbook: PathBuf,
    pub logo: PathBuf,
    pub log_file: PathBuf,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Self {
        Self::resolve(cli, &Locations::new())
    }

    pub fn resolve(cli: &Cli, locations: &Locations) -> Self {
        let workbook = locations.workbook(cli.workbook.clone());
        let logo = locations.logo(cli.logo.clone(), &workbook);
        let log_file = locations.log_file(cli.log_file.clone());

        Self {
            workbook,
            logo,
            log_file,
        }
    }
}
