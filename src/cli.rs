use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::filter::{SearchMode, ANY_CREATURE};

#[derive(Parser, Debug)]
#[command(name = "crafting-explorer")]
#[command(version, about = "Browse essences, harvest tables and magic item recipes")]
pub struct Cli {
    /// Workbook with Essence, Harvest Table and Recipes sheets
    #[arg(short, long, global = true, env = "CRAFTING_WORKBOOK")]
    pub workbook: Option<PathBuf>,

    /// Optional text banner shown above the filters
    #[arg(long, global = true, env = "CRAFTING_LOGO")]
    pub logo: Option<PathBuf>,

    /// Log file used while browsing
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse the workbook interactively (default)
    Browse,

    /// Print one filtered view and exit
    Query {
        /// Search text, partial and case-insensitive
        #[arg(short, long, default_value = "")]
        search: String,

        /// Creature type from the recipes sheet
        #[arg(short = 't', long, default_value = ANY_CREATURE)]
        creature_type: String,

        /// Dimension the search text is matched against
        #[arg(short, long, value_enum, default_value_t = ModeArg::MagicItem)]
        mode: ModeArg,

        /// Show the harvest table instead of recipes
        #[arg(long)]
        harvest: bool,

        /// Print JSON instead of text tables
        #[arg(long)]
        json: bool,
    },

    /// List creature type options
    CreatureTypes,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    CreatureType,
    Component,
    MagicItem,
}

impl From<ModeArg> for SearchMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::CreatureType => SearchMode::CreatureType,
            ModeArg::Component => SearchMode::Component,
            ModeArg::MagicItem => SearchMode::MagicItem,
        }
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
