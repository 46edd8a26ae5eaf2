pub mod cli;
pub mod config;
pub mod filter;
pub mod logging;
pub mod parser;
pub mod schema;
pub mod session;
pub mod ui;
pub mod view;
pub mod workbook;
pub mod writer;

pub use cli::{Cli, Commands};
pub use filter::{evaluate, CreatureFilter, FilterState, SearchMode};
pub use session::{Event, Session};
pub use ui::{Phase, SilentUi, Ui};
pub use view::View;
