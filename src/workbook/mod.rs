pub mod error;
pub mod locate;
pub mod reader;

pub use error::*;
pub use locate::*;
pub use reader::*;
