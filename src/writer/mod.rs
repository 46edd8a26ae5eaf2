pub mod json;
pub mod text;

pub use json::*;
pub use text::*;
