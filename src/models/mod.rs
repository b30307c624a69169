pub mod history;
pub mod item;
pub mod report;
pub mod section;

pub use history::*;
pub use item::*;
pub use report::*;
pub use section::*;

/// Placeholder shown where a value could not be resolved.
pub const NO_VALUE: &str = "-";
