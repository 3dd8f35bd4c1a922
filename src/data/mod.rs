pub mod axis;
pub mod dataset;
pub mod datetime;
pub mod demo;
pub mod loader;
pub mod parser;

pub use axis::{default_axis_column, looks_like_axis_column, FALLBACK_AXIS_COLUMN};
pub use dataset::{AxisRange, Dataset, Row};
pub use loader::LoadOptions;
