pub mod statistics;

pub use statistics::{compute_stats, ColumnStats, Statistics};
