//! Core of the time-series viewer: dataset normalization, column
//! derivation, plot registry, selection/zoom state and statistics.
//!
//! The egui front end in `main.rs` is only a consumer of this library; every
//! state change goes through [`state::Action`] so it can be driven (and
//! tested) without a window.

pub mod config;
pub mod data;
pub mod error;
pub mod processing;
pub mod state;

pub use config::ViewerConfig;
pub use data::{AxisRange, Dataset, Row};
pub use error::{Result, ViewerError};
pub use processing::statistics::{ColumnStats, Statistics};
pub use state::{Action, AppState, Change, Plot, PlotId, Store};
