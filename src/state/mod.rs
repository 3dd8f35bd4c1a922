//! Viewer state: plots, selection/zoom, and the store that owns them.

pub mod app_state;
pub mod palette;
pub mod plot;
pub mod plot_registry;
pub mod store;
pub mod theme;
pub mod view;

pub use app_state::{Action, AppState, Change};
pub use palette::{color_for_index, Color, COLOR_PALETTE};
pub use plot::{Plot, PlotId};
pub use plot_registry::PlotRegistry;
pub use store::{Store, SubscriptionId};
pub use theme::Theme;
pub use view::ViewState;
