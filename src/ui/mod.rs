pub mod channel_list;
pub mod plot_panel;
pub mod stats_panel;
