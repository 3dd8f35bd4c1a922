use tracing::debug;

use crate::config::ViewerConfig;
use crate::data::demo::generate_demo_data;
use crate::data::{default_axis_column, AxisRange, Dataset};
use crate::processing::statistics::{ColumnStats, Statistics};
use crate::state::palette::Color;
use crate::state::plot::{Plot, PlotId};
use crate::state::plot_registry::PlotRegistry;
use crate::state::view::ViewState;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Title of the plot created at startup.
pub const INITIAL_PLOT_TITLE: &str = "General Plot";

/// Every way the state can change. The UI only ever produces these.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetRows(Dataset),
    AddPlot,
    RemovePlot(PlotId),
    SetFocusedPlot(Option<PlotId>),
    AddValueColumn { plot: PlotId, column: String },
    RemoveValueColumn { plot: PlotId, column: String },
    SetTitle { plot: PlotId, title: String },
    SetAxisColumn { plot: PlotId, column: String },
    SetColor { plot: PlotId, column: String, color: Color },
    Reorder { from: usize, to: usize },
    SetSelection(Option<AxisRange>),
    SetZoomDomain(Option<AxisRange>),
    /// Set selection and zoom domain to the same range.
    SetBrush(AxisRange),
    ResetZoom,
}

/// Which part of the state an applied action touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Dataset,
    Plots,
    Focus,
    View,
}

/// The whole viewer state: current table, plots, and selection/zoom.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    dataset: Dataset,
    plots: PlotRegistry,
    view: ViewState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Startup state: the demo dataset (unless disabled) with one focused
    /// plot showing the first few non-axis columns.
    pub fn with_demo(config: &ViewerConfig) -> Self {
        let dataset = if config.load_demo_on_start {
            generate_demo_data(config.demo_rows)
        } else {
            Dataset::empty()
        };
        Self::from_dataset(dataset, config.initial_value_columns)
    }

    pub fn from_dataset(dataset: Dataset, initial_value_columns: usize) -> Self {
        let available = dataset.available_columns();
        let axis = default_axis_column(&available);

        let mut plot = Plot::new(INITIAL_PLOT_TITLE, axis.as_str());
        for column in available
            .iter()
            .filter(|c| **c != axis)
            .take(initial_value_columns)
        {
            plot.add_value_column(column);
        }

        let mut plots = PlotRegistry::new();
        let id = plots.push(plot);
        plots.set_focused_plot(Some(id));

        Self {
            dataset,
            plots,
            view: ViewState::new(),
        }
    }

    /// Apply one action. Returns what changed, or `None` for a no-op.
    pub fn apply(&mut self, action: Action) -> Option<Change> {
        let (changed, change) = match action {
            Action::SetRows(dataset) => {
                self.set_rows(dataset);
                (true, Change::Dataset)
            }
            Action::AddPlot => {
                self.add_plot();
                (true, Change::Plots)
            }
            Action::RemovePlot(id) => (self.plots.remove_plot(id), Change::Plots),
            Action::SetFocusedPlot(id) => (self.plots.set_focused_plot(id), Change::Focus),
            Action::AddValueColumn { plot, column } => {
                (self.plots.add_value_column(plot, &column), Change::Plots)
            }
            Action::RemoveValueColumn { plot, column } => {
                (self.plots.remove_value_column(plot, &column), Change::Plots)
            }
            Action::SetTitle { plot, title } => (self.plots.set_title(plot, &title), Change::Plots),
            Action::SetAxisColumn { plot, column } => {
                (self.plots.set_axis_column(plot, &column), Change::Plots)
            }
            Action::SetColor {
                plot,
                column,
                color,
            } => (self.plots.set_color(plot, &column, color), Change::Plots),
            Action::Reorder { from, to } => (self.plots.reorder(from, to), Change::Plots),
            Action::SetSelection(range) => (self.view.set_selection(range), Change::View),
            Action::SetZoomDomain(range) => (self.view.set_zoom_domain(range), Change::View),
            Action::SetBrush(range) => (self.view.set_brush(range), Change::View),
            Action::ResetZoom => (self.view.reset_zoom(), Change::View),
        };
        changed.then_some(change)
    }

    /// Replace the dataset and repair every plot against its columns.
    pub fn set_rows(&mut self, dataset: Dataset) {
        let available = dataset.available_columns();
        debug!(
            "Replacing dataset: {} rows, available columns {:?}",
            dataset.len(),
            available
        );
        self.dataset = dataset;
        self.plots.revalidate(&available);
    }

    pub fn add_plot(&mut self) -> PlotId {
        let available = self.dataset.available_columns();
        self.plots.add_plot(&available)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn rows(&self) -> &[crate::data::Row] {
        self.dataset.rows()
    }

    pub fn available_columns(&self) -> Vec<String> {
        self.dataset.available_columns()
    }

    pub fn plots(&self) -> &[Plot] {
        self.plots.plots()
    }

    pub fn registry(&self) -> &PlotRegistry {
        &self.plots
    }

    pub fn plot(&self, id: PlotId) -> Option<&Plot> {
        self.plots.plot(id)
    }

    pub fn focused_plot(&self) -> Option<&Plot> {
        self.plots.focused_plot()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn selection(&self) -> Option<AxisRange> {
        self.view.selection()
    }

    pub fn zoom_domain(&self) -> Option<AxisRange> {
        self.view.zoom_domain()
    }

    /// Statistics of each value column of a plot over the whole dataset.
    pub fn global_stats(&self, id: PlotId) -> Option<Vec<ColumnStats>> {
        let plot = self.plot(id)?;
        Some(
            plot.value_columns()
                .iter()
                .map(|column| ColumnStats {
                    column: column.clone(),
                    stats: Statistics::compute(&self.dataset.column_values(column)),
                })
                .collect(),
        )
    }

    /// Statistics of each value column of a plot restricted to rows whose
    /// axis value lies in the current selection. `None` without a selection.
    pub fn range_stats(&self, id: PlotId) -> Option<Vec<ColumnStats>> {
        let plot = self.plot(id)?;
        let range = self.view.selection()?;
        Some(
            plot.value_columns()
                .iter()
                .map(|column| ColumnStats {
                    column: column.clone(),
                    stats: Statistics::compute(&self.dataset.range_values(
                        plot.axis_column(),
                        column,
                        &range,
                    )),
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            vec![("time", Some(0.0)), ("x", Some(5.0)), ("y", Some(1.0))],
            vec![("time", Some(1000.0)), ("x", Some(1.0)), ("y", None)],
            vec![("time", Some(2000.0)), ("x", Some(9.0)), ("y", Some(3.0))],
        ])
    }

    #[test]
    fn test_from_dataset_seeds_general_plot() {
        let state = AppState::from_dataset(dataset(), 2);
        let plot = state.focused_plot().unwrap();
        assert_eq!(plot.title(), INITIAL_PLOT_TITLE);
        assert_eq!(plot.axis_column(), "time");
        assert_eq!(plot.value_columns(), &["x", "y"]);
        assert_eq!(plot.colors().len(), 2);
    }

    #[test]
    fn test_with_demo_respects_config() {
        let config = ViewerConfig {
            load_demo_on_start: false,
            ..Default::default()
        };
        let state = AppState::with_demo(&config);
        assert!(state.rows().is_empty());
        assert_eq!(state.plots().len(), 1);
        assert_eq!(state.plots()[0].axis_column(), "time (s)");

        let state = AppState::with_demo(&ViewerConfig::default());
        assert_eq!(state.rows().len(), 20);
        assert_eq!(state.plots()[0].value_columns(), &["roll_deg", "pitch_deg"]);
    }

    #[test]
    fn test_apply_reports_changes() {
        let mut state = AppState::from_dataset(dataset(), 0);
        let id = state.plots()[0].id();
        let add = Action::AddValueColumn {
            plot: id,
            column: "x".into(),
        };
        assert_eq!(state.apply(add.clone()), Some(Change::Plots));
        assert_eq!(state.apply(add), None);
        assert_eq!(state.apply(Action::SetFocusedPlot(Some(id))), None);
        assert_eq!(state.apply(Action::SetFocusedPlot(None)), Some(Change::Focus));
        assert_eq!(state.apply(Action::ResetZoom), None);
        assert_eq!(state.apply(Action::AddPlot), Some(Change::Plots));
        assert_eq!(state.plots()[1].title(), "Plot 2");
    }

    #[test]
    fn test_global_stats() {
        let state = AppState::from_dataset(dataset(), 2);
        let id = state.plots()[0].id();
        let stats = state.global_stats(id).unwrap();
        assert_eq!(stats.len(), 2);
        let x = stats[0].stats.unwrap();
        assert_eq!((x.start, x.end, x.min, x.max), (5.0, 9.0, 1.0, 9.0));
        let y = stats[1].stats.unwrap();
        assert_eq!(y.count, 2);
    }

    #[test]
    fn test_range_stats_needs_selection() {
        let mut state = AppState::from_dataset(dataset(), 2);
        let id = state.plots()[0].id();
        assert_eq!(state.range_stats(id), None);

        state.apply(Action::SetSelection(Some(AxisRange::new(1000.0, 2000.0))));
        let stats = state.range_stats(id).unwrap();
        let x = stats[0].stats.unwrap();
        assert_eq!((x.count, x.start, x.end), (2, 1.0, 9.0));
        // y has no value at t=1000
        assert_eq!(stats[1].stats.unwrap().count, 1);
    }

    #[test]
    fn test_range_stats_empty_range() {
        let mut state = AppState::from_dataset(dataset(), 1);
        let id = state.plots()[0].id();
        state.apply(Action::SetBrush(AxisRange::new(5000.0, 6000.0)));
        let stats = state.range_stats(id).unwrap();
        assert_eq!(stats, vec![ColumnStats { column: "x".into(), stats: None }]);
    }

    #[test]
    fn test_stats_for_unknown_plot() {
        let state = AppState::from_dataset(dataset(), 1);
        let other = PlotId::next();
        assert_eq!(state.global_stats(other), None);
    }
}
