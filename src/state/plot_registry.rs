use tracing::debug;

use crate::data::axis::default_axis_column;
use crate::state::palette::Color;
use crate::state::plot::{Plot, PlotId};

/// Ordered list of plots plus the one currently focused.
///
/// Every operation addressing a plot by id is a no-op (returning `false`)
/// when the id is unknown.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotRegistry {
    plots: Vec<Plot>,
    focused: Option<PlotId>,
}

impl PlotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plots(&self) -> &[Plot] {
        &self.plots
    }

    pub fn len(&self) -> usize {
        self.plots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plots.is_empty()
    }

    pub fn plot(&self, id: PlotId) -> Option<&Plot> {
        self.plots.iter().find(|p| p.id() == id)
    }

    fn plot_mut(&mut self, id: PlotId) -> Option<&mut Plot> {
        self.plots.iter_mut().find(|p| p.id() == id)
    }

    pub fn focused_id(&self) -> Option<PlotId> {
        self.focused
    }

    pub fn focused_plot(&self) -> Option<&Plot> {
        self.focused.and_then(|id| self.plot(id))
    }

    /// Append a plot titled `Plot <n>` with the default axis for the given
    /// available columns and no value columns.
    pub fn add_plot(&mut self, available: &[String]) -> PlotId {
        let title = format!("Plot {}", self.plots.len() + 1);
        let plot = Plot::new(title, default_axis_column(available));
        let id = plot.id();
        debug!("Adding {} ({})", id, plot.title());
        self.plots.push(plot);
        id
    }

    /// Append an already-built plot.
    pub fn push(&mut self, plot: Plot) -> PlotId {
        let id = plot.id();
        self.plots.push(plot);
        id
    }

    pub fn remove_plot(&mut self, id: PlotId) -> bool {
        let before = self.plots.len();
        self.plots.retain(|p| p.id() != id);
        if self.plots.len() == before {
            return false;
        }
        if self.focused == Some(id) {
            self.focused = None;
        }
        debug!("Removed {}", id);
        true
    }

    /// Focus a plot, or clear focus with `None`. Unknown ids are ignored.
    pub fn set_focused_plot(&mut self, id: Option<PlotId>) -> bool {
        if let Some(id) = id {
            if self.plot(id).is_none() {
                return false;
            }
        }
        if self.focused == id {
            return false;
        }
        self.focused = id;
        true
    }

    pub fn add_value_column(&mut self, id: PlotId, column: &str) -> bool {
        self.plot_mut(id).is_some_and(|p| p.add_value_column(column))
    }

    pub fn remove_value_column(&mut self, id: PlotId, column: &str) -> bool {
        self.plot_mut(id).is_some_and(|p| p.remove_value_column(column))
    }

    pub fn set_title(&mut self, id: PlotId, title: &str) -> bool {
        self.plot_mut(id).is_some_and(|p| p.set_title(title))
    }

    pub fn set_axis_column(&mut self, id: PlotId, column: &str) -> bool {
        self.plot_mut(id).is_some_and(|p| p.set_axis_column(column))
    }

    pub fn set_color(&mut self, id: PlotId, column: &str, color: Color) -> bool {
        self.plot_mut(id).is_some_and(|p| p.set_color(column, color))
    }

    /// Move the plot at `from` to `to`, shifting the others. Out-of-bounds
    /// indices leave the order untouched.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let len = self.plots.len();
        if from >= len || to >= len || from == to {
            return false;
        }
        let plot = self.plots.remove(from);
        self.plots.insert(to, plot);
        true
    }

    /// Repair every plot against the columns of a new dataset. Plots are
    /// never removed, even when left with no value columns.
    pub fn revalidate(&mut self, available: &[String]) -> bool {
        let default_axis = default_axis_column(available);
        let mut changed = false;
        for plot in &mut self.plots {
            if plot.revalidate(available, &default_axis) {
                debug!(
                    "Repaired {}: axis={} values={:?}",
                    plot.id(),
                    plot.axis_column(),
                    plot.value_columns()
                );
                changed = true;
            }
        }
        changed
    }
}
