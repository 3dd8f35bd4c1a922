//! Brushed selection and zoom domain, shared by every plot.

use crate::data::AxisRange;

/// What the user brushed (`selection`) and what is currently displayed
/// (`zoom`). Both are in axis-value units and independent of each other.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewState {
    selection: Option<AxisRange>,
    zoom: Option<AxisRange>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> Option<AxisRange> {
        self.selection
    }

    pub fn zoom_domain(&self) -> Option<AxisRange> {
        self.zoom
    }

    pub fn set_selection(&mut self, selection: Option<AxisRange>) -> bool {
        let changed = self.selection != selection;
        self.selection = selection;
        changed
    }

    pub fn set_zoom_domain(&mut self, zoom: Option<AxisRange>) -> bool {
        let changed = self.zoom != zoom;
        self.zoom = zoom;
        changed
    }

    /// End of a brush gesture: select the range and zoom to it.
    pub fn set_brush(&mut self, range: AxisRange) -> bool {
        let selected = self.set_selection(Some(range));
        let zoomed = self.set_zoom_domain(Some(range));
        selected || zoomed
    }

    /// Clear both the selection and the zoom domain.
    pub fn reset_zoom(&mut self) -> bool {
        let selected = self.set_selection(None);
        let zoomed = self.set_zoom_domain(None);
        selected || zoomed
    }
}
