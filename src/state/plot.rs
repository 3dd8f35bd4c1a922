use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::state::palette::{color_for_index, Color};

static NEXT_PLOT_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque, process-unique plot identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlotId(u64);

impl PlotId {
    pub fn next() -> Self {
        PlotId(NEXT_PLOT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "plot-{}", self.0)
    }
}

/// One chart: an axis column plus overlaid value columns, each with a color.
///
/// Outside of [`Plot::set_color`], every selected value column has exactly
/// one color and no other column does.
#[derive(Debug, Clone, PartialEq)]
pub struct Plot {
    id: PlotId,
    title: String,
    axis_column: String,
    value_columns: Vec<String>,
    colors: BTreeMap<String, Color>,
}

impl Plot {
    pub fn new(title: impl Into<String>, axis_column: impl Into<String>) -> Self {
        Self {
            id: PlotId::next(),
            title: title.into(),
            axis_column: axis_column.into(),
            value_columns: Vec::new(),
            colors: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> PlotId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn axis_column(&self) -> &str {
        &self.axis_column
    }

    pub fn value_columns(&self) -> &[String] {
        &self.value_columns
    }

    pub fn colors(&self) -> &BTreeMap<String, Color> {
        &self.colors
    }

    pub fn color_for(&self, column: &str) -> Option<Color> {
        self.colors.get(column).copied()
    }

    pub fn has_value_column(&self, column: &str) -> bool {
        self.value_columns.iter().any(|c| c == column)
    }

    /// Append a column, coloring it by its position. Returns `false` if the
    /// column is already selected.
    pub fn add_value_column(&mut self, column: &str) -> bool {
        if self.has_value_column(column) {
            return false;
        }
        let color = color_for_index(self.value_columns.len());
        self.value_columns.push(column.to_string());
        self.colors.insert(column.to_string(), color);
        true
    }

    pub fn remove_value_column(&mut self, column: &str) -> bool {
        let before = self.value_columns.len();
        self.value_columns.retain(|c| c != column);
        let removed_color = self.colors.remove(column).is_some();
        self.value_columns.len() != before || removed_color
    }

    /// Store the trimmed title. Blank titles are ignored.
    pub fn set_title(&mut self, title: &str) -> bool {
        let title = title.trim();
        if title.is_empty() || title == self.title {
            return false;
        }
        self.title = title.to_string();
        true
    }

    pub fn set_axis_column(&mut self, column: &str) -> bool {
        if self.axis_column == column {
            return false;
        }
        self.axis_column = column.to_string();
        true
    }

    /// Upsert a color, whether or not the column is currently selected.
    pub fn set_color(&mut self, column: &str, color: Color) -> bool {
        self.colors.insert(column.to_string(), color) != Some(color)
    }

    /// Repair references after the dataset changed: fall back to
    /// `default_axis` if the axis column is gone, drop value columns that are
    /// no longer available, and drop colors of unselected columns.
    pub fn revalidate(&mut self, available: &[String], default_axis: &str) -> bool {
        let mut changed = false;

        if !available.contains(&self.axis_column) {
            self.axis_column = default_axis.to_string();
            changed = true;
        }

        let before = self.value_columns.len();
        self.value_columns.retain(|c| available.contains(c));
        changed |= self.value_columns.len() != before;

        let selected = &self.value_columns;
        let colors_before = self.colors.len();
        self.colors.retain(|c, _| selected.contains(c));
        changed |= self.colors.len() != colors_before;

        changed
    }
}
