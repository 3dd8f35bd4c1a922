/// Inclusive range in axis-value units. Used both for the brushed selection
/// and for the zoom domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub start: f64,
    pub end: f64,
}

impl AxisRange {
    /// Build a range from two endpoints in either order.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// `start <= v <= end`, both ends included.
    pub fn contains(&self, v: f64) -> bool {
        self.start <= v && v <= self.end
    }

    pub fn span(&self) -> f64 {
        self.end - self.start
    }
}

/// One record of the table. Values are positional and aligned with
/// [`Dataset::columns`]; `None` marks a missing or non-numeric cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    values: Vec<Option<f64>>,
}

impl Row {
    pub fn new(values: Vec<Option<f64>>) -> Self {
        Self { values }
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }
}

/// Ordered rows sharing an explicit column list.
///
/// A dataset is replaced wholesale on every upload and never patched, so it
/// has no mutating API beyond construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Rows shorter than the column list are padded with `None`, longer rows
    /// are truncated.
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.values.resize(width, None);
                row
            })
            .collect();
        Self { columns, rows }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a dataset from keyed records. Column order is the order in which
    /// names are first seen; a name missing from a record is `None` there.
    pub fn from_records<I, R, S>(records: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = (S, Option<f64>)>,
        S: Into<String>,
    {
        let mut columns: Vec<String> = Vec::new();
        let mut keyed: Vec<Vec<(usize, Option<f64>)>> = Vec::new();

        for record in records {
            let mut cells = Vec::new();
            for (name, value) in record {
                let name = name.into();
                let idx = match columns.iter().position(|c| *c == name) {
                    Some(idx) => idx,
                    None => {
                        columns.push(name);
                        columns.len() - 1
                    }
                };
                cells.push((idx, value));
            }
            keyed.push(cells);
        }

        let width = columns.len();
        let rows = keyed
            .into_iter()
            .map(|cells| {
                let mut values = vec![None; width];
                for (idx, value) in cells {
                    values[idx] = value;
                }
                Row::new(values)
            })
            .collect();

        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Columns usable for plotting: present on the first row with a defined
    /// value and a name that is not blank. Only row 0 is inspected.
    pub fn available_columns(&self) -> Vec<String> {
        let Some(first) = self.rows.first() else {
            return Vec::new();
        };
        self.columns
            .iter()
            .enumerate()
            .filter(|(idx, name)| !name.trim().is_empty() && first.get(*idx).is_some())
            .map(|(_, name)| name.clone())
            .collect()
    }

    pub fn value(&self, row: usize, column: &str) -> Option<f64> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)
    }

    /// Defined values of `column` in row order.
    pub fn column_values(&self, column: &str) -> Vec<f64> {
        let Some(idx) = self.column_index(column) else {
            return Vec::new();
        };
        self.rows.iter().filter_map(|row| row.get(idx)).collect()
    }

    /// Defined values of `column` on rows whose `axis` value is defined and
    /// falls inside `range` (inclusive).
    pub fn range_values(&self, axis: &str, column: &str, range: &AxisRange) -> Vec<f64> {
        let (Some(axis_idx), Some(col_idx)) = (self.column_index(axis), self.column_index(column))
        else {
            return Vec::new();
        };
        self.rows
            .iter()
            .filter(|row| row.get(axis_idx).is_some_and(|v| range.contains(v)))
            .filter_map(|row| row.get(col_idx))
            .collect()
    }

    /// `(x, y)` pairs for rows where both the axis and the column are defined.
    pub fn series_points(&self, axis: &str, column: &str) -> Vec<[f64; 2]> {
        let (Some(axis_idx), Some(col_idx)) = (self.column_index(axis), self.column_index(column))
        else {
            return Vec::new();
        };
        self.rows
            .iter()
            .filter_map(|row| Some([row.get(axis_idx)?, row.get(col_idx)?]))
            .collect()
    }

    /// Smallest and largest defined value of the axis column.
    pub fn axis_extent(&self, axis: &str) -> Option<AxisRange> {
        let values = self.column_values(axis);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if min.is_finite() && max.is_finite() {
            Some(AxisRange::new(min, max))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::from_records(vec![
            vec![("t", Some(0.0)), ("x", Some(1.0)), ("y", Some(10.0))],
            vec![("t", Some(1.0)), ("x", None), ("y", Some(20.0))],
            vec![("t", Some(2.0)), ("x", Some(3.0)), ("y", Some(30.0))],
            vec![("t", None), ("x", Some(4.0)), ("y", Some(40.0))],
        ])
    }

    #[test]
    fn test_available_columns_empty_dataset() {
        assert!(Dataset::empty().available_columns().is_empty());
    }

    #[test]
    fn test_available_columns_skips_undefined_on_first_row() {
        let ds = Dataset::from_records(vec![vec![("a", Some(1.0)), ("b", None)]]);
        assert_eq!(ds.available_columns(), vec!["a"]);
    }

    #[test]
    fn test_available_columns_only_checks_first_row() {
        let ds = Dataset::from_records(vec![
            vec![("a", Some(1.0)), ("late", None)],
            vec![("a", Some(2.0)), ("late", Some(5.0))],
        ]);
        assert_eq!(ds.available_columns(), vec!["a"]);
    }

    #[test]
    fn test_available_columns_skips_blank_names() {
        let ds = Dataset::new(
            vec!["a".to_string(), "  ".to_string()],
            vec![Row::new(vec![Some(1.0), Some(2.0)])],
        );
        assert_eq!(ds.available_columns(), vec!["a"]);
    }

    #[test]
    fn test_new_pads_short_rows() {
        let ds = Dataset::new(
            vec!["a".to_string(), "b".to_string()],
            vec![Row::new(vec![Some(1.0)]), Row::new(vec![Some(1.0), Some(2.0), Some(3.0)])],
        );
        assert_eq!(ds.rows()[0].values(), &[Some(1.0), None]);
        assert_eq!(ds.rows()[1].values().len(), 2);
    }

    #[test]
    fn test_column_values_skip_missing() {
        let ds = sample();
        assert_eq!(ds.column_values("x"), vec![1.0, 3.0, 4.0]);
        assert!(ds.column_values("missing").is_empty());
        assert_eq!(ds.value(2, "y"), Some(30.0));
        assert_eq!(ds.value(1, "x"), None);
    }

    #[test]
    fn test_range_values_inclusive_bounds() {
        let ds = sample();
        let range = AxisRange::new(0.0, 2.0);
        assert_eq!(ds.range_values("t", "y", &range), vec![10.0, 20.0, 30.0]);

        let range = AxisRange::new(1.0, 1.0);
        assert_eq!(ds.range_values("t", "y", &range), vec![20.0]);
    }

    #[test]
    fn test_range_values_excludes_undefined_axis() {
        let ds = sample();
        let range = AxisRange::new(f64::MIN, f64::MAX);
        // row 3 has no axis value
        assert_eq!(ds.range_values("t", "y", &range), vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_series_points_and_extent() {
        let ds = sample();
        assert_eq!(ds.series_points("t", "x"), vec![[0.0, 1.0], [2.0, 3.0]]);
        assert_eq!(ds.axis_extent("t"), Some(AxisRange::new(0.0, 2.0)));
        assert_eq!(Dataset::empty().axis_extent("t"), None);
    }

    #[test]
    fn test_axis_range_normalizes_order() {
        let r = AxisRange::new(5.0, 1.0);
        assert_eq!(r.start, 1.0);
        assert_eq!(r.end, 5.0);
        assert!(r.contains(1.0) && r.contains(5.0));
        assert!(!r.contains(5.000001));
        assert_eq!(r.span(), 4.0);
    }
}
