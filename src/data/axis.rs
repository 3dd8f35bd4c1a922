/// Axis column used when a dataset offers no columns at all.
pub const FALLBACK_AXIS_COLUMN: &str = "time (s)";

/// Guess whether a column holds the horizontal axis (time or sample index).
/// Matches `time` anywhere in the name, case-insensitive, or the exact name `t`.
pub fn looks_like_axis_column(name: &str) -> bool {
    name.to_lowercase().contains("time") || name == "t"
}

/// First time-like column, else the first column, else
/// [`FALLBACK_AXIS_COLUMN`].
pub fn default_axis_column(columns: &[String]) -> String {
    columns
        .iter()
        .find(|c| looks_like_axis_column(c))
        .or_else(|| columns.first())
        .cloned()
        .unwrap_or_else(|| FALLBACK_AXIS_COLUMN.to_string())
}
