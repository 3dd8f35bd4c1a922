use chrono::{DateTime, Utc};

use crate::data::axis::looks_like_axis_column;

/// Format a millisecond timestamp as a clock time (UTC). Shows milliseconds
/// only when the value has a sub-second component.
pub fn format_time_ms(ms: f64) -> String {
    if !ms.is_finite() {
        return format!("{ms}");
    }
    let whole = ms.round() as i64;
    match DateTime::<Utc>::from_timestamp_millis(whole) {
        Some(dt) => {
            if whole % 1000 == 0 {
                dt.format("%H:%M:%S").to_string()
            } else {
                dt.format("%H:%M:%S%.3f").to_string()
            }
        }
        None => format!("{ms:.3}"),
    }
}

/// Tick/tooltip label for a value on the given axis column: clock time for
/// time-like axes, two decimals otherwise.
pub fn format_axis_value(axis: &str, value: f64) -> String {
    if looks_like_axis_column(axis) {
        format_time_ms(value)
    } else {
        format!("{value:.2}")
    }
}
