use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::data::axis::looks_like_axis_column;
use crate::data::dataset::{Dataset, Row};
use crate::data::parser::{self, RawTable};
use crate::error::{Result, ViewerError};

/// Milliseconds per second, applied to time-like columns on load.
pub const SECONDS_TO_MS: f64 = 1000.0;

/// Knobs for turning raw CSV cells into a [`Dataset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Scale time-like columns from seconds to milliseconds.
    pub convert_seconds_to_ms: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            convert_seconds_to_ms: true,
        }
    }
}

/// Load a `.csv` file from disk.
pub fn load_file(path: &Path, options: &LoadOptions) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    if ext != "csv" {
        return Err(ViewerError::UnsupportedFormat { extension: ext });
    }

    let content = std::fs::read(path)?;
    let text = parser::decode_text(content);
    let dataset = parse_csv_str(&text, options)?;
    info!(
        "Loaded {} rows x {} columns from {:?}",
        dataset.len(),
        dataset.columns().len(),
        path
    );
    Ok(dataset)
}

pub fn parse_csv_str(text: &str, options: &LoadOptions) -> Result<Dataset> {
    load_csv_reader(text.as_bytes(), options)
}

pub fn load_csv_reader<R: Read>(reader: R, options: &LoadOptions) -> Result<Dataset> {
    let raw = parser::parse_csv(reader)?;
    normalize(raw, options)
}

/// Turn tokenized cells into numeric rows.
///
/// Blank header names are dropped, unparsable or non-finite cells become
/// missing values, and time-like columns are optionally scaled to ms.
pub fn normalize(raw: RawTable, options: &LoadOptions) -> Result<Dataset> {
    if raw.records.is_empty() {
        return Err(ViewerError::NoRows);
    }

    let kept: Vec<(usize, String)> = raw
        .headers
        .iter()
        .enumerate()
        .filter(|(_, name)| !name.trim().is_empty())
        .map(|(idx, name)| (idx, name.clone()))
        .collect();
    let scale: Vec<f64> = kept
        .iter()
        .map(|(_, name)| {
            if options.convert_seconds_to_ms && looks_like_axis_column(name) {
                SECONDS_TO_MS
            } else {
                1.0
            }
        })
        .collect();

    let rows: Vec<Row> = raw
        .records
        .iter()
        .map(|record| {
            let values = kept
                .iter()
                .zip(&scale)
                .map(|((idx, _), factor)| {
                    record
                        .get(*idx)
                        .and_then(|cell| parse_cell(cell))
                        .map(|v| v * factor)
                })
                .collect();
            Row::new(values)
        })
        .collect();

    let columns: Vec<String> = kept.into_iter().map(|(_, name)| name).collect();
    debug!("Normalized {} records into columns {:?}", rows.len(), columns);
    Ok(Dataset::new(columns, rows))
}

fn parse_cell(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
