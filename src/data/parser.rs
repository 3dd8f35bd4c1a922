use std::collections::{HashMap, HashSet};
use std::io::Read;

use crate::error::{Result, ViewerError};

/// Tokenized CSV: trimmed header names and the raw cells of every non-blank
/// record. Cells are not interpreted here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub records: Vec<Vec<String>>,
}

/// Decode file bytes as UTF-8, falling back to latin1 (each byte maps to the
/// same Unicode code point).
pub fn decode_text(content: Vec<u8>) -> String {
    String::from_utf8(content).unwrap_or_else(|e| e.into_bytes().iter().map(|&b| b as char).collect())
}

/// Tokenize comma-separated text whose first line is the header row.
///
/// Ragged records are accepted. Only blank lines are skipped: a record of
/// empty cells (a bare `,` line) is kept and becomes a row of missing values.
/// Duplicate header names get a `_1`, `_2`, ... suffix.
pub fn parse_csv<R: Read>(reader: R) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(ViewerError::EmptyFile);
    }

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        records.push(record.iter().map(|s| s.to_string()).collect());
    }

    Ok(RawTable {
        headers: make_unique(headers),
        records,
    })
}

/// Rename repeated header names to `name_1`, `name_2`, ... skipping any
/// suffix that is already taken by another header in the row.
fn make_unique(headers: Vec<String>) -> Vec<String> {
    let reserved: HashSet<String> = headers.iter().filter(|h| !h.is_empty()).cloned().collect();
    let mut used: HashSet<String> = HashSet::new();
    let mut next_suffix: HashMap<String, usize> = HashMap::new();

    headers
        .into_iter()
        .map(|name| {
            if name.is_empty() {
                return name;
            }
            if used.insert(name.clone()) {
                return name;
            }
            let suffix = next_suffix.entry(name.clone()).or_insert(1);
            loop {
                let candidate = format!("{name}_{suffix}");
                *suffix += 1;
                if !reserved.contains(&candidate) && used.insert(candidate.clone()) {
                    return candidate;
                }
            }
        })
        .collect()
}
