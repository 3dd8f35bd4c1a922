//! Error types for the viewer
//!
//! Only the load paths (CSV upload, config file) can fail. Missing cells,
//! stale column references and empty statistics are modelled with `Option`
//! and silent repair instead.

use thiserror::Error;

/// Main error type for viewer operations
#[derive(Error, Debug)]
pub enum ViewerError {
    /// File I/O error
    #[error("Failed to access file: {0}")]
    FileIo(#[from] std::io::Error),

    /// CSV tokenizer error
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration file could not be decoded
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    /// File extension other than `.csv`
    #[error("Unsupported file format: {extension}")]
    UnsupportedFormat { extension: String },

    /// No content or no header row
    #[error("File is empty or has no header row")]
    EmptyFile,

    /// Header present but not a single data row
    #[error("File has a header but no data rows")]
    NoRows,
}

/// Result type alias for viewer operations
pub type Result<T> = std::result::Result<T, ViewerError>;

impl ViewerError {
    /// Message suitable for the upload notification
    pub fn user_message(&self) -> String {
        match self {
            ViewerError::FileIo(e) => format!("File error: {}", e),
            ViewerError::Csv(e) => format!("Failed to parse CSV file: {}", e),
            ViewerError::Config(e) => format!("Config error: {}", e),
            ViewerError::UnsupportedFormat { extension } => {
                if extension.is_empty() {
                    "Only .csv files are supported".to_string()
                } else {
                    format!("Unsupported file format: '.{}'", extension)
                }
            }
            ViewerError::EmptyFile => "The file is empty".to_string(),
            ViewerError::NoRows => "The file contains no data rows".to_string(),
        }
    }

    /// Short title for the notification
    pub fn title(&self) -> &'static str {
        match self {
            ViewerError::FileIo(_) => "File Error",
            ViewerError::Csv(_) => "Parse Error",
            ViewerError::Config(_) => "Configuration Error",
            ViewerError::UnsupportedFormat { .. } => "Unsupported Format",
            ViewerError::EmptyFile => "Empty File",
            ViewerError::NoRows => "No Data",
        }
    }
}
