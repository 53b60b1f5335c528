use std::path::PathBuf;

use thiserror::Error;

/// Failures while building the happiness table.
///
/// `NotFound` and `MissingColumns` are the fatal start-up class: the
/// dashboard shows the message and renders nothing else.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error(
        "csv file not found: please make sure '{}' is in the correct directory",
        .path.display()
    )]
    NotFound { path: PathBuf },

    #[error("reading '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv file is missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("malformed CSV row {row}")]
    Row {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("invalid continent table")]
    ContinentTable(#[from] serde_json::Error),
}
