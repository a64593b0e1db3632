// ============================================================
// Layer 4 — Data Errors
// ============================================================
// Every way the data pipeline can fail before training starts.
// All of them are fatal: the application layer wraps them in
// anyhow and the process exits. Nothing here is retried and no
// bad line or record is skipped.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::sentiment::UnknownLabel;

#[derive(Debug, Error)]
pub enum DataError {
    /// The file is missing or could not be read
    #[error("cannot read '{path}': {source}")]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// UTF-8 decoding was requested but the bytes are not valid UTF-8
    #[error("'{path}' is not valid UTF-8 (byte offset {offset})")]
    Encoding { path: PathBuf, offset: usize },

    /// The dataset file is not a JSON array of {text, label} objects
    #[error("invalid dataset JSON in '{path}': {source}")]
    Json {
        path:   PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An embedding line does not carry exactly `expected` components
    #[error("{path}:{line}: expected {expected} vector components, found {found}")]
    DimensionMismatch {
        path:     PathBuf,
        line:     usize,
        expected: usize,
        found:    usize,
    },

    /// An embedding component is not a floating-point number
    #[error("{path}:{line}: invalid vector component '{value}'")]
    InvalidComponent {
        path:  PathBuf,
        line:  usize,
        value: String,
    },

    /// A token appears twice (or collides with <PAD>/<UNK>)
    #[error("{path}:{line}: duplicate token '{token}'")]
    DuplicateToken {
        path:  PathBuf,
        line:  usize,
        token: String,
    },

    /// The dataset file holds an empty array
    #[error("'{path}' contains no reviews")]
    EmptyDataset { path: PathBuf },

    /// A dataset record carries a label outside {positive, negative}
    #[error("record {index} in '{path}': {source}")]
    Label {
        path:   PathBuf,
        index:  usize,
        #[source]
        source: UnknownLabel,
    },
}
