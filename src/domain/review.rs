// ============================================================
// Layer 3 — ReviewRecord Domain Type
// ============================================================
// The raw input unit: free review text plus a label string.
// Records are read once from a JSON array of objects such as
//
//   [{ "text": "A fine film.", "label": "positive" }, ...]
//
// Extra fields in the JSON objects are ignored by serde.
// The label stays a string here. `ReviewDataset` maps every
// label to a `Sentiment` when the dataset is built and
// rejects the whole file on the first unknown label.

use serde::{Deserialize, Serialize};

use crate::domain::sentiment::{Sentiment, UnknownLabel};

/// One review exactly as stored in the dataset file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// The review body, untouched
    pub text: String,

    /// Expected to be "positive" or "negative"
    pub label: String,
}

impl ReviewRecord {
    /// Create a record from anything string-like
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text:  text.into(),
            label: label.into(),
        }
    }

    /// Parse the label into its sentiment class
    pub fn sentiment(&self) -> Result<Sentiment, UnknownLabel> {
        self.label.parse()
    }
}
