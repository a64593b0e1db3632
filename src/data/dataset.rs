// ============================================================
// Layer 4 — Review Dataset
// ============================================================
// Implements Burn's Dataset trait over a JSON file of reviews.
//
// Records are read and label-checked once, when the dataset is
// built. Encoding (tokenize → index → truncate → pad) happens
// lazily in `get`, so it runs on the ReviewLoader's worker
// threads and nothing encoded is kept in memory. A file with
// no records is rejected: a pass over it would have no batches
// and therefore no mean loss.
//
// Reference: Burn Book §4 (Datasets)

use std::path::Path;

use burn::data::dataset::Dataset;

use crate::data::{
    encoder::{EncodedReview, ExampleEncoder},
    error::DataError,
    text::{read_text, TextEncoding},
};
use crate::domain::{review::ReviewRecord, sentiment::Sentiment};

/// A review whose label has already been validated.
#[derive(Debug, Clone)]
struct LabeledReview {
    text:   String,
    target: Sentiment,
}

#[derive(Debug)]
pub struct ReviewDataset {
    reviews: Vec<LabeledReview>,
    encoder: ExampleEncoder,
}

impl ReviewDataset {
    /// Read a JSON array of {text, label} objects from `path`.
    pub fn load(
        path:     &Path,
        encoding: TextEncoding,
        encoder:  ExampleEncoder,
    ) -> Result<Self, DataError> {
        tracing::info!("Loading dataset '{}'", path.display());
        let json = read_text(path, encoding)?;
        let records: Vec<ReviewRecord> =
            serde_json::from_str(&json).map_err(|source| DataError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        let dataset = Self::from_records(records, encoder, path)?;
        tracing::info!("Loaded {} reviews from '{}'", dataset.len(), path.display());
        Ok(dataset)
    }

    /// Build from in-memory records. Fails on an empty record list
    /// or on the first bad label; `source` only names the origin in
    /// the error.
    pub fn from_records(
        records: Vec<ReviewRecord>,
        encoder: ExampleEncoder,
        source:  &Path,
    ) -> Result<Self, DataError> {
        if records.is_empty() {
            return Err(DataError::EmptyDataset { path: source.to_path_buf() });
        }

        let reviews = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let target = record.sentiment().map_err(|source_err| DataError::Label {
                    path: source.to_path_buf(),
                    index,
                    source: source_err,
                })?;
                Ok(LabeledReview { text: record.text, target })
            })
            .collect::<Result<Vec<_>, DataError>>()?;

        Ok(Self { reviews, encoder })
    }

    /// Every target in dataset order
    pub fn all_targets(&self) -> Vec<u32> {
        self.reviews.iter().map(|r| r.target.class_index()).collect()
    }

    /// How many reviews carry each label: (negative, positive)
    pub fn label_counts(&self) -> (usize, usize) {
        let positive = self
            .reviews
            .iter()
            .filter(|r| r.target == Sentiment::Positive)
            .count();
        (self.reviews.len() - positive, positive)
    }
}

impl Dataset<EncodedReview> for ReviewDataset {
    fn get(&self, index: usize) -> Option<EncodedReview> {
        self.reviews.get(index).map(|review| EncodedReview {
            indices: self.encoder.encode_text(&review.text),
            target:  review.target,
        })
    }

    fn len(&self) -> usize {
        self.reviews.len()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::{io::Write, sync::Arc};

    use crate::data::{tokenizer::TreebankTokenizer, vocab::Vocabulary};

    fn encoder() -> ExampleEncoder {
        let mut vocab = Vocabulary::new();
        vocab.insert("good");
        vocab.insert("bad");
        ExampleEncoder::new(Arc::new(vocab), Arc::new(TreebankTokenizer::new()), 4)
    }

    fn write_json(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_and_get_encodes_on_demand() {
        let file = write_json(
            r#"[{"text": "Good!", "label": "positive"},
                {"text": "bad bad", "label": "negative"}]"#,
        );
        let ds = ReviewDataset::load(file.path(), TextEncoding::Utf8, encoder()).unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.all_targets(), vec![1, 0]);
        assert_eq!(ds.label_counts(), (1, 1));

        let first = ds.get(0).unwrap();
        assert_eq!(first.indices, vec![2, 1, 0, 0]);
        assert_eq!(first.target, Sentiment::Positive);
        assert_eq!(ds.get(1).unwrap().indices, vec![3, 3, 0, 0]);
        assert!(ds.get(2).is_none());
    }

    #[test]
    fn test_unknown_label_aborts_loading() {
        let file = write_json(
            r#"[{"text": "fine", "label": "positive"},
                {"text": "hmm", "label": "neutral"}]"#,
        );
        let err = ReviewDataset::load(file.path(), TextEncoding::Utf8, encoder()).unwrap_err();
        assert!(matches!(err, DataError::Label { index: 1, .. }));
    }

    #[test]
    fn test_empty_dataset_is_rejected() {
        let file = write_json("[]");
        let err = ReviewDataset::load(file.path(), TextEncoding::Utf8, encoder()).unwrap_err();
        assert!(matches!(err, DataError::EmptyDataset { .. }));
        assert!(err.to_string().contains("no reviews"));
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let file = write_json(r#"{"text": "not an array"}"#);
        let err = ReviewDataset::load(file.path(), TextEncoding::Utf8, encoder()).unwrap_err();
        assert!(matches!(err, DataError::Json { .. }));
    }

    #[test]
    fn test_missing_file_is_rejected() {
        let err = ReviewDataset::load(
            Path::new("/no/such/train.json"),
            TextEncoding::Latin1,
            encoder(),
        )
        .unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }

    #[test]
    fn test_latin1_bytes_survive_decoding() {
        // 0xE9 is 'é' in Latin-1 and invalid on its own in UTF-8
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[{\"text\": \"caf\xE9 good\", \"label\": \"positive\"}]").unwrap();
        let ds = ReviewDataset::load(file.path(), TextEncoding::Latin1, encoder()).unwrap();
        assert_eq!(ds.get(0).unwrap().indices, vec![1, 2, 0, 0]);
    }
}
