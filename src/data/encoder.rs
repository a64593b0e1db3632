// ============================================================
// Layer 4 — Example Encoder
// ============================================================
// Turns one review into the fixed-length integer form the
// model consumes:
//
//   1. lower-case the text
//   2. tokenize into words and punctuation
//   3. token → vocabulary index (unseen → <UNK> = 1)
//   4. keep the first `max_length` indices
//   5. right-pad with <PAD> = 0 up to `max_length`
//   6. label → Sentiment ("positive" → 1, "negative" → 0)
//
// Example with max_length = 5 and vocab {good: 2, movie: 3}:
//
//   "Good movie good" → [2, 3, 2, 0, 0]
//
// Reference: Rust Book §8 (Vectors), §13 (Iterators)

use std::sync::Arc;

use crate::data::vocab::{SpecialToken, Vocabulary};
use crate::domain::{
    review::ReviewRecord,
    sentiment::{Sentiment, UnknownLabel},
    traits::WordTokenizer,
};

/// One review ready for batching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedReview {
    /// Exactly `max_length` vocabulary indices
    pub indices: Vec<u32>,

    /// The target class
    pub target: Sentiment,
}

/// Shared, read-only encoder. Cloning is cheap (two Arcs).
#[derive(Clone)]
pub struct ExampleEncoder {
    vocab:      Arc<Vocabulary>,
    tokenizer:  Arc<dyn WordTokenizer>,
    max_length: usize,
}

impl ExampleEncoder {
    pub fn new(
        vocab:      Arc<Vocabulary>,
        tokenizer:  Arc<dyn WordTokenizer>,
        max_length: usize,
    ) -> Self {
        Self { vocab, tokenizer, max_length }
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Steps 1–5: text → exactly `max_length` indices.
    ///
    /// # Panics
    /// If the produced sequence length differs from `max_length`,
    /// which would be a bug in this function.
    pub fn encode_text(&self, text: &str) -> Vec<u32> {
        let lowered = text.to_lowercase();

        let mut indices: Vec<u32> = self
            .tokenizer
            .tokenize(&lowered)
            .iter()
            .take(self.max_length)
            .map(|token| self.vocab.index_of(token))
            .collect();

        indices.resize(self.max_length, SpecialToken::Pad.index());

        assert_eq!(
            indices.len(),
            self.max_length,
            "encoded sequence must be exactly max_length long"
        );
        indices
    }

    /// Full encoding of a raw record, label included
    pub fn encode(&self, record: &ReviewRecord) -> Result<EncodedReview, UnknownLabel> {
        let target = record.sentiment()?;
        Ok(EncodedReview {
            indices: self.encode_text(&record.text),
            target,
        })
    }
}

impl std::fmt::Debug for ExampleEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExampleEncoder")
            .field("vocab_size", &self.vocab.len())
            .field("max_length", &self.max_length)
            .finish()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::tokenizer::TreebankTokenizer;

    /// {<PAD>: 0, <UNK>: 1, good: 2, movie: 3}
    fn encoder(max_length: usize) -> ExampleEncoder {
        let mut vocab = Vocabulary::new();
        vocab.insert("good");
        vocab.insert("movie");
        ExampleEncoder::new(Arc::new(vocab), Arc::new(TreebankTokenizer::new()), max_length)
    }

    #[test]
    fn test_scenario_good_movie_good() {
        let encoded = encoder(5)
            .encode(&ReviewRecord::new("good movie good", "positive"))
            .unwrap();
        assert_eq!(encoded.indices, vec![2, 3, 2, 0, 0]);
        assert_eq!(encoded.target.class_index(), 1);
    }

    #[test]
    fn test_text_is_lowercased_before_lookup() {
        assert_eq!(encoder(3).encode_text("GOOD Movie"), vec![2, 3, 0]);
    }

    #[test]
    fn test_length_is_always_max_length() {
        let enc = encoder(4);
        for text in ["", "good", "good movie good movie", "good movie good movie good movie"] {
            assert_eq!(enc.encode_text(text).len(), 4, "text: {text:?}");
        }
    }

    #[test]
    fn test_unknown_tokens_map_to_unk() {
        assert_eq!(encoder(4).encode_text("awful movie !"), vec![1, 3, 1, 0]);
    }

    #[test]
    fn test_truncation_keeps_the_first_tokens() {
        // No padding may appear when the text is long enough
        assert_eq!(encoder(3).encode_text("movie good movie good"), vec![3, 2, 3]);
    }

    #[test]
    fn test_padding_follows_real_tokens() {
        let indices = encoder(6).encode_text("bad good");
        assert_eq!(indices, vec![1, 2, 0, 0, 0, 0]);
    }

    #[test]
    fn test_empty_text_is_all_padding() {
        assert_eq!(encoder(3).encode_text(""), vec![0, 0, 0]);
    }

    #[test]
    fn test_unknown_label_fails() {
        let err = encoder(3)
            .encode(&ReviewRecord::new("good", "mixed"))
            .unwrap_err();
        assert_eq!(err, UnknownLabel("mixed".to_string()));
    }

    #[test]
    fn test_decode_recovers_in_vocabulary_tokens() {
        let enc     = encoder(6);
        let indices = enc.encode_text("good movie good");
        assert_eq!(enc.vocab().decode(&indices), vec!["good", "movie", "good"]);
    }
}
