// ============================================================
// Layer 4 — Review Batcher
// ============================================================
// Implements Burn's Batcher trait to stack a Vec<EncodedReview>
// into two tensors:
//
//   indices: [batch_size, max_length]   (Int)
//   targets: [batch_size]               (Int)
//
// Row i of both tensors comes from item i of the input, so the
// order chosen by the ReviewLoader is preserved. All sequences
// are already padded to the same length by the encoder, so
// stacking is a flatten followed by a reshape:
//
//   [r1_t1, ..., r1_tL, r2_t1, ..., rN_tL] → [N, L]
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::encoder::EncodedReview;

// ─── ReviewBatch ──────────────────────────────────────────────────────────────
/// A batch of encoded reviews ready for the classifier.
#[derive(Debug, Clone)]
pub struct ReviewBatch<B: Backend> {
    /// Vocabulary indices — shape: [batch_size, max_length]
    pub indices: Tensor<B, 2, Int>,

    /// Class targets — shape: [batch_size]
    pub targets: Tensor<B, 1, Int>,
}

// ─── ReviewBatcher ────────────────────────────────────────────────────────────
/// Holds the device the batch tensors are created on.
#[derive(Clone, Debug)]
pub struct ReviewBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> ReviewBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<EncodedReview, ReviewBatch<B>> for ReviewBatcher<B> {
    fn batch(&self, items: Vec<EncodedReview>) -> ReviewBatch<B> {
        let batch_size = items.len();
        let max_length = items.first().map_or(0, |r| r.indices.len());

        let flat: Vec<i32> = items
            .iter()
            .flat_map(|r| {
                debug_assert_eq!(r.indices.len(), max_length);
                r.indices.iter().map(|&i| i as i32)
            })
            .collect();

        let targets: Vec<i32> = items
            .iter()
            .map(|r| r.target.class_index() as i32)
            .collect();

        let indices = Tensor::<B, 1, Int>::from_ints(flat.as_slice(), &self.device)
            .reshape([batch_size, max_length]);

        let targets = Tensor::<B, 1, Int>::from_ints(targets.as_slice(), &self.device);

        ReviewBatch { indices, targets }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    use crate::domain::sentiment::Sentiment;

    type TestBackend = NdArray;

    fn review(indices: &[u32], target: Sentiment) -> EncodedReview {
        EncodedReview { indices: indices.to_vec(), target }
    }

    fn ints<const D: usize>(t: Tensor<TestBackend, D, Int>) -> Vec<i64> {
        t.into_data().iter::<i64>().collect()
    }

    #[test]
    fn test_three_by_four_batch_preserves_order() {
        let batcher = ReviewBatcher::<TestBackend>::new(Default::default());
        let batch = batcher.batch(vec![
            review(&[2, 3, 0, 0], Sentiment::Positive),
            review(&[4, 1, 1, 5], Sentiment::Negative),
            review(&[6, 0, 0, 0], Sentiment::Positive),
        ]);

        assert_eq!(batch.indices.dims(), [3, 4]);
        assert_eq!(batch.targets.dims(), [3]);
        assert_eq!(
            ints(batch.indices),
            vec![2, 3, 0, 0, 4, 1, 1, 5, 6, 0, 0, 0]
        );
        assert_eq!(ints(batch.targets), vec![1, 0, 1]);
    }

    #[test]
    fn test_single_item_batch() {
        let batcher = ReviewBatcher::<TestBackend>::new(Default::default());
        let batch = batcher.batch(vec![review(&[7, 8, 9], Sentiment::Negative)]);
        assert_eq!(batch.indices.dims(), [1, 3]);
        assert_eq!(ints(batch.indices), vec![7, 8, 9]);
        assert_eq!(ints(batch.targets), vec![0]);
    }
}
