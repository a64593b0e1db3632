// ============================================================
// Layer 4 — Review Loader
// ============================================================
// Turns a ReviewDataset into batches of encoded reviews, one
// `Pass` per epoch.
//
//   1. Plan the pass: every dataset index, in dataset order
//      (dev) or reshuffled over the WHOLE dataset (train), cut
//      into consecutive chunks of `batch_size`. Only the last
//      chunk can be short.
//   2. Encode: with `num_workers == 0` lazily on the consuming
//      thread; otherwise worker w encodes chunks w, w+N, w+2N,
//      ... and pushes them into its own bounded channel.
//   3. Deliver: chunk k is read from worker (k mod N), so chunks
//      arrive in plan order whatever the threads do.
//
// Workers only prefetch; they never decide batch order or
// batch contents.
//
// Reference: Rust Book §16 (Fearless Concurrency, channels)

use std::{
    panic,
    sync::{mpsc, Arc},
    thread::{self, JoinHandle},
    vec,
};

use burn::data::dataset::Dataset;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::data::{dataset::ReviewDataset, encoder::EncodedReview};

/// Encoded batches each worker may hold ahead of the consumer
const PREFETCH_PER_WORKER: usize = 2;

/// The order in which one pass visits the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOrder {
    /// Dataset order, identical on every pass
    Sequential,
    /// A fresh permutation of the whole dataset on every pass
    Shuffled { seed: u64 },
}

pub struct ReviewLoader {
    dataset:     Arc<ReviewDataset>,
    batch_size:  usize,
    num_workers: usize,
    order:       BatchOrder,
    rng:         StdRng,
}

impl ReviewLoader {
    pub fn new(dataset: ReviewDataset, batch_size: usize, order: BatchOrder) -> Self {
        assert!(batch_size >= 1, "batch_size must be at least 1");
        let seed = match order {
            BatchOrder::Shuffled { seed } => seed,
            BatchOrder::Sequential => 0,
        };
        Self {
            dataset: Arc::new(dataset),
            batch_size,
            num_workers: 0,
            order,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Encode on `num_workers` background threads (0 = consuming thread)
    pub fn with_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = num_workers;
        self
    }

    /// Batches per pass: ceil(items / batch_size)
    pub fn num_batches(&self) -> usize {
        self.dataset.len().div_ceil(self.batch_size)
    }

    /// Index chunks for the next pass. Advances the shuffle state.
    fn plan(&mut self) -> Vec<Vec<usize>> {
        let mut indices: Vec<usize> = (0..self.dataset.len()).collect();
        if let BatchOrder::Shuffled { .. } = self.order {
            indices.shuffle(&mut self.rng);
        }
        indices.chunks(self.batch_size).map(<[usize]>::to_vec).collect()
    }

    /// Start the next pass over the dataset.
    pub fn pass(&mut self) -> Pass {
        let plan = self.plan();
        let total = plan.len();

        if self.num_workers == 0 || total <= 1 {
            return Pass {
                source: Source::Inline {
                    dataset: Arc::clone(&self.dataset),
                    chunks:  plan.into_iter(),
                },
                next: 0,
                total,
            };
        }

        let workers = self.num_workers.min(total);
        let plan = Arc::new(plan);
        let mut receivers = Vec::with_capacity(workers);
        let mut handles   = Vec::with_capacity(workers);

        for w in 0..workers {
            let (tx, rx) = mpsc::sync_channel(PREFETCH_PER_WORKER);
            let dataset = Arc::clone(&self.dataset);
            let plan    = Arc::clone(&plan);
            handles.push(thread::spawn(move || {
                for chunk in plan.iter().skip(w).step_by(workers) {
                    // The pass was dropped: stop quietly.
                    if tx.send(encode_chunk(&dataset, chunk)).is_err() {
                        return;
                    }
                }
            }));
            receivers.push(rx);
        }

        Pass {
            source: Source::Workers { receivers, handles },
            next: 0,
            total,
        }
    }
}

fn encode_chunk(dataset: &ReviewDataset, chunk: &[usize]) -> Vec<EncodedReview> {
    chunk.iter().filter_map(|&i| dataset.get(i)).collect()
}

enum Source {
    Inline {
        dataset: Arc<ReviewDataset>,
        chunks:  vec::IntoIter<Vec<usize>>,
    },
    Workers {
        receivers: Vec<mpsc::Receiver<Vec<EncodedReview>>>,
        handles:   Vec<JoinHandle<()>>,
    },
}

/// One pass over the dataset: yields each batch's encoded reviews in
/// plan order. Dropping it early stops and joins the workers.
pub struct Pass {
    source: Source,
    next:   usize,
    total:  usize,
}

impl Iterator for Pass {
    type Item = Vec<EncodedReview>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.total {
            return None;
        }
        let k = self.next;
        self.next += 1;

        match &mut self.source {
            Source::Inline { dataset, chunks } => {
                chunks.next().map(|chunk| encode_chunk(dataset, &chunk))
            }
            // Err only if the worker died; Drop re-raises its panic.
            Source::Workers { receivers, .. } => receivers[k % receivers.len()].recv().ok(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.total - self.next;
        (0, Some(left))
    }
}

impl Drop for Pass {
    fn drop(&mut self) {
        if let Source::Workers { receivers, handles } = &mut self.source {
            // Closing the channels unblocks any worker waiting in `send`.
            receivers.clear();
            for handle in handles.drain(..) {
                if let Err(payload) = handle.join() {
                    if !thread::panicking() {
                        panic::resume_unwind(payload);
                    }
                }
            }
        }
    }
}
