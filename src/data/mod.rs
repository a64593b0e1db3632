// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from files on disk to tensor batches:
//
//   glove.6B.50d.txt        train.json / dev.json
//         │                         │
//         ▼                         ▼
//   GloveLoader              ReviewDataset     (Burn Dataset)
//   → EmbeddingTable              │  get(i): tokenize, index,
//   → Vocabulary ─────────► ExampleEncoder     truncate, pad
//                                 │
//                                 ▼
//                           ReviewLoader       shuffle, batch,
//                                 │            prefetch in order
//                                 ▼
//                           ReviewBatcher      (Burn Batcher)
//                                 │
//                                 ▼
//                           training loop
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Typed failures of the pipeline
pub mod error;

/// Latin-1 / UTF-8 file decoding
pub mod text;

/// Token ↔ index mapping with reserved <PAD>/<UNK>
pub mod vocab;

/// GloVe file parsing into table + vocabulary
pub mod embeddings;

/// Penn-Treebank style word tokenizer
pub mod tokenizer;

/// Record → fixed-length indices + target
pub mod encoder;

/// Implements Burn's Dataset trait for reviews
pub mod dataset;

/// Ordered, optionally multi-threaded batch delivery
pub mod loader;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;
