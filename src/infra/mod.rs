// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns used by the training loop and the
// application layer:
//
//   metrics.rs   — accuracy, per-phase accumulation, the
//                  train/dev loss/accuracy history and its
//                  CSV learning-curve writer
//
//   run_store.rs — the run directory: the training config is
//                  written before training and the history
//                  after it
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Training metrics, history, CSV logger
pub mod metrics;

/// Run directory persistence (config + history JSON)
pub mod run_store;
