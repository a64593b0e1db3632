// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// The model, the optimizer choice, and the epoch loop.
//
//   model.rs     — TextCnn: frozen GloVe embedding → Conv1d →
//                  max-over-time → tanh/dropout/linear head;
//                  explicit ForwardMode for dropout
//
//   optimizer.rs — OptimizerKind: sgd | adam | adamw |
//                  adagrad | rmsprop
//
//   trainer.rs   — train/dev phases per epoch, loss and
//                  accuracy aggregation, TrainingHistory
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)

/// Convolutional text classifier
pub mod model;

/// Gradient-descent variant selection
pub mod optimizer;

/// Training and evaluation loop
pub mod trainer;
