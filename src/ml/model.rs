// ============================================================
// Layer 5 — TextCnn Model
// ============================================================
// A single-width version of Kim's CNN for sentence classification:
//
//   indices   [B, L]            Int
//   embedding [B, L, D]         frozen GloVe rows
//   swap      [B, D, L]         channels first for Conv1d
//   conv      [B, H, L-k+1]     Conv1d(D → H, kernel k)
//   max-pool  [B, H]            max over the whole time axis
//   head      [B, n_class]      tanh → dropout → Linear(H→H)
//                               → tanh → dropout → Linear(H→n_class)
//
// Predictions are argmax over the class axis.
//
// Reference: Kim (2014) Convolutional Neural Networks for
//            Sentence Classification
//            Burn Book §3 (Building Blocks)

use burn::{
    module::{Param, ParamId},
    nn::{
        conv::{Conv1d, Conv1dConfig},
        loss::CrossEntropyLossConfig,
        Dropout, DropoutConfig,
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::activation::tanh,
};

use crate::data::{batcher::ReviewBatch, embeddings::EmbeddingTable};
use crate::domain::sentiment::NUM_CLASSES;

/// Whether dropout is active for a forward pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardMode {
    Train,
    Eval,
}

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize.
#[derive(Config, Debug)]
pub struct TextCnnConfig {
    pub vocab_size:    usize,
    pub embedding_dim: usize,
    pub hidden_size:   usize,
    pub kernel_size:   usize,
    #[config(default = 2)]
    pub n_class:       usize,
    #[config(default = 0.2)]
    pub dropout:       f64,
}

impl TextCnnConfig {
    /// Config whose vocabulary and embedding sizes match `table`
    pub fn for_table(table: &EmbeddingTable, hidden_size: usize, kernel_size: usize) -> Self {
        Self::new(table.rows(), table.dim(), hidden_size, kernel_size).with_n_class(NUM_CLASSES)
    }

    /// Build the model with the embedding rows copied from `table`.
    /// The embedding weight is registered without `require_grad`, so
    /// backward passes produce no gradient for it and optimizers skip it.
    pub fn init<B: Backend>(&self, table: &EmbeddingTable, device: &B::Device) -> TextCnn<B> {
        assert_eq!(
            (table.rows(), table.dim()),
            (self.vocab_size, self.embedding_dim),
            "embedding table shape must match the model config"
        );

        let weights = Tensor::<B, 1>::from_floats(table.values(), device)
            .reshape([self.vocab_size, self.embedding_dim]);
        let mut embedding = EmbeddingConfig::new(self.vocab_size, self.embedding_dim).init(device);
        embedding.weight = Param::initialized(ParamId::new(), weights);

        let conv = Conv1dConfig::new(self.embedding_dim, self.hidden_size, self.kernel_size)
            .init(device);

        TextCnn {
            embedding,
            conv,
            hidden:  LinearConfig::new(self.hidden_size, self.hidden_size).init(device),
            output:  LinearConfig::new(self.hidden_size, self.n_class).init(device),
            dropout: DropoutConfig::new(self.dropout).init(),
        }
    }
}

#[derive(Module, Debug)]
pub struct TextCnn<B: Backend> {
    pub embedding: Embedding<B>,
    pub conv:      Conv1d<B>,
    pub hidden:    Linear<B>,
    pub output:    Linear<B>,
    pub dropout:   Dropout,
}

pub struct ClassifierOutput<B: Backend> {
    /// Unnormalised class scores — [batch, n_class]
    pub logits:      Tensor<B, 2>,
    /// argmax of the logits — [batch]
    pub predictions: Tensor<B, 1, Int>,
}

impl<B: Backend> TextCnn<B> {
    /// indices: [batch, max_length] → logits [batch, n_class], predictions [batch]
    pub fn forward(&self, indices: Tensor<B, 2, Int>, mode: ForwardMode) -> ClassifierOutput<B> {
        let embedded = self.embedding.forward(indices); // [B, L, D]
        let x        = embedded.swap_dims(1, 2);        // [B, D, L]

        let conv = self.conv.forward(x);                // [B, H, L-k+1]
        let [batch_size, hidden, _] = conv.dims();
        let pooled = conv.max_dim(2).reshape([batch_size, hidden]);

        let x = self.maybe_dropout(tanh(pooled), mode);
        let x = self.hidden.forward(x);
        let x = self.maybe_dropout(tanh(x), mode);
        let logits = self.output.forward(x);

        let predictions = logits.clone().argmax(1).flatten::<1>(0, 1);
        ClassifierOutput { logits, predictions }
    }

    /// Forward pass plus mean cross-entropy against the batch targets
    pub fn forward_loss(
        &self,
        batch: ReviewBatch<B>,
        mode:  ForwardMode,
    ) -> (Tensor<B, 1>, ClassifierOutput<B>) {
        let output = self.forward(batch.indices, mode);
        let loss = CrossEntropyLossConfig::new()
            .init(&output.logits.device())
            .forward(output.logits.clone(), batch.targets);
        (loss, output)
    }

    fn maybe_dropout<const D: usize>(&self, x: Tensor<B, D>, mode: ForwardMode) -> Tensor<B, D> {
        match mode {
            ForwardMode::Train => self.dropout.forward(x),
            ForwardMode::Eval => x,
        }
    }
}
