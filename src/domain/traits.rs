// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The example encoder only needs "something that turns a
// lower-cased string into word tokens". Programming against
// this trait lets the Treebank tokenizer in the data layer be
// replaced (or stubbed out in tests) without touching the
// encoder.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

// ─── WordTokenizer ────────────────────────────────────────────────────────────
/// Splits text into an ordered sequence of word and punctuation tokens.
///
/// Implementations must be `Send + Sync` because the dataset is
/// shared with the data loader's worker threads.
///
/// Implementations:
///   - TreebankTokenizer → Penn-Treebank style word tokenization
pub trait WordTokenizer: Send + Sync {
    /// Tokenize `text`. Callers lower-case the text first.
    fn tokenize(&self, text: &str) -> Vec<String>;
}
