// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types that name the concepts of the system:
// a raw review record, its sentiment label, and the word
// tokenizer abstraction the encoder is written against.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §6 (Enums), §10 (Traits)

// One labelled movie review as it appears in the JSON files
pub mod review;

// The closed set of sentiment classes
pub mod sentiment;

// Core abstractions (traits) that other layers implement
pub mod traits;
