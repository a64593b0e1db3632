// ============================================================
// Layer 4 — Vocabulary Index
// ============================================================
// Maps a token string to its row in the embedding table and
// back again. Two rows are reserved before any file-derived
// token is added:
//
//   index 0 → <PAD>   (right-padding of short reviews)
//   index 1 → <UNK>   (any token not in the table)
//
// Tokens are bound to indices in insertion order, so the
// vocabulary and the embedding table stay aligned row by row.
// Once built it is shared read-only behind an Arc.
//
// Reference: Rust Book §8 (HashMap)

use std::collections::HashMap;

/// The two reserved vocabulary entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialToken {
    Pad,
    Unk,
}

impl SpecialToken {
    pub const ALL: [SpecialToken; 2] = [SpecialToken::Pad, SpecialToken::Unk];

    pub const fn index(self) -> u32 {
        match self {
            SpecialToken::Pad => 0,
            SpecialToken::Unk => 1,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            SpecialToken::Pad => "<PAD>",
            SpecialToken::Unk => "<UNK>",
        }
    }
}

/// Bijective token ↔ index mapping with <PAD> and <UNK> pre-bound.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    token_to_index: HashMap<String, u32>,
    index_to_token: Vec<String>,
}

impl Vocabulary {
    /// A vocabulary holding only the reserved tokens
    pub fn new() -> Self {
        let mut vocab = Self {
            token_to_index: HashMap::new(),
            index_to_token: Vec::new(),
        };
        for special in SpecialToken::ALL {
            let index = vocab.insert(special.as_str());
            debug_assert_eq!(index, Some(special.index()));
        }
        vocab
    }

    /// Bind `token` to the next free index.
    /// Returns `None` (and changes nothing) if the token is already bound.
    pub fn insert(&mut self, token: &str) -> Option<u32> {
        if self.token_to_index.contains_key(token) {
            return None;
        }
        let index = self.index_to_token.len() as u32;
        self.token_to_index.insert(token.to_string(), index);
        self.index_to_token.push(token.to_string());
        Some(index)
    }

    /// Exact lookup; `None` for out-of-vocabulary tokens
    pub fn get(&self, token: &str) -> Option<u32> {
        self.token_to_index.get(token).copied()
    }

    /// Lookup falling back to the <UNK> index
    pub fn index_of(&self, token: &str) -> u32 {
        self.get(token).unwrap_or(SpecialToken::Unk.index())
    }

    /// Reverse lookup
    pub fn token(&self, index: u32) -> Option<&str> {
        self.index_to_token.get(index as usize).map(String::as_str)
    }

    /// Map an encoded sequence back to tokens, dropping padding.
    /// Out-of-vocabulary tokens come back as "<UNK>".
    pub fn decode(&self, indices: &[u32]) -> Vec<&str> {
        indices
            .iter()
            .filter(|&&i| i != SpecialToken::Pad.index())
            .filter_map(|&i| self.token(i))
            .collect()
    }

    /// Number of entries, reserved tokens included
    pub fn len(&self) -> usize {
        self.index_to_token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index_to_token.is_empty()
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new()
    }
}
