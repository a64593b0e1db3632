// ============================================================
// Layer 3 — Sentiment Labels
// ============================================================
// The two target classes and their fixed integer encoding:
//
//   "negative" → Negative → 0
//   "positive" → Positive → 1
//
// Any other label string is rejected with `UnknownLabel`.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of sentiment classes the classifier predicts
pub const NUM_CLASSES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Negative,
    Positive,
}

/// Returned when a label string is not one of the two known classes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown label '{0}' (expected 'positive' or 'negative')")]
pub struct UnknownLabel(pub String);

impl Sentiment {
    /// The integer target used by the loss function
    pub fn class_index(self) -> u32 {
        match self {
            Sentiment::Negative => 0,
            Sentiment::Positive => 1,
        }
    }

    /// Inverse of `class_index`; `None` outside `0..NUM_CLASSES`
    pub fn from_class_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(Sentiment::Negative),
            1 => Some(Sentiment::Positive),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Negative => "negative",
            Sentiment::Positive => "positive",
        }
    }
}

impl FromStr for Sentiment {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            other => Err(UnknownLabel(other.to_string())),
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_mapping() {
        assert_eq!("positive".parse::<Sentiment>().unwrap().class_index(), 1);
        assert_eq!("negative".parse::<Sentiment>().unwrap().class_index(), 0);
    }

    #[test]
    fn test_unknown_label_is_rejected() {
        let err = "neutral".parse::<Sentiment>().unwrap_err();
        assert_eq!(err, UnknownLabel("neutral".to_string()));
        // Matching is exact, not case-insensitive
        assert!("Positive".parse::<Sentiment>().is_err());
    }

    #[test]
    fn test_class_index_round_trip() {
        for s in [Sentiment::Negative, Sentiment::Positive] {
            assert_eq!(Sentiment::from_class_index(s.class_index()), Some(s));
        }
        assert_eq!(Sentiment::from_class_index(NUM_CLASSES as u32), None);
    }
}
