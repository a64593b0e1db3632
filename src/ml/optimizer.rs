// ============================================================
// Layer 5 — Optimizer Selection
// ============================================================
// The gradient-descent variant is a configuration value. The
// training loop resolves it once into a concrete Burn optimizer
// (see `trainer::train_and_evaluate`) and is otherwise generic
// over `Optimizer<TextCnn<B>, B>`.
//
//   sgd      θ ← θ − lr·g
//   adam     Kingma & Ba (2015)
//   adamw    Adam with decoupled weight decay
//   adagrad  per-parameter lr scaled by accumulated g²
//   rmsprop  per-parameter lr scaled by a moving average of g²

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizerKind {
    #[default]
    Sgd,
    Adam,
    AdamW,
    AdaGrad,
    RmsProp,
}

impl OptimizerKind {
    pub const ALL: [OptimizerKind; 5] = [
        OptimizerKind::Sgd,
        OptimizerKind::Adam,
        OptimizerKind::AdamW,
        OptimizerKind::AdaGrad,
        OptimizerKind::RmsProp,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OptimizerKind::Sgd => "sgd",
            OptimizerKind::Adam => "adam",
            OptimizerKind::AdamW => "adamw",
            OptimizerKind::AdaGrad => "adagrad",
            OptimizerKind::RmsProp => "rmsprop",
        }
    }
}

impl FromStr for OptimizerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|k| k.as_str()).collect();
                format!("unknown optimizer '{s}' (expected one of: {})", names.join(", "))
            })
    }
}

impl fmt::Display for OptimizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
