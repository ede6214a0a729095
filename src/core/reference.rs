//! core/reference.rs — Closed-form probe curves.
//!
//! Comparison curves drawn next to the Poisson model, plus the textbook
//! expected-probe formulas for open addressing and chaining.

use serde::{Deserialize, Serialize};

/// Expected probes for a successful chained lookup: `1 + L/2`.
#[inline]
pub fn find_hit(l: f64) -> f64 {
    1.0 + l / 2.0
}

/// Empirical insert-cost approximation: `(1 + 10^(L-1)) / 2`.
#[inline]
pub fn insert_estimate(l: f64) -> f64 {
    (1.0 + 1.0 / 10f64.powf(1.0 - l)) / 2.0
}

/// Collision-resolution strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    QuadraticProbing,
    LinearProbing,
    SeparateChaining,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [
        Strategy::QuadraticProbing,
        Strategy::LinearProbing,
        Strategy::SeparateChaining,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Strategy::QuadraticProbing => "quadratic",
            Strategy::LinearProbing => "linear",
            Strategy::SeparateChaining => "chaining",
        }
    }
}

/// Whether the lookup finds its key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    Hit,
    Miss,
}

impl Outcome {
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Hit => "hit",
            Outcome::Miss => "miss",
        }
    }
}

/// Expected probes per lookup at load factor `l`.
///
/// Open-addressing formulas diverge as `l` approaches 1.
pub fn expected_probes(strategy: Strategy, outcome: Outcome, l: f64) -> f64 {
    let free = 1.0 - l;
    match (strategy, outcome) {
        (Strategy::QuadraticProbing, Outcome::Hit) => 1.0 - free.ln() - l / 2.0,
        (Strategy::QuadraticProbing, Outcome::Miss) => 1.0 / free - l - free.ln(),
        (Strategy::LinearProbing, Outcome::Hit) => (1.0 + 1.0 / free) / 2.0,
        (Strategy::LinearProbing, Outcome::Miss) => (1.0 + 1.0 / (free * free)) / 2.0,
        (Strategy::SeparateChaining, Outcome::Hit) => find_hit(l),
        (Strategy::SeparateChaining, Outcome::Miss) => (-l).exp() + l,
    }
}
