//! core/poisson.rs — Expected probe counts for separate chaining.
//!
//! Bucket occupancy k is modeled as Poisson(L) where L is the load factor.
//! The series is evaluated term by term with p(k) = p(k-1) * L / k, starting
//! from p(0) = e^-L, so no factorial is ever formed.
//!
//! Example: L = 0.5 → miss ≈ 1.25, insert ≈ 3.25 (miss + 1/(1-L)).

use serde::{Deserialize, Serialize};

/// Tail mass below which the series is considered converged.
pub const DEFAULT_TAIL_CUTOFF: f64 = 1e-10;

/// Upper bound on the number of series terms (k = 0..100).
pub const DEFAULT_MAX_TERMS: usize = 100;

/// Truncation of the Poisson series.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeriesParams {
    #[serde(default = "SeriesParams::default_tail_cutoff")]
    pub tail_cutoff: f64,
    #[serde(default = "SeriesParams::default_max_terms")]
    pub max_terms: usize,
}

impl SeriesParams {
    fn default_tail_cutoff() -> f64 {
        DEFAULT_TAIL_CUTOFF
    }
    fn default_max_terms() -> usize {
        DEFAULT_MAX_TERMS
    }

    /// Number of terms the truncated series consumes at load factor `l`.
    pub fn terms_used(&self, l: f64) -> usize {
        if self.max_terms == 0 {
            return 0;
        }
        let mut pk = (-l).exp();
        for k in 1..self.max_terms {
            pk *= l / k as f64;
            if pk < self.tail_cutoff {
                return k + 1;
            }
        }
        self.max_terms
    }
}

impl Default for SeriesParams {
    fn default() -> Self {
        Self {
            tail_cutoff: Self::default_tail_cutoff(),
            max_terms: Self::default_max_terms(),
        }
    }
}

/// Probe statistics at a single load factor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProbeStats {
    /// Expected probes for an unsuccessful lookup.
    pub miss_probes: f64,
    /// Expected fraction of keys that share their bucket with an earlier key.
    pub collision_ratio: f64,
    /// Expected fraction of buckets holding at least one key.
    pub main_bucket_ratio: f64,
    /// `miss_probes + 1/(1-L)`.
    pub insert_probes: f64,
}

/// Probe statistics with the default truncation (1e-10 tail, 100 terms).
#[inline]
pub fn probe_stats(l: f64) -> ProbeStats {
    probe_stats_with(l, &SeriesParams::default())
}

/// Probe statistics with explicit series truncation.
///
/// `l` is not validated. For `l >= 1` the insert term `1/(1-l)` degenerates
/// to infinity or a negative value; callers keep `l` inside [0, 1).
pub fn probe_stats_with(l: f64, params: &SeriesParams) -> ProbeStats {
    let mut pk = (-l).exp();
    let mut miss_sum = 0.0;
    let mut collision_sum = 0.0;
    let mut main_sum = 0.0;

    if params.max_terms > 0 {
        // k = 0: one probe, no collision, sole occupant.
        miss_sum = pk;
        main_sum = pk;
    }

    for k in 1..params.max_terms {
        let kf = k as f64;
        pk *= l / kf;
        miss_sum += pk * (kf + 1.0);
        collision_sum += pk * kf / (kf + 1.0);
        main_sum += pk * 1.0 / (kf + 1.0);
        if pk < params.tail_cutoff {
            break;
        }
    }

    let miss_probes = miss_sum * l + (1.0 - l);
    ProbeStats {
        miss_probes,
        collision_ratio: collision_sum,
        main_bucket_ratio: main_sum * l,
        insert_probes: miss_probes + 1.0 / (1.0 - l),
    }
}

/// Poisson probability mass `e^-l * l^k / k!`, evaluated incrementally.
pub fn poisson_pmf(l: f64, k: usize) -> f64 {
    let mut pk = (-l).exp();
    for i in 1..=k {
        pk *= l / i as f64;
    }
    pk
}
