//! core/occupancy.rs — Empirical bucket occupancy of a chained table.
//!
//! Hashes `round(L * buckets)` keys uniformly into `buckets` chains and
//! measures the bucket-size histogram. Used to check the Poisson model
//! against an actual fill.

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::core::poisson::poisson_pmf;
use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "SimulationConfig::default_enabled")]
    pub enabled: bool,
    #[serde(default = "SimulationConfig::default_buckets")]
    pub buckets: usize,
    #[serde(default = "SimulationConfig::default_seed")]
    pub seed: u64,
    /// Load factors to fill the table to.
    #[serde(default = "SimulationConfig::default_load_factors")]
    pub load_factors: Vec<f64>,
}

impl SimulationConfig {
    fn default_enabled() -> bool {
        false
    }
    fn default_buckets() -> usize {
        1 << 20
    }
    fn default_seed() -> u64 {
        0xC0FFEE
    }
    fn default_load_factors() -> Vec<f64> {
        vec![0.25, 0.5, 0.75, 0.9]
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            buckets: Self::default_buckets(),
            seed: Self::default_seed(),
            load_factors: Self::default_load_factors(),
        }
    }
}

/// Measured occupancy of one simulated fill.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OccupancyReport {
    pub load_factor: f64,
    pub keys: usize,
    pub buckets: usize,
    /// `size_histogram[i]` = number of buckets holding exactly `i` keys.
    pub size_histogram: Vec<usize>,
    /// Keys that are not the first in their bucket, over all keys.
    pub collision_ratio: f64,
    /// Non-empty buckets over all buckets.
    pub main_bucket_ratio: f64,
    /// Mean probes to find a stored key.
    pub hit_probes: f64,
    /// Mean probes for a lookup that misses.
    pub miss_probes: f64,
}

impl OccupancyReport {
    fn from_histogram(load_factor: f64, keys: usize, buckets: usize, hist: Vec<usize>) -> Self {
        let empty = hist.first().copied().unwrap_or(0);
        let occupied = buckets - empty;

        let mut hit_sum = 0usize;
        let mut miss_sum = empty;
        for (i, &b) in hist.iter().enumerate().skip(1) {
            hit_sum += b * i * (i + 1) / 2;
            miss_sum += b * i * i;
        }

        let (collision_ratio, hit_probes) = if keys == 0 {
            (0.0, 0.0)
        } else {
            (
                (keys - occupied) as f64 / keys as f64,
                hit_sum as f64 / keys as f64,
            )
        };

        Self {
            load_factor,
            keys,
            buckets,
            size_histogram: hist,
            collision_ratio,
            main_bucket_ratio: occupied as f64 / buckets as f64,
            hit_probes,
            miss_probes: miss_sum as f64 / buckets as f64,
        }
    }

    /// Share of keys living in buckets of size `size`.
    pub fn key_share(&self, size: usize) -> f64 {
        if self.keys == 0 || size == 0 {
            return 0.0;
        }
        let b = self.size_histogram.get(size).copied().unwrap_or(0);
        (b * size) as f64 / self.keys as f64
    }

    /// Largest chain length observed.
    pub fn longest_chain(&self) -> usize {
        self.size_histogram.len().saturating_sub(1)
    }
}

/// Model share of keys in buckets of size `size`: a key shares its bucket
/// with `size - 1` others, which is Poisson(l).
pub fn poisson_key_share(l: f64, size: usize) -> f64 {
    if size == 0 {
        return 0.0;
    }
    poisson_pmf(l, size - 1)
}

/// Fill `buckets` chains to load factor `l` with uniformly hashed keys.
pub fn simulate(l: f64, buckets: usize, seed: u64) -> Result<OccupancyReport> {
    if buckets == 0 {
        return Err(Error::InvalidSimulation("bucket count must be > 0".into()));
    }
    if !l.is_finite() || l < 0.0 {
        return Err(Error::InvalidSimulation(format!(
            "load factor must be >= 0, got {l}"
        )));
    }

    let keys = (l * buckets as f64).round() as usize;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut chain_len = vec![0u32; buckets];
    for _ in 0..keys {
        let b = rng.random_range(0..buckets);
        chain_len[b] += 1;
    }

    let mut hist: Vec<usize> = vec![0; 1];
    for &len in &chain_len {
        let len = len as usize;
        if len >= hist.len() {
            hist.resize(len + 1, 0);
        }
        hist[len] += 1;
    }

    Ok(OccupancyReport::from_histogram(l, keys, buckets, hist))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fill_has_no_collisions() {
        let r = simulate(0.0, 64, 1).unwrap();
        assert_eq!(r.keys, 0);
        assert_eq!(r.size_histogram, vec![64]);
        assert_eq!(r.collision_ratio, 0.0);
        assert_eq!(r.main_bucket_ratio, 0.0);
        assert_eq!(r.miss_probes, 1.0);
        assert_eq!(r.longest_chain(), 0);
    }

    #[test]
    fn histogram_accounts_for_every_key_and_bucket() {
        let r = simulate(0.8, 4096, 42).unwrap();
        let buckets: usize = r.size_histogram.iter().sum();
        let keys: usize = r
            .size_histogram
            .iter()
            .enumerate()
            .map(|(i, &b)| i * b)
            .sum();
        assert_eq!(buckets, 4096);
        assert_eq!(keys, r.keys);
        assert_eq!(r.keys, 3277);
    }

    #[test]
    fn same_seed_same_fill() {
        let a = simulate(0.5, 1024, 9).unwrap();
        let b = simulate(0.5, 1024, 9).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(simulate(0.5, 0, 1).is_err());
        assert!(simulate(-0.1, 16, 1).is_err());
        assert!(simulate(f64::NAN, 16, 1).is_err());
    }

    #[test]
    fn model_key_share_starts_at_e_minus_l() {
        assert_eq!(poisson_key_share(0.5, 0), 0.0);
        assert!((poisson_key_share(0.5, 1) - (-0.5f64).exp()).abs() < 1e-15);
    }
}
