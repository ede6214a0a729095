//! core/sweep.rs — Load-factor sweep.
//!
//! Samples the probe model on a regular grid of load factors and collects
//! the results into parallel sequences, one entry per sample.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::poisson::{SeriesParams, probe_stats_with};
use crate::core::reference::{find_hit, insert_estimate};
use crate::error::{Error, Result};

/// Default grid spacing between load-factor samples.
pub const DEFAULT_STEP: f64 = 0.02;

/// Grids denser than this are rejected.
pub const MAX_SAMPLES: usize = 1_000_000;

/// Load-factor grid: `start + i * step` for every sample below `stop`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    #[serde(default = "SweepConfig::default_start")]
    pub start: f64,
    #[serde(default = "SweepConfig::default_stop")]
    pub stop: f64,
    #[serde(default = "SweepConfig::default_step")]
    pub step: f64,
}

impl SweepConfig {
    fn default_start() -> f64 {
        0.0
    }
    fn default_stop() -> f64 {
        0.99
    }
    fn default_step() -> f64 {
        DEFAULT_STEP
    }

    fn validate(&self) -> Result<()> {
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(Error::InvalidSweep(format!(
                "step must be positive, got {}",
                self.step
            )));
        }
        if !self.start.is_finite() || self.start < 0.0 {
            return Err(Error::InvalidSweep(format!(
                "start must be >= 0, got {}",
                self.start
            )));
        }
        if !self.stop.is_finite() || self.stop > 1.0 {
            return Err(Error::InvalidSweep(format!(
                "stop must be <= 1, got {}",
                self.stop
            )));
        }
        if self.start >= self.stop {
            return Err(Error::InvalidSweep(format!(
                "start {} must be below stop {}",
                self.start, self.stop
            )));
        }
        let approx = ((self.stop - self.start) / self.step).ceil();
        if approx > MAX_SAMPLES as f64 {
            return Err(Error::InvalidSweep(format!(
                "grid would hold {approx} samples (max {MAX_SAMPLES})"
            )));
        }
        Ok(())
    }

    /// Load-factor samples in ascending order, all inside [start, stop).
    ///
    /// Decimal grids are built as integer numerators over a power of ten,
    /// so 0.02 * 35 comes out as exactly 0.7.
    pub fn samples(&self) -> Result<Vec<f64>> {
        self.validate()?;
        let mut out = Vec::new();
        match decimal_places(&[self.start, self.step]) {
            Some(places) => {
                let denom = 10f64.powi(places as i32);
                let start_n = (self.start * denom).round() as u64;
                let step_n = (self.step * denom).round() as u64;
                loop {
                    let l = (start_n + out.len() as u64 * step_n) as f64 / denom;
                    if l >= self.stop {
                        break;
                    }
                    out.push(l);
                }
            }
            None => loop {
                let l = self.start + out.len() as f64 * self.step;
                if l >= self.stop {
                    break;
                }
                out.push(l);
            },
        }
        Ok(out)
    }
}

/// Grids with more decimal places than this fall back to float stepping.
const MAX_GRID_DECIMALS: u32 = 9;

/// Fewest decimal places that represent every value, if any up to
/// [`MAX_GRID_DECIMALS`] do.
fn decimal_places(values: &[f64]) -> Option<u32> {
    (0..=MAX_GRID_DECIMALS).find(|&places| {
        let scale = 10f64.powi(places as i32);
        values.iter().all(|&v| {
            let scaled = v * scale;
            (scaled - scaled.round()).abs() < 1e-6
        })
    })
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            start: Self::default_start(),
            stop: Self::default_stop(),
            step: Self::default_step(),
        }
    }
}

/// Parallel sequences produced by [`run_sweep`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Sweep {
    pub load_factor: Vec<f64>,
    pub find_miss: Vec<f64>,
    pub find_hit: Vec<f64>,
    pub collision: Vec<f64>,
    pub main_bucket: Vec<f64>,
    pub insert_probes: Vec<f64>,
    pub insert_estimate: Vec<f64>,
}

/// One sample of a [`Sweep`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepRow {
    pub load_factor: f64,
    pub find_miss: f64,
    pub find_hit: f64,
    pub collision: f64,
    pub main_bucket: f64,
    pub insert_probes: f64,
    pub insert_estimate: f64,
}

impl Sweep {
    fn with_capacity(n: usize) -> Self {
        Self {
            load_factor: Vec::with_capacity(n),
            find_miss: Vec::with_capacity(n),
            find_hit: Vec::with_capacity(n),
            collision: Vec::with_capacity(n),
            main_bucket: Vec::with_capacity(n),
            insert_probes: Vec::with_capacity(n),
            insert_estimate: Vec::with_capacity(n),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.load_factor.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.load_factor.is_empty()
    }

    /// Sample `i`, or `None` once any column runs out.
    pub fn row(&self, i: usize) -> Option<SweepRow> {
        Some(SweepRow {
            load_factor: *self.load_factor.get(i)?,
            find_miss: *self.find_miss.get(i)?,
            find_hit: *self.find_hit.get(i)?,
            collision: *self.collision.get(i)?,
            main_bucket: *self.main_bucket.get(i)?,
            insert_probes: *self.insert_probes.get(i)?,
            insert_estimate: *self.insert_estimate.get(i)?,
        })
    }

    /// Complete samples only; a deserialized sweep with ragged columns
    /// stops at its shortest column.
    pub fn rows(&self) -> impl Iterator<Item = SweepRow> + '_ {
        (0..).map_while(|i| self.row(i))
    }
}

/// Evaluate the probe model and comparison curves at every grid sample.
pub fn run_sweep(grid: &SweepConfig, series: &SeriesParams) -> Result<Sweep> {
    let samples = grid.samples()?;
    let mut sweep = Sweep::with_capacity(samples.len());
    for &l in &samples {
        let stats = probe_stats_with(l, series);
        debug!(
            "L={l:.2} miss={:.6} coll={:.6} main={:.6} insert={:.6} terms={}",
            stats.miss_probes,
            stats.collision_ratio,
            stats.main_bucket_ratio,
            stats.insert_probes,
            series.terms_used(l)
        );
        sweep.load_factor.push(l);
        sweep.find_miss.push(stats.miss_probes);
        sweep.find_hit.push(find_hit(l));
        sweep.collision.push(stats.collision_ratio);
        sweep.main_bucket.push(stats.main_bucket_ratio);
        sweep.insert_probes.push(stats.insert_probes);
        sweep.insert_estimate.push(insert_estimate(l));
    }
    Ok(sweep)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_spans_zero_to_098() {
        let samples = SweepConfig::default().samples().unwrap();
        assert_eq!(samples.len(), 50);
        assert_eq!(samples[0], 0.0);
        assert!((samples[49] - 0.98).abs() < 1e-12);
        assert!(samples.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn default_grid_is_integer_hundredths() {
        let samples = SweepConfig::default().samples().unwrap();
        assert_eq!(samples[35], 0.7);
        assert_eq!(samples[41], 0.82);
        assert_eq!(samples[47], 0.94);
        for (i, &l) in samples.iter().enumerate() {
            assert_eq!(l, (2 * i) as f64 / 100.0, "sample {i}");
        }
    }

    #[test]
    fn fine_decimal_steps_stay_exact() {
        let cfg = SweepConfig { start: 0.1, stop: 0.2, step: 0.005 };
        let samples = cfg.samples().unwrap();
        assert_eq!(samples.len(), 20);
        assert_eq!(samples[14], 0.17);
        assert_eq!(decimal_places(&[0.1, 0.005]), Some(3));
        assert_eq!(decimal_places(&[0.0, 1.0 / 3.0]), None);
    }

    #[test]
    fn ragged_columns_yield_complete_rows_only() {
        let mut sweep = run_sweep(&SweepConfig::default(), &SeriesParams::default()).unwrap();
        sweep.insert_estimate.truncate(3);
        assert_eq!(sweep.rows().count(), 3);
        assert!(sweep.row(3).is_none());
    }

    #[test]
    fn rejects_degenerate_grids() {
        let bad = [
            SweepConfig { start: 0.0, stop: 0.5, step: 0.0 },
            SweepConfig { start: 0.0, stop: 0.5, step: f64::NAN },
            SweepConfig { start: -0.1, stop: 0.5, step: 0.1 },
            SweepConfig { start: 0.0, stop: 1.5, step: 0.1 },
            SweepConfig { start: 0.6, stop: 0.5, step: 0.1 },
            SweepConfig { start: 0.0, stop: 1.0, step: 1e-12 },
        ];
        for cfg in bad {
            assert!(
                matches!(cfg.samples(), Err(Error::InvalidSweep(_))),
                "accepted {cfg:?}"
            );
        }
    }

    #[test]
    fn sequences_stay_parallel() {
        let sweep = run_sweep(
            &SweepConfig { start: 0.1, stop: 0.5, step: 0.1 },
            &SeriesParams::default(),
        )
        .unwrap();
        assert_eq!(sweep.len(), 4);
        for v in [
            &sweep.find_miss,
            &sweep.find_hit,
            &sweep.collision,
            &sweep.main_bucket,
            &sweep.insert_probes,
            &sweep.insert_estimate,
        ] {
            assert_eq!(v.len(), sweep.len());
        }
        let row = sweep.row(0).unwrap();
        assert!((row.load_factor - 0.1).abs() < 1e-12);
        assert!((row.find_hit - 1.05).abs() < 1e-12);
    }
}
