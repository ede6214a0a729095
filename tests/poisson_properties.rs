use chainprobe::core::poisson::{
    DEFAULT_MAX_TERMS, DEFAULT_TAIL_CUTOFF, SeriesParams, probe_stats, probe_stats_with,
};

fn grid() -> impl Iterator<Item = f64> {
    (0..100).map(|i| i as f64 / 100.0)
}

#[test]
fn miss_probes_never_below_one() {
    for l in grid() {
        let s = probe_stats(l);
        assert!(s.miss_probes >= 1.0, "miss {} < 1 at L={l}", s.miss_probes);
    }
}

#[test]
fn insert_probes_identity_is_exact() {
    for l in grid() {
        let s = probe_stats(l);
        assert_eq!(s.insert_probes, s.miss_probes + 1.0 / (1.0 - l), "L={l}");
    }
}

#[test]
fn miss_probes_non_decreasing_in_load() {
    let miss: Vec<f64> = grid().map(|l| probe_stats(l).miss_probes).collect();
    for (i, w) in miss.windows(2).enumerate() {
        assert!(w[0] <= w[1], "miss decreases between samples {i} and {}", i + 1);
    }
}

#[test]
fn ratios_stay_within_unit_interval() {
    for l in grid() {
        let s = probe_stats(l);
        assert!((0.0..1.0).contains(&s.collision_ratio), "coll at L={l}");
        assert!((0.0..1.0).contains(&s.main_bucket_ratio), "main at L={l}");
    }
}

#[test]
fn truncation_has_converged_at_default_bounds() {
    let loose = SeriesParams::default();
    let tight = SeriesParams {
        tail_cutoff: 1e-16,
        max_terms: 200,
    };
    assert_eq!(loose.tail_cutoff, DEFAULT_TAIL_CUTOFF);
    assert_eq!(loose.max_terms, DEFAULT_MAX_TERMS);
    for l in grid() {
        let a = probe_stats_with(l, &loose);
        let b = probe_stats_with(l, &tight);
        assert!((a.miss_probes - b.miss_probes).abs() < 1e-9, "miss at L={l}");
        assert!((a.collision_ratio - b.collision_ratio).abs() < 1e-9, "coll at L={l}");
        assert!((a.main_bucket_ratio - b.main_bucket_ratio).abs() < 1e-9, "main at L={l}");
        assert!((a.insert_probes - b.insert_probes).abs() < 1e-9, "insert at L={l}");
    }
}

#[test]
fn half_load_snapshot() {
    let s = probe_stats(0.5);
    assert!((s.miss_probes - 1.2499999999979043).abs() < 1e-12);
    assert!((s.insert_probes - (s.miss_probes + 2.0)).abs() < 1e-15);
    assert!((s.insert_probes - 3.2499999999979043).abs() < 1e-12);
}

#[test]
fn near_full_snapshot() {
    let s = probe_stats(0.98);
    assert!((s.miss_probes - 1.9603999999487518).abs() < 1e-12);
    assert!((s.collision_ratio - 0.36256234576349433).abs() < 1e-12);
    assert!((s.main_bucket_ratio - 0.6246889011483748).abs() < 1e-12);
    assert!((s.insert_probes - 51.960399999948706).abs() < 1e-9);
}
