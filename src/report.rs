//! Console and file output of a sweep.

use std::fs::{create_dir_all, write};
use std::path::Path;

use crate::core::occupancy::{OccupancyReport, poisson_key_share};
use crate::core::poisson::probe_stats;
use crate::core::reference::{Outcome, Strategy, expected_probes};
use crate::core::sweep::Sweep;
use crate::error::Result;

fn format_seq(values: &[f64]) -> String {
    let items: Vec<String> = values.iter().map(|v| format!("{v:?}")).collect();
    format!("[{}]", items.join(", "))
}

/// The `name =  [..]` lines printed for the miss, collision and bucket curves.
pub fn sequence_lines(sweep: &Sweep) -> Vec<String> {
    vec![
        format!("find_miss =  {}", format_seq(&sweep.find_miss)),
        format!("coll =  {}", format_seq(&sweep.collision)),
        format!("main =  {}", format_seq(&sweep.main_bucket)),
    ]
}

pub fn print_sequences(sweep: &Sweep) {
    for line in sequence_lines(sweep) {
        println!("{line}");
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// One CSV row per sample. With `classic_columns`, textbook hit/miss
/// probes for each strategy follow the model columns.
pub fn to_csv(sweep: &Sweep, classic_columns: bool) -> String {
    let mut csv = String::from(
        "load_factor,find_miss,find_hit,collision,main_bucket,insert_probes,insert_estimate",
    );
    if classic_columns {
        for strategy in Strategy::ALL {
            for outcome in [Outcome::Hit, Outcome::Miss] {
                csv.push_str(&format!(",{}_{}", strategy.label(), outcome.label()));
            }
        }
    }
    csv.push('\n');

    for row in sweep.rows() {
        csv.push_str(&format!(
            "{:.2},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6}",
            row.load_factor,
            row.find_miss,
            row.find_hit,
            row.collision,
            row.main_bucket,
            row.insert_probes,
            row.insert_estimate
        ));
        if classic_columns {
            for strategy in Strategy::ALL {
                for outcome in [Outcome::Hit, Outcome::Miss] {
                    let v = expected_probes(strategy, outcome, row.load_factor);
                    csv.push_str(&format!(",{v:.6}"));
                }
            }
        }
        csv.push('\n');
    }
    csv
}

pub fn write_csv(path: &Path, sweep: &Sweep, classic_columns: bool) -> Result<()> {
    ensure_parent(path)?;
    write(path, to_csv(sweep, classic_columns))?;
    Ok(())
}

pub fn write_json(path: &Path, sweep: &Sweep) -> Result<()> {
    ensure_parent(path)?;
    let text = serde_json::to_string_pretty(sweep)?;
    write(path, text)?;
    Ok(())
}

/// Bucket-size table of a simulated fill next to the model's key shares.
pub fn occupancy_lines(report: &OccupancyReport) -> Vec<String> {
    let model = probe_stats(report.load_factor);
    let mut lines = vec![format!(
        "L={:.2} keys={} buckets={}",
        report.load_factor, report.keys, report.buckets
    )];
    let mut cumulative = 0.0;
    for size in 1..=report.longest_chain() {
        let share = report.key_share(size);
        cumulative += share;
        lines.push(format!(
            "  {size:2}  {:8}  {share:.8}|{:.8}  {:7.3}",
            report.size_histogram[size],
            poisson_key_share(report.load_factor, size),
            cumulative * 100.0
        ));
    }
    lines.push(format!(
        "  collision {:.4} (model {:.4})  main bucket {:.4} (model {:.4})  hit|miss {:.2}|{:.2}",
        report.collision_ratio,
        model.collision_ratio,
        report.main_bucket_ratio,
        model.main_bucket_ratio,
        report.hit_probes,
        report.miss_probes
    ));
    lines
}
