// Entry point: sweeps the chaining probe model over load factor, prints the
// sequences and renders the chart.
use std::error::Error;
use std::path::Path;

use clap::Parser;
use tracing::{debug, info, warn};

use chainprobe::cli::Args;
use chainprobe::config::AppConfig;
use chainprobe::core::occupancy::simulate;
use chainprobe::core::sweep::run_sweep;
use chainprobe::logging::init_logging;
use chainprobe::{plot, report};

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let loaded = AppConfig::load(&args.config);
    let mut cfg = match &loaded {
        Ok(Some(cfg)) => cfg.clone(),
        _ => AppConfig::default(),
    };
    if let Some(level) = args.log_level {
        cfg.logging.level = level;
    }
    init_logging(&cfg.logging.level)?;
    match loaded {
        Ok(Some(_)) => info!("Loaded config from {}", args.config),
        Ok(None) => debug!("No config at {}; using defaults", args.config),
        Err(err) => warn!("{err}. Using defaults."),
    }

    if args.write_config {
        AppConfig::write_default(&args.config)?;
        info!("Wrote default config to {}", args.config);
        return Ok(());
    }

    if let Some(path) = args.output {
        cfg.chart.path = path;
    }
    if args.csv.is_some() {
        cfg.report.csv_path = args.csv;
    }
    if args.json.is_some() {
        cfg.report.json_path = args.json;
    }
    if let Some(enabled) = args.simulate {
        cfg.simulation.enabled = enabled;
    }
    debug!("Effective config: {cfg:?}");

    let sweep = run_sweep(&cfg.sweep, &cfg.series)?;
    info!(
        "Swept {} load factors in [{}, {}) step {}",
        sweep.len(),
        cfg.sweep.start,
        cfg.sweep.stop,
        cfg.sweep.step
    );

    if cfg.report.print_sequences {
        report::print_sequences(&sweep);
    }
    if let Some(path) = &cfg.report.csv_path {
        report::write_csv(Path::new(path), &sweep, cfg.report.classic_columns)?;
        info!("Wrote CSV to {path}");
    }
    if let Some(path) = &cfg.report.json_path {
        report::write_json(Path::new(path), &sweep)?;
        info!("Wrote JSON to {path}");
    }

    if cfg.simulation.enabled {
        for &l in &cfg.simulation.load_factors {
            let occupancy = simulate(l, cfg.simulation.buckets, cfg.simulation.seed)?;
            for line in report::occupancy_lines(&occupancy) {
                info!("{line}");
            }
        }
    }

    if !args.no_plot {
        plot::render_chart(Path::new(&cfg.chart.path), &sweep, &cfg.chart)?;
    }

    Ok(())
}
