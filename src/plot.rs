//! Two-panel PNG chart of a sweep: probe counts on the left, collision and
//! main-bucket ratios on the right.

use std::error::Error as StdError;
use std::fs::create_dir_all;
use std::path::Path;

use plotters::prelude::*;
use tracing::info;

use crate::config::ChartConfig;
use crate::core::sweep::Sweep;
use crate::error::{Error, Result};

/// Axis ceiling with 10% headroom over the largest finite value.
pub fn y_upper<'a>(series: impl IntoIterator<Item = &'a [f64]>) -> f64 {
    let max = series
        .into_iter()
        .flat_map(|s| s.iter().copied())
        .filter(|v| v.is_finite())
        .fold(0.0f64, f64::max);
    if max <= 0.0 { 1.0 } else { max * 1.1 }
}

fn points(xs: &[f64], ys: &[f64]) -> Vec<(f64, f64)> {
    xs.iter().copied().zip(ys.iter().copied()).collect()
}

pub fn render_chart(path: &Path, sweep: &Sweep, cfg: &ChartConfig) -> Result<()> {
    if sweep.is_empty() {
        return Err(Error::Plot("sweep has no samples".into()));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }
    draw(path, sweep, cfg).map_err(|err| Error::Plot(err.to_string()))?;
    info!("Saved chart to {}", path.display());
    Ok(())
}

fn draw(path: &Path, sweep: &Sweep, cfg: &ChartConfig) -> std::result::Result<(), Box<dyn StdError>> {
    let x = &sweep.load_factor;

    let root = BitMapBackend::new(path, (cfg.width, cfg.height)).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((1, 2));

    let mut probe_series = vec![sweep.find_miss.as_slice(), sweep.find_hit.as_slice()];
    if cfg.show_insert {
        probe_series.push(sweep.insert_probes.as_slice());
    }
    let probes_hi = y_upper(probe_series);

    let mut chart_p = ChartBuilder::on(&panels[0])
        .caption("chaining probes", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0f64..1.0f64, 0.0f64..probes_hi)?;

    chart_p
        .configure_mesh()
        .x_desc("load factor")
        .y_desc("find probes")
        .draw()?;

    chart_p
        .draw_series(LineSeries::new(points(x, &sweep.find_miss), &BLUE))?
        .label("miss")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart_p
        .draw_series(LineSeries::new(points(x, &sweep.find_hit), &RED))?
        .label("hit")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    if cfg.show_insert {
        let insert: Vec<(f64, f64)> = points(x, &sweep.insert_probes)
            .into_iter()
            .filter(|(_, y)| *y <= probes_hi)
            .collect();
        chart_p
            .draw_series(LineSeries::new(insert, &GREEN))?
            .label("insert")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN));
    }

    chart_p
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    let ratio_hi = y_upper([sweep.collision.as_slice(), sweep.main_bucket.as_slice()]);

    let mut chart_r = ChartBuilder::on(&panels[1])
        .caption("main bucket & collision", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0f64..1.0f64, 0.0f64..ratio_hi)?;

    chart_r
        .configure_mesh()
        .x_desc("load factor")
        .y_desc("ratio")
        .draw()?;

    chart_r
        .draw_series(LineSeries::new(points(x, &sweep.collision), &BLUE))?
        .label("coll")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart_r
        .draw_series(LineSeries::new(points(x, &sweep.main_bucket), &RED))?
        .label("bucket")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart_r
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
