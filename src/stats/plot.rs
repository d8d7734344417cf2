use std::ffi::OsStr;
use std::path::Path;

use anyhow::{Result, anyhow};
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::common::consts::SVG_FILE_EXTENSION;
use crate::stats::SampleStats;

// matplotlib's named colors, kept from the lab's plotting conventions
pub const DIMGREY: RGBColor = RGBColor(105, 105, 105);
pub const PALETURQUOISE: RGBColor = RGBColor(175, 238, 238);
pub const ROYALBLUE: RGBColor = RGBColor(65, 105, 225);
pub const LIMEGREEN: RGBColor = RGBColor(50, 205, 50);
pub const DARKGREEN: RGBColor = RGBColor(0, 100, 0);

const FIGURE_SIZE: (u32, u32) = (1200, 500);

///
/// Render the two-panel read-processing figure: per-sample alignment/filter
/// percentages on the left, the stacked n-way contact breakdown on the right.
/// The backend is picked from the file extension (`.svg` or bitmap).
///
pub fn plot_stats(stats: &[SampleStats], path: &Path) -> Result<()> {
    if path.extension() == Some(OsStr::new(SVG_FILE_EXTENSION)) {
        let root = SVGBackend::new(path, FIGURE_SIZE).into_drawing_area();
        render(&root, stats).map_err(|e| anyhow!("Failed to render stats figure: {}", e))?;
    } else {
        let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
        render(&root, stats).map_err(|e| anyhow!("Failed to render stats figure: {}", e))?;
    }

    log::info!("Wrote stats figure to {:?}", path);
    Ok(())
}

fn render<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    stats: &[SampleStats],
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let panels = root.split_evenly((1, 2));
    draw_percent_panel(&panels[0], stats)?;
    draw_nway_panel(&panels[1], stats)?;

    root.present()
}

fn sample_label_formatter(stats: &[SampleStats]) -> impl Fn(&f64) -> String + '_ {
    move |x: &f64| {
        let i = x.round();
        if (x - i).abs() < 1e-6 && i >= 0.0 && (i as usize) < stats.len() {
            stats[i as usize].sample.clone()
        } else {
            String::new()
        }
    }
}

fn draw_percent_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    stats: &[SampleStats],
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let n = stats.len();

    let mut chart = ChartBuilder::on(area)
        .caption("alignment and filter statistics", ("sans-serif", 18))
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(50)
        .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..105f64)?;

    let formatter = sample_label_formatter(stats);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc("% of total readpairs")
        .x_labels(n)
        .x_label_formatter(&formatter)
        .draw()?;

    // successively narrower fractions drawn over the 100% background
    let layers: Vec<(&str, Vec<f64>, RGBColor)> = vec![
        ("total readpairs", vec![100.0; n], DIMGREY),
        (
            "aligned readpairs",
            stats.iter().map(|s| s.pct(s.aligned)).collect(),
            PALETURQUOISE,
        ),
        (
            "capture only readpairs",
            stats.iter().map(|s| s.pct(s.capture_only)).collect(),
            ROYALBLUE,
        ),
        (
            "capture and reporter readpairs",
            stats.iter().map(|s| s.pct(s.capture_reporter)).collect(),
            LIMEGREEN,
        ),
        (
            "unique readpairs",
            stats.iter().map(|s| s.pct(s.unique)).collect(),
            DARKGREEN,
        ),
    ];

    for (label, values, color) in layers {
        chart
            .draw_series(values.iter().enumerate().map(|(i, v)| {
                Rectangle::new([(i as f64 - 0.35, 0.0), (i as f64 + 0.35, *v)], color.filled())
            }))?
            .label(label)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()?;

    Ok(())
}

fn draw_nway_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    stats: &[SampleStats],
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let n = stats.len();

    let y_max = stats
        .iter()
        .map(|s| s.two_way + s.three_way + s.many_way)
        .max()
        .unwrap_or(0)
        .max(1) as f64
        * 1.05;

    let mut chart = ChartBuilder::on(area)
        .caption("n-way read fractions", ("sans-serif", 18))
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..y_max)?;

    let formatter = sample_label_formatter(stats);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc("deduplicated reads")
        .x_labels(n)
        .x_label_formatter(&formatter)
        .draw()?;

    // stacked bottom-up: >3way, 3way, 2way
    let layers: Vec<(&str, Vec<f64>, RGBColor)> = vec![
        (">3way", stats.iter().map(|s| s.many_way as f64).collect(), DARKGREEN),
        ("3way", stats.iter().map(|s| s.three_way as f64).collect(), LIMEGREEN),
        ("2way", stats.iter().map(|s| s.two_way as f64).collect(), DIMGREY),
    ];

    let mut bottom = vec![0f64; n];
    for (label, values, color) in layers {
        chart
            .draw_series(values.iter().enumerate().map(|(i, v)| {
                Rectangle::new(
                    [(i as f64 - 0.35, bottom[i]), (i as f64 + 0.35, bottom[i] + *v)],
                    color.filled(),
                )
            }))?
            .label(label)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));

        for (b, v) in bottom.iter_mut().zip(&values) {
            *b += *v;
        }
    }

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;
    use tempfile::tempdir;

    fn dummy_stats(sample: &str) -> SampleStats {
        SampleStats {
            sample: sample.to_string(),
            total_readpairs: 10_000,
            aligned: 9000,
            capture_only: 6000,
            capture_reporter: 4500,
            no_capture: 800,
            single_capture: 700,
            unique: 4000,
            two_way: 5000,
            three_way: 2000,
            many_way: 1000,
        }
    }

    #[rstest]
    #[case("stats.png")]
    #[case("stats.svg")]
    fn test_plot_stats_writes_figure(#[case] file_name: &str) {
        let dir = tempdir().unwrap();
        let out = dir.path().join(file_name);

        let stats = vec![dummy_stats("WT_0_1"), dummy_stats("WT_0_2")];
        plot_stats(&stats, &out).unwrap();

        assert!(out.exists());
        assert!(std::fs::metadata(&out).unwrap().len() > 0);
    }
}
