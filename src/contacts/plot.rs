use std::ffi::OsStr;
use std::path::Path;

use anyhow::{Result, anyhow};
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::common::consts::SVG_FILE_EXTENSION;
use crate::contacts::ContactRecord;

const FIGURE_SIZE: (u32, u32) = (1000, 600);

///
/// Grouped bar chart of normalized contacts: one group per region combination,
/// one bar per sample within each group. The backend is picked from the file
/// extension (`.svg` or bitmap).
///
pub fn plot_contacts(records: &[ContactRecord], path: &Path) -> Result<()> {
    if path.extension() == Some(OsStr::new(SVG_FILE_EXTENSION)) {
        let root = SVGBackend::new(path, FIGURE_SIZE).into_drawing_area();
        render(&root, records).map_err(|e| anyhow!("Failed to render contact figure: {}", e))?;
    } else {
        let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
        render(&root, records).map_err(|e| anyhow!("Failed to render contact figure: {}", e))?;
    }

    log::info!("Wrote contact figure to {:?}", path);
    Ok(())
}

fn bar_label(record: &ContactRecord) -> String {
    format!("{} {} rep{}", record.sample, record.time, record.replicate)
}

fn render<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    records: &[ContactRecord],
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    // region combinations in first-seen order become the groups
    let mut groups: Vec<String> = Vec::new();
    for record in records {
        let pair = record.region_pair();
        if !groups.contains(&pair) {
            groups.push(pair);
        }
    }

    // one color and legend entry per sample/time/replicate
    let mut labels: Vec<String> = Vec::new();
    for record in records {
        let label = bar_label(record);
        if !labels.contains(&label) {
            labels.push(label);
        }
    }

    let n_groups = groups.len().max(1);
    let n_labels = labels.len().max(1);

    let y_max = records
        .iter()
        .map(|r| r.pinteractions)
        .fold(0f64, f64::max)
        .max(f64::MIN_POSITIVE)
        * 1.1;

    let mut chart = ChartBuilder::on(root)
        .caption("contacts per region pair", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5f64..(n_groups as f64 - 0.5), 0f64..y_max)?;

    let group_formatter = |x: &f64| {
        let i = x.round();
        if (x - i).abs() < 1e-6 && i >= 0.0 && (i as usize) < groups.len() {
            groups[i as usize].clone()
        } else {
            String::new()
        }
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc("contacts per bin pair")
        .x_labels(n_groups)
        .x_label_formatter(&group_formatter)
        .draw()?;

    let bar_width = 0.8 / n_labels as f64;
    for (label_idx, label) in labels.iter().enumerate() {
        let color = Palette99::pick(label_idx).to_rgba();

        let bars: Vec<Rectangle<(f64, f64)>> = records
            .iter()
            .filter(|r| bar_label(r) == *label)
            .filter_map(|r| {
                let group_idx = groups.iter().position(|g| *g == r.region_pair())?;
                let x0 = group_idx as f64 - 0.4 + label_idx as f64 * bar_width;
                Some(Rectangle::new(
                    [(x0, 0.0), (x0 + bar_width, r.pinteractions)],
                    color.filled(),
                ))
            })
            .collect();

        chart
            .draw_series(bars)?
            .label(label.clone())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()?;

    root.present()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;
    use tempfile::tempdir;

    fn record(sample: &str, replicate: &str, pair: (&str, &str), value: f64) -> ContactRecord {
        ContactRecord {
            sample: sample.to_string(),
            replicate: replicate.to_string(),
            time: "0".to_string(),
            region1: pair.0.to_string(),
            region2: pair.1.to_string(),
            pinteractions: value,
        }
    }

    #[rstest]
    fn test_plot_contacts_writes_figure() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("contacts.png");

        let records = vec![
            record("WT", "1", ("enhA", "enhB"), 0.8),
            record("WT", "2", ("enhA", "enhB"), 0.7),
            record("WT", "1", ("enhA", "enhC"), 0.3),
            record("WT", "2", ("enhA", "enhC"), 0.4),
        ];
        plot_contacts(&records, &out).unwrap();

        assert!(out.exists());
        assert!(std::fs::metadata(&out).unwrap().len() > 0);
    }
}
