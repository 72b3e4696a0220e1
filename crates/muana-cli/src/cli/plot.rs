//! SVG figure rendering for the report artifacts.

use muana_core::modules::histogram::{Hist1, Hist2, HistogramSet};
use muana_core::modules::report::{AnalysisReport, RatioGraph, ResolutionOverlay, ShapeComparison};
use plotters::prelude::*;
use std::error::Error;
use std::fs::create_dir_all;
use std::path::Path;

const FIGURE_SIZE: (u32, u32) = (900, 600);

/// Renders every graph of the report into `out_dir`, one SVG per figure.
/// Ratio graphs with no populated bins are skipped. Returns the number of
/// figures written.
pub(super) fn render_report_figures(
    out_dir: &Path,
    report: &AnalysisReport,
) -> Result<usize, Box<dyn Error>> {
    create_dir_all(out_dir)?;
    let mut rendered = 0;

    for graph in report.efficiencies.iter().chain(&report.fake_rates) {
        if graph.points.is_empty() {
            continue;
        }
        render_ratio_graph(&out_dir.join(format!("{}.svg", graph.name)), graph)?;
        rendered += 1;
    }

    for overlay in &report.resolutions {
        if overlay.slices.iter().all(|slice| slice.hist.entries() == 0) {
            continue;
        }
        render_resolution_overlay(
            &out_dir.join(format!("{}Muons_res.svg", overlay.category.prefix())),
            overlay,
        )?;
        rendered += 1;
    }

    for comparison in &report.comparisons {
        render_comparison(
            &out_dir.join(format!("{}_shapes.svg", comparison.name)),
            comparison,
        )?;
        rendered += 1;
    }

    Ok(rendered)
}

/// Heatmaps of the truth-vs-matched 2-D histograms. Empty histograms are
/// skipped. Returns the number of figures written.
pub(super) fn render_truth_reco_heatmaps(
    out_dir: &Path,
    set: &HistogramSet,
) -> Result<usize, Box<dyn Error>> {
    create_dir_all(out_dir)?;
    let mut rendered = 0;
    for hist in [&set.gen_sta_eta, &set.gen_sta_phi] {
        if hist.entries() == 0 {
            continue;
        }
        render_heatmap(&out_dir.join(format!("{}.svg", hist.name())), hist)?;
        rendered += 1;
    }
    Ok(rendered)
}

fn render_heatmap(out_path: &Path, hist: &Hist2) -> Result<(), Box<dyn Error>> {
    let max = hist.max_content().max(1.0);
    let x_width = (hist.x_hi() - hist.x_lo()) / hist.x_bins() as f64;
    let y_width = (hist.y_hi() - hist.y_lo()) / hist.y_bins() as f64;

    let root = SVGBackend::new(out_path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(hist.name(), ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(hist.x_lo()..hist.x_hi(), hist.y_lo()..hist.y_hi())?;

    chart.configure_mesh().draw()?;

    for x_bin in 0..hist.x_bins() {
        for y_bin in 0..hist.y_bins() {
            let content = hist.content(x_bin, y_bin);
            if content == 0.0 {
                continue;
            }
            let x0 = hist.x_lo() + x_bin as f64 * x_width;
            let y0 = hist.y_lo() + y_bin as f64 * y_width;
            chart.draw_series(std::iter::once(Rectangle::new(
                [(x0, y0), (x0 + x_width, y0 + y_width)],
                BLUE.mix(content / max).filled(),
            )))?;
        }
    }

    root.present()?;
    Ok(())
}

fn render_ratio_graph(out_path: &Path, graph: &RatioGraph) -> Result<(), Box<dyn Error>> {
    let x_lo = graph
        .points
        .iter()
        .map(|point| point.x)
        .fold(f64::INFINITY, f64::min);
    let x_hi = graph
        .points
        .iter()
        .map(|point| point.x)
        .fold(f64::NEG_INFINITY, f64::max);
    let x_pad = ((x_hi - x_lo) * 0.05).max(0.5);
    let y_max = graph
        .points
        .iter()
        .map(|point| point.value + point.error_high)
        .fold(0.0, f64::max)
        .max(1.0);

    let root = SVGBackend::new(out_path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&graph.name, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((x_lo - x_pad)..(x_hi + x_pad), 0.0f64..(y_max * 1.1))?;

    chart.configure_mesh().y_desc("ratio").draw()?;

    chart.draw_series(graph.points.iter().map(|point| {
        ErrorBar::new_vertical(
            point.x,
            point.value - point.error_low,
            point.value,
            point.value + point.error_high,
            BLUE.filled(),
            6,
        )
    }))?;

    root.present()?;
    Ok(())
}

fn render_comparison(out_path: &Path, comparison: &ShapeComparison) -> Result<(), Box<dyn Error>> {
    let y_max = comparison
        .baseline
        .max_content()
        .max(comparison.pileup.max_content())
        .max(1.0e-6);

    let root = SVGBackend::new(out_path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&comparison.name, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(
            comparison.baseline.lo()..comparison.baseline.hi(),
            0.0f64..(y_max * 1.1),
        )?;

    chart.configure_mesh().y_desc("normalized").draw()?;

    chart
        .draw_series(LineSeries::new(bin_points(&comparison.baseline), &BLUE))?
        .label("noPU")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));
    chart
        .draw_series(LineSeries::new(bin_points(&comparison.pileup), &RED))?
        .label("PU200")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

fn render_resolution_overlay(
    out_path: &Path,
    overlay: &ResolutionOverlay,
) -> Result<(), Box<dyn Error>> {
    let first = match overlay.slices.first() {
        Some(slice) => &slice.hist,
        None => return Ok(()),
    };
    let y_max = overlay
        .slices
        .iter()
        .map(|slice| slice.hist.max_content())
        .fold(0.0, f64::max)
        .max(1.0);

    let root = SVGBackend::new(out_path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("{}Muons residuals", overlay.category.prefix()),
            ("sans-serif", 20),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(first.lo()..first.hi(), 0.0f64..(y_max * 1.1))?;

    chart.configure_mesh().y_desc("entries").draw()?;

    for (index, slice) in overlay.slices.iter().enumerate() {
        let color = Palette99::pick(index).mix(1.0);
        chart
            .draw_series(LineSeries::new(bin_points(&slice.hist), &color))?
            .label(&slice.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

fn bin_points(hist: &Hist1) -> Vec<(f64, f64)> {
    (0..hist.bins())
        .map(|bin| (hist.bin_center(bin), hist.content(bin)))
        .collect()
}
