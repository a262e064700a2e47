use crate::symbolic::utils::linspace;
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

/// number of points the curve is sampled on
pub const PLOT_SAMPLES: usize = 400;
const DASHES: usize = 60;

/// x range of the chart: one unit around the bracket and the root, or three units
/// around the root when there is no bracket
pub fn plot_range(root: f64, bracket: Option<(f64, f64)>) -> (f64, f64) {
    match bracket {
        Some((a, b)) => (a.min(b).min(root) - 1.0, a.max(b).max(root) + 1.0),
        None => (root - 3.0, root + 3.0),
    }
}

/// Samples f on [x_min, x_max]; non-finite values split the curve into separate pieces.
pub fn sample_segments(f: &dyn Fn(f64) -> f64, x_min: f64, x_max: f64, n: usize) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    for x in linspace(x_min, x_max, n) {
        let y = f(x);
        if y.is_finite() {
            current.push((x, y));
        } else if !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// y range covering every finite sample plus 5% padding, never degenerate
pub fn value_range(segments: &[Vec<(f64, f64)>]) -> (f64, f64) {
    let (lo, hi) = segments
        .iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, y)| (lo.min(y), hi.max(y)));
    if !lo.is_finite() || !hi.is_finite() {
        return (-1.0, 1.0);
    }
    let pad = ((hi - lo) * 0.05).max(1e-3);
    (lo.min(0.0) - pad, hi.max(0.0) + pad)
}

fn dashes(from: (f64, f64), to: (f64, f64)) -> Vec<[(f64, f64); 2]> {
    let step = |t: f64| (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t);
    (0..DASHES)
        .map(|i| {
            let t0 = i as f64 / DASHES as f64;
            let t1 = (i as f64 + 0.5) / DASHES as f64;
            [step(t0), step(t1)]
        })
        .collect()
}

/// Renders f with its root to a PNG file.
pub fn plot_root(
    f: &dyn Fn(f64) -> f64,
    root: f64,
    bracket: Option<(f64, f64)>,
    path: &Path,
) -> Result<(), Box<dyn Error>> {
    let (x_min, x_max) = plot_range(root, bracket);
    let segments = sample_segments(f, x_min, x_max, PLOT_SAMPLES);
    let (y_min, y_max) = value_range(&segments);

    let root_area = BitMapBackend::new(path, (1000, 600)).into_drawing_area();
    root_area.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root_area)
        .caption("Function graph", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .light_line_style(BLACK.mix(0.05))
        .x_desc("x")
        .y_desc("f(x)")
        .draw()?;

    // dashed axes
    let axis_style = BLACK.mix(0.5);
    let mut axes = dashes((x_min, 0.0), (x_max, 0.0));
    if x_min < 0.0 && x_max > 0.0 {
        axes.extend(dashes((0.0, y_min), (0.0, y_max)));
    }
    chart.draw_series(axes.into_iter().map(|d| PathElement::new(d.to_vec(), axis_style)))?;

    for segment in segments {
        chart.draw_series(LineSeries::new(segment, BLUE.stroke_width(2)))?;
    }

    let f_root = f(root);
    if f_root.is_finite() {
        chart.draw_series(std::iter::once(Circle::new((root, f_root), 6, RED.filled())))?;
    }

    root_area.present()?;
    Ok(())
}
