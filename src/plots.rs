//! plots.rs
//! Diagnostic figures for a sweep: the two scatter projections of the
//! design and the overlay of emulated spectra.
//!
//! Figures are written as SVG so rendering stays font-free and
//! headless-safe.

use std::error::Error;
use std::path::Path;

use ndarray::Array2;
use plotters::prelude::*;

use crate::core::design::Design;
use crate::core::params::PriorBounds;

pub const UNIT_SCATTER_FILE: &str = "lhs_unit.svg";
pub const RESCALED_SCATTER_FILE: &str = "lhs_rescaled.svg";
pub const SPECTRA_FILE: &str = "spectra.svg";

/// Rows to draw in the spectra overlay: every `stride`-th realization,
/// starting at row 0.
pub fn overlay_rows(nreal: usize, stride: usize) -> Vec<usize> {
    assert!(stride > 0);
    (0..nreal).step_by(stride).collect()
}

/// Scatter of the first two unit-cube columns of a fresh design.
///
/// Callers must hand in an unscaled design with at least two columns.
pub fn render_unit_scatter(
    out_path: &Path,
    design: &Design,
    names: (&str, &str),
) -> Result<(), Box<dyn Error>> {
    let root = SVGBackend::new(out_path, (800, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Latin hypercube sample, unit cube", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0f64..1.0f64, 0.0f64..1.0f64)?;

    chart
        .configure_mesh()
        .x_desc(format!("{} (unit)", names.0))
        .y_desc(format!("{} (unit)", names.1))
        .draw()?;

    // Keep the views alive past the draw call
    let (xs, ys) = (design.column(0), design.column(1));
    let points = xs.iter().copied().zip(ys.iter().copied());
    chart.draw_series(points.map(|(x, y)| Circle::new((x, y), 2, BLUE.filled())))?;

    root.present()?;
    Ok(())
}

/// Scatter of the first two rescaled columns, with the flat prior of each
/// axis shaded as a band.
pub fn render_rescaled_scatter(
    out_path: &Path,
    design: &Design,
    names: (&str, &str),
    bounds: (PriorBounds, PriorBounds),
) -> Result<(), Box<dyn Error>> {
    let (bx, by) = bounds;
    let (x_lo, x_hi) = padded(&bx, 0.05);
    let (y_lo, y_hi) = padded(&by, 0.05);

    let root = SVGBackend::new(out_path, (800, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Rescaled sample with prior bounds", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .x_desc(names.0)
        .y_desc(names.1)
        .draw()?;

    // Prior bands behind the points: vertical for x, horizontal for y
    chart.draw_series(std::iter::once(Rectangle::new(
        [(bx.lower, y_lo), (bx.upper, y_hi)],
        BLUE.mix(0.1).filled(),
    )))?;
    chart.draw_series(std::iter::once(Rectangle::new(
        [(x_lo, by.lower), (x_hi, by.upper)],
        BLUE.mix(0.1).filled(),
    )))?;

    let (xs, ys) = (design.column(0), design.column(1));
    let points = xs.iter().copied().zip(ys.iter().copied());
    chart.draw_series(points.map(|(x, y)| Circle::new((x, y), 2, BLUE.filled())))?;

    root.present()?;
    Ok(())
}

/// Log-log overlay of the selected spectra rows.
pub fn render_spectra_overlay(
    out_path: &Path,
    caption: &str,
    modes: &[f64],
    spectra: &Array2<f64>,
    rows: &[usize],
) -> Result<(), Box<dyn Error>> {
    let mut p_min = f64::INFINITY;
    let mut p_max = f64::NEG_INFINITY;
    for &i in rows {
        for &v in spectra.row(i) {
            p_min = p_min.min(v);
            p_max = p_max.max(v);
        }
    }
    if !(p_min.is_finite() && p_max.is_finite() && p_min > 0.0) {
        return Err("spectra overlay needs positive finite values".into());
    }

    let k_lo = modes[0];
    let k_hi = modes[modes.len() - 1];

    let root = SVGBackend::new(out_path, (1200, 700)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(
            (k_lo..k_hi).log_scale(),
            (p_min * 0.8..p_max * 1.25).log_scale(),
        )?;

    chart
        .configure_mesh()
        .x_desc("k [1/Mpc]")
        .y_desc("P(k) [Mpc^3]")
        .draw()?;

    for (drawn, &i) in rows.iter().enumerate() {
        let color = Palette99::pick(drawn);
        let series = modes
            .iter()
            .copied()
            .zip(spectra.row(i).iter().copied())
            .collect::<Vec<_>>();
        chart.draw_series(LineSeries::new(series, &color))?;
    }

    root.present()?;
    Ok(())
}

fn padded(b: &PriorBounds, frac: f64) -> (f64, f64) {
    let pad = b.width() * frac;
    (b.lower - pad, b.upper + pad)
}
