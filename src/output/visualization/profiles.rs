//! Spatial plots: snapshots of `u(x)` at several times

use std::error::Error;

use plotters::prelude::*;

use super::config::{NO_TITLE, PlotConfig};
use super::value_range;
use crate::physics::Grid;
use crate::solver::SimulationResult;

/// Plot `n_snapshots` evenly spaced fields of a run on one chart
///
/// With two snapshots or more, the first and last stored fields are among
/// them; a single snapshot shows the final field. Non-finite samples are
/// left out of the curves.
///
/// # Example
///
/// ```rust,ignore
/// plot_profile_evolution(&output.result, &output.grid, 5, "profiles.png", None)?;
/// ```
pub fn plot_profile_evolution(
    result: &SimulationResult,
    grid: &Grid,
    n_snapshots: usize,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if result.history.is_empty() {
        return Err("Empty history".into());
    }
    if n_snapshots == 0 {
        return Err("At least one snapshot is required".into());
    }
    if result.history.points() != grid.points() {
        return Err(format!(
            "Fields have {} points but the grid has {}",
            result.history.points(),
            grid.points()
        )
        .into());
    }

    let default_config = PlotConfig::profile(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let snapshots = snapshot_indices(result.history.len(), n_snapshots);
    let x = grid.coordinates();
    let profiles: Vec<(String, Vec<(f64, f64)>)> = snapshots
        .iter()
        .map(|&j| {
            let points = x
                .iter()
                .zip(result.history[j].iter())
                .filter(|(_, u)| u.is_finite())
                .map(|(x, u)| (*x, *u))
                .collect();
            (format!("t = {:.2}", result.time_points[j]), points)
        })
        .collect();

    let (u_min, u_max) = value_range(profiles.iter().flat_map(|(_, p)| p.iter().map(|(_, u)| *u)));

    let ext = std::path::Path::new(output_path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            plot_profiles_impl(backend, &profiles, (grid.x_min(), grid.x_max()), (u_min, u_max), config)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            plot_profiles_impl(backend, &profiles, (grid.x_min(), grid.x_max()), (u_min, u_max), config)
        }
    }
}

/// `n` indices spread over `0..len`, first and last included, no duplicates
fn snapshot_indices(len: usize, n: usize) -> Vec<usize> {
    if len == 0 || n == 0 {
        return Vec::new();
    }
    if n == 1 || len == 1 {
        return vec![len - 1];
    }

    let n = n.min(len);
    let mut indices: Vec<usize> = (0..n)
        .map(|k| (k as f64 * (len - 1) as f64 / (n - 1) as f64).round() as usize)
        .collect();
    indices.dedup();
    indices
}

fn plot_profiles_impl<DB: DrawingBackend>(
    backend: DB,
    profiles: &[(String, Vec<(f64, f64)>)],
    x_range: (f64, f64),
    u_range: (f64, f64),
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range.0..x_range.1, u_range.0..u_range.1)?;

    if config.show_grid {
        chart
            .configure_mesh()
            .x_desc(&config.xlabel)
            .y_desc(&config.ylabel)
            .draw()?;
    }

    for (i, (label, points)) in profiles.iter().enumerate() {
        let color = config.series_color(i);
        chart
            .draw_series(LineSeries::new(
                points.iter().copied(),
                ShapeStyle::from(&color).stroke_width(config.line_width),
            ))?
            .label(label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(config.background.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
