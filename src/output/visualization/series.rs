//! Time series panels: mass, amplitude and velocity side by side

use std::error::Error;

use plotters::coord::Shift;
use plotters::prelude::*;

use super::config::{NO_TITLE, PlotConfig};
use super::value_range;
use crate::diagnostics::DiagnosticSeries;

/// One panel of [`plot_diagnostics`]
struct Panel<'a> {
    caption: &'static str,
    times: &'a [f64],
    values: &'a [f64],
}

/// Plot mass, amplitude and (when present) velocity against time
///
/// Panels are laid out left to right in one image. The velocity panel is
/// omitted when the series has no velocity.
///
/// # Example
///
/// ```rust,ignore
/// plot_diagnostics(&output.diagnostics, "diagnostics.png", None)?;
/// ```
pub fn plot_diagnostics(
    diagnostics: &DiagnosticSeries,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if diagnostics.is_empty() {
        return Err("Empty diagnostic series".into());
    }

    let default_config = PlotConfig::diagnostics(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let mut panels = vec![
        Panel {
            caption: "Mass",
            times: &diagnostics.time_points,
            values: &diagnostics.mass,
        },
        Panel {
            caption: "Amplitude",
            times: &diagnostics.time_points,
            values: &diagnostics.amplitude,
        },
    ];
    if let Some(velocity) = diagnostics.velocity.as_ref().filter(|v| !v.is_empty()) {
        panels.push(Panel {
            caption: "Velocity",
            times: &velocity.time_points,
            values: &velocity.velocity,
        });
    }

    let ext = std::path::Path::new(output_path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            plot_panels_impl(backend, &panels, config)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            plot_panels_impl(backend, &panels, config)
        }
    }
}

fn plot_panels_impl<DB: DrawingBackend>(
    backend: DB,
    panels: &[Panel<'_>],
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let root = root.titled(&config.title, ("sans-serif", 40).into_font())?;
    let areas = root.split_evenly((1, panels.len()));

    for (i, (panel, area)) in panels.iter().zip(areas.iter()).enumerate() {
        draw_panel(area, panel, config.series_color(i + 1), config)?;
    }

    root.present()?;
    Ok(())
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &Panel<'_>,
    color: RGBColor,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let points: Vec<(f64, f64)> = panel
        .times
        .iter()
        .zip(panel.values)
        .filter(|(t, v)| t.is_finite() && v.is_finite())
        .map(|(t, v)| (*t, *v))
        .collect();

    let (t_min, t_max) = value_range(points.iter().map(|(t, _)| *t));
    let (v_min, v_max) = value_range(points.iter().map(|(_, v)| *v));

    let mut chart = ChartBuilder::on(area)
        .caption(panel.caption, ("sans-serif", 24).into_font())
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(t_min..t_max, v_min..v_max)?;

    if config.show_grid {
        chart
            .configure_mesh()
            .x_desc(&config.xlabel)
            .y_label_formatter(&|y| format!("{y:.3}"))
            .draw()?;
    }

    chart.draw_series(LineSeries::new(
        points,
        ShapeStyle::from(&color).stroke_width(config.line_width),
    ))?;

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::VelocitySeries;
    use crate::solver::StabilityReport;

    fn series(with_velocity: bool) -> DiagnosticSeries {
        DiagnosticSeries {
            time_points: vec![0.0, 1.0, 2.0],
            mass: vec![1.0, 1.0, 0.99],
            periodic_integral: vec![1.0, 1.0, 1.0],
            peak_position: vec![0.0, 1.0, 2.0],
            amplitude: vec![3.0, 2.9, f64::NAN],
            velocity: with_velocity.then(|| VelocitySeries {
                time_points: vec![0.0, 2.0],
                velocity: vec![1.0, 1.0],
            }),
            stability: StabilityReport::stable(),
        }
    }

    #[test]
    fn test_plot_diagnostics_three_panels() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let path = temp.path().with_extension("svg");

        plot_diagnostics(&series(true), path.to_str().unwrap(), None).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_diagnostics_without_velocity() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let path = temp.path().with_extension("svg");

        plot_diagnostics(&series(false), path.to_str().unwrap(), None).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_diagnostics_rejects_empty() {
        let mut empty = series(false);
        empty.time_points.clear();

        assert!(plot_diagnostics(&empty, "unused.png", None).is_err());
    }
}
