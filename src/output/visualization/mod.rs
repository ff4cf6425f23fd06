//! Static plots of simulation results
//!
//! Available with the `plotting` feature. Output format follows the file
//! extension: `.svg` goes through the SVG backend, anything else is
//! rendered as a bitmap (PNG).
//!
//! # Organization
//!
//! - **config**: shared plot configuration (`PlotConfig`)
//! - **profiles**: spatial snapshots `u(x)` at several times
//! - **series**: mass / amplitude / velocity panels against time
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use kdv_rs::output::visualization::{plot_diagnostics, plot_profile_evolution, PlotConfig};
//!
//! let output = Simulation::new(config)?.run()?;
//!
//! plot_profile_evolution(&output.result, &output.grid, 5, "profiles.png", None)?;
//! plot_diagnostics(&output.diagnostics, "diagnostics.svg", Some(&PlotConfig::diagnostics("α = 0.5")))?;
//! ```

pub mod config;
pub mod profiles;
pub mod series;

pub use config::{IntoOptionalTitle, NO_TITLE, PlotConfig};
pub use profiles::plot_profile_evolution;
pub use series::plot_diagnostics;

/// Axis range covering the finite `values`, padded by 5 %
///
/// Falls back to `0..1` without finite values and widens a flat series
/// so the chart never has an empty range.
pub(crate) fn value_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if !min.is_finite() {
        return (0.0, 1.0);
    }
    if max - min < 1e-12 {
        let pad = if min == 0.0 { 1.0 } else { 0.1 * min.abs() };
        return (min - pad, max + pad);
    }

    let pad = 0.05 * (max - min);
    (min - pad, max + pad)
}
