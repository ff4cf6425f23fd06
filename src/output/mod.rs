//! Output of simulation results
//!
//! - **export**: CSV files for external analysis
//! - **visualization**: PNG/SVG plots (`plotting` feature)
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use kdv_rs::output::export::export_diagnostics_csv;
//! use kdv_rs::output::visualization::plot_profile_evolution;
//!
//! export_diagnostics_csv(&output.diagnostics, "diagnostics.csv", None)?;
//! plot_profile_evolution(&output.result, &output.grid, 5, "profiles.png", None)?;
//! ```
//!
//! Both accept the structures produced by
//! [`Simulation::run`](crate::simulation::Simulation::run) and never modify them.

pub mod export;

#[cfg(feature = "plotting")]
pub mod visualization;

pub use export::{CsvConfig, CsvMetadata, export_diagnostics_csv, export_history_csv, export_velocity_csv};

#[cfg(feature = "plotting")]
pub use visualization::{PlotConfig, plot_diagnostics, plot_profile_evolution};
