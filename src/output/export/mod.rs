//! Export of simulation results to delimited text files
//!
//! # Available exports
//!
//! | Function                   | Content                                        |
//! |----------------------------|------------------------------------------------|
//! | [`export_diagnostics_csv`] | time, mass, periodic integral, peak, amplitude |
//! | [`export_velocity_csv`]    | time, estimated soliton velocity               |
//! | [`export_history_csv`]     | `u(x, t)`, one row per kept level, strided     |
//!
//! # Usage example
//!
//! ```rust,ignore
//! use kdv_rs::output::export::{export_diagnostics_csv, CsvConfig, CsvMetadata};
//!
//! let output = Simulation::new(config)?.run()?;
//!
//! let csv = CsvConfig::high_precision().with_metadata(CsvMetadata::from_output(&output));
//! export_diagnostics_csv(&output.diagnostics, "diagnostics.csv", Some(&csv))?;
//! ```

pub mod csv;

pub use csv::{
    CsvConfig, CsvMetadata, export_diagnostics_csv, export_history_csv, export_velocity_csv,
};
