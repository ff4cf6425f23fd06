//! CSV export of simulation results
//!
//! Writes diagnostics, velocity and field history to CSV, readable by
//! pandas, gnuplot, spreadsheets and most analysis tools.
//!
//! # Features
//!
//! - **Simple interface**: one function per series
//! - **Metadata support**: optional `#` header with run parameters
//! - **Customizable**: delimiter, decimal separator, precision
//! - **Validation**: empty data and mismatched lengths are rejected
//!
//! Non-finite values are written as they are (`NaN`, `inf`): the tail of an
//! unstable run is exactly what one wants to look at.
//!
//! # Quick Examples
//!
//! ```rust,ignore
//! use kdv_rs::output::export::{export_diagnostics_csv, CsvConfig, CsvMetadata};
//!
//! let output = Simulation::new(config)?.run()?;
//! let csv = CsvConfig::default().with_metadata(CsvMetadata::from_output(&output));
//!
//! export_diagnostics_csv(&output.diagnostics, "diagnostics.csv", Some(&csv))?;
//! ```
//!
//! **Output** (`diagnostics.csv`):
//! ```csv
//! # KdV Simulation Data
//! # Generated: 2026-02-11T15:30:00Z
//! # Model: Damped KdV (advection + diffusion)
//! # Solver: Runge-Kutta 4
//! # Operator: diffusive
//! # h: 0.5
//! # dt: 0.01
//! # t_max: 2.5
//! # Stable: true
//! #
//! time,mass,periodic_integral,peak_position,amplitude
//! 0.000000,4.525483,4.525483,0.000000,211.680000
//! ...
//! ```

use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};

use crate::diagnostics::{DiagnosticSeries, VelocitySeries};
use crate::physics::Grid;
use crate::simulation::SimulationOutput;
use crate::solver::StateHistory;

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust
/// use kdv_rs::output::export::CsvConfig;
///
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: 10,
///     ..Default::default()
/// };
/// assert_eq!(config.decimal_separator, '.');
/// ```
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places for floating-point values (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
        }
    }
}

impl CsvConfig {
    /// European CSV: semicolon delimiter, comma decimal separator
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// 12 decimal places
    pub fn high_precision() -> Self {
        Self {
            precision: 12,
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata for CSV header comments
///
/// Only fields that are set appear in the header.
#[derive(Debug, Clone, Default)]
pub struct CsvMetadata {
    pub model_name: Option<String>,
    pub solver_name: Option<String>,
    /// Operator selector (`full`, `inviscid`, `diffusive`)
    pub operator: Option<String>,
    pub h: Option<f64>,
    pub dt: Option<f64>,
    pub t_max: Option<f64>,
    pub grid_points: Option<usize>,
    pub time_levels: Option<usize>,
    /// Outcome of the stability scan
    pub stable: Option<bool>,
    /// Additional custom parameters
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Fill every field from a finished run
    pub fn from_output(output: &SimulationOutput) -> Self {
        let metadata = &output.result.metadata;
        let grid = &output.grid;

        Self {
            model_name: metadata.get("model").cloned(),
            solver_name: metadata.get("solver").cloned(),
            operator: metadata.get("operator").cloned(),
            h: Some(grid.h()),
            dt: Some(grid.dt()),
            t_max: Some(grid.t_max()),
            grid_points: Some(grid.points()),
            time_levels: Some(output.result.len()),
            stable: Some(output.is_stable()),
            custom: Vec::new(),
        }
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: String, value: String) {
        self.custom.push((key, value));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Write metadata header comments
fn write_metadata_header(out: &mut impl Write, metadata: &CsvMetadata) -> Result<(), Box<dyn Error>> {
    writeln!(out, "# KdV Simulation Data")?;
    writeln!(out, "# Generated: {}", chrono::Utc::now().to_rfc3339())?;

    if let Some(model) = &metadata.model_name {
        writeln!(out, "# Model: {model}")?;
    }
    if let Some(solver) = &metadata.solver_name {
        writeln!(out, "# Solver: {solver}")?;
    }
    if let Some(operator) = &metadata.operator {
        writeln!(out, "# Operator: {operator}")?;
    }
    if let Some(h) = metadata.h {
        writeln!(out, "# h: {h}")?;
    }
    if let Some(dt) = metadata.dt {
        writeln!(out, "# dt: {dt}")?;
    }
    if let Some(t_max) = metadata.t_max {
        writeln!(out, "# t_max: {t_max}")?;
    }
    if let Some(points) = metadata.grid_points {
        writeln!(out, "# Grid Points: {points}")?;
    }
    if let Some(levels) = metadata.time_levels {
        writeln!(out, "# Time Levels: {levels}")?;
    }
    if let Some(stable) = metadata.stable {
        writeln!(out, "# Stable: {stable}")?;
    }

    for (key, value) in &metadata.custom {
        writeln!(out, "# {key}: {value}")?;
    }

    writeln!(out, "#")?;
    Ok(())
}

/// Format number with configured precision and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = config.precision);

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

/// Open `output_path` and write the optional metadata block
fn create_with_header(output_path: &str, config: &CsvConfig) -> Result<BufWriter<File>, Box<dyn Error>> {
    let mut out = BufWriter::new(File::create(output_path)?);

    if config.include_metadata
        && let Some(metadata) = &config.metadata
    {
        write_metadata_header(&mut out, metadata)?;
    }

    Ok(out)
}

fn write_row(out: &mut impl Write, values: &[f64], config: &CsvConfig) -> Result<(), Box<dyn Error>> {
    let row: Vec<String> = values.iter().map(|v| format_number(*v, config)).collect();
    writeln!(out, "{}", row.join(&config.delimiter.to_string()))?;
    Ok(())
}

/// Indices `0, stride, 2·stride, …` plus the last index
fn strided_indices(len: usize, stride: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..len).step_by(stride).collect();
    if let Some(&last) = indices.last()
        && last != len - 1
    {
        indices.push(len - 1);
    }
    indices
}

// =============================================================================
// Export Functions
// =============================================================================

/// Export mass, periodic integral, peak position and amplitude per step
///
/// Columns: `time, mass, periodic_integral, peak_position, amplitude`.
///
/// # Errors
///
/// - Empty series
/// - Series of different lengths
/// - File creation or write errors
pub fn export_diagnostics_csv(
    diagnostics: &DiagnosticSeries,
    output_path: &str,
    configuration: Option<&CsvConfig>,
) -> Result<(), Box<dyn Error>> {
    // ============================= Validation =============================

    let len = diagnostics.time_points.len();
    if len == 0 {
        return Err("Empty data: diagnostic series must not be empty".into());
    }

    let columns = [
        ("mass", diagnostics.mass.len()),
        ("periodic_integral", diagnostics.periodic_integral.len()),
        ("peak_position", diagnostics.peak_position.len()),
        ("amplitude", diagnostics.amplitude.len()),
    ];
    for (name, column_len) in columns {
        if column_len != len {
            return Err(format!(
                "Data length mismatch: {column_len} values in {name} versus {len} time points"
            )
            .into());
        }
    }

    // ============================= Write ==================================

    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);
    let mut out = create_with_header(output_path, configuration)?;

    let d = configuration.delimiter;
    writeln!(out, "time{d}mass{d}periodic_integral{d}peak_position{d}amplitude")?;

    for j in 0..len {
        write_row(
            &mut out,
            &[
                diagnostics.time_points[j],
                diagnostics.mass[j],
                diagnostics.periodic_integral[j],
                diagnostics.peak_position[j],
                diagnostics.amplitude[j],
            ],
            configuration,
        )?;
    }

    out.flush()?;
    Ok(())
}

/// Export the peak velocity series
///
/// Columns: `time, velocity`.
///
/// # Errors
///
/// - Empty series (e.g. a wave that never moved)
/// - Mismatched lengths
/// - File creation or write errors
pub fn export_velocity_csv(
    velocity: &VelocitySeries,
    output_path: &str,
    configuration: Option<&CsvConfig>,
) -> Result<(), Box<dyn Error>> {
    if velocity.is_empty() {
        return Err("Empty data: velocity series must not be empty".into());
    }
    if velocity.time_points.len() != velocity.velocity.len() {
        return Err(format!(
            "Data length mismatch: {} time points versus {} velocities",
            velocity.time_points.len(),
            velocity.velocity.len()
        )
        .into());
    }

    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);
    let mut out = create_with_header(output_path, configuration)?;

    writeln!(out, "time{}velocity", configuration.delimiter)?;
    for (t, v) in velocity.time_points.iter().zip(&velocity.velocity) {
        write_row(&mut out, &[*t, *v], configuration)?;
    }

    out.flush()?;
    Ok(())
}

/// Export the field history, one row per exported time level
///
/// The header is `time` followed by the grid coordinates. Every
/// `stride`-th level is written, and the final level is always included.
///
/// # Errors
///
/// - Empty history or `stride == 0`
/// - History, time points and grid disagreeing in size
/// - File creation or write errors
pub fn export_history_csv(
    history: &StateHistory,
    time_points: &[f64],
    grid: &Grid,
    stride: usize,
    output_path: &str,
    configuration: Option<&CsvConfig>,
) -> Result<(), Box<dyn Error>> {
    // ============================= Validation =============================

    if history.is_empty() {
        return Err("Empty data: history must contain at least one field".into());
    }
    if stride == 0 {
        return Err("Invalid stride: must be at least 1".into());
    }
    if time_points.len() != history.len() {
        return Err(format!(
            "Data length mismatch: {} time points versus {} fields",
            time_points.len(),
            history.len()
        )
        .into());
    }
    if history.points() != grid.points() {
        return Err(format!(
            "Data length mismatch: fields have {} points but the grid has {}",
            history.points(),
            grid.points()
        )
        .into());
    }

    // ============================= Write ==================================

    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);
    let mut out = create_with_header(output_path, configuration)?;

    let mut header = vec!["time".to_string()];
    header.extend(grid.coordinates().iter().map(|x| format_number(*x, configuration)));
    writeln!(out, "{}", header.join(&configuration.delimiter.to_string()))?;

    let mut row = Vec::with_capacity(grid.points() + 1);
    for j in strided_indices(history.len(), stride) {
        row.clear();
        row.push(time_points[j]);
        row.extend(history[j].iter().copied());
        write_row(&mut out, &row, configuration)?;
    }

    out.flush()?;
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
