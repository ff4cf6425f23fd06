//! Soliton propagation on a periodic domain
//!
//! u_t + u·u_x + u_xxx = 0, u(x, 0) = 12α²·sech²(αx)
//!
//! Runs the full KdV operator, prints the diagnostics summary, writes CSV
//! files to `kdv_output/` and, with `--features plotting`, PNG plots.
//!
//! ```bash
//! cargo run --release --example soliton --features plotting
//! ```

use std::error::Error;
use std::fs;

use kdv_rs::config::SimulationConfig;
use kdv_rs::models::{InitialCondition, Soliton, SpatialOperator};
use kdv_rs::output::export::{
    CsvConfig, CsvMetadata, export_diagnostics_csv, export_history_csv, export_velocity_csv,
};
use kdv_rs::simulation::Simulation;

fn main() -> Result<(), Box<dyn Error>> {
    println!("=== KdV: single soliton on a ring ===\n");

    let alpha = 0.5;
    let soliton = Soliton::new(alpha, 0.0);

    let config = SimulationConfig::default()
        .with_domain(-10.0, 30.0, 0.25)
        .with_time(0.005, 10.0)
        .with_operator(SpatialOperator::Full)
        .with_initial(InitialCondition::Solitons(vec![soliton]))
        .with_velocity(true);

    let grid = config.grid()?;
    println!("Physical Parameters:");
    println!("  α: {}", alpha);
    println!("  Amplitude 12α²: {}", soliton.amplitude());
    println!("  Analytic speed 4α²: {}", soliton.speed());
    println!("\nDiscretization:");
    println!("  Domain: [{}, {})", grid.x_min(), grid.x_max());
    println!("  Spatial points: {} (h = {})", grid.points(), grid.h());
    println!("  Time levels: {} (dt = {})\n", grid.steps(), grid.dt());

    let output = Simulation::new(config)?.run()?;
    let diagnostics = &output.diagnostics;

    println!("Results:");
    println!("  Stable: {}", output.is_stable());
    if let Some(drift) = diagnostics.mass_drift() {
        println!("  Max relative mass drift: {:.3e}", drift);
    }
    if let (Some(peak), Some(amplitude)) =
        (diagnostics.peak_position.last(), diagnostics.amplitude.last())
    {
        println!("  Final peak: x = {} (u = {:.4})", peak, amplitude);
    }
    if let Some(mean) = diagnostics.velocity.as_ref().and_then(|v| v.mean()) {
        println!("  Mean velocity: {:.4} (analytic {})", mean, soliton.speed());
    }

    // =============================== Export ===============================

    fs::create_dir_all("kdv_output")?;

    let csv = CsvConfig::high_precision().with_metadata(CsvMetadata::from_output(&output));
    export_diagnostics_csv(diagnostics, "kdv_output/diagnostics.csv", Some(&csv))?;
    export_history_csv(
        &output.result.history,
        &output.result.time_points,
        &output.grid,
        100,
        "kdv_output/history.csv",
        Some(&csv),
    )?;
    if let Some(velocity) = diagnostics.velocity.as_ref().filter(|v| !v.is_empty()) {
        export_velocity_csv(velocity, "kdv_output/velocity.csv", Some(&csv))?;
    }
    println!("\nCSV written to kdv_output/");

    #[cfg(feature = "plotting")]
    {
        use kdv_rs::output::visualization::{PlotConfig, plot_diagnostics, plot_profile_evolution};

        let title = format!("Soliton α = {alpha}");
        plot_profile_evolution(
            &output.result,
            &output.grid,
            5,
            "kdv_output/profiles.png",
            Some(&PlotConfig::profile(title.as_str())),
        )?;
        plot_diagnostics(
            diagnostics,
            "kdv_output/diagnostics.png",
            Some(&PlotConfig::diagnostics(title)),
        )?;
        println!("Plots written to kdv_output/");
    }

    Ok(())
}
