//! End-to-end pipeline
//!
//! configuration → grid → initial field → scenario → RK4 run → diagnostics

use log::{debug, info};

use crate::config::SimulationConfig;
use crate::diagnostics::DiagnosticSeries;
use crate::error::Result;
use crate::models::KdvModel;
use crate::physics::Grid;
use crate::solver::{RK4Solver, Scenario, SimulationResult, Solver};

/// Everything a run produces
#[derive(Debug, Clone)]
pub struct SimulationOutput {
    /// Grid the run was discretised on
    pub grid: Grid,
    /// Field history, stability report and solver metadata
    pub result: SimulationResult,
    /// Derived time series
    pub diagnostics: DiagnosticSeries,
}

impl SimulationOutput {
    pub fn is_stable(&self) -> bool {
        self.result.stability.is_stable()
    }
}

/// A validated configuration ready to run
///
/// # Example
///
/// ```rust
/// use kdv_rs::config::SimulationConfig;
/// use kdv_rs::simulation::Simulation;
///
/// let config = SimulationConfig::default().with_time(0.01, 0.1);
/// let output = Simulation::new(config).unwrap().run().unwrap();
///
/// assert_eq!(output.result.len(), 10);
/// assert_eq!(output.diagnostics.len(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
}

impl Simulation {
    /// Validate `config` and wrap it
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Assemble model, grid and initial field
    pub fn scenario(&self) -> Result<Scenario> {
        let grid = self.config.grid()?;
        let initial = self.config.initial.build(&grid)?;
        let model = KdvModel::new(self.config.operator, &grid);

        Ok(Scenario::new(Box::new(model), grid, initial))
    }

    /// Integrate and post-process
    ///
    /// Deterministic: the same configuration always gives bit-identical
    /// output. An unstable run is still `Ok`; check
    /// [`SimulationOutput::is_stable`].
    pub fn run(&self) -> Result<SimulationOutput> {
        let scenario = self.scenario()?;
        let grid = scenario.grid.clone();

        info!(
            "Running {} on {} points for {} time levels (h = {}, dt = {})",
            scenario.get_model_name(),
            grid.points(),
            grid.steps(),
            grid.h(),
            grid.dt()
        );

        let solver = RK4Solver::new();
        let mut result = solver.solve(&scenario)?;
        result.add_metadata("operator", self.config.operator.selector());
        result.add_metadata("grid points", &grid.points().to_string());
        result.add_metadata("h", &grid.h().to_string());

        let diagnostics = DiagnosticSeries::compute(&result, &grid, self.config.compute_velocity)?;

        debug!(
            "Diagnostics: final amplitude {:?}, mass drift {:?}, {} velocity readings",
            diagnostics.amplitude.last(),
            diagnostics.mass_drift(),
            diagnostics.velocity.as_ref().map_or(0, |v| v.len())
        );
        info!(
            "Simulation finished: {}",
            if result.stability.is_stable() {
                "stable"
            } else {
                "unstable"
            }
        );

        Ok(SimulationOutput {
            grid,
            result,
            diagnostics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KdvError;
    use crate::models::{InitialCondition, SpatialOperator};

    #[test]
    fn test_invalid_config_rejected_before_run() {
        let config = SimulationConfig::default().with_time(0.0, 1.0);

        assert!(matches!(
            Simulation::new(config),
            Err(KdvError::InvalidParameter { name: "dt", .. })
        ));
    }

    #[test]
    fn test_scenario_matches_config() {
        let config = SimulationConfig::default().with_operator(SpatialOperator::Full);
        let simulation = Simulation::new(config).unwrap();

        let scenario = simulation.scenario().unwrap();

        assert_eq!(scenario.grid.points(), 120);
        assert_eq!(scenario.initial.len(), 120);
        assert_eq!(scenario.get_model_name(), "KdV (advection + dispersion)");
    }

    #[test]
    fn test_run_records_operator() {
        let config = SimulationConfig::default()
            .with_domain(-10.0, 30.0, 0.5)
            .with_time(0.01, 0.2)
            .with_initial(InitialCondition::soliton(0.5, 0.0));

        let output = Simulation::new(config).unwrap().run().unwrap();

        assert!(output.is_stable());
        assert_eq!(output.result.metadata.get("operator").map(String::as_str), Some("diffusive"));
        assert_eq!(output.diagnostics.len(), output.result.len());
        assert!(output.diagnostics.velocity.is_none());
    }
}
