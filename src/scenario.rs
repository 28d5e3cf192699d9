//! Scenario runner for batch projections
//!
//! Validates each parameter set against the input limits before projecting,
//! and fans independent runs out over a thread pool.

use log::{debug, warn};
use rayon::prelude::*;

use crate::error::ProjectionError;
use crate::params::SimulationParameters;
use crate::projection::{ProjectionEngine, ProjectionResult};
use crate::validation::{validate_with, Limits};

/// Reusable runner for many projections sharing one engine and one set of limits
///
/// # Example
/// ```
/// use invest_projection::{ScenarioRunner, SimulationParameters};
///
/// let runner = ScenarioRunner::new();
/// let results = runner.rate_sweep(&SimulationParameters::default(), &[8.0, 10.0, 12.0]);
/// assert_eq!(results.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
    limits: Limits,
}

impl ScenarioRunner {
    /// Create runner with the regressive schedule and default limits
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_engine(engine: ProjectionEngine, limits: Limits) -> Self {
        Self { engine, limits }
    }

    pub fn engine(&self) -> &ProjectionEngine {
        &self.engine
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Validate then project a single parameter set
    pub fn run(&self, params: &SimulationParameters) -> Result<ProjectionResult, ProjectionError> {
        validate_with(params, &self.limits)?;
        self.engine.project(params)
    }

    /// Run many parameter sets in parallel; results keep the input order
    pub fn run_batch(
        &self,
        params: &[SimulationParameters],
    ) -> Vec<Result<ProjectionResult, ProjectionError>> {
        debug!("running batch of {} scenarios", params.len());
        let results: Vec<_> = params.par_iter().map(|p| self.run(p)).collect();

        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            warn!("{} of {} scenarios were rejected", failed, results.len());
        }
        results
    }

    /// Same parameters at each interest rate in `rates`
    pub fn rate_sweep(
        &self,
        base: &SimulationParameters,
        rates: &[f64],
    ) -> Vec<Result<ProjectionResult, ProjectionError>> {
        let scenarios: Vec<SimulationParameters> = rates
            .iter()
            .map(|&rate| SimulationParameters {
                interest_rate: rate,
                ..base.clone()
            })
            .collect();
        self.run_batch(&scenarios)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{PeriodType, RateType};
    use crate::validation::Field;

    #[test]
    fn test_rate_sweep_orders_by_rate() {
        let runner = ScenarioRunner::new();
        let results = runner.rate_sweep(&SimulationParameters::default(), &[5.0, 10.0, 15.0]);

        let finals: Vec<f64> = results
            .iter()
            .map(|r| r.as_ref().unwrap().summary().unwrap().final_gross_balance)
            .collect();
        assert_eq!(finals.len(), 3);
        assert!(finals[0] < finals[1] && finals[1] < finals[2]);
    }

    #[test]
    fn test_batch_preserves_order_and_matches_single_runs() {
        let runner = ScenarioRunner::new();
        let scenarios: Vec<_> = (1..=8)
            .map(|months| SimulationParameters {
                period: months as f64,
                period_type: PeriodType::Months,
                ..Default::default()
            })
            .collect();

        let results = runner.run_batch(&scenarios);
        for (params, result) in scenarios.iter().zip(&results) {
            let result = result.as_ref().unwrap();
            assert_eq!(result.len() as f64, params.period);
            assert_eq!(result.snapshots, runner.run(params).unwrap().snapshots);
        }
    }

    #[test]
    fn test_invalid_scenarios_are_rejected() {
        let runner = ScenarioRunner::new();
        let bad = SimulationParameters {
            interest_rate: 120.0,
            rate_type: RateType::Monthly,
            ..Default::default()
        };
        let results = runner.run_batch(&[SimulationParameters::default(), bad]);

        assert!(results[0].is_ok());
        match &results[1] {
            Err(ProjectionError::Invalid(errors)) => {
                assert!(errors.for_field(Field::InterestRate).is_some());
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }
}
