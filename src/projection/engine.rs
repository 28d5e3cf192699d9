//! Core projection engine for monthly compound-interest projections

use log::debug;

use crate::error::ProjectionError;
use crate::params::SimulationParameters;
use crate::tax::TaxSchedule;
use super::state::ProjectionState;
use super::snapshots::{PeriodSnapshot, ProjectionResult};

/// Main projection engine
///
/// Pure: the same parameters always produce the same result, and the engine
/// keeps nothing between runs, so one instance can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    schedule: TaxSchedule,
}

impl ProjectionEngine {
    /// Create a new projection engine with a given withholding schedule
    pub fn new(schedule: TaxSchedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &TaxSchedule {
        &self.schedule
    }

    /// Run the projection month by month.
    ///
    /// Inputs are not re-validated here (see [`crate::validation`]). The only
    /// rejected cases are a horizon that rounds to less than one month and one
    /// whose month count does not fit in a `u32`.
    pub fn project(&self, params: &SimulationParameters) -> Result<ProjectionResult, ProjectionError> {
        let total_months = match params.total_months() {
            Some(months) => months,
            None if params.horizon_exceeds_range() => {
                return Err(ProjectionError::HorizonTooLarge {
                    months: params.total_months_f64(),
                })
            }
            None => {
                return Err(ProjectionError::EmptyHorizon {
                    months: params.total_months_f64(),
                })
            }
        };

        let mut state = ProjectionState::from_params(params);
        let mut result = ProjectionResult::new(total_months, state.monthly_rate);

        debug!(
            "projecting {} months at monthly rate {:.8}",
            total_months, state.monthly_rate
        );

        for _month in 1..=total_months {
            let snapshot = self.calculate_month(&mut state);
            result.add_snapshot(snapshot);
        }

        Ok(result)
    }

    /// Advance the state one month and record it
    fn calculate_month(&self, state: &mut ProjectionState) -> PeriodSnapshot {
        let interest_this_period = state.advance_month();

        let total_contributed = state.total_contributed();
        let taxable_gain = state.taxable_gain();

        let tax_rate_pct = self.schedule.rate_pct_for(state.month);
        let tax_withheld = taxable_gain * self.schedule.rate_for(state.month);

        PeriodSnapshot {
            month: state.month,
            interest_this_period,
            total_contributed,
            cumulative_interest: state.cumulative_interest,
            gross_balance: state.balance,
            taxable_gain,
            tax_rate: tax_rate_pct,
            tax_withheld,
            net_balance: state.balance - tax_withheld,
        }
    }
}

/// Project with the standard regressive schedule
pub fn project(params: &SimulationParameters) -> Result<ProjectionResult, ProjectionError> {
    ProjectionEngine::default().project(params)
}
