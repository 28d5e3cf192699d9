//! Running state carried from one month to the next

use crate::params::SimulationParameters;

/// State of the investment at a point in time during projection
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Current projection month (1-indexed, 0 before the first month)
    pub month: u32,

    /// Gross balance at end of the current month
    pub balance: f64,

    /// Interest accrued since month 1
    pub cumulative_interest: f64,

    /// Starting balance, kept for the contributed-capital formula
    pub initial_value: f64,

    /// Contribution added at the end of each month
    pub monthly_value: f64,

    /// Effective per-month rate (decimal)
    pub monthly_rate: f64,
}

impl ProjectionState {
    /// Initialize state at projection start
    pub fn from_params(params: &SimulationParameters) -> Self {
        Self {
            month: 0,
            balance: params.initial_value,
            cumulative_interest: 0.0,
            initial_value: params.initial_value,
            monthly_value: params.monthly_value,
            monthly_rate: params.monthly_rate(),
        }
    }

    /// Advance one month and return the interest accrued during it.
    ///
    /// Interest accrues on the balance before this month's contribution; the
    /// contribution is added afterwards.
    pub fn advance_month(&mut self) -> f64 {
        self.month += 1;

        let interest = self.balance * self.monthly_rate;
        self.cumulative_interest += interest;
        self.balance = self.balance + interest + self.monthly_value;

        interest
    }

    /// Principal contributed through the current month, recomputed from the
    /// inputs rather than accumulated
    pub fn total_contributed(&self) -> f64 {
        self.initial_value + self.month as f64 * self.monthly_value
    }

    /// Profit base for withholding, floored at zero
    pub fn taxable_gain(&self) -> f64 {
        (self.balance - self.total_contributed()).max(0.0)
    }
}
