//! Output structures for projections

use serde::{Deserialize, Serialize};

/// Financial state at the end of one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSnapshot {
    /// 1-indexed month
    pub month: u32,

    /// Interest accrued during this month only
    pub interest_this_period: f64,

    /// Initial value plus all contributions through this month
    pub total_contributed: f64,

    /// Sum of `interest_this_period` up to and including this month
    pub cumulative_interest: f64,

    /// Balance before tax, after this month's interest and contribution
    pub gross_balance: f64,

    /// `max(0, gross_balance - total_contributed)`
    pub taxable_gain: f64,

    /// Withholding rate in percent (e.g. 22.5)
    pub tax_rate: f64,

    /// Tax due if the whole balance were redeemed this month
    pub tax_withheld: f64,

    pub net_balance: f64,
}

/// Complete projection result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    /// Rounded horizon the engine iterated over
    pub total_months: u32,

    /// Effective per-month rate used (decimal)
    pub monthly_rate: f64,

    /// One snapshot per month, ascending
    pub snapshots: Vec<PeriodSnapshot>,
}

impl ProjectionResult {
    pub fn new(total_months: u32, monthly_rate: f64) -> Self {
        Self {
            total_months,
            monthly_rate,
            snapshots: Vec::with_capacity(total_months as usize),
        }
    }

    /// Add a monthly snapshot
    pub fn add_snapshot(&mut self, snapshot: PeriodSnapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn last(&self) -> Option<&PeriodSnapshot> {
        self.snapshots.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PeriodSnapshot> {
        self.snapshots.iter()
    }

    /// Totals of the run, read from the final month
    pub fn summary(&self) -> Option<SummaryData> {
        self.last().map(SummaryData::from_snapshot)
    }
}

impl<'a> IntoIterator for &'a ProjectionResult {
    type Item = &'a PeriodSnapshot;
    type IntoIter = std::slice::Iter<'a, PeriodSnapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}

/// Headline figures of a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryData {
    pub final_gross_balance: f64,
    pub total_contributed: f64,
    pub total_interest: f64,
    pub total_tax: f64,
    pub final_net_balance: f64,
}

impl SummaryData {
    /// Copy the totals out of a snapshot. Only the last snapshot of a run
    /// yields the run's summary.
    pub fn from_snapshot(snapshot: &PeriodSnapshot) -> Self {
        Self {
            final_gross_balance: snapshot.gross_balance,
            total_contributed: snapshot.total_contributed,
            total_interest: snapshot.cumulative_interest,
            total_tax: snapshot.tax_withheld,
            final_net_balance: snapshot.net_balance,
        }
    }

    /// Interest earned after withholding
    pub fn net_profit(&self) -> f64 {
        self.total_interest - self.total_tax
    }
}
