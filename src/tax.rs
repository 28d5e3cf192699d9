//! Regressive income-tax withholding schedule for fixed-income investments
//!
//! The rate depends only on how long the money has been invested, measured in
//! whole elapsed months (30-day months approximate the day-count brackets).

use serde::{Deserialize, Serialize};

/// One bracket of the schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Inclusive upper bound in elapsed months; `None` for the open-ended last bracket
    pub max_months: Option<u32>,

    /// Withholding rate in percent
    pub rate_pct: f64,
}

/// Withholding rates ordered by ascending holding duration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxSchedule {
    brackets: Vec<TaxBracket>,
}

impl TaxSchedule {
    /// Standard regressive table:
    /// up to 6 months 22.5 %, 7-12 months 20 %, 13-24 months 17.5 %, above 24 months 15 %
    pub fn regressive() -> Self {
        Self {
            // Percentages are exact in binary, so rate_pct / 100 is the nearest double to the decimal rate
            brackets: vec![
                TaxBracket { max_months: Some(6), rate_pct: 22.5 },
                TaxBracket { max_months: Some(12), rate_pct: 20.0 },
                TaxBracket { max_months: Some(24), rate_pct: 17.5 },
                TaxBracket { max_months: None, rate_pct: 15.0 },
            ],
        }
    }

    /// Build a schedule from brackets sorted by ascending `max_months`
    pub fn new(brackets: Vec<TaxBracket>) -> Self {
        Self { brackets }
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Rate in percent for the given elapsed months.
    ///
    /// Month 0 falls in the first bracket; durations beyond the last bounded
    /// bracket take the open-ended rate.
    pub fn rate_pct_for(&self, elapsed_months: u32) -> f64 {
        self.brackets
            .iter()
            .find(|b| b.max_months.map_or(true, |max| elapsed_months <= max))
            .or_else(|| self.brackets.last())
            .map(|b| b.rate_pct)
            .unwrap_or(0.0)
    }

    /// Rate as a decimal in `[0, 1]`
    pub fn rate_for(&self, elapsed_months: u32) -> f64 {
        self.rate_pct_for(elapsed_months) / 100.0
    }
}

impl Default for TaxSchedule {
    fn default() -> Self {
        Self::regressive()
    }
}

/// Decimal withholding rate under the regressive schedule
pub fn resolve_rate(elapsed_months: u32) -> f64 {
    resolve_rate_pct(elapsed_months) / 100.0
}

/// Percentage withholding rate under the regressive schedule
pub fn resolve_rate_pct(elapsed_months: u32) -> f64 {
    match elapsed_months {
        0..=6 => 22.5,
        7..=12 => 20.0,
        13..=24 => 17.5,
        _ => 15.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracket_boundaries() {
        assert_eq!(resolve_rate(1), 0.225);
        assert_eq!(resolve_rate(6), 0.225);
        assert_eq!(resolve_rate(7), 0.20);
        assert_eq!(resolve_rate(12), 0.20);
        assert_eq!(resolve_rate(13), 0.175);
        assert_eq!(resolve_rate(24), 0.175);
        assert_eq!(resolve_rate(25), 0.15);
        assert_eq!(resolve_rate(1200), 0.15);
    }

    #[test]
    fn test_zero_months_uses_first_bracket() {
        assert_eq!(resolve_rate(0), 0.225);
        assert_eq!(TaxSchedule::regressive().rate_for(0), 0.225);
    }

    #[test]
    fn test_schedule_matches_resolver() {
        let schedule = TaxSchedule::regressive();
        for months in 0..=1200 {
            assert_eq!(schedule.rate_for(months), resolve_rate(months), "month {months}");
            assert_eq!(schedule.rate_pct_for(months), resolve_rate_pct(months));
        }
    }

    #[test]
    fn test_rates_are_non_increasing() {
        let mut previous = resolve_rate(0);
        for months in 1..=1200 {
            let rate = resolve_rate(months);
            assert!(rate <= previous);
            assert!((0.0..=1.0).contains(&rate));
            previous = rate;
        }
    }

    #[test]
    fn test_custom_schedule_falls_back_to_last_bracket() {
        let schedule = TaxSchedule::new(vec![
            TaxBracket { max_months: Some(12), rate_pct: 10.0 },
            TaxBracket { max_months: Some(24), rate_pct: 5.0 },
        ]);
        assert_eq!(schedule.rate_pct_for(12), 10.0);
        assert_eq!(schedule.rate_pct_for(13), 5.0);
        assert_eq!(schedule.rate_pct_for(100), 5.0);
    }
}
