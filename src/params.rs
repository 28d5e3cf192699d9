//! Simulation parameters matching the calculator input format

use serde::{Deserialize, Serialize};

/// Unit of the interest rate entered by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateType {
    /// Rate applies per month
    Monthly,
    /// Nominal annual rate, converted to its compound-equivalent monthly rate
    Annual,
}

/// Unit of the investment horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    Months,
    Years,
}

/// One simulation request.
///
/// Rates are percentages (`11.5` means 11.5 %). Monetary amounts carry no
/// currency and are never rounded by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationParameters {
    /// Starting balance
    pub initial_value: f64,

    /// Contribution made at the end of every month
    pub monthly_value: f64,

    /// Interest rate in percent, per `rate_type`
    pub interest_rate: f64,

    #[serde(default = "default_rate_type")]
    pub rate_type: RateType,

    /// Investment horizon, per `period_type`
    pub period: f64,

    #[serde(default = "default_period_type")]
    pub period_type: PeriodType,
}

fn default_rate_type() -> RateType {
    RateType::Annual
}

fn default_period_type() -> PeriodType {
    PeriodType::Years
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            initial_value: 5000.0,
            monthly_value: 500.0,
            interest_rate: 11.5,
            rate_type: RateType::Annual,
            period: 5.0,
            period_type: PeriodType::Years,
        }
    }
}

impl SimulationParameters {
    pub fn new(
        initial_value: f64,
        monthly_value: f64,
        interest_rate: f64,
        rate_type: RateType,
        period: f64,
        period_type: PeriodType,
    ) -> Self {
        Self {
            initial_value,
            monthly_value,
            interest_rate,
            rate_type,
            period,
            period_type,
        }
    }

    /// Horizon in months before rounding
    pub fn total_months_f64(&self) -> f64 {
        match self.period_type {
            PeriodType::Years => self.period * 12.0,
            PeriodType::Months => self.period,
        }
    }

    /// Horizon rounded to whole months (halves round up).
    ///
    /// Returns `None` when the horizon rounds to zero or below, is not finite,
    /// or exceeds `u32::MAX` months (see [`Self::horizon_exceeds_range`]).
    pub fn total_months(&self) -> Option<u32> {
        let months = self.rounded_months();
        if !months.is_finite() || months < 1.0 || months > u32::MAX as f64 {
            return None;
        }
        Some(months as u32)
    }

    /// Finite horizon whose rounded month count does not fit in a `u32`
    pub fn horizon_exceeds_range(&self) -> bool {
        let months = self.rounded_months();
        months.is_finite() && months > u32::MAX as f64
    }

    fn rounded_months(&self) -> f64 {
        (self.total_months_f64() + 0.5).floor()
    }

    /// Effective per-month rate as a decimal.
    ///
    /// Annual rates use the compound equivalent `(1 + i)^(1/12) - 1`, not `i / 12`.
    pub fn monthly_rate(&self) -> f64 {
        if self.interest_rate == 0.0 {
            return 0.0;
        }
        match self.rate_type {
            RateType::Monthly => self.interest_rate / 100.0,
            RateType::Annual => (1.0 + self.interest_rate / 100.0).powf(1.0 / 12.0) - 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_total_months_years() {
        let params = SimulationParameters::default();
        assert_eq!(params.total_months(), Some(60));

        let params = SimulationParameters { period: 1.5, ..Default::default() };
        assert_eq!(params.total_months(), Some(18));
    }

    #[test]
    fn test_total_months_rounds_half_up() {
        let params = SimulationParameters {
            period: 2.5,
            period_type: PeriodType::Months,
            ..Default::default()
        };
        assert_eq!(params.total_months(), Some(3));

        let params = SimulationParameters {
            period: 2.4,
            period_type: PeriodType::Months,
            ..Default::default()
        };
        assert_eq!(params.total_months(), Some(2));
    }

    #[test]
    fn test_total_months_empty_horizon() {
        for period in [0.0, -3.0, 0.4, f64::NAN, f64::INFINITY] {
            let params = SimulationParameters {
                period,
                period_type: PeriodType::Months,
                ..Default::default()
            };
            assert_eq!(params.total_months(), None, "period {period}");
        }
    }

    #[test]
    fn test_horizon_beyond_month_counter() {
        let params = SimulationParameters {
            period: 5e9,
            period_type: PeriodType::Months,
            ..Default::default()
        };
        assert_eq!(params.total_months(), None);
        assert!(params.horizon_exceeds_range());

        assert!(!SimulationParameters::default().horizon_exceeds_range());
        let infinite = SimulationParameters { period: f64::INFINITY, ..Default::default() };
        assert!(!infinite.horizon_exceeds_range());
    }

    #[test]
    fn test_monthly_rate_conversion() {
        let annual = SimulationParameters::default();
        assert_relative_eq!(annual.monthly_rate(), 0.009_112_47, epsilon = 1e-8);
        // Compounding twelve times gives back the annual rate
        assert_relative_eq!((1.0 + annual.monthly_rate()).powi(12), 1.115, epsilon = 1e-12);

        let monthly = SimulationParameters {
            interest_rate: 1.0,
            rate_type: RateType::Monthly,
            ..Default::default()
        };
        assert_eq!(monthly.monthly_rate(), 0.01);
    }

    #[test]
    fn test_zero_rate_is_exactly_zero() {
        for rate_type in [RateType::Monthly, RateType::Annual] {
            let params = SimulationParameters {
                interest_rate: 0.0,
                rate_type,
                ..Default::default()
            };
            assert_eq!(params.monthly_rate(), 0.0);
        }
    }

    #[test]
    fn test_json_field_names() {
        let json = r#"{
            "initialValue": 1000,
            "monthlyValue": 100,
            "interestRate": 1.2,
            "rateType": "monthly",
            "period": 24,
            "periodType": "months"
        }"#;
        let params: SimulationParameters = serde_json::from_str(json).unwrap();
        assert_eq!(params.rate_type, RateType::Monthly);
        assert_eq!(params.period_type, PeriodType::Months);
        assert_eq!(params.total_months(), Some(24));
    }

    #[test]
    fn test_json_unit_defaults() {
        let json = r#"{"initialValue": 0, "monthlyValue": 0, "interestRate": 10, "period": 2}"#;
        let params: SimulationParameters = serde_json::from_str(json).unwrap();
        assert_eq!(params.rate_type, RateType::Annual);
        assert_eq!(params.period_type, PeriodType::Years);
    }
}
