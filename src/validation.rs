//! Input validation applied before the engine runs
//!
//! The engine trusts its input; these checks reproduce the calculator form's
//! rules so batch and CLI callers reject the same values the form would.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::params::{RateType, SimulationParameters};

/// Upper bounds enforced on user input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Limits {
    pub max_initial_value: f64,
    pub max_monthly_value: f64,
    /// Percent per month
    pub max_monthly_rate: f64,
    /// Percent per year
    pub max_annual_rate: f64,
    pub max_total_months: f64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_initial_value: 1_000_000_000.0,
            max_monthly_value: 100_000_000.0,
            max_monthly_rate: 100.0,
            max_annual_rate: 5000.0,
            max_total_months: 1200.0,
        }
    }
}

/// Input field a validation failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    InitialValue,
    MonthlyValue,
    InterestRate,
    Period,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::InitialValue => "initialValue",
            Field::MonthlyValue => "monthlyValue",
            Field::InterestRate => "interestRate",
            Field::Period => "period",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationKind {
    #[error("value must be a finite number")]
    NotFinite,

    #[error("value cannot be negative")]
    Negative,

    #[error("value exceeds the maximum of {max}")]
    AboveLimit { max: f64 },

    #[error("{rate_type:?} rate too high (max {max}%)")]
    RateTooHigh { rate_type: RateType, max: f64 },

    #[error("period must be greater than zero")]
    NonPositivePeriod,

    #[error("period exceeds {max} months")]
    HorizonTooLong { max: f64 },
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{field}: {kind}")]
pub struct FieldError {
    pub field: Field,
    pub kind: ValidationKind,
}

/// Every failing field of one parameter set
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn for_field(&self, field: Field) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid simulation parameters: ")?;
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate with the default limits
pub fn validate(params: &SimulationParameters) -> Result<(), ValidationErrors> {
    validate_with(params, &Limits::default())
}

/// Validate against explicit limits, collecting all failures
pub fn validate_with(params: &SimulationParameters, limits: &Limits) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    let amount_checks = [
        (Field::InitialValue, params.initial_value, limits.max_initial_value),
        (Field::MonthlyValue, params.monthly_value, limits.max_monthly_value),
    ];
    for (field, value, max) in amount_checks {
        if let Some(kind) = check_amount(value, max) {
            errors.push(FieldError { field, kind });
        }
    }

    if let Some(kind) = check_rate(params, limits) {
        errors.push(FieldError { field: Field::InterestRate, kind });
    }

    if let Some(kind) = check_period(params, limits) {
        errors.push(FieldError { field: Field::Period, kind });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        log::debug!("rejected parameters {:?}: {} error(s)", params, errors.len());
        Err(ValidationErrors { errors })
    }
}

fn check_amount(value: f64, max: f64) -> Option<ValidationKind> {
    if !value.is_finite() {
        Some(ValidationKind::NotFinite)
    } else if value < 0.0 {
        Some(ValidationKind::Negative)
    } else if value > max {
        Some(ValidationKind::AboveLimit { max })
    } else {
        None
    }
}

fn check_rate(params: &SimulationParameters, limits: &Limits) -> Option<ValidationKind> {
    let rate = params.interest_rate;
    if !rate.is_finite() {
        return Some(ValidationKind::NotFinite);
    }
    if rate < 0.0 {
        return Some(ValidationKind::Negative);
    }
    let max = match params.rate_type {
        RateType::Monthly => limits.max_monthly_rate,
        RateType::Annual => limits.max_annual_rate,
    };
    if rate > max {
        return Some(ValidationKind::RateTooHigh { rate_type: params.rate_type, max });
    }
    None
}

fn check_period(params: &SimulationParameters, limits: &Limits) -> Option<ValidationKind> {
    if !params.period.is_finite() {
        return Some(ValidationKind::NotFinite);
    }
    if params.period <= 0.0 {
        return Some(ValidationKind::NonPositivePeriod);
    }
    // Unrounded month count, as entered
    if params.total_months_f64() > limits.max_total_months {
        return Some(ValidationKind::HorizonTooLong { max: limits.max_total_months });
    }
    None
}
