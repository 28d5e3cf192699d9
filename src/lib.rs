//! Invest Projection - compound-interest projection engine with regressive tax withholding
//!
//! This library provides:
//! - Month-by-month balance projections with end-of-month contributions
//! - Compound-equivalent conversion of annual rates
//! - Regressive income-tax withholding by holding period
//! - Input validation and pt-BR number parsing/formatting
//! - CSV and text report export

pub mod error;
pub mod export;
pub mod input;
pub mod params;
pub mod projection;
pub mod scenario;
pub mod tax;
pub mod validation;

// Re-export commonly used types
pub use error::{ExportError, ProjectionError};
pub use params::{PeriodType, RateType, SimulationParameters};
pub use projection::{project, PeriodSnapshot, ProjectionEngine, ProjectionResult, SummaryData};
pub use scenario::ScenarioRunner;
pub use tax::{resolve_rate, TaxSchedule};
pub use validation::{validate, Limits, ValidationErrors};
