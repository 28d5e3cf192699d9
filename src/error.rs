//! Error types for projection runs and exports

use thiserror::Error;

use crate::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum ProjectionError {
    /// Horizon rounds to zero months (or below), so there is nothing to project
    #[error("projection horizon must be at least one month (got {months} months)")]
    EmptyHorizon { months: f64 },

    /// Horizon does not fit the month counter
    #[error("projection horizon of {months} months is too large to project")]
    HorizonTooLarge { months: f64 },

    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("nothing to export: projection has no rows")]
    Empty,
}
