//! Projection engine for monthly investment projections

mod state;
mod engine;
mod snapshots;

pub use state::ProjectionState;
pub use engine::{project, ProjectionEngine};
pub use snapshots::{PeriodSnapshot, ProjectionResult, SummaryData};
