//! Fluent-Time-Resource model: persistence conditions over state variables,
//! canonicalized into FTRs for the CSP space.

mod error;
mod ftr;
mod persistence;
mod state_variable;

pub use error::FtrError;
pub use ftr::{FluentTimeResource, IntervalId};
pub use persistence::{CardinalityKind, LocationId, ObjectValue, PersistenceCondition};
pub use state_variable::StateVariable;
