//! Mission Planning Core: QTCN/STN temporal reasoning, FTR extraction, a
//! model/role assignment CSP, space-time timeline construction, and
//! multi-commodity min-cost flow feasibility checking with flaw-driven
//! restart refinement.

pub mod csp;
pub mod driver;
pub mod error;
pub mod fluent;
pub mod flow;
pub mod mission;
pub mod model;
pub mod organization;
pub mod session;
pub mod solution_space;
pub mod spacetime;
pub mod temporal;
pub mod units;

pub use error::{PlanOutcome, PlanningError};
pub use session::Session;

/// Identifier type used for missions and other planning artifacts.
pub type Id = String;

/// Generates a new unique identifier (UUID v4).
pub fn generate_id() -> Id {
    uuid::Uuid::new_v4().to_string()
}
