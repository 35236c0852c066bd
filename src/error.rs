//! Top-level error and outcome types for the planning core.

use thiserror::Error;

use crate::csp::CspError;
use crate::fluent::FtrError;
use crate::mission::{MissionValidationError, ParseError};
use crate::organization::OntologyError;
use crate::temporal::{QtcnError, StnError};

/// A fatal failure of the planning core.
///
/// `SearchExhausted` and `Stopped` are deliberately *not* variants here: per
/// the error handling policy they are normal terminal states, not failures,
/// and are carried on [`PlanOutcome`] instead.
#[derive(Debug, Error)]
pub enum PlanningError {
    #[error("failed to parse mission input: {0}")]
    Parse(#[from] ParseError),

    #[error("unknown symbol referenced: {0}")]
    UnknownSymbol(String),

    #[error("qualitative temporal network is inconsistent: {0}")]
    InconsistentTemporalNetwork(#[from] QtcnError),

    #[error("simple temporal network is inconsistent: {0}")]
    InconsistentStn(#[from] StnError),

    #[error("mission is inconsistent: {0}")]
    InconsistentMission(String),

    #[error("no feasible coalition for requirement: {0}")]
    InfeasibleCoalition(#[from] FtrError),

    #[error("organization model query failed: {0}")]
    Ontology(#[from] OntologyError),

    #[error("CSP space construction failed: {0}")]
    Csp(#[from] CspError),
}

impl From<MissionValidationError> for PlanningError {
    fn from(err: MissionValidationError) -> Self {
        match err {
            MissionValidationError::Inconsistent(msg) => PlanningError::InconsistentMission(msg),
            MissionValidationError::Temporal(e) => PlanningError::InconsistentTemporalNetwork(e),
        }
    }
}

/// Terminal state of a planning run.
///
/// `Exhausted` and `Stopped` are returned as `Ok` variants: per the error
/// handling policy they are normal terminations, not planner failures.
#[derive(Debug, Clone)]
pub enum PlanOutcome<S> {
    /// A solution was found and no further restarts were attempted.
    Solved(S),
    /// The restart/refinement driver ran out of flaws to translate into new
    /// constraints without finding a feasible solution.
    Exhausted,
    /// A `Stop` predicate fired. Carries the best-known solution, if any.
    Stopped(Option<S>),
}

impl<S> PlanOutcome<S> {
    pub fn is_solved(&self) -> bool {
        matches!(self, PlanOutcome::Solved(_))
    }

    pub fn solution(&self) -> Option<&S> {
        match self {
            PlanOutcome::Solved(s) => Some(s),
            PlanOutcome::Stopped(Some(s)) => Some(s),
            _ => None,
        }
    }
}
