//! Flaws: transport-feasibility deficiencies reported by the flow check,
//! consumed by the restart/refinement driver (§4.7).

use std::fmt;

use crate::model::RoleId;

/// Kinds of flow-constraint violation the flow check can report (§4.7's
/// table of violation kinds).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintViolation {
    MinFlow,
    TotalMinFlow,
    TransFlow,
    TotalTransFlow,
}

/// A single transport-feasibility deficiency, carrying enough context for
/// the refinement driver to translate it into a new CSP constraint
/// (`addDistinct`, §4.7).
#[derive(Debug, Clone)]
pub struct Flaw {
    pub violation: ConstraintViolation,
    pub role: RoleId,
    pub previous_ftr: Option<usize>,
    pub ftr: usize,
    pub subsequent_ftr: Option<usize>,
    pub delta: u32,
}

impl fmt::Display for Flaw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.violation {
            ConstraintViolation::MinFlow | ConstraintViolation::TotalMinFlow => write!(
                f,
                "{:?} violation: role {:?} short {} unit(s) of inflow between requirement {:?} and requirement {}",
                self.violation, self.role, self.delta, self.previous_ftr, self.ftr
            ),
            ConstraintViolation::TransFlow | ConstraintViolation::TotalTransFlow => write!(
                f,
                "{:?} violation: role {:?} short {} unit(s) of transit capacity between requirement {} and requirement {:?}",
                self.violation, self.role, self.delta, self.ftr, self.subsequent_ftr
            ),
        }
    }
}
