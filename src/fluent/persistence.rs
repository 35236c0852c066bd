//! `PersistenceCondition`: asserts a state variable holds an object value
//! over a timepoint interval.

use crate::temporal::TimepointId;

use super::state_variable::StateVariable;

/// Opaque handle into the mission's location arena (the "constants" §6
/// mentions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationId(pub usize);

/// How a cardinality bound constrains a requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardinalityKind {
    Min,
    Max,
    Exact,
}

/// The value a state variable is asserted to hold.
///
/// Dynamic dispatch on these two variants is limited to "evaluate against a
/// candidate count/attribute value" (see [`ObjectValue::is_satisfied_by`])
/// rather than a trait object, since there are exactly two kinds and neither
/// gains anything from being boxed.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectValue {
    LocationCardinality {
        location: LocationId,
        n: u32,
        kind: CardinalityKind,
    },
    LocationNumericAttribute {
        location: LocationId,
        attribute: String,
        min_incl: f64,
        max_incl: f64,
    },
}

impl ObjectValue {
    pub fn location(&self) -> LocationId {
        match self {
            ObjectValue::LocationCardinality { location, .. } => *location,
            ObjectValue::LocationNumericAttribute { location, .. } => *location,
        }
    }

    /// Evaluates whether `candidate` satisfies this object value: a count
    /// for `LocationCardinality`, an attribute reading for
    /// `LocationNumericAttribute`.
    pub fn is_satisfied_by(&self, candidate: f64) -> bool {
        match self {
            ObjectValue::LocationCardinality { n, kind, .. } => match kind {
                CardinalityKind::Min => candidate >= *n as f64,
                CardinalityKind::Max => candidate <= *n as f64,
                CardinalityKind::Exact => candidate == *n as f64,
            },
            ObjectValue::LocationNumericAttribute {
                min_incl, max_incl, ..
            } => candidate >= *min_incl && candidate <= *max_incl,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersistenceCondition {
    pub state_variable: StateVariable,
    pub object_value: ObjectValue,
    pub from_tp: TimepointId,
    pub to_tp: TimepointId,
}

impl PersistenceCondition {
    pub fn new(
        state_variable: StateVariable,
        object_value: ObjectValue,
        from_tp: TimepointId,
        to_tp: TimepointId,
    ) -> Self {
        Self {
            state_variable,
            object_value,
            from_tp,
            to_tp,
        }
    }
}
