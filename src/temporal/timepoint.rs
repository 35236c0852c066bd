//! Timepoints: the nodes shared by the QTCN and the STN.
//!
//! Timepoints are owned by the mission; every other structure addresses
//! them through a [`TimepointId`] handle rather than a reference (see the
//! cyclic-ownership design note) — the QTCN and STN are graphs keyed on
//! this id, not on the timepoint value itself.

use qtty::Unit;

use crate::solution_space::Interval;

/// Opaque handle into the mission's timepoint arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimepointId(pub usize);

/// A qualitative (labelled symbol) or quantitative (`[lo, hi]` bound)
/// timepoint.
///
/// Identity is by label for qualitative timepoints, by bound tuple for
/// quantitative ones — see [`Timepoint::equals`].
#[derive(Debug, Clone, Copy)]
pub enum Timepoint<U: Unit> {
    Qualitative { id: TimepointId, label_idx: usize },
    Quantitative { id: TimepointId, bound: Interval<U> },
}

impl<U: Unit> Timepoint<U> {
    pub fn id(&self) -> TimepointId {
        match self {
            Timepoint::Qualitative { id, .. } => *id,
            Timepoint::Quantitative { id, .. } => *id,
        }
    }

    pub fn is_qualitative(&self) -> bool {
        matches!(self, Timepoint::Qualitative { .. })
    }

    pub fn bound(&self) -> Option<Interval<U>> {
        match self {
            Timepoint::Quantitative { bound, .. } => Some(*bound),
            Timepoint::Qualitative { .. } => None,
        }
    }

    /// Type-checked equality: comparing a qualitative and a quantitative
    /// timepoint is a programming error, not a `false` result, mirroring
    /// the original's `equals` which throws on mismatched types.
    pub fn equals(&self, other: &Self) -> Result<bool, TimepointTypeMismatch> {
        match (self, other) {
            (Timepoint::Qualitative { label_idx: a, .. }, Timepoint::Qualitative { label_idx: b, .. }) => {
                Ok(a == b)
            }
            (
                Timepoint::Quantitative { bound: a, .. },
                Timepoint::Quantitative { bound: b, .. },
            ) => Ok(a.start().value() == b.start().value() && a.end().value() == b.end().value()),
            _ => Err(TimepointTypeMismatch),
        }
    }
}

/// Raised when comparing a qualitative timepoint against a quantitative one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot compare timepoints of different types")]
pub struct TimepointTypeMismatch;

/// Orders quantitative timepoints by lower bound, then upper bound.
impl<U: Unit> PartialEq for Timepoint<U> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other).unwrap_or(false)
    }
}

impl<U: Unit> PartialOrd for Timepoint<U> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        match (self.bound(), other.bound()) {
            (Some(a), Some(b)) => {
                let lo = a.start().value().partial_cmp(&b.start().value())?;
                if lo != std::cmp::Ordering::Equal {
                    return Some(lo);
                }
                a.end().value().partial_cmp(&b.end().value())
            }
            _ => None,
        }
    }
}
