//! Symbolic and quantitative time with a partial order: the QTCN for
//! qualitative point-algebra relations, the STN for numeric bounds, and the
//! timepoint handles both are keyed on.

mod error;
mod qtcn;
mod relation;
mod stn;
mod timepoint;

pub use error::{QtcnError, StnError};
pub use qtcn::QualitativeTemporalConstraintNetwork;
pub use relation::QualitativeRelation;
pub use stn::SimpleTemporalNetwork;
pub use timepoint::{Timepoint, TimepointId, TimepointTypeMismatch};
