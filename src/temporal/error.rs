use thiserror::Error;

use super::TimepointId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QtcnError {
    #[error("timepoint {0:?} is not registered in the network")]
    UnknownTimepoint(TimepointId),

    #[error("constraint between {0:?} and {1:?} collapses to the empty relation")]
    InconsistentPair(TimepointId, TimepointId),

    #[error("network has a cycle of strict precedence; no consistent total order exists")]
    CyclicOrder,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StnError {
    #[error("timepoint {0:?} is not registered in the network")]
    UnknownTimepoint(TimepointId),

    #[error("network is inconsistent: negative cycle through {0:?}")]
    NegativeCycle(TimepointId),

    #[error("upper bound {upper} is smaller than lower bound {lower}")]
    InvertedBound { lower: f64, upper: f64 },
}
