use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpacetimeError {
    #[error("space-time node ({location}, {timepoint}) already has an outgoing edge")]
    ForkedTimeline { location: usize, timepoint: usize },

    #[error("role's required location at timepoint {timepoint} is unreachable from its prior stop")]
    UnreachableRequirement { timepoint: usize },
}
