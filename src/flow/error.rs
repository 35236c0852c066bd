use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error("flow graph references a role with no timeline")]
    EmptyTimeline,
}
