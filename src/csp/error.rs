use thiserror::Error;

use crate::fluent::FtrError;
use crate::organization::OntologyError;
use crate::temporal::QtcnError;

#[derive(Debug, Error)]
pub enum CspError {
    #[error("failed to extract requirements for the CSP space: {0}")]
    Ftr(#[from] FtrError),

    #[error("organization model query failed while constructing the CSP space: {0}")]
    Ontology(#[from] OntologyError),

    #[error("temporal network query failed while computing FTR overlaps: {0}")]
    Temporal(#[from] QtcnError),

    #[error("requirement {0} admits no feasible model-usage assignment under its cardinality bounds")]
    InfeasibleCardinality(usize),
}
