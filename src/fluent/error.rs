use thiserror::Error;

use crate::organization::OntologyError;

#[derive(Debug, Error)]
pub enum FtrError {
    #[error("unknown symbol referenced while extracting a requirement: {0}")]
    UnknownSymbol(String),

    #[error("organization model query failed during FTR extraction: {0}")]
    Ontology(#[from] OntologyError),

    #[error("no feasible coalition for resource set {0:?}")]
    InfeasibleCoalition(Vec<String>),
}
