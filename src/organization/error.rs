use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OntologyError {
    #[error("unknown IRI referenced in an ontology query: {0}")]
    UnknownIri(String),

    #[error("coalition domain for {0:?} is empty; no feasible coalition exists")]
    EmptyCoalitionDomain(Vec<String>),

    #[error("ontology query exceeded the feasibility-check cutoff")]
    Timeout,
}
