use thiserror::Error;

use crate::organization::OntologyError;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed mission XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("organization model query failed while constructing the mission: {0}")]
    Ontology(#[from] OntologyError),

    #[error("mission XML is missing required element or attribute: {0}")]
    MissingField(String),

    #[error("mission XML references unknown label: {0}")]
    UnknownLabel(String),

    #[error("unrecognized temporal relation symbol: {0}")]
    UnknownRelation(String),

    #[error("unrecognized cardinality kind: {0}")]
    UnknownCardinalityKind(String),

    #[error("invalid integer value for {field}: {value}")]
    InvalidInteger { field: String, value: String },
}
