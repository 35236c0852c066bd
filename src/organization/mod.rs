//! Organization-model ontology interface: the planner's only window onto
//! subclass/coalition knowledge, per the external-collaborator boundary.
//!
//! The planner never interprets ontology data directly — it only calls
//! through [`OrganizationModel`], which must be read-only and thread-safe
//! for the duration of a plan.

mod error;
mod memory;

pub use error::OntologyError;
pub use memory::InMemoryOrganizationModel;

use crate::model::ModelPool;

/// Read-only query interface onto an organization-model ontology.
pub trait OrganizationModel: Send + Sync {
    fn is_sub_class_of(&self, iri: &str, class_iri: &str) -> Result<bool, OntologyError>;

    fn all_sub_classes_of(&self, class_iri: &str) -> Result<Vec<String>, OntologyError>;

    /// Maximum useful cardinality per model for a functionality; beyond it,
    /// more agents cannot improve fulfilment.
    fn functional_saturation_bound(&self, resource_iri: &str) -> Result<ModelPool, OntologyError>;

    /// Enumerates every feasible multiset of models capable of jointly
    /// fulfilling `resource_iris`, bounded by `pool`.
    fn coalition_domain(
        &self,
        resource_iris: &[String],
        pool: &ModelPool,
    ) -> Result<Vec<ModelPool>, OntologyError>;
}
