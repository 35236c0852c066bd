//! Simple in-memory [`OrganizationModel`], built by hand for tests and the
//! scenarios in §8 — a real deployment backs this trait with an RDF/XML
//! ontology store instead.

use std::collections::{HashMap, HashSet};

use super::{OntologyError, OrganizationModel};
use crate::model::ModelPool;

#[derive(Debug, Clone, Default)]
pub struct InMemoryOrganizationModel {
    direct_super_classes: HashMap<String, HashSet<String>>,
    saturation_bounds: HashMap<String, ModelPool>,
    coalitions: HashMap<Vec<String>, Vec<ModelPool>>,
}

impl InMemoryOrganizationModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_super_class(mut self, iri: impl Into<String>, class_iri: impl Into<String>) -> Self {
        self.direct_super_classes
            .entry(iri.into())
            .or_default()
            .insert(class_iri.into());
        self
    }

    pub fn with_saturation_bound(mut self, resource_iri: impl Into<String>, bound: ModelPool) -> Self {
        self.saturation_bounds.insert(resource_iri.into(), bound);
        self
    }

    /// Registers the feasible coalitions for a resource set. `resource_iris`
    /// is normalized by sorting, so registration order doesn't matter.
    pub fn with_coalition_domain(
        mut self,
        mut resource_iris: Vec<String>,
        domain: Vec<ModelPool>,
    ) -> Self {
        resource_iris.sort();
        self.coalitions.insert(resource_iris, domain);
        self
    }
}

impl OrganizationModel for InMemoryOrganizationModel {
    fn is_sub_class_of(&self, iri: &str, class_iri: &str) -> Result<bool, OntologyError> {
        if iri == class_iri {
            return Ok(true);
        }
        let mut frontier: Vec<String> = self
            .direct_super_classes
            .get(iri)
            .into_iter()
            .flatten()
            .cloned()
            .collect();
        let mut seen = HashSet::new();
        while let Some(current) = frontier.pop() {
            if current == class_iri {
                return Ok(true);
            }
            if !seen.insert(current.clone()) {
                continue;
            }
            if let Some(parents) = self.direct_super_classes.get(&current) {
                frontier.extend(parents.iter().cloned());
            }
        }
        Ok(false)
    }

    fn all_sub_classes_of(&self, class_iri: &str) -> Result<Vec<String>, OntologyError> {
        let mut result = Vec::new();
        for iri in self.direct_super_classes.keys() {
            if self.is_sub_class_of(iri, class_iri)? {
                result.push(iri.clone());
            }
        }
        result.sort();
        Ok(result)
    }

    fn functional_saturation_bound(&self, resource_iri: &str) -> Result<ModelPool, OntologyError> {
        self.saturation_bounds
            .get(resource_iri)
            .cloned()
            .ok_or_else(|| OntologyError::UnknownIri(resource_iri.to_string()))
    }

    fn coalition_domain(
        &self,
        resource_iris: &[String],
        pool: &ModelPool,
    ) -> Result<Vec<ModelPool>, OntologyError> {
        let mut key = resource_iris.to_vec();
        key.sort();
        let domain = self.coalitions.get(&key).cloned().unwrap_or_default();
        let bounded: Vec<ModelPool> = domain
            .into_iter()
            .filter(|candidate| candidate.models().all(|m| candidate.get(m) <= pool.get(m)))
            .collect();
        if bounded.is_empty() {
            return Err(OntologyError::EmptyCoalitionDomain(key));
        }
        Ok(bounded)
    }
}
