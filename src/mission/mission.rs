//! The `Mission` aggregate: timepoints, intervals, locations, persistence
//! conditions, and the available model pool, constructed once at load time.

use qtty::Second;

use crate::fluent::{
    CardinalityKind, FluentTimeResource, FtrError, IntervalId, LocationId, ObjectValue,
    PersistenceCondition,
};
use crate::model::ModelPool;
use crate::organization::{OntologyError, OrganizationModel};
use crate::temporal::{
    QualitativeRelation, QualitativeTemporalConstraintNetwork, QtcnError, Timepoint, TimepointId,
};

pub const FUNCTIONALITY_CLASS: &str = "Functionality";
pub const ACTOR_CLASS: &str = "Actor";

#[derive(Debug, Clone)]
pub struct Mission {
    pub name: String,
    timepoints: Vec<Timepoint<Second>>,
    intervals: Vec<(TimepointId, TimepointId)>,
    locations: Vec<String>,
    persistence_conditions: Vec<PersistenceCondition>,
    model_pool: ModelPool,
    requested_resources: Vec<String>,
    qtcn: QualitativeTemporalConstraintNetwork,
}

impl Mission {
    /// Seeds `requested_resources` with every known subclass of
    /// `Functionality`, mirroring the original constructor's upfront
    /// ontology query.
    pub fn new(
        name: impl Into<String>,
        organization: &dyn OrganizationModel,
    ) -> Result<Self, OntologyError> {
        let requested_resources = organization.all_sub_classes_of(FUNCTIONALITY_CLASS)?;
        Ok(Self {
            name: name.into(),
            timepoints: Vec::new(),
            intervals: Vec::new(),
            locations: Vec::new(),
            persistence_conditions: Vec::new(),
            model_pool: ModelPool::new(),
            requested_resources,
            qtcn: QualitativeTemporalConstraintNetwork::new(),
        })
    }

    pub fn add_qualitative_timepoint(&mut self, label_idx: usize) -> TimepointId {
        let id = TimepointId(self.timepoints.len());
        self.timepoints.push(Timepoint::Qualitative { id, label_idx });
        id
    }

    pub fn add_quantitative_timepoint(
        &mut self,
        bound: crate::solution_space::Interval<Second>,
    ) -> TimepointId {
        let id = TimepointId(self.timepoints.len());
        self.timepoints.push(Timepoint::Quantitative { id, bound });
        id
    }

    pub fn add_interval(&mut self, from: TimepointId, to: TimepointId) -> IntervalId {
        let id = IntervalId(self.intervals.len());
        self.intervals.push((from, to));
        id
    }

    pub fn add_location(&mut self, name: impl Into<String>) -> LocationId {
        let id = LocationId(self.locations.len());
        self.locations.push(name.into());
        id
    }

    pub fn location_name(&self, id: LocationId) -> Option<&str> {
        self.locations.get(id.0).map(String::as_str)
    }

    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    pub fn timepoint_count(&self) -> usize {
        self.timepoints.len()
    }

    pub fn request_resource(&mut self, resource_iri: impl Into<String>) {
        let iri = resource_iri.into();
        if !self.requested_resources.contains(&iri) {
            self.requested_resources.push(iri);
        }
    }

    pub fn add_persistence_condition(&mut self, condition: PersistenceCondition) {
        self.persistence_conditions.push(condition);
    }

    pub fn set_model_pool(&mut self, pool: ModelPool) {
        self.model_pool = pool;
    }

    pub fn model_pool(&self) -> &ModelPool {
        &self.model_pool
    }

    pub fn add_temporal_constraint(
        &mut self,
        a: TimepointId,
        b: TimepointId,
        relation: QualitativeRelation,
    ) {
        self.qtcn.add_constraint(a, b, relation);
    }

    pub fn temporal_network(&self) -> &QualitativeTemporalConstraintNetwork {
        &self.qtcn
    }

    /// Checks QTCN path-consistency and the §7 structural invariants
    /// (non-empty intervals/resources). Called once after the mission is
    /// fully populated, before FTR extraction.
    pub fn validate(&mut self) -> Result<(), MissionValidationError> {
        if self.intervals.is_empty() {
            return Err(MissionValidationError::Inconsistent(
                "mission declares no intervals".to_string(),
            ));
        }
        if self.requested_resources.is_empty() {
            return Err(MissionValidationError::Inconsistent(
                "mission declares no requestable resources".to_string(),
            ));
        }
        self.qtcn.is_consistent()?;
        Ok(())
    }

    fn interval_index(&self, from: TimepointId, to: TimepointId) -> Option<IntervalId> {
        self.intervals
            .iter()
            .position(|&(f, t)| f == from && t == to)
            .map(IntervalId)
    }

    pub fn interval_endpoints(&self, id: IntervalId) -> Option<(TimepointId, TimepointId)> {
        self.intervals.get(id.0).copied()
    }

    /// Extracts and compacts the FTR list from every `LocationCardinality`
    /// persistence condition (§4.3). Conditions keyed on a
    /// `LocationNumericAttribute` do not contribute a CSP requirement and
    /// are skipped (they constrain a continuous attribute, not a
    /// cardinality, and have no counterpart in the model/role matrices).
    pub fn extract_ftrs(
        &self,
        organization: &dyn OrganizationModel,
    ) -> Result<Vec<FluentTimeResource>, FtrError> {
        let mut raw = Vec::new();

        for condition in &self.persistence_conditions {
            let (location, n, kind) = match &condition.object_value {
                ObjectValue::LocationCardinality { location, n, kind } => (*location, *n, *kind),
                ObjectValue::LocationNumericAttribute { .. } => continue,
            };

            let interval_idx = self
                .interval_index(condition.from_tp, condition.to_tp)
                .ok_or_else(|| {
                    FtrError::UnknownSymbol(format!(
                        "interval ({:?}, {:?})",
                        condition.from_tp, condition.to_tp
                    ))
                })?;

            let resource = condition.state_variable.resource_identifier.clone();
            if !self.requested_resources.iter().any(|r| r == &resource) {
                return Err(FtrError::UnknownSymbol(resource));
            }
            if location.0 >= self.locations.len() {
                return Err(FtrError::UnknownSymbol(format!("location {:?}", location)));
            }

            let mut ftr = FluentTimeResource::new(interval_idx, location);
            ftr.resources.insert(resource.clone());

            if organization.is_sub_class_of(&resource, FUNCTIONALITY_CLASS)? {
                ftr.max_cardinalities = organization.functional_saturation_bound(&resource)?;
            } else if organization.is_sub_class_of(&resource, ACTOR_CLASS)? {
                match kind {
                    CardinalityKind::Min => {
                        ftr.min_cardinalities.set(resource.clone(), n);
                        ftr.max_cardinalities.set(resource.clone(), u32::MAX);
                    }
                    CardinalityKind::Max => {
                        ftr.max_cardinalities.set(resource.clone(), n);
                        ftr.min_cardinalities.set(resource.clone(), 0);
                    }
                    CardinalityKind::Exact => {
                        ftr.min_cardinalities.set(resource.clone(), n);
                        ftr.max_cardinalities.set(resource.clone(), n);
                    }
                }
            } else {
                return Err(FtrError::UnknownSymbol(resource));
            }

            raw.push(ftr);
        }

        let mut compacted = FluentTimeResource::compact(raw);
        for ftr in compacted.iter_mut() {
            ftr.update_max_cardinalities(&self.model_pool);
        }
        Ok(compacted)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MissionValidationError {
    #[error("mission is inconsistent: {0}")]
    Inconsistent(String),

    #[error(transparent)]
    Temporal(#[from] QtcnError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fluent::StateVariable;
    use crate::organization::InMemoryOrganizationModel;

    fn organization() -> InMemoryOrganizationModel {
        InMemoryOrganizationModel::new()
            .with_super_class("Actor", "Actor")
            .with_saturation_bound("Functionality", ModelPool::single("Actor", 3))
    }

    fn minimal_mission(org: &InMemoryOrganizationModel) -> Mission {
        let mut mission = Mission::new("test", org).unwrap();
        mission.request_resource("Actor");
        let t0 = mission.add_qualitative_timepoint(0);
        let t1 = mission.add_qualitative_timepoint(1);
        mission.add_interval(t0, t1);
        mission.add_location("L1");
        mission.set_model_pool(ModelPool::single("Actor", 2));
        mission
    }

    #[test]
    fn validate_rejects_empty_mission() {
        let org = organization();
        let mut mission = Mission::new("empty", &org).unwrap();
        assert!(mission.validate().is_err());
    }

    #[test]
    fn validate_passes_for_populated_mission() {
        let org = organization();
        let mut mission = minimal_mission(&org);
        assert!(mission.validate().is_ok());
    }

    #[test]
    fn extract_ftrs_builds_min_cardinality_requirement() {
        let org = organization();
        let mission = minimal_mission(&org);
        let t0 = TimepointId(0);
        let t1 = TimepointId(1);
        let mut mission = mission;
        mission.add_persistence_condition(PersistenceCondition::new(
            StateVariable::new("at", "Actor"),
            ObjectValue::LocationCardinality {
                location: LocationId(0),
                n: 1,
                kind: CardinalityKind::Min,
            },
            t0,
            t1,
        ));
        let ftrs = mission.extract_ftrs(&org).unwrap();
        assert_eq!(ftrs.len(), 1);
        assert_eq!(ftrs[0].min_cardinalities.get("Actor"), 1);
    }

    #[test]
    fn extract_ftrs_rejects_unknown_resource() {
        let org = organization();
        let mut mission = minimal_mission(&org);
        let t0 = TimepointId(0);
        let t1 = TimepointId(1);
        mission.add_persistence_condition(PersistenceCondition::new(
            StateVariable::new("at", "Ghost"),
            ObjectValue::LocationCardinality {
                location: LocationId(0),
                n: 1,
                kind: CardinalityKind::Min,
            },
            t0,
            t1,
        ));
        assert!(mission.extract_ftrs(&org).is_err());
    }
}
