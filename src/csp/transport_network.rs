//! CSP space: the `ModelUsage`/`RoleUsage` decision matrices and the seven
//! constraints posted at construction (§4.4).

use std::collections::HashMap;

use super::error::CspError;
use crate::fluent::FluentTimeResource;
use crate::mission::Mission;
use crate::model::{ModelPool, Role, RoleId};
use crate::organization::OrganizationModel;
use crate::temporal::TimepointId;

/// `ModelUsage` (`models.len() x ftrs.len()`) and `RoleUsage`
/// (`roles.len() x ftrs.len()`) over a fixed set of requirements.
///
/// Variables are plain `Vec<Vec<_>>` rather than Gecode-style copy-on-write
/// trailed arrays (§9 "space cloning" design note): this crate's search
/// clones the whole `TransportNetwork` per node instead, which is the
/// straightforward translation when there is no constraint-propagation
/// engine underneath — see [`super::search`] for the trade-off this buys.
#[derive(Debug, Clone)]
pub struct TransportNetwork {
    pub ftrs: Vec<FluentTimeResource>,
    pub models: Vec<String>,
    pub roles: Vec<Role>,
    pub model_usage: Vec<Vec<u32>>,
    pub role_usage: Vec<Vec<bool>>,
    pub coalition_domains: Vec<Vec<ModelPool>>,
    pub overlaps: Vec<(usize, usize)>,
    pub cost: u32,
}

impl TransportNetwork {
    pub fn new(mission: &Mission, organization: &dyn OrganizationModel) -> Result<Self, CspError> {
        let ftrs = mission.extract_ftrs(organization)?;
        let pool = mission.model_pool().clone();
        let models: Vec<String> = pool.models().map(str::to_string).collect();

        let mut roles = Vec::new();
        for model in &models {
            for _ in 0..pool.get(model) {
                let id = RoleId(roles.len());
                roles.push(Role::new(id, model.clone()));
            }
        }

        let mut coalition_domains = Vec::with_capacity(ftrs.len());
        for (idx, ftr) in ftrs.iter().enumerate() {
            let resource_list: Vec<String> = ftr.resources.iter().cloned().collect();
            let domain = organization.coalition_domain(&resource_list, &pool)?;
            let bounded: Vec<ModelPool> = domain
                .into_iter()
                .filter(|candidate| {
                    models.iter().all(|m| {
                        let count = candidate.get(m);
                        count >= ftr.min_cardinalities.get(m) && count <= ftr.max_cardinalities.get(m)
                    })
                })
                .collect();
            if bounded.is_empty() {
                return Err(CspError::InfeasibleCardinality(idx));
            }
            coalition_domains.push(bounded);
        }

        let overlaps = compute_overlaps(mission, &ftrs);

        let m = models.len();
        let r = ftrs.len();
        let k = roles.len();

        Ok(Self {
            ftrs,
            models,
            roles,
            model_usage: vec![vec![0; r]; m],
            role_usage: vec![vec![false; r]; k],
            coalition_domains,
            overlaps,
            cost: 0,
        })
    }

    pub fn requirement_count(&self) -> usize {
        self.ftrs.len()
    }

    pub fn model_index(&self, model_iri: &str) -> Option<usize> {
        self.models.iter().position(|m| m == model_iri)
    }

    /// Constraint 3: every requirement's row sum is at least 1.
    pub fn non_empty_requirements(&self) -> bool {
        (0..self.ftrs.len()).all(|r| self.requirement_model_sum(r) >= 1)
    }

    fn requirement_model_sum(&self, r: usize) -> u32 {
        self.model_usage.iter().map(|row| row[r]).sum()
    }

    /// Constraint 4: for every pair of overlapping FTRs, per-model combined
    /// usage does not exceed the pool (overlap here forms an interval
    /// graph, so pairwise containment is equivalent to clique containment).
    pub fn concurrent_supply_holds(&self, pool: &ModelPool) -> bool {
        for (m_idx, model) in self.models.iter().enumerate() {
            let capacity = pool.get(model);
            for &(i, j) in &self.overlaps {
                if self.model_usage[m_idx][i] + self.model_usage[m_idx][j] > capacity {
                    return false;
                }
            }
        }
        true
    }

    /// Constraint 5: for each `(model, ftr)`, the sum of that model's role
    /// columns equals the model-usage cell.
    pub fn role_model_link_holds(&self) -> bool {
        for r in 0..self.ftrs.len() {
            for (m_idx, model) in self.models.iter().enumerate() {
                let role_sum: u32 = self
                    .roles
                    .iter()
                    .enumerate()
                    .filter(|(_, role)| &role.model_iri == model)
                    .map(|(k, _)| self.role_usage[k][r] as u32)
                    .sum();
                if role_sum != self.model_usage[m_idx][r] {
                    return false;
                }
            }
        }
        true
    }

    /// Constraint 6: among overlapping FTRs, every role is active in at
    /// most one.
    pub fn unary_role_usage_holds(&self) -> bool {
        self.overlaps
            .iter()
            .all(|&(i, j)| (0..self.roles.len()).all(|k| !(self.role_usage[k][i] && self.role_usage[k][j])))
    }

    /// The pool implied by the expanded role list (one role per pool unit,
    /// by construction — see [`TransportNetwork::new`]).
    pub fn available_pool(&self) -> ModelPool {
        let mut pool = ModelPool::new();
        for model in &self.models {
            pool.set(model.clone(), self.roles_of_model(model).count() as u32);
        }
        pool
    }

    pub fn roles_of_model(&self, model_iri: &str) -> impl Iterator<Item = usize> + '_ {
        self.roles
            .iter()
            .enumerate()
            .filter(move |(_, role)| role.model_iri == model_iri)
            .map(|(k, _)| k)
    }
}

fn compute_overlaps(mission: &Mission, ftrs: &[FluentTimeResource]) -> Vec<(usize, usize)> {
    let position = mission
        .temporal_network()
        .sort()
        .map(|order| {
            order
                .into_iter()
                .enumerate()
                .map(|(idx, tp)| (tp, idx))
                .collect::<HashMap<TimepointId, usize>>()
        })
        .unwrap_or_default();
    let pos = |tp: TimepointId| position.get(&tp).copied().unwrap_or(tp.0);

    let mut overlaps = Vec::new();
    for i in 0..ftrs.len() {
        let (from_i, to_i) = mission
            .interval_endpoints(ftrs[i].interval_idx)
            .expect("FTR interval must exist in its mission");
        for j in (i + 1)..ftrs.len() {
            let (from_j, to_j) = mission
                .interval_endpoints(ftrs[j].interval_idx)
                .expect("FTR interval must exist in its mission");
            if pos(from_i) < pos(to_j) && pos(from_j) < pos(to_i) {
                overlaps.push((i, j));
            }
        }
    }
    overlaps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::organization::InMemoryOrganizationModel;

    fn organization() -> InMemoryOrganizationModel {
        InMemoryOrganizationModel::new().with_coalition_domain(
            vec!["Actor".to_string()],
            vec![ModelPool::single("Actor", 1), ModelPool::single("Actor", 2)],
        )
    }

    fn scenario_a_mission(org: &InMemoryOrganizationModel) -> Mission {
        let mut mission = Mission::new("scenario-a", org).unwrap();
        mission.request_resource("Actor");
        let t0 = mission.add_qualitative_timepoint(0);
        let t1 = mission.add_qualitative_timepoint(1);
        let t2 = mission.add_qualitative_timepoint(2);
        mission.add_temporal_constraint(t0, t1, crate::temporal::QualitativeRelation::LESS);
        mission.add_temporal_constraint(t1, t2, crate::temporal::QualitativeRelation::LESS);
        let i1 = mission.add_interval(t0, t1);
        let i2 = mission.add_interval(t1, t2);
        let l1 = mission.add_location("L1");
        let l2 = mission.add_location("L2");
        mission.add_persistence_condition(crate::fluent::PersistenceCondition::new(
            crate::fluent::StateVariable::new("at", "Actor"),
            crate::fluent::ObjectValue::LocationCardinality {
                location: l1,
                n: 1,
                kind: crate::fluent::CardinalityKind::Min,
            },
            t0,
            t1,
        ));
        mission.add_persistence_condition(crate::fluent::PersistenceCondition::new(
            crate::fluent::StateVariable::new("at", "Actor"),
            crate::fluent::ObjectValue::LocationCardinality {
                location: l2,
                n: 1,
                kind: crate::fluent::CardinalityKind::Min,
            },
            t1,
            t2,
        ));
        mission.set_model_pool(ModelPool::single("Actor", 1));
        let _ = (i1, i2);
        mission
    }

    #[test]
    fn sequential_requirements_do_not_overlap() {
        let org = organization();
        let mission = scenario_a_mission(&org);
        let network = TransportNetwork::new(&mission, &org).unwrap();
        assert!(network.overlaps.is_empty());
    }

    #[test]
    fn concurrent_requirements_detected_as_overlapping() {
        let org = organization();
        let mut mission = Mission::new("scenario-b", &org).unwrap();
        mission.request_resource("Actor");
        let t0 = mission.add_qualitative_timepoint(0);
        let t2 = mission.add_qualitative_timepoint(1);
        mission.add_temporal_constraint(t0, t2, crate::temporal::QualitativeRelation::LESS);
        mission.add_interval(t0, t2);
        mission.add_interval(t0, t2);
        let l1 = mission.add_location("L1");
        let l2 = mission.add_location("L2");
        mission.add_persistence_condition(crate::fluent::PersistenceCondition::new(
            crate::fluent::StateVariable::new("at", "Actor"),
            crate::fluent::ObjectValue::LocationCardinality {
                location: l1,
                n: 1,
                kind: crate::fluent::CardinalityKind::Min,
            },
            t0,
            t2,
        ));
        mission.add_persistence_condition(crate::fluent::PersistenceCondition::new(
            crate::fluent::StateVariable::new("at", "Actor"),
            crate::fluent::ObjectValue::LocationCardinality {
                location: l2,
                n: 1,
                kind: crate::fluent::CardinalityKind::Min,
            },
            t0,
            t2,
        ));
        mission.set_model_pool(ModelPool::single("Actor", 1));
        let network = TransportNetwork::new(&mission, &org).unwrap();
        assert_eq!(network.overlaps, vec![(0, 1)]);
    }
}
