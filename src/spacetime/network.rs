//! `SpaceTimeNetwork`: every active role's [`Timeline`] aggregated into one
//! graph over `(location, timepoint)` nodes (§3, §4.5).

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};

use crate::csp::TransportNetwork;
use crate::mission::Mission;
use crate::model::RoleId;

use super::error::SpacetimeError;
use super::timeline::{active_roles, build_role_timeline, Timeline};

/// A node is a `(location, timepoint)` pair; an edge carries the set of
/// roles whose timeline activates it.
#[derive(Debug, Clone)]
pub struct SpaceTimeNetwork {
    pub graph: DiGraph<(usize, usize), Vec<RoleId>>,
    nodes: HashMap<(usize, usize), NodeIndex>,
    pub timelines: Vec<Timeline>,
}

impl SpaceTimeNetwork {
    /// Builds one timeline per role active in at least two requirements of
    /// `solution`, then merges them into a single graph.
    pub fn build(mission: &Mission, solution: &TransportNetwork) -> Result<Self, SpacetimeError> {
        let order = mission
            .temporal_network()
            .sort()
            .unwrap_or_else(|_| (0..mission.timepoint_count()).map(crate::temporal::TimepointId).collect());

        let mut network = Self { graph: DiGraph::new(), nodes: HashMap::new(), timelines: Vec::new() };

        for role_idx in active_roles(solution) {
            let timeline = build_role_timeline(mission, solution, role_idx, &order)?;
            network.merge(&timeline)?;
            network.timelines.push(timeline);
        }
        Ok(network)
    }

    fn node(&mut self, location: usize, timepoint: usize) -> NodeIndex {
        *self
            .nodes
            .entry((location, timepoint))
            .or_insert_with(|| self.graph.add_node((location, timepoint)))
    }

    fn merge(&mut self, timeline: &Timeline) -> Result<(), SpacetimeError> {
        for (t, locations) in timeline.locations_over_time().windows(2).enumerate() {
            let (Some(from_loc), Some(to_loc)) = (locations[0], locations[1]) else { continue };
            let from = self.node(from_loc, t);
            let to = self.node(to_loc, t + 1);
            if let Some(edge) = self.graph.find_edge(from, to) {
                self.graph[edge].push(timeline.role);
            } else {
                self.graph.add_edge(from, to, vec![timeline.role]);
            }
        }
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn roles_between(&self, from: (usize, usize), to: (usize, usize)) -> &[RoleId] {
        match (self.nodes.get(&from), self.nodes.get(&to)) {
            (Some(&f), Some(&t)) => self
                .graph
                .find_edge(f, t)
                .map(|e| self.graph[e].as_slice())
                .unwrap_or(&[]),
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fluent::{CardinalityKind, ObjectValue, PersistenceCondition, StateVariable};
    use crate::model::ModelPool;
    use crate::organization::InMemoryOrganizationModel;
    use crate::temporal::QualitativeRelation;

    #[test]
    fn scenario_a_produces_a_two_edge_timeline() {
        let org = InMemoryOrganizationModel::new()
            .with_coalition_domain(vec!["Actor".to_string()], vec![ModelPool::single("Actor", 1)]);
        let mut mission = Mission::new("scenario-a", &org).unwrap();
        mission.request_resource("Actor");
        let t0 = mission.add_qualitative_timepoint(0);
        let t1 = mission.add_qualitative_timepoint(1);
        let t2 = mission.add_qualitative_timepoint(2);
        mission.add_temporal_constraint(t0, t1, QualitativeRelation::LESS);
        mission.add_temporal_constraint(t1, t2, QualitativeRelation::LESS);
        mission.add_interval(t0, t1);
        mission.add_interval(t1, t2);
        let l1 = mission.add_location("L1");
        let l2 = mission.add_location("L2");
        mission.add_persistence_condition(PersistenceCondition::new(
            StateVariable::new("at", "Actor"),
            ObjectValue::LocationCardinality { location: l1, n: 1, kind: CardinalityKind::Min },
            t0,
            t1,
        ));
        mission.add_persistence_condition(PersistenceCondition::new(
            StateVariable::new("at", "Actor"),
            ObjectValue::LocationCardinality { location: l2, n: 1, kind: CardinalityKind::Min },
            t1,
            t2,
        ));
        mission.set_model_pool(ModelPool::single("Actor", 1));

        let network = TransportNetwork::new(&mission, &org).unwrap();
        let mut session = crate::session::Session::unbounded();
        let outcome = crate::csp::solve(&network, &mut session, &[]);
        let solution = outcome.solution().unwrap();

        let spacetime = SpaceTimeNetwork::build(&mission, solution).unwrap();
        assert_eq!(spacetime.timelines.len(), 1);
        assert!(spacetime.edge_count() >= 1);
    }
}
