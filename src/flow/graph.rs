//! Flow graph: transit edges aggregated from every active role's timeline
//! (§4.6). Hold edges (same location) never contend for capacity and are
//! not represented — only the transitions between distinct locations can
//! produce a flaw.

use std::collections::HashMap;

use crate::csp::TransportNetwork;
use crate::mission::Mission;
use crate::model::RoleId;
use crate::spacetime::{active_roles, requirement_spans};
use crate::temporal::TimepointId;

/// One role's move across a single transit edge `(from_location,
/// to_location)` at time step `t -> t+1`, tying the edge back to the FTR
/// pair that caused it.
#[derive(Debug, Clone, Copy)]
pub struct RoleTransit {
    pub role: RoleId,
    pub ftr: usize,
    pub subsequent_ftr: usize,
    pub t: usize,
}

/// Transit edges keyed by `(from_location, to_location, t)`, each carrying
/// every role that needs to cross it at that step.
#[derive(Debug, Clone, Default)]
pub struct FlowGraph {
    pub edges: HashMap<(usize, usize, usize), Vec<RoleTransit>>,
}

impl FlowGraph {
    /// Derives the transit edges directly from each active role's required
    /// stop sequence: the role is pinned to its first FTR's location for
    /// that FTR's span, then (per the timeline builder's backward-fill,
    /// [`crate::spacetime::build_role_timeline`]) it is considered already
    /// underway to the next FTR's location from the step right after the
    /// first FTR's span ends — so the edge sits at `to_pos_a - 1`.
    pub fn build(mission: &Mission, solution: &TransportNetwork) -> Self {
        let order = mission
            .temporal_network()
            .sort()
            .unwrap_or_else(|_| (0..mission.timepoint_count()).map(TimepointId).collect());

        let mut graph = Self::default();
        for role_idx in active_roles(solution) {
            let spans = requirement_spans(mission, solution, role_idx, &order);
            for window in spans.windows(2) {
                let (ftr, _from_pos_a, to_pos_a, from_loc) = window[0];
                let (subsequent_ftr, _from_pos_b, _to_pos_b, to_loc) = window[1];
                if from_loc == to_loc {
                    continue;
                }
                let t = to_pos_a.saturating_sub(1);
                graph
                    .edges
                    .entry((from_loc, to_loc, t))
                    .or_default()
                    .push(RoleTransit { role: RoleId(role_idx), ftr, subsequent_ftr, t });
            }
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fluent::{CardinalityKind, ObjectValue, PersistenceCondition, StateVariable};
    use crate::model::ModelPool;
    use crate::organization::InMemoryOrganizationModel;
    use crate::temporal::QualitativeRelation;

    fn scenario_a() -> (Mission, InMemoryOrganizationModel) {
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
        (mission, org)
    }

    #[test]
    fn single_role_relocation_produces_one_transit_edge() {
        let (mission, org) = scenario_a();
        let network = TransportNetwork::new(&mission, &org).unwrap();
        let mut session = crate::session::Session::unbounded();
        let outcome = crate::csp::solve(&network, &mut session, &[]);
        let solution = outcome.solution().unwrap();

        let graph = FlowGraph::build(&mission, solution);
        assert_eq!(graph.edges.len(), 1);
        let transits = graph.edges.values().next().unwrap();
        assert_eq!(transits.len(), 1);
    }
}
