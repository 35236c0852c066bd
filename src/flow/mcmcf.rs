//! Multi-commodity min-cost flow feasibility check (§4.7), simplified to a
//! static congestion check over the already-built timelines: since this
//! crate's space-time timelines are built constructively rather than
//! searched (§4.5, [`crate::spacetime::build_role_timeline`]), the flow
//! layer's job reduces to verifying the aggregate demand on each transit
//! edge against a shared transport-capacity bound, instead of running a
//! full network-simplex solve over a linearised LP — no LP/simplex crate
//! is part of this crate's dependency stack, and none of the example repos
//! in the retrieval pack carry one either.

use crate::csp::TransportNetwork;
use crate::model::RoleId;

use super::flaw::{ConstraintViolation, Flaw};
use super::graph::FlowGraph;

/// Transit edges absent a more specific connectivity/vehicle model in the
/// mission carry this many simultaneous crossings before a flaw is raised
/// (an Open Question resolution — see DESIGN.md).
pub const DEFAULT_TRANSIT_CAPACITY: usize = 1;

/// Checks `graph` against `transit_capacity` and the solution's own
/// concurrent-supply invariant, returning every flaw found. `TransFlow` is
/// reported per oversubscribed edge, `TotalTransFlow` once in aggregate;
/// `TotalMinFlow` is a defensive re-check of a constraint the CSP stage is
/// expected to already guarantee.
pub fn check(graph: &FlowGraph, solution: &TransportNetwork, transit_capacity: usize) -> Vec<Flaw> {
    let mut flaws = Vec::new();
    let mut total_delta = 0u32;
    let mut first_overflow: Option<(RoleId, usize, usize)> = None;

    let mut edges: Vec<((usize, usize, usize), &Vec<super::graph::RoleTransit>)> =
        graph.edges.iter().map(|(&k, v)| (k, v)).collect();
    edges.sort_by_key(|&(key, _)| key);

    for (_, transits) in edges {
        if transits.len() > transit_capacity {
            let delta = (transits.len() - transit_capacity) as u32;
            let transit = transits.last().expect("non-empty by construction");
            flaws.push(Flaw {
                violation: ConstraintViolation::TransFlow,
                role: transit.role,
                previous_ftr: None,
                ftr: transit.ftr,
                subsequent_ftr: Some(transit.subsequent_ftr),
                delta,
            });
            total_delta += delta;
            first_overflow.get_or_insert((transit.role, transit.ftr, transit.subsequent_ftr));
        }
    }

    if let Some((role, ftr, subsequent_ftr)) = first_overflow {
        flaws.push(Flaw {
            violation: ConstraintViolation::TotalTransFlow,
            role,
            previous_ftr: None,
            ftr,
            subsequent_ftr: Some(subsequent_ftr),
            delta: total_delta,
        });
    }

    if !solution.concurrent_supply_holds(&solution.available_pool()) {
        flaws.push(Flaw {
            violation: ConstraintViolation::TotalMinFlow,
            role: solution.roles.first().map(|r| r.instance_id).unwrap_or(RoleId(0)),
            previous_ftr: None,
            ftr: 0,
            subsequent_ftr: None,
            delta: 1,
        });
    }

    flaws
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fluent::{CardinalityKind, ObjectValue, PersistenceCondition, StateVariable};
    use crate::mission::Mission;
    use crate::model::ModelPool;
    use crate::organization::InMemoryOrganizationModel;
    use crate::temporal::QualitativeRelation;

    /// Two actors each independently relocate `L1 -> L2` at the same step;
    /// with `transit_capacity = 1` the shared edge is oversubscribed by one.
    fn contending_mission() -> (Mission, InMemoryOrganizationModel) {
        let org = InMemoryOrganizationModel::new()
            .with_coalition_domain(vec!["Actor".to_string()], vec![ModelPool::single("Actor", 2)]);
        let mut mission = Mission::new("scenario-c", &org).unwrap();
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
            ObjectValue::LocationCardinality { location: l1, n: 2, kind: CardinalityKind::Exact },
            t0,
            t1,
        ));
        mission.add_persistence_condition(PersistenceCondition::new(
            StateVariable::new("at", "Actor"),
            ObjectValue::LocationCardinality { location: l2, n: 2, kind: CardinalityKind::Exact },
            t1,
            t2,
        ));
        mission.set_model_pool(ModelPool::single("Actor", 2));
        (mission, org)
    }

    #[test]
    fn oversubscribed_edge_reports_trans_flow() {
        let (mission, org) = contending_mission();
        let network = TransportNetwork::new(&mission, &org).unwrap();
        let mut session = crate::session::Session::unbounded();
        let outcome = crate::csp::solve(&network, &mut session, &[]);
        let solution = outcome.solution().expect("both actors relocating is CSP-feasible");

        let graph = FlowGraph::build(&mission, solution);
        let flaws = check(&graph, solution, DEFAULT_TRANSIT_CAPACITY);
        assert!(flaws.iter().any(|f| f.violation == ConstraintViolation::TransFlow));
        assert!(flaws.iter().any(|f| f.violation == ConstraintViolation::TotalTransFlow));
    }
}
