//! Branch-and-bound search over a [`TransportNetwork`]: phase 1 assigns
//! `ModelUsage`, phase 2 assigns `RoleUsage` (§4.4).
//!
//! Restart-based search itself (master/slave, no-goods, `cost < previousCost`)
//! lives one layer up in [`crate::driver`], which calls [`solve`] once per
//! restart with an accumulated list of `addDistinct` constraints.

use std::collections::HashSet;

use super::branching;
use super::transport_network::TransportNetwork;
use crate::error::PlanOutcome;
use crate::session::Session;

/// A posted `addDistinct(model, a, b, k)` constraint (§4.7): the number of
/// role-of-`model` instances active in at least one of requirements `a`/`b`
/// but not both must be at least `k`.
#[derive(Debug, Clone)]
pub struct DistinctConstraint {
    pub model: String,
    pub a: usize,
    pub b: usize,
    pub k: u32,
}

pub type CspSolution = TransportNetwork;

/// Runs phase 1 then phase 2 to completion, or returns `Exhausted`/`Stopped`
/// per the session's stop predicate.
pub fn solve(
    template: &TransportNetwork,
    session: &mut Session,
    distinct: &[DistinctConstraint],
) -> PlanOutcome<CspSolution> {
    let mut network = template.clone();
    let mut assigned = vec![false; network.requirement_count()];

    if !backtrack_models(&mut network, &mut assigned, session) {
        return if session.should_stop() {
            PlanOutcome::Stopped(None)
        } else {
            PlanOutcome::Exhausted
        };
    }

    if !assign_roles(&mut network, session, distinct) {
        return if session.should_stop() {
            PlanOutcome::Stopped(None)
        } else {
            PlanOutcome::Exhausted
        };
    }

    PlanOutcome::Solved(network)
}

fn backtrack_models(network: &mut TransportNetwork, assigned: &mut [bool], session: &mut Session) -> bool {
    let Some(r) = branching::select_requirement(network, assigned) else {
        return network.non_empty_requirements() && network.concurrent_supply_holds(&network.available_pool());
    };

    session.record_node();
    if session.should_stop() {
        return false;
    }

    let models = network.models.clone();
    let domain = branching::ordered_coalitions(&network.coalition_domains[r], &models);
    let pool = network.available_pool();

    for coalition in domain {
        for (m_idx, model) in models.iter().enumerate() {
            network.model_usage[m_idx][r] = coalition.get(model);
        }
        if network.concurrent_supply_holds(&pool) {
            assigned[r] = true;
            if backtrack_models(network, assigned, session) {
                return true;
            }
            assigned[r] = false;
        }
        session.record_fail();
    }

    for m_idx in 0..models.len() {
        network.model_usage[m_idx][r] = 0;
    }
    false
}

fn assign_roles(network: &mut TransportNetwork, session: &mut Session, distinct: &[DistinctConstraint]) -> bool {
    let models = network.models.clone();
    for model in &models {
        if !assign_roles_for_model(network, model, session) {
            return false;
        }
    }
    network.role_model_link_holds() && network.unary_role_usage_holds() && distinct_constraints_hold(network, distinct)
}

fn assign_roles_for_model(network: &mut TransportNetwork, model: &str, session: &mut Session) -> bool {
    let needs: Vec<(usize, u32)> = (0..network.requirement_count())
        .filter_map(|r| {
            let m_idx = network.model_index(model)?;
            let count = network.model_usage[m_idx][r];
            (count > 0).then_some((r, count))
        })
        .collect();
    let role_pool: Vec<usize> = network.roles_of_model(model).collect();
    backtrack_roles(network, &needs, 0, &role_pool, session)
}

fn backtrack_roles(
    network: &mut TransportNetwork,
    needs: &[(usize, u32)],
    idx: usize,
    role_pool: &[usize],
    session: &mut Session,
) -> bool {
    if idx == needs.len() {
        return true;
    }
    let (r, count) = needs[idx];

    session.record_node();
    if session.should_stop() {
        return false;
    }

    let overlapping: Vec<usize> = network
        .overlaps
        .iter()
        .filter_map(|&(a, b)| if a == r { Some(b) } else if b == r { Some(a) } else { None })
        .collect();
    let available: Vec<usize> = role_pool
        .iter()
        .copied()
        .filter(|&k| overlapping.iter().all(|&r2| !network.role_usage[k][r2]))
        .collect();

    if available.len() < count as usize {
        session.record_fail();
        return false;
    }

    for combo in combinations(&available, count as usize) {
        for &k in &combo {
            network.role_usage[k][r] = true;
        }
        if backtrack_roles(network, needs, idx + 1, role_pool, session) {
            return true;
        }
        for &k in &combo {
            network.role_usage[k][r] = false;
        }
        session.record_fail();
    }
    false
}

/// Every `k`-combination of `items`, in ascending order (small instances
/// only — this is a search leaf helper, not a general combinatorics utility).
fn combinations(items: &[usize], k: usize) -> Vec<Vec<usize>> {
    if k == 0 {
        return vec![Vec::new()];
    }
    if items.len() < k {
        return Vec::new();
    }
    let mut result = Vec::new();
    let (first, rest) = (items[0], &items[1..]);
    for mut combo in combinations(rest, k - 1) {
        combo.insert(0, first);
        result.push(combo);
    }
    result.extend(combinations(rest, k));
    result
}

fn active_roles(network: &TransportNetwork, col: usize) -> HashSet<usize> {
    (0..network.roles.len()).filter(|&k| network.role_usage[k][col]).collect()
}

fn distinct_constraints_hold(network: &TransportNetwork, distinct: &[DistinctConstraint]) -> bool {
    distinct.iter().all(|dc| {
        let set_a = active_roles(network, dc.a);
        let set_b = active_roles(network, dc.b);
        set_a.symmetric_difference(&set_b).count() as u32 >= dc.k
    })
}
