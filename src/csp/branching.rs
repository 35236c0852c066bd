//! Variable and value ordering for the two-phase branching in §4.4.
//!
//! The original orders by accumulated-failure-count (AFC) with a random
//! tie-break; this crate has no solver engine tracking per-variable failure
//! counts and intentionally carries no `rand` dependency (the teacher's RL
//! subsystem was the only consumer of it, and it has no counterpart here —
//! see DESIGN.md). The ordering below is a deterministic stand-in: most-
//! constrained-first for variable selection (fewest candidates is the
//! cheapest proxy for "most likely to fail first"), lowest-index-first for
//! value selection. Determinism is a feature for this crate's tests, not a
//! compromise worth fixing with a fake random source.

use super::transport_network::TransportNetwork;
use crate::model::ModelPool;

/// Phase 1 variable selection: the unassigned requirement with the fewest
/// feasible coalitions, ties broken by lowest index.
pub fn select_requirement(network: &TransportNetwork, assigned: &[bool]) -> Option<usize> {
    (0..network.requirement_count())
        .filter(|&r| !assigned[r])
        .min_by_key(|&r| network.coalition_domains[r].len())
}

/// Phase 1 value selection: coalitions ordered by ascending total
/// cardinality (split-min's deterministic stand-in).
pub fn ordered_coalitions(domain: &[ModelPool], models: &[String]) -> Vec<ModelPool> {
    let mut ordered = domain.to_vec();
    ordered.sort_by_key(|pool| models.iter().map(|m| pool.get(m)).sum::<u32>());
    ordered
}

/// Phase 2 value selection: the lowest-index role of `model_iri` not yet
/// marked `used`. Picking the canonical lowest index among interchangeable
/// roles of the same model is constraint 7's symmetry break.
pub fn select_role(network: &TransportNetwork, model_iri: &str, used: &[bool]) -> Option<usize> {
    network
        .roles_of_model(model_iri)
        .find(|&k| !used[k])
}
