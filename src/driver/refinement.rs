//! Restart/refinement driver: loops CSP <-> flow check, translating each
//! flaw into a new `addDistinct` constraint for the next CSP iteration
//! (§4.4 "Search", §4.7 "Refinement").
//!
//! The master/slave split named in §4.4 collapses here into a single loop:
//! this function owns the no-goods-equivalent (the accumulated `distinct`
//! list) and the best-known solution, while [`crate::csp::solve`] plays the
//! slave, re-run from scratch each iteration with the growing constraint
//! list standing in for `cost < previousCost` plus posted no-goods.

use tracing::{debug, info, info_span, warn};

use crate::csp::{solve, CspSolution, DistinctConstraint};
use crate::error::PlanOutcome;
use crate::flow::{check, ConstraintViolation, Flaw, FlowGraph, DEFAULT_TRANSIT_CAPACITY};
use crate::mission::Mission;
use crate::session::{SearchStats, Session};

/// Runs the restart loop until a flow-feasible CSP solution is found, the
/// session's `Stop` predicate fires, or a flaw can no longer be translated
/// into a constraint (§4.7, last paragraph: "search completes
/// unsuccessfully").
pub fn plan(mission: &Mission, template: &CspSolution, session: &mut Session) -> PlanOutcome<CspSolution> {
    let mut distinct: Vec<DistinctConstraint> = Vec::new();
    let mut best: Option<CspSolution> = None;

    loop {
        if session.should_stop() {
            return PlanOutcome::Stopped(best);
        }

        let span = info_span!("restart", restart = session.restarts, nodes = session.nodes);
        let _guard = span.enter();

        let solution = match solve(template, session, &distinct) {
            PlanOutcome::Solved(s) => s,
            PlanOutcome::Stopped(s) => return PlanOutcome::Stopped(s.or(best)),
            PlanOutcome::Exhausted => {
                return if best.is_some() { PlanOutcome::Stopped(best) } else { PlanOutcome::Exhausted }
            }
        };

        let graph = FlowGraph::build(mission, &solution);
        let flaws = check(&graph, &solution, DEFAULT_TRANSIT_CAPACITY);

        if flaws.is_empty() {
            log_search_stats(session, true, false);
            info!(restarts = session.restarts, "flow-feasible solution found");
            return PlanOutcome::Solved(solution);
        }

        let Some(constraint) = translate(&solution, &flaws[0]) else {
            log_search_stats(session, false, true);
            warn!("flaw at index 0 could not be translated into a refinement constraint; stopping");
            return if best.is_some() { PlanOutcome::Stopped(best) } else { PlanOutcome::Exhausted };
        };
        debug!(model = %constraint.model, a = constraint.a, b = constraint.b, k = constraint.k, "posting refinement constraint");
        log_search_stats(session, false, false);

        session.record_restart();
        distinct.push(constraint);
        best = Some(solution);
    }
}

/// Renders the §6 "Artifacts emitted" per-iteration CSV row for this restart
/// and emits it as a `tracing` record — the restart driver appends one row
/// per restart, here via the ambient logging stack rather than a dedicated
/// file writer.
fn log_search_stats(session: &Session, solution_found: bool, solution_stopped: bool) {
    let stats = SearchStats {
        propagate: session.nodes,
        fail: session.fails,
        node: session.nodes,
        depth: 0,
        restart: session.restarts,
        nogood: session.nogoods,
        solution_found,
        solution_stopped,
    };
    debug!(stats = %stats, "search stats");
}

/// Maps a flaw to the `addDistinct` constraint §4.7 prescribes for its
/// kind. Returns `None` when the flaw lacks the context the rule needs
/// (e.g. a `MinFlow` flaw raised without a `previousFtr`) — this can only
/// happen for the defensive `TotalMinFlow` check in
/// [`crate::flow::mcmcf::check`], which the CSP stage's own constraints are
/// expected to make unreachable.
fn translate(solution: &CspSolution, flaw: &Flaw) -> Option<DistinctConstraint> {
    let model = solution.roles.iter().find(|r| r.instance_id == flaw.role)?.model_iri.clone();
    match flaw.violation {
        ConstraintViolation::TransFlow | ConstraintViolation::TotalTransFlow => {
            let subsequent_ftr = flaw.subsequent_ftr?;
            Some(DistinctConstraint { model, a: flaw.ftr, b: subsequent_ftr, k: 1 })
        }
        ConstraintViolation::MinFlow | ConstraintViolation::TotalMinFlow => {
            let previous_ftr = flaw.previous_ftr?;
            Some(DistinctConstraint { model, a: previous_ftr, b: flaw.ftr, k: flaw.delta })
        }
    }
}
