//! Per-role space-time timelines: a `Timeline[T x L]` set-valued array of
//! outgoing edges, one role at a time (§4.5).

use crate::csp::TransportNetwork;
use crate::mission::Mission;
use crate::model::RoleId;
use crate::temporal::TimepointId;

use super::error::SpacetimeError;

/// A single role's timeline: at most one outgoing edge per timepoint, the
/// activated edges forming a single path (the `IsPath` propagator, §4.5).
#[derive(Debug, Clone)]
pub struct Timeline {
    pub role: RoleId,
    timepoint_count: usize,
    edges: Vec<Vec<Option<usize>>>,
}

impl Timeline {
    pub fn new(role: RoleId, timepoint_count: usize, location_count: usize) -> Self {
        Self {
            role,
            timepoint_count,
            edges: vec![vec![None; location_count]; timepoint_count.saturating_sub(1)],
        }
    }

    pub fn set_edge(&mut self, t: usize, from_location: usize, to_location: usize) -> Result<(), SpacetimeError> {
        let row = self
            .edges
            .get_mut(t)
            .ok_or(SpacetimeError::ForkedTimeline { location: from_location, timepoint: t })?;
        if row.iter().any(Option::is_some) {
            return Err(SpacetimeError::ForkedTimeline { location: from_location, timepoint: t });
        }
        row[from_location] = Some(to_location);
        Ok(())
    }

    pub fn edge_at(&self, t: usize, from_location: usize) -> Option<usize> {
        self.edges.get(t).and_then(|row| row.get(from_location).copied().flatten())
    }

    /// `|Timeline[t,l]| in {0,1}` for every cell, checked row-wise (a row
    /// holds every location's outgoing edge at timepoint `t`).
    pub fn is_path(&self) -> bool {
        self.edges.iter().all(|row| row.iter().filter(|e| e.is_some()).count() <= 1)
    }

    /// The location occupied at each timepoint, `None` before the role is
    /// ever pinned.
    pub fn locations_over_time(&self) -> Vec<Option<usize>> {
        let mut result = vec![None; self.timepoint_count];
        for (t, row) in self.edges.iter().enumerate() {
            if let Some((from, to)) = row.iter().enumerate().find_map(|(l, e)| e.map(|to| (l, to))) {
                result[t] = Some(from);
                result[t + 1] = Some(to);
            }
        }
        result
    }
}

/// Roles used by at least two requirements: only these need a transport
/// decision (a role used once never moves).
pub fn active_roles(network: &TransportNetwork) -> Vec<usize> {
    (0..network.roles.len())
        .filter(|&k| (0..network.requirement_count()).filter(|&r| network.role_usage[k][r]).count() >= 2)
        .collect()
}

/// The FTRs assigned to `role_idx`, each reduced to `(ftr_index, from_pos,
/// to_pos, location)` and sorted by `from_pos`. Shared by the timeline
/// builder below and [`crate::flow::graph`], which needs the same
/// per-role stop sequence to map flow-graph edges back to FTR pairs.
pub fn requirement_spans(
    mission: &Mission,
    network: &TransportNetwork,
    role_idx: usize,
    order: &[TimepointId],
) -> Vec<(usize, usize, usize, usize)> {
    let position: std::collections::HashMap<TimepointId, usize> =
        order.iter().enumerate().map(|(idx, &tp)| (tp, idx)).collect();
    let pos = |tp: TimepointId| position.get(&tp).copied().unwrap_or(tp.0);

    let mut spans: Vec<(usize, usize, usize, usize)> = (0..network.requirement_count())
        .filter(|&r| network.role_usage[role_idx][r])
        .map(|r| {
            let ftr = &network.ftrs[r];
            let (from_tp, to_tp) = mission
                .interval_endpoints(ftr.interval_idx)
                .expect("FTR interval must exist in its mission");
            (r, pos(from_tp), pos(to_tp), ftr.location_idx.0)
        })
        .collect();
    spans.sort_by_key(|&(_, from, _, _)| from);
    spans
}

/// Builds `role`'s timeline from the FTRs it was assigned to in `network`,
/// pinning it to each FTR's location over the half-open span
/// `[from_pos, to_pos)` (the same half-open convention
/// [`crate::csp::TransportNetwork`]'s overlap detection uses), and filling
/// any unconstrained timepoints by carrying the nearest known location
/// forward, or backward for a prefix with no requirement yet.
pub fn build_role_timeline(
    mission: &Mission,
    network: &TransportNetwork,
    role_idx: usize,
    order: &[TimepointId],
) -> Result<Timeline, SpacetimeError> {
    let timepoint_count = order.len().max(mission.timepoint_count());
    let location_count = mission.locations().len().max(1);

    let mut location_at: Vec<Option<usize>> = vec![None; timepoint_count];

    let spans = requirement_spans(mission, network, role_idx, order);

    for &(_, from_pos, to_pos, loc) in &spans {
        for t in from_pos..to_pos.min(timepoint_count) {
            location_at[t] = Some(loc);
        }
    }

    // Backward-fill a prefix with no requirement yet; forward-fill any gap
    // between requirements (the role waits at its last known location).
    for t in (0..timepoint_count.saturating_sub(1)).rev() {
        if location_at[t].is_none() {
            location_at[t] = location_at[t + 1];
        }
    }
    for t in 1..timepoint_count {
        if location_at[t].is_none() {
            location_at[t] = location_at[t - 1];
        }
    }
    for slot in location_at.iter_mut() {
        if slot.is_none() {
            *slot = Some(0);
        }
    }

    let mut timeline = Timeline::new(RoleId(role_idx), timepoint_count, location_count);
    for t in 0..timepoint_count.saturating_sub(1) {
        let from = location_at[t].unwrap();
        let to = location_at[t + 1].unwrap();
        timeline.set_edge(t, from, to)?;
    }
    Ok(timeline)
}
