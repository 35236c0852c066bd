//! `FluentTimeResource`: the canonical requirement shape the CSP space
//! consumes, derived from persistence conditions (see §4.3).

use std::collections::BTreeSet;

use super::persistence::LocationId;
use crate::model::ModelPool;

/// Opaque handle into the mission's interval arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IntervalId(pub usize);

/// Canonical requirement: resources needed at a location over an interval,
/// with per-model min/max cardinality bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct FluentTimeResource {
    pub resources: BTreeSet<String>,
    pub interval_idx: IntervalId,
    pub location_idx: LocationId,
    pub min_cardinalities: ModelPool,
    pub max_cardinalities: ModelPool,
}

impl FluentTimeResource {
    pub fn new(interval_idx: IntervalId, location_idx: LocationId) -> Self {
        Self {
            resources: BTreeSet::new(),
            interval_idx,
            location_idx,
            min_cardinalities: ModelPool::new(),
            max_cardinalities: ModelPool::new(),
        }
    }

    /// Restores the `min <= max` invariant after an update: widens `max` up
    /// to `min` wherever the two have crossed.
    pub fn restore_cardinality_invariant(&mut self) {
        self.max_cardinalities = self.max_cardinalities.max(&self.min_cardinalities);
    }

    /// Intersects this FTR's max cardinalities with the mission's available
    /// resource pool (§4.3 step 5).
    pub fn update_max_cardinalities(&mut self, available: &ModelPool) {
        self.max_cardinalities = self.max_cardinalities.min(available);
        self.restore_cardinality_invariant();
    }

    fn shares_interval_and_location(&self, other: &Self) -> bool {
        self.interval_idx == other.interval_idx && self.location_idx == other.location_idx
    }

    /// Merges `other` into `self` in place: unions resource sets, combines
    /// cardinalities as max-of-mins / min-of-maxes, then restores the
    /// `min <= max` invariant.
    fn merge_from(&mut self, other: &Self) {
        self.resources.extend(other.resources.iter().cloned());
        self.min_cardinalities = self.min_cardinalities.max(&other.min_cardinalities);
        self.max_cardinalities = self.max_cardinalities.min(&other.max_cardinalities);
        self.restore_cardinality_invariant();
    }

    /// Compacts a list of FTRs: any two sharing `(interval_idx, location_idx)`
    /// are merged into one. Order-independent as a set (§8 invariant 8);
    /// idempotent on an already-compacted list.
    pub fn compact(ftrs: Vec<FluentTimeResource>) -> Vec<FluentTimeResource> {
        let mut result: Vec<FluentTimeResource> = Vec::new();
        for ftr in ftrs {
            match result
                .iter_mut()
                .find(|existing| existing.shares_interval_and_location(&ftr))
            {
                Some(existing) => existing.merge_from(&ftr),
                None => result.push(ftr),
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ftr_with(interval: usize, location: usize, resource: &str, min: u32, max: u32) -> FluentTimeResource {
        let mut ftr = FluentTimeResource::new(IntervalId(interval), LocationId(location));
        ftr.resources.insert(resource.to_string());
        ftr.min_cardinalities.set("Actor", min);
        ftr.max_cardinalities.set("Actor", max);
        ftr
    }

    #[test]
    fn compact_merges_same_interval_and_location() {
        let a = ftr_with(0, 0, "R1", 1, 2);
        let b = ftr_with(0, 0, "R2", 2, 3);
        let compacted = FluentTimeResource::compact(vec![a, b]);
        assert_eq!(compacted.len(), 1);
        assert_eq!(compacted[0].resources.len(), 2);
        assert_eq!(compacted[0].min_cardinalities.get("Actor"), 2);
        assert_eq!(compacted[0].max_cardinalities.get("Actor"), 2);
    }

    #[test]
    fn compact_keeps_distinct_interval_location_pairs_separate() {
        let a = ftr_with(0, 0, "R1", 1, 2);
        let b = ftr_with(1, 0, "R2", 1, 2);
        let compacted = FluentTimeResource::compact(vec![a, b]);
        assert_eq!(compacted.len(), 2);
    }

    #[test]
    fn compact_is_idempotent() {
        let a = ftr_with(0, 0, "R1", 1, 2);
        let b = ftr_with(0, 0, "R2", 2, 3);
        let once = FluentTimeResource::compact(vec![a, b]);
        let twice = FluentTimeResource::compact(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn compact_is_order_independent() {
        let a = ftr_with(0, 0, "R1", 1, 2);
        let b = ftr_with(0, 0, "R2", 2, 3);
        let forward = FluentTimeResource::compact(vec![a.clone(), b.clone()]);
        let backward = FluentTimeResource::compact(vec![b, a]);
        assert_eq!(forward[0].resources, backward[0].resources);
        assert_eq!(forward[0].min_cardinalities, backward[0].min_cardinalities);
        assert_eq!(forward[0].max_cardinalities, backward[0].max_cardinalities);
    }

    #[test]
    fn update_max_cardinalities_intersects_with_pool() {
        let mut ftr = ftr_with(0, 0, "R1", 1, 5);
        ftr.update_max_cardinalities(&ModelPool::single("Actor", 3));
        assert_eq!(ftr.max_cardinalities.get("Actor"), 3);
    }
}
