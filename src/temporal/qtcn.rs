//! Qualitative Temporal Constraint Network: pairwise relations between
//! timepoints under 3-path consistency.
//!
//! Grounded in the same dual id/node-index bookkeeping
//! [`crate::scheduling_block::SchedulingBlock`] used in the teacher repo for
//! its dependency graph: a `petgraph` graph keyed by stable ids, with a
//! `HashMap` translating ids to node indices.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use super::error::QtcnError;
use super::relation::QualitativeRelation;
use super::timepoint::TimepointId;

/// A pairwise qualitative constraint network.
///
/// Edges are consolidated at insertion time: adding a second constraint
/// between an already-connected pair intersects with the existing label
/// rather than keeping a second parallel edge. This is semantically
/// equivalent to "multiple edges mean intersection" while keeping lookups
/// O(1) instead of requiring an intersection fold over parallel edges.
#[derive(Debug, Clone)]
pub struct QualitativeTemporalConstraintNetwork {
    graph: DiGraph<TimepointId, QualitativeRelation>,
    node_by_id: HashMap<TimepointId, NodeIndex>,
    insertion_order: Vec<TimepointId>,
}

impl Default for QualitativeTemporalConstraintNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl QualitativeTemporalConstraintNetwork {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_by_id: HashMap::new(),
            insertion_order: Vec::new(),
        }
    }

    fn ensure_node(&mut self, tp: TimepointId) -> NodeIndex {
        *self.node_by_id.entry(tp).or_insert_with(|| {
            self.insertion_order.push(tp);
            self.graph.add_node(tp)
        })
    }

    /// Appends relation `r` on `(a, b)` and `inverse(r)` on `(b, a)`.
    pub fn add_constraint(&mut self, a: TimepointId, b: TimepointId, r: QualitativeRelation) {
        let na = self.ensure_node(a);
        let nb = self.ensure_node(b);
        self.intersect_edge(na, nb, r);
        self.intersect_edge(nb, na, r.inverse());
    }

    fn intersect_edge(&mut self, from: NodeIndex, to: NodeIndex, r: QualitativeRelation) {
        if let Some(edge) = self.graph.find_edge(from, to) {
            let existing = self.graph[edge];
            self.graph[edge] = existing.intersect(r);
        } else {
            self.graph.add_edge(from, to, r);
        }
    }

    fn node_of(&self, tp: TimepointId) -> Result<NodeIndex, QtcnError> {
        self.node_by_id.get(&tp).copied().ok_or(QtcnError::UnknownTimepoint(tp))
    }

    /// Intersects all edges between `a` and `b` in both directions. Since
    /// edges are consolidated on insert, this is simply the label of the
    /// single `(a, b)` edge (or `Universal` if absent — no constraint means
    /// "any relation allowed").
    pub fn get_bidirectional_constraint(
        &self,
        a: TimepointId,
        b: TimepointId,
    ) -> Result<QualitativeRelation, QtcnError> {
        let na = self.node_of(a)?;
        let nb = self.node_of(b)?;
        let forward = self
            .graph
            .find_edge(na, nb)
            .map(|e| self.graph[e])
            .unwrap_or(QualitativeRelation::UNIVERSAL);
        let backward = self
            .graph
            .find_edge(nb, na)
            .map(|e| self.graph[e].inverse())
            .unwrap_or(QualitativeRelation::UNIVERSAL);
        let combined = forward.intersect(backward);
        if combined.is_empty() {
            return Err(QtcnError::InconsistentPair(a, b));
        }
        Ok(combined)
    }

    /// Runs 3-path consistency to a fixpoint over every triple `(i, j, k)`.
    ///
    /// Returns `Ok(())` once a fixpoint is reached with no empty relation;
    /// returns `Err` as soon as any pair collapses to `Empty`.
    pub fn is_consistent(&mut self) -> Result<(), QtcnError> {
        loop {
            let mut changed = false;
            let nodes: Vec<NodeIndex> = self.node_by_id.values().copied().collect();

            for &i in &nodes {
                for &k in &nodes {
                    if i == k {
                        continue;
                    }
                    let Some(ik) = self.graph.find_edge(i, k).map(|e| self.graph[e]) else {
                        continue;
                    };
                    for &j in &nodes {
                        if j == i || j == k {
                            continue;
                        }
                        let Some(kj) = self.graph.find_edge(k, j).map(|e| self.graph[e]) else {
                            continue;
                        };
                        let composed = ik.compose(kj);

                        let edge = self.graph.find_edge(i, j);
                        let current = edge
                            .map(|e| self.graph[e])
                            .unwrap_or(QualitativeRelation::UNIVERSAL);
                        let tightened = current.intersect(composed);

                        if tightened.is_empty() {
                            let a = self.graph[i];
                            let b = self.graph[j];
                            return Err(QtcnError::InconsistentPair(a, b));
                        }

                        if tightened != current {
                            match edge {
                                Some(e) => self.graph[e] = tightened,
                                None => {
                                    self.graph.add_edge(i, j, tightened);
                                }
                            }
                            changed = true;
                        }
                    }
                }
            }

            if !changed {
                return Ok(());
            }
        }
    }

    /// Returns timepoints in a stable order consistent with `<`/`<=` edges,
    /// tie-breaking by insertion order. Fails on a cycle of strict `<`
    /// relations.
    ///
    /// Implemented as Kahn's algorithm over the subgraph of edges whose
    /// label implies "predecessor" (contains `<` or `=` but not `>`), with
    /// ready nodes processed in insertion order for determinism.
    pub fn sort(&self) -> Result<Vec<TimepointId>, QtcnError> {
        let mut indegree: HashMap<TimepointId, usize> =
            self.insertion_order.iter().map(|&tp| (tp, 0)).collect();
        let mut successors: HashMap<TimepointId, Vec<TimepointId>> = HashMap::new();

        for edge in self.graph.edge_references() {
            let label = *edge.weight();
            if label.is_empty() {
                continue;
            }
            // "predecessor" edge: from -> to means from precedes to.
            let implies_precedes = label.contains(QualitativeRelation::LESS)
                || (label == QualitativeRelation::EQUAL);
            if !implies_precedes {
                continue;
            }
            let from = self.graph[edge.source()];
            let to = self.graph[edge.target()];
            if from == to {
                continue;
            }
            successors.entry(from).or_default().push(to);
            *indegree.entry(to).or_insert(0) += 1;
        }

        let mut ready: Vec<TimepointId> = self
            .insertion_order
            .iter()
            .copied()
            .filter(|tp| indegree.get(tp).copied().unwrap_or(0) == 0)
            .collect();

        let mut order = Vec::with_capacity(self.insertion_order.len());
        let mut cursor = 0;
        while cursor < ready.len() {
            let next = ready[cursor];
            cursor += 1;
            order.push(next);
            if let Some(succs) = successors.get(&next) {
                for &s in succs {
                    let entry = indegree.get_mut(&s).unwrap();
                    *entry -= 1;
                    if *entry == 0 {
                        ready.push(s);
                    }
                }
            }
        }

        if order.len() != self.insertion_order.len() {
            return Err(QtcnError::CyclicOrder);
        }
        Ok(order)
    }

    pub fn timepoints(&self) -> impl Iterator<Item = TimepointId> + '_ {
        self.insertion_order.iter().copied()
    }
}
