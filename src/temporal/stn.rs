//! Simple Temporal Network: quantitative `[lo, hi]` constraints between
//! timepoints, tightened via Floyd-Warshall all-pairs shortest paths.

use std::collections::HashMap;

use qtty::Unit;

use super::error::StnError;
use super::timepoint::TimepointId;
use crate::solution_space::Interval;

const MAX_TIGHTENING_ITERATIONS: usize = 128;

/// A network of quantitative `a -[lo,hi]-> b` constraints.
#[derive(Debug, Clone)]
pub struct SimpleTemporalNetwork<U: Unit> {
    index: HashMap<TimepointId, usize>,
    ids: Vec<TimepointId>,
    raw_edges: HashMap<(usize, usize), Vec<Interval<U>>>,
    consolidated: HashMap<(usize, usize), Interval<U>>,
}

impl<U: Unit> Default for SimpleTemporalNetwork<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U: Unit> SimpleTemporalNetwork<U> {
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            ids: Vec::new(),
            raw_edges: HashMap::new(),
            consolidated: HashMap::new(),
        }
    }

    fn ensure_index(&mut self, tp: TimepointId) -> usize {
        if let Some(&i) = self.index.get(&tp) {
            return i;
        }
        let i = self.ids.len();
        self.ids.push(tp);
        self.index.insert(tp, i);
        i
    }

    /// Adds a (possibly disjunctive) constraint `a -[interval]-> b`.
    pub fn add_constraint(&mut self, a: TimepointId, b: TimepointId, interval: Interval<U>) {
        let ia = self.ensure_index(a);
        let ib = self.ensure_index(b);
        self.raw_edges.entry((ia, ib)).or_default().push(interval);
    }

    /// Reduces every disjunctive edge to `[min_lower, max_upper]`.
    pub fn stp(&mut self) {
        self.consolidated.clear();
        for (&key, intervals) in &self.raw_edges {
            let lo = intervals
                .iter()
                .map(|iv| iv.start().value())
                .fold(f64::INFINITY, f64::min);
            let hi = intervals
                .iter()
                .map(|iv| iv.end().value())
                .fold(f64::NEG_INFINITY, f64::max);
            self.consolidated.insert(key, Interval::from_f64(lo, hi));
        }
    }

    fn to_weighted_graph(&self) -> Vec<Vec<f64>> {
        let n = self.ids.len();
        let mut w = vec![vec![f64::INFINITY; n]; n];
        for (i, row) in w.iter_mut().enumerate() {
            row[i] = 0.0;
        }
        for (&(a, b), iv) in &self.consolidated {
            let lo = iv.start().value();
            let hi = iv.end().value();
            w[a][b] = w[a][b].min(hi);
            w[b][a] = w[b][a].min(-lo);
        }
        w
    }

    /// Runs all-pairs shortest paths on the weighted form and rewrites
    /// every interval as `[-d(b,a), d(a,b)]`. Fails if any diagonal entry
    /// becomes negative.
    pub fn min_network(&mut self) -> Result<(), StnError> {
        let n = self.ids.len();
        let mut d = self.to_weighted_graph();

        for k in 0..n {
            for i in 0..n {
                if d[i][k].is_infinite() {
                    continue;
                }
                for j in 0..n {
                    let through = d[i][k] + d[k][j];
                    if through < d[i][j] {
                        d[i][j] = through;
                    }
                }
            }
        }

        for (i, row) in d.iter().enumerate() {
            if row[i] < 0.0 {
                return Err(StnError::NegativeCycle(self.ids[i]));
            }
        }

        // Only existing edges are rewritten (mirrors the original, which
        // walks the prior graph's edge list rather than materializing every
        // pair) — minNetwork tightens declared constraints, it does not
        // invent new ones between previously unrelated timepoints.
        let mut rewritten = HashMap::new();
        for &(i, j) in self.consolidated.keys() {
            let lo = if d[j][i].is_finite() { -d[j][i] } else { f64::NEG_INFINITY };
            let hi = if d[i][j].is_finite() { d[i][j] } else { f64::INFINITY };
            if lo <= hi {
                rewritten.insert((i, j), Interval::from_f64(lo, hi));
            }
        }
        self.consolidated = rewritten;
        Ok(())
    }

    fn intersect_with_prior(
        &mut self,
        prior: &HashMap<(usize, usize), Interval<U>>,
    ) -> Result<(), StnError> {
        for (key, iv) in self.consolidated.iter_mut() {
            if let Some(p) = prior.get(key) {
                match iv.intersection(p) {
                    Some(inter) => *iv = inter,
                    None => {
                        return Err(StnError::InvertedBound {
                            lower: iv.start().value().max(p.start().value()),
                            upper: iv.end().value().min(p.end().value()),
                        })
                    }
                }
            }
        }
        Ok(())
    }

    /// Fixpoint iteration of `stp` -> `minNetwork` -> intersect with the
    /// previous iteration's graph, until the graph stops changing.
    pub fn upper_lower_tightening(&mut self) -> Result<(), StnError> {
        self.stp();
        for _ in 0..MAX_TIGHTENING_ITERATIONS {
            let prior = self.consolidated.clone();
            self.min_network()?;
            self.intersect_with_prior(&prior)?;
            if self.consolidated == prior {
                return Ok(());
            }
        }
        Ok(())
    }

    pub fn get_bound(&self, a: TimepointId, b: TimepointId) -> Option<Interval<U>> {
        let ia = *self.index.get(&a)?;
        let ib = *self.index.get(&b)?;
        self.consolidated.get(&(ia, ib)).copied()
    }
}
