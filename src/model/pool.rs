//! `ModelPool`: a multiset mapping model IRI to instance count.

use std::collections::BTreeMap;
use std::ops::{Add, Sub};

/// Multiset `modelIri -> count`. Missing keys read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelPool {
    counts: BTreeMap<String, u32>,
}

impl ModelPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(model_iri: impl Into<String>, count: u32) -> Self {
        let mut pool = Self::new();
        pool.set(model_iri, count);
        pool
    }

    pub fn get(&self, model_iri: &str) -> u32 {
        self.counts.get(model_iri).copied().unwrap_or(0)
    }

    pub fn set(&mut self, model_iri: impl Into<String>, count: u32) {
        self.counts.insert(model_iri.into(), count);
    }

    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.values().all(|&c| c == 0)
    }

    /// Per-key maximum of two pools.
    pub fn max(&self, other: &Self) -> Self {
        self.merge(other, std::cmp::max)
    }

    /// Per-key minimum of two pools.
    pub fn min(&self, other: &Self) -> Self {
        self.merge(other, std::cmp::min)
    }

    fn merge(&self, other: &Self, f: impl Fn(u32, u32) -> u32) -> Self {
        let mut result = Self::new();
        for key in self.counts.keys().chain(other.counts.keys()) {
            result.set(key.clone(), f(self.get(key), other.get(key)));
        }
        result
    }
}

impl Add for ModelPool {
    type Output = ModelPool;
    fn add(self, rhs: Self) -> Self::Output {
        self.merge(&rhs, |a, b| a + b)
    }
}

/// Saturating subtraction: a pool's count never drops below zero.
impl Sub for ModelPool {
    type Output = ModelPool;
    fn sub(self, rhs: Self) -> Self::Output {
        self.merge(&rhs, |a, b| a.saturating_sub(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_zero() {
        let pool = ModelPool::new();
        assert_eq!(pool.get("Actor"), 0);
    }

    #[test]
    fn add_sums_per_key() {
        let a = ModelPool::single("Actor", 2);
        let b = ModelPool::single("Actor", 3);
        assert_eq!((a + b).get("Actor"), 5);
    }

    #[test]
    fn sub_saturates_at_zero() {
        let a = ModelPool::single("Actor", 1);
        let b = ModelPool::single("Actor", 3);
        assert_eq!((a - b).get("Actor"), 0);
    }

    #[test]
    fn max_and_min_are_per_key() {
        let a = ModelPool::single("Actor", 5);
        let b = ModelPool::single("Actor", 3);
        assert_eq!(a.max(&b).get("Actor"), 5);
        assert_eq!(a.min(&b).get("Actor"), 3);
    }

    #[test]
    fn empty_pool_reports_empty() {
        let pool = ModelPool::single("Actor", 0);
        assert!(pool.is_empty());
    }
}
