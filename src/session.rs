//! Explicit session state threaded through the planner.
//!
//! Replaces the original's global logger / session-id counter (see design
//! note on global state) with a value the restart driver owns and mutates.

use std::time::{Duration, Instant};

/// Per-run counters and limits checked between search nodes.
///
/// `Stop` is cooperative: callers check [`Session::should_stop`] at brancher
/// boundaries (matching the original's suspension-point discipline) rather
/// than this type reaching into the solver to cancel it.
#[derive(Debug)]
pub struct Session {
    start: Instant,
    time_limit: Option<Duration>,
    node_limit: Option<u64>,
    fail_limit: Option<u64>,
    pub nodes: u64,
    pub fails: u64,
    pub restarts: u64,
    pub nogoods: u64,
    stop_requested: bool,
}

impl Session {
    pub fn new(time_limit: Option<Duration>, node_limit: Option<u64>, fail_limit: Option<u64>) -> Self {
        Self {
            start: Instant::now(),
            time_limit,
            node_limit,
            fail_limit,
            nodes: 0,
            fails: 0,
            restarts: 0,
            nogoods: 0,
            stop_requested: false,
        }
    }

    /// Session with no limits; runs until exhaustion or explicit stop.
    pub fn unbounded() -> Self {
        Self::new(None, None, None)
    }

    pub fn request_stop(&mut self) {
        self.stop_requested = true;
    }

    pub fn record_node(&mut self) {
        self.nodes += 1;
    }

    pub fn record_fail(&mut self) {
        self.fails += 1;
    }

    pub fn record_restart(&mut self) {
        self.restarts += 1;
    }

    pub fn record_nogood(&mut self) {
        self.nogoods += 1;
    }

    /// Returns true if a `Stop` predicate fired: elapsed time, node count, or
    /// fail count exceeded a configured limit, or a stop was requested
    /// explicitly.
    pub fn should_stop(&self) -> bool {
        if self.stop_requested {
            return true;
        }
        if let Some(limit) = self.time_limit {
            if self.start.elapsed() >= limit {
                return true;
            }
        }
        if let Some(limit) = self.node_limit {
            if self.nodes >= limit {
                return true;
            }
        }
        if let Some(limit) = self.fail_limit {
            if self.fails >= limit {
                return true;
            }
        }
        false
    }
}

/// One row of the per-iteration search statistics artifact (§6 "Artifacts
/// emitted"). Rendered as CSV by the driver, one row per restart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchStats {
    pub propagate: u64,
    pub fail: u64,
    pub node: u64,
    pub depth: u32,
    pub restart: u64,
    pub nogood: u64,
    pub solution_found: bool,
    pub solution_stopped: bool,
}

impl SearchStats {
    pub fn header() -> &'static str {
        "propagate,fail,node,depth,restart,nogood,solution_found,solution_stopped"
    }
}

impl std::fmt::Display for SearchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{},{},{}",
            self.propagate,
            self.fail,
            self.node,
            self.depth,
            self.restart,
            self.nogood,
            self.solution_found,
            self.solution_stopped
        )
    }
}
