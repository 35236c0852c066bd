//! Restart/refinement driver tying the CSP and flow stages together (§4.4,
//! §4.7).

mod refinement;

pub use refinement::plan;
