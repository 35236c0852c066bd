//! Flow graph construction and the MCMCF feasibility/flaw-extraction check
//! (§4.6, §4.7).

mod error;
mod flaw;
mod graph;
mod mcmcf;

pub use error::FlowError;
pub use flaw::{ConstraintViolation, Flaw};
pub use graph::{FlowGraph, RoleTransit};
pub use mcmcf::{check, DEFAULT_TRANSIT_CAPACITY};
