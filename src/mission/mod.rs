//! Mission: owns every timepoint, interval, location, persistence condition,
//! and the available model pool, loaded once and handed to the rest of the
//! planner as index handles (see the cyclic-ownership design note).

mod error;
mod io;
mod mission;

pub use error::ParseError;
pub use io::parse_mission_xml;
pub use mission::{Mission, MissionValidationError, ACTOR_CLASS, FUNCTIONALITY_CLASS};
