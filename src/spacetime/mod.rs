//! Space-time timelines and their aggregate network (§3, §4.5).

mod error;
mod network;
mod timeline;

pub use error::SpacetimeError;
pub use network::SpaceTimeNetwork;
pub use timeline::{active_roles, build_role_timeline, requirement_spans, Timeline};
