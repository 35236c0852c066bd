//! Model pools and roles: the available agent models and their concrete
//! instances, shared by FTR extraction and the CSP space.

mod pool;
mod role;

pub use pool::ModelPool;
pub use role::{Role, RoleId};
