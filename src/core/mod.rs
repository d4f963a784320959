pub mod admission;
pub mod engine;
pub mod feasibility;
pub mod render;

pub use crate::domain::catalog::JobCatalog;
pub use crate::domain::model::{CompositionTarget, MemberId, RoleType, RosterMember};
pub use crate::utils::error::Result;
