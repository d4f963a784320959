// Domain layer: jobs, composition targets and roster records. No I/O here.

pub mod catalog;
pub mod model;
pub mod roster;

pub use catalog::JobCatalog;
pub use model::{CompositionTarget, Job, MemberId, RoleType, RosterMember};
pub use roster::Roster;
