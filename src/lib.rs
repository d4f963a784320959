pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::ScenarioConfig;
pub use core::{
    admission::AdmissionControl,
    engine::RaidEngine,
    feasibility::{FeasibilityEngine, FeasibilityResult, OpenSlots},
    render::{chunk_lines, ping_message, RosterRenderer, RosterView},
};
pub use domain::{CompositionTarget, Job, JobCatalog, MemberId, RoleType, Roster, RosterMember};
pub use utils::error::{Result, RosterError};
