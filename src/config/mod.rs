#[cfg(feature = "cli")]
pub mod cli;
pub mod scenario_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, OutputFormat};
pub use scenario_config::ScenarioConfig;
