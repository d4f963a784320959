use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Member '{member}' references unknown job '{job}'")]
    UnknownJob { member: String, job: String },

    #[error("Job '{id}' appears more than once in the catalog")]
    DuplicateJob { id: String },

    #[error("Job catalog is empty")]
    EmptyCatalog,

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl RosterError {
    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            RosterError::IoError(_) => "Could not read the scenario file".to_string(),
            RosterError::TomlError(_) => "The scenario file is not valid TOML".to_string(),
            RosterError::SerializationError(_) => "Failed to produce JSON output".to_string(),
            RosterError::UnknownJob { member, job } => {
                format!("{} signed up with a job that does not exist: {}", member, job)
            }
            RosterError::DuplicateJob { id } => format!("Job {} is defined twice", id),
            RosterError::EmptyCatalog => "No jobs are defined".to_string(),
            RosterError::ConfigError { message } => message.clone(),
            RosterError::MissingConfigError { field } => format!("Missing setting: {}", field),
            RosterError::InvalidConfigValueError { field, reason, .. } => {
                format!("Bad setting {}: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            RosterError::IoError(_) => "Check that the --scenario path exists and is readable",
            RosterError::TomlError(_) => "Fix the TOML syntax near the reported line",
            RosterError::SerializationError(_) => "Retry with --format text",
            RosterError::UnknownJob { .. } => {
                "Use a job id from the catalog, or add the job under [[jobs]]"
            }
            RosterError::DuplicateJob { .. } => "Give every [[jobs]] entry a unique id",
            RosterError::EmptyCatalog => "Remove the empty [[jobs]] override or add jobs to it",
            RosterError::ConfigError { .. }
            | RosterError::MissingConfigError { .. }
            | RosterError::InvalidConfigValueError { .. } => {
                "Review the [composition] and [[members]] sections of the scenario"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;
