use crate::domain::catalog::JobCatalog;
use crate::domain::model::{CompositionTarget, Job, MemberId, RosterMember};
use crate::domain::roster::{validate_member, Roster};
use crate::utils::error::{RosterError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_required_field, validate_unique, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 單一隊伍最多可設定的名額數
pub const MAX_PARTY_SIZE: usize = 24;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub title: Option<String>,
    pub composition: CompositionConfig,
    /// 自訂職業表，省略時使用內建職業表
    pub jobs: Option<Vec<Job>>,
    #[serde(default)]
    pub members: Vec<RosterMember>,
    pub candidate: Option<RosterMember>,
    /// 檢查報名時要先移出的成員，預設為候選人本人
    pub ignore: Option<MemberId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompositionConfig {
    pub preset: Option<String>,
    pub tanks: Option<usize>,
    pub healers: Option<usize>,
    pub dps: Option<usize>,
    #[serde(default)]
    pub requires_mentor: bool,
}

impl CompositionConfig {
    pub fn target(&self) -> Result<CompositionTarget> {
        if let Some(preset) = &self.preset {
            let mut target = match preset.as_str() {
                "light" => CompositionTarget::LIGHT_PARTY,
                "full" => CompositionTarget::FULL_PARTY,
                other => {
                    return Err(RosterError::InvalidConfigValueError {
                        field: "composition.preset".to_string(),
                        value: other.to_string(),
                        reason: "Valid presets: light, full".to_string(),
                    })
                }
            };
            // 個別數值覆蓋預設
            target.tanks = self.tanks.unwrap_or(target.tanks);
            target.healers = self.healers.unwrap_or(target.healers);
            target.dps = self.dps.unwrap_or(target.dps);
            return Ok(target);
        }

        Ok(CompositionTarget::new(
            *validate_required_field("composition.tanks", &self.tanks)?,
            *validate_required_field("composition.healers", &self.healers)?,
            *validate_required_field("composition.dps", &self.dps)?,
        ))
    }
}

impl ScenarioConfig {
    /// 從 TOML 檔案載入情境
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn target(&self) -> Result<CompositionTarget> {
        self.composition.target()
    }

    pub fn requires_mentor(&self) -> bool {
        self.composition.requires_mentor
    }

    pub fn catalog(&self) -> Result<JobCatalog> {
        match &self.jobs {
            Some(jobs) => JobCatalog::new(jobs.clone()),
            None => Ok(JobCatalog::default()),
        }
    }

    pub fn roster(&self) -> Roster {
        Roster::new(self.members.clone())
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("Raid")
    }

    /// 驗證情境的合理性
    pub fn validate_config(&self) -> Result<()> {
        if let Some(title) = &self.title {
            validate_non_empty_string("title", title)?;
        }

        let target = self.target()?;
        validate_range("composition.total", target.total(), 0, MAX_PARTY_SIZE)?;

        let catalog = self.catalog()?;
        for job in catalog.jobs() {
            validate_non_empty_string("jobs.id", &job.id)?;
            validate_non_empty_string("jobs.emblem", &job.emblem)?;
        }

        validate_unique("members.id", self.members.iter().map(|m| &m.id))?;
        for member in &self.members {
            validate_non_empty_string("members.name", &member.name)?;
        }
        self.roster().validate_against(&catalog)?;

        if let Some(candidate) = &self.candidate {
            validate_non_empty_string("candidate.name", &candidate.name)?;
            validate_member(candidate, &catalog)?;
        }

        Ok(())
    }
}

impl Validate for ScenarioConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::RoleType;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_scenario() {
        let toml_content = r#"
title = "Weekly savage"

[composition]
preset = "full"
requires_mentor = true

[[members]]
id = 1
name = "Alphinaud"
jobs = ["SGE", "SMN"]
mentor = true

[[members]]
id = 2
name = "Alisaie"
jobs = ["RDM"]
sprout = true
"#;

        let config = ScenarioConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.title(), "Weekly savage");
        assert_eq!(config.target().unwrap(), CompositionTarget::FULL_PARTY);
        assert!(config.requires_mentor());
        assert_eq!(config.members.len(), 2);
        assert!(config.members[0].mentor);
        assert!(config.members[1].sprout);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_explicit_counts_and_preset_override() {
        let explicit = ScenarioConfig::from_toml_str(
            "[composition]\ntanks = 1\nhealers = 2\ndps = 3\n",
        )
        .unwrap();
        assert_eq!(explicit.target().unwrap(), CompositionTarget::new(1, 2, 3));

        let overridden =
            ScenarioConfig::from_toml_str("[composition]\npreset = \"light\"\ndps = 3\n").unwrap();
        assert_eq!(overridden.target().unwrap(), CompositionTarget::new(1, 1, 3));

        let missing = ScenarioConfig::from_toml_str("[composition]\ntanks = 1\n").unwrap();
        assert!(matches!(
            missing.target(),
            Err(RosterError::MissingConfigError { field }) if field == "composition.healers"
        ));
    }

    #[test]
    fn test_custom_catalog() {
        let toml_content = r#"
[composition]
tanks = 1
healers = 0
dps = 0

[[jobs]]
id = "KNT"
name = "Knight"
emblem = ":knight:"
role = "Tank"

[[jobs]]
id = "ANY"
name = "Anyone"
emblem = ":any:"
role = "AllRounder"
duplicates_allowed = true

[[members]]
id = 5
name = "Haurchefant"
jobs = ["KNT"]
"#;

        let config = ScenarioConfig::from_toml_str(toml_content).unwrap();
        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("ANY").map(|j| j.role), Some(RoleType::AllRounder));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_failures() {
        let unknown_job = ScenarioConfig::from_toml_str(
            "[composition]\npreset = \"light\"\n[[members]]\nid = 1\nname = \"Cid\"\njobs = [\"BLU\"]\n",
        )
        .unwrap();
        assert!(matches!(
            unknown_job.validate(),
            Err(RosterError::UnknownJob { job, .. }) if job == "BLU"
        ));

        let duplicate_ids = ScenarioConfig::from_toml_str(
            "[composition]\npreset = \"light\"\n\
             [[members]]\nid = 1\nname = \"A\"\njobs = [\"PLD\"]\n\
             [[members]]\nid = 1\nname = \"B\"\njobs = [\"WHM\"]\n",
        )
        .unwrap();
        assert!(duplicate_ids.validate().is_err());

        let bad_preset =
            ScenarioConfig::from_toml_str("[composition]\npreset = \"huge\"\n").unwrap();
        assert!(bad_preset.validate().is_err());

        assert!(ScenarioConfig::from_toml_str("composition = 3").is_err());
    }

    #[test]
    fn test_scenario_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[composition]
preset = "light"

[candidate]
id = 9
name = "Wuk Lamat"
jobs = ["PLD"]
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = ScenarioConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.candidate.as_ref().map(|c| c.id), Some(MemberId(9)));
        assert!(config.ignore.is_none());
        assert_eq!(config.title(), "Raid");
    }
}
