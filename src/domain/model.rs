use serde::{Deserialize, Serialize};
use std::fmt;

/// 職業對隊伍編成的貢獻類別，宣告順序即排序順序
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RoleType {
    Tank,
    Healer,
    Dps,
    AllRounder,
}

impl fmt::Display for RoleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoleType::Tank => "Tank",
            RoleType::Healer => "Healer",
            RoleType::Dps => "Dps",
            RoleType::AllRounder => "AllRounder",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub name: String,
    pub emblem: String,
    pub role: RoleType,
    #[serde(default)]
    pub duplicates_allowed: bool,
    /// 代表整個角色的萬用職業，空位顯示用
    #[serde(default)]
    pub omni: bool,
}

impl Job {
    pub fn new(id: &str, name: &str, emblem: &str, role: RoleType) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            emblem: emblem.to_string(),
            role,
            duplicates_allowed: false,
            omni: false,
        }
    }

    pub fn allow_duplicates(mut self) -> Self {
        self.duplicates_allowed = true;
        self
    }

    pub fn as_omni(mut self) -> Self {
        self.omni = true;
        self.duplicates_allowed = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompositionTarget {
    pub tanks: usize,
    pub healers: usize,
    pub dps: usize,
}

impl CompositionTarget {
    /// 4 人輕型隊伍
    pub const LIGHT_PARTY: CompositionTarget = CompositionTarget::new(1, 1, 2);
    /// 8 人完整隊伍
    pub const FULL_PARTY: CompositionTarget = CompositionTarget::new(2, 2, 4);

    pub const fn new(tanks: usize, healers: usize, dps: usize) -> Self {
        Self {
            tanks,
            healers,
            dps,
        }
    }

    pub const fn total(&self) -> usize {
        self.tanks + self.healers + self.dps
    }

    pub fn slots_for(&self, role: RoleType) -> usize {
        match role {
            RoleType::Tank => self.tanks,
            RoleType::Healer => self.healers,
            RoleType::Dps => self.dps,
            RoleType::AllRounder => self.total(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub u64);

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterMember {
    pub id: MemberId,
    pub name: String,
    /// 依偏好排序的職業 id
    pub jobs: Vec<String>,
    #[serde(default)]
    pub helper: bool,
    #[serde(default)]
    pub sprout: bool,
    #[serde(default)]
    pub mentor: bool,
}

impl RosterMember {
    pub fn new<S: AsRef<str>>(id: u64, name: &str, jobs: &[S]) -> Self {
        Self {
            id: MemberId(id),
            name: name.to_string(),
            jobs: jobs.iter().map(|j| j.as_ref().to_string()).collect(),
            helper: false,
            sprout: false,
            mentor: false,
        }
    }

    pub fn as_helper(mut self) -> Self {
        self.helper = true;
        self
    }

    pub fn as_mentor(mut self) -> Self {
        self.mentor = true;
        self
    }

    pub fn as_sprout(mut self) -> Self {
        self.sprout = true;
        self
    }
}
