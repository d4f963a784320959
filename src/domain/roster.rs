use crate::domain::catalog::JobCatalog;
use crate::domain::model::{MemberId, RosterMember};
use crate::utils::error::{RosterError, Result};
use serde::{Deserialize, Serialize};

/// 報名名單，順序為報名順序
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    members: Vec<RosterMember>,
}

impl Roster {
    pub fn new(members: Vec<RosterMember>) -> Self {
        Self { members }
    }

    pub fn members(&self) -> &[RosterMember] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, id: MemberId) -> bool {
        self.members.iter().any(|m| m.id == id)
    }

    /// 重新報名時整筆取代舊資料，不合併
    pub fn sign_up(&mut self, member: RosterMember) {
        self.members.retain(|m| m.id != member.id);
        self.members.push(member);
    }

    pub fn withdraw(&mut self, id: MemberId) -> bool {
        let before = self.members.len();
        self.members.retain(|m| m.id != id);
        self.members.len() != before
    }

    pub fn reset(&mut self) {
        self.members.clear();
    }

    pub fn raiders(&self) -> impl Iterator<Item = &RosterMember> + '_ {
        self.members.iter().filter(|m| !m.helper)
    }

    pub fn helpers(&self) -> impl Iterator<Item = &RosterMember> + '_ {
        self.members.iter().filter(|m| m.helper)
    }

    /// 在寫入名單前檢查職業 id 是否都存在於職業表
    pub fn validate_against(&self, catalog: &JobCatalog) -> Result<()> {
        self.members
            .iter()
            .try_for_each(|member| validate_member(member, catalog))
    }
}

pub fn validate_member(member: &RosterMember, catalog: &JobCatalog) -> Result<()> {
    if member.jobs.is_empty() {
        return Err(RosterError::InvalidConfigValueError {
            field: "members.jobs".to_string(),
            value: member.name.clone(),
            reason: "At least one job is required".to_string(),
        });
    }
    match member.jobs.iter().find(|id| catalog.get(id).is_none()) {
        Some(job) => Err(RosterError::UnknownJob {
            member: member.name.clone(),
            job: job.clone(),
        }),
        None => Ok(()),
    }
}

impl From<Vec<RosterMember>> for Roster {
    fn from(members: Vec<RosterMember>) -> Self {
        Self::new(members)
    }
}
