use crate::domain::model::{Job, RoleType, RosterMember};
use crate::utils::error::{RosterError, Result};
use std::collections::HashMap;

pub const TANK_EMBLEM: &str = "<:Tank:1211492267441922048>";
pub const HEALER_EMBLEM: &str = "<:Healer:1211492332193579019>";
pub const DPS_EMBLEM: &str = "<:DPS:1211492203466068078>";

/// 唯讀職業表，索引即顯示順序
#[derive(Debug, Clone)]
pub struct JobCatalog {
    jobs: Vec<Job>,
    index: HashMap<String, usize>,
}

impl JobCatalog {
    pub fn new(jobs: Vec<Job>) -> Result<Self> {
        if jobs.is_empty() {
            return Err(RosterError::EmptyCatalog);
        }

        let mut index = HashMap::with_capacity(jobs.len());
        for (i, job) in jobs.iter().enumerate() {
            if index.insert(job.id.clone(), i).is_some() {
                return Err(RosterError::DuplicateJob { id: job.id.clone() });
            }
        }

        Ok(Self { jobs, index })
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn job(&self, index: usize) -> &Job {
        &self.jobs[index]
    }

    pub fn get(&self, id: &str) -> Option<&Job> {
        self.index_of(id).map(|i| &self.jobs[i])
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// 成員的可用職業索引：保留宣告順序、去除重複、略過未知 id
    pub fn resolve(&self, member: &RosterMember) -> Vec<usize> {
        let mut resolved = Vec::with_capacity(member.jobs.len());
        for id in &member.jobs {
            match self.index_of(id) {
                Some(i) if !resolved.contains(&i) => resolved.push(i),
                Some(_) => {}
                None => tracing::trace!("member {} has unresolved job '{}'", member.id, id),
            }
        }
        resolved
    }

    pub fn omni_job(&self, role: RoleType) -> Option<usize> {
        self.jobs.iter().position(|j| j.omni && j.role == role)
    }

    pub fn jobs_for_role(&self, role: RoleType) -> impl Iterator<Item = &Job> + '_ {
        self.jobs.iter().filter(move |j| j.role == role)
    }
}

impl Default for JobCatalog {
    fn default() -> Self {
        Self::new(default_jobs()).expect("built-in job catalog has unique ids")
    }
}

pub fn default_jobs() -> Vec<Job> {
    use RoleType::*;

    vec![
        Job::new("PLD", "Paladin", "<:Paladin:1215315435382382663>", Tank),
        Job::new("WAR", "Warrior", "<:Warrior:1215315451408818216>", Tank),
        Job::new("DRK", "Dark Knight", "<:DarkKnight:1215315422744674437>", Tank),
        Job::new("GNB", "Gunbreaker", "<:Gunbreaker:1215315427266265088>", Tank),
        Job::new("TNK", "Omni-tank", TANK_EMBLEM, Tank).as_omni(),
        Job::new("WHM", "White Mage", "<:WhiteMage:1215315454403289118>", Healer),
        Job::new("SCH", "Scholar", "<:Scholar:1215315447440998452>", Healer),
        Job::new("AST", "Astrologian", "<:Astrologian:1215315415547510804>", Healer),
        Job::new("SGE", "Sage", "<:Sage:1215315441866776617>", Healer),
        Job::new("HLR", "Omni-healer", HEALER_EMBLEM, Healer).as_omni(),
        Job::new("MNK", "Monk", "<:Monk:1215315431435272222>", Dps),
        Job::new("DRG", "Dragoon", "<:Dragoon:1215315425286430730>", Dps),
        Job::new("NIN", "Ninja", "<:Ninja:1215315433414987887>", Dps),
        Job::new("SAM", "Samurai", "<:Samurai:1215315444362125364>", Dps),
        Job::new("RPR", "Reaper", "<:Reaper:1215315437743505448>", Dps),
        Job::new("BRD", "Bard", "<:Bard:1215315416805802035>", Dps),
        Job::new("MCH", "Machinist", "<:Machinist:1215315429397102613>", Dps),
        Job::new("DNC", "Dancer", "<:Dancer:1215315420668764231>", Dps),
        Job::new("BLM", "Black Mage", "<:BlackMage:1215315418563223592>", Dps),
        Job::new("SMN", "Summoner", "<:Summoner:1215315493561307176>", Dps),
        Job::new("RDM", "Red Mage", "<:RedMage:1215315492198293534>", Dps),
        Job::new("DPS", "Omni-dps", DPS_EMBLEM, Dps).as_omni(),
        Job::new("ALR", "All-rounder", "<:Allrounder:1215319950747508736>", AllRounder)
            .allow_duplicates(),
    ]
}
