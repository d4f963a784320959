//! 隊伍編成可行性搜尋
//!
//! 對所有非 helper 成員做窮舉回溯：每位成員依偏好順序嘗試自己的職業，
//! 角色計數不可超過目標編成，不允許重複的職業在同一條分配路徑上只能出現一次。
//! 搜尋不會在第一個解就停止，因為輸出需要：
//! - 每位成員在「至少一組完整可行分配」中可使用的職業集合
//! - 所有成功葉節點中，各角色剩餘空位的最大值
//!
//! 後綴結果只取決於 (成員索引, 角色計數, 已佔用的不可重複職業)，
//! 因此以此為鍵做記憶化，成本隨狀態數而非完整分配數成長。

use crate::domain::catalog::JobCatalog;
use crate::domain::model::{CompositionTarget, RoleType, RosterMember};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OpenSlots {
    pub tank: usize,
    pub healer: usize,
    pub dps: usize,
}

impl OpenSlots {
    pub fn get(&self, role: RoleType) -> usize {
        match role {
            RoleType::Tank => self.tank,
            RoleType::Healer => self.healer,
            RoleType::Dps => self.dps,
            RoleType::AllRounder => 0,
        }
    }

    pub fn total(&self) -> usize {
        self.tank + self.healer + self.dps
    }

    fn max(self, other: OpenSlots) -> OpenSlots {
        OpenSlots {
            tank: self.tank.max(other.tank),
            healer: self.healer.max(other.healer),
            dps: self.dps.max(other.dps),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeasibilityResult {
    pub feasible: bool,
    /// 依名單索引排列；helper 與無法入隊的成員為空集合
    pub acceptable: Vec<BTreeSet<usize>>,
    pub open_slots: OpenSlots,
}

impl FeasibilityResult {
    pub fn acceptable_jobs(&self, member_index: usize) -> Option<&BTreeSet<usize>> {
        self.acceptable.get(member_index)
    }
}

/// 搜尋途中的角色計數，每層遞迴複製一份
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
struct CompCount {
    tanks: usize,
    healers: usize,
    dps: usize,
    allrounders: usize,
}

impl CompCount {
    fn count(&self) -> usize {
        self.tanks + self.healers + self.dps + self.allrounders
    }

    fn with(mut self, role: RoleType) -> Self {
        match role {
            RoleType::Tank => self.tanks += 1,
            RoleType::Healer => self.healers += 1,
            RoleType::Dps => self.dps += 1,
            RoleType::AllRounder => self.allrounders += 1,
        }
        self
    }

    fn fits(&self, target: &CompositionTarget) -> bool {
        self.tanks <= target.tanks
            && self.healers <= target.healers
            && self.dps <= target.dps
            && self.count() <= target.total()
    }

    fn open_slots(&self, target: &CompositionTarget) -> OpenSlots {
        let remaining = target.total().saturating_sub(self.count());
        OpenSlots {
            tank: remaining.min(target.tanks.saturating_sub(self.tanks)),
            healer: remaining.min(target.healers.saturating_sub(self.healers)),
            dps: remaining.min(target.dps.saturating_sub(self.dps)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FeasibilityEngine<'a> {
    catalog: &'a JobCatalog,
}

impl<'a> FeasibilityEngine<'a> {
    pub fn new(catalog: &'a JobCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'a JobCatalog {
        self.catalog
    }

    pub fn compute(&self, members: &[RosterMember], target: &CompositionTarget) -> FeasibilityResult {
        let resolved: Vec<Vec<usize>> = members
            .iter()
            .map(|m| {
                if m.helper {
                    Vec::new()
                } else {
                    self.catalog.resolve(m)
                }
            })
            .collect();

        // 第 i 位之後（含）還需要佔位的成員數
        let mut remaining = vec![0; members.len() + 1];
        for (i, member) in members.iter().enumerate().rev() {
            remaining[i] = remaining[i + 1] + usize::from(!member.helper);
        }

        let mut search = Search {
            catalog: self.catalog,
            members,
            resolved: &resolved,
            remaining: &remaining,
            target,
            committed: vec![0; self.catalog.len().div_ceil(64)],
            acceptable: vec![BTreeSet::new(); members.len()],
            memo: HashMap::new(),
            nodes: 0,
        };
        let best = search.visit(0, CompCount::default());
        let feasible = best.is_some();
        let open_slots = best.unwrap_or_default();

        tracing::debug!(
            "feasibility: {} members, target {}/{}/{}, feasible={}, open={:?}, nodes={}, memo={}",
            members.len(),
            target.tanks,
            target.healers,
            target.dps,
            feasible,
            open_slots,
            search.nodes,
            search.memo.len()
        );

        FeasibilityResult {
            feasible,
            acceptable: search.acceptable,
            open_slots,
        }
    }
}

type MemoKey = (usize, CompCount, Vec<u64>);

struct Search<'s> {
    catalog: &'s JobCatalog,
    members: &'s [RosterMember],
    resolved: &'s [Vec<usize>],
    remaining: &'s [usize],
    target: &'s CompositionTarget,
    /// 目前路徑上已指派、且不允許重複的職業（以目錄索引為位元）
    committed: Vec<u64>,
    acceptable: Vec<BTreeSet<usize>>,
    /// 每個節點之下所有成功葉節點的空位最大值；None 表示此後綴無解
    memo: HashMap<MemoKey, Option<OpenSlots>>,
    nodes: u64,
}

impl Search<'_> {
    fn is_committed(&self, job_index: usize) -> bool {
        self.committed[job_index / 64] & (1u64 << (job_index % 64)) != 0
    }

    fn toggle(&mut self, job_index: usize) {
        self.committed[job_index / 64] ^= 1u64 << (job_index % 64);
    }

    fn visit(&mut self, i: usize, state: CompCount) -> Option<OpenSlots> {
        if i == self.members.len() {
            return Some(state.open_slots(self.target));
        }

        if self.members[i].helper {
            return self.visit(i + 1, state);
        }

        if state.count() + self.remaining[i] > self.target.total() {
            return None;
        }

        // 命中時，此節點之下的可接受職業已在第一次展開時記錄過
        let key = (i, state, self.committed.clone());
        if let Some(&cached) = self.memo.get(&key) {
            return cached;
        }
        self.nodes += 1;

        let catalog = self.catalog;
        let resolved = self.resolved;
        let mut best: Option<OpenSlots> = None;

        for &job_index in &resolved[i] {
            let job = catalog.job(job_index);
            let next = state.with(job.role);
            if !next.fits(self.target) {
                continue;
            }
            let unique = !job.duplicates_allowed;
            if unique && self.is_committed(job_index) {
                continue;
            }

            if unique {
                self.toggle(job_index);
            }
            let below = self.visit(i + 1, next);
            if unique {
                self.toggle(job_index);
            }

            if let Some(slots) = below {
                self.acceptable[i].insert(job_index);
                best = Some(best.map_or(slots, |b| b.max(slots)));
            }
        }

        self.memo.insert(key, best);
        best
    }
}
