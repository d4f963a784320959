use crate::core::feasibility::FeasibilityEngine;
use crate::domain::catalog::JobCatalog;
use crate::domain::model::{CompositionTarget, RoleType, RosterMember};
use serde::Serialize;

pub const PLACEHOLDER_MARKER: &str = "---";
pub const MENTOR_CROWN: &str = "👑";
pub const SPROUT: &str = "🌱";
pub const MISSING_MENTOR_LINE: &str = "⚠️ No mentor signed up";
pub const EMPTY_COLUMN: &str = "---";

#[derive(Debug)]
enum EntryKind<'m> {
    Member {
        member: &'m RosterMember,
        /// 宣告過但沒有任何可行分配用得上的職業
        unusable: Vec<usize>,
    },
    Placeholder(RoleType),
}

#[derive(Debug)]
struct Entry<'m> {
    jobs: Vec<usize>,
    leading: Option<RoleType>,
    kind: EntryKind<'m>,
}

/// 顯示用的兩欄資料，對應公告中的「確定參加」與「可支援」
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterView {
    pub raiders: String,
    pub helpers: String,
}

#[derive(Debug, Clone, Copy)]
pub struct RosterRenderer<'a> {
    engine: FeasibilityEngine<'a>,
}

impl<'a> RosterRenderer<'a> {
    pub fn new(engine: FeasibilityEngine<'a>) -> Self {
        Self { engine }
    }

    /// 非 helper 成員依可用職業排序，空位插在對應角色之後
    pub fn render(
        &self,
        members: &[RosterMember],
        target: &CompositionTarget,
        requires_mentor: bool,
    ) -> Vec<String> {
        let catalog = self.engine.catalog();
        let result = self.engine.compute(members, target);

        let mut entries: Vec<Entry> = members
            .iter()
            .enumerate()
            .filter(|(_, m)| !m.helper)
            .map(|(i, member)| {
                let resolved = catalog.resolve(member);
                let jobs: Vec<usize> = result
                    .acceptable_jobs(i)
                    .into_iter()
                    .flatten()
                    .copied()
                    .filter(|j| resolved.contains(j))
                    .collect();
                let unusable = resolved.into_iter().filter(|j| !jobs.contains(j)).collect();
                Entry {
                    leading: jobs.first().map(|&j| catalog.job(j).role),
                    jobs,
                    kind: EntryKind::Member { member, unusable },
                }
            })
            .collect();

        entries.sort_by(|a, b| a.jobs.cmp(&b.jobs).then_with(|| name_of(a).cmp(name_of(b))));

        // 由後往前插入，避免先插入的空位影響後面的錨點
        for role in [RoleType::Dps, RoleType::Healer, RoleType::Tank] {
            let open = result.open_slots.get(role);
            if open == 0 {
                continue;
            }
            let at = entries
                .iter()
                .position(|e| e.leading.is_some_and(|r| r > role))
                .unwrap_or(entries.len());
            let marker: Vec<usize> = catalog.omni_job(role).into_iter().collect();
            let placeholders = (0..open).map(|_| Entry {
                jobs: marker.clone(),
                leading: Some(role),
                kind: EntryKind::Placeholder(role),
            });
            entries.splice(at..at, placeholders);
        }

        let mut lines: Vec<String> = entries.iter().map(|e| format_entry(catalog, e)).collect();

        if requires_mentor && !members.iter().any(|m| !m.helper && m.mentor) {
            lines.push(MISSING_MENTOR_LINE.to_string());
        }

        lines
    }

    /// helper 依報名順序列出，顯示所有宣告的職業
    pub fn render_helpers(&self, members: &[RosterMember]) -> Vec<String> {
        let catalog = self.engine.catalog();
        members
            .iter()
            .filter(|m| m.helper)
            .map(|m| format!("{} {}", emblems(catalog, &catalog.resolve(m)), decorated_name(m)))
            .collect()
    }

    pub fn view(
        &self,
        members: &[RosterMember],
        target: &CompositionTarget,
        requires_mentor: bool,
    ) -> RosterView {
        RosterView {
            raiders: join_or_empty(self.render(members, target, requires_mentor)),
            helpers: join_or_empty(self.render_helpers(members)),
        }
    }
}

fn name_of<'e>(entry: &'e Entry) -> &'e str {
    match &entry.kind {
        EntryKind::Member { member, .. } => &member.name,
        EntryKind::Placeholder(_) => "",
    }
}

fn emblems(catalog: &JobCatalog, jobs: &[usize]) -> String {
    jobs.iter().map(|&j| catalog.job(j).emblem.as_str()).collect()
}

fn decorated_name(member: &RosterMember) -> String {
    format!(
        "{}{}{}",
        if member.mentor { MENTOR_CROWN } else { "" },
        if member.sprout { SPROUT } else { "" },
        member.name
    )
}

fn format_entry(catalog: &JobCatalog, entry: &Entry) -> String {
    match &entry.kind {
        EntryKind::Placeholder(role) => {
            if entry.jobs.is_empty() {
                format!("[{}] {}", role, PLACEHOLDER_MARKER)
            } else {
                format!("{} {}", emblems(catalog, &entry.jobs), PLACEHOLDER_MARKER)
            }
        }
        EntryKind::Member { member, unusable } => {
            let mut line = format!("{} {}", emblems(catalog, &entry.jobs), decorated_name(member));
            if !unusable.is_empty() {
                line.push_str(&format!(" ~~{}~~", emblems(catalog, unusable)));
            }
            line
        }
    }
}

fn join_or_empty(lines: Vec<String>) -> String {
    if lines.is_empty() {
        EMPTY_COLUMN.to_string()
    } else {
        lines.join("\n")
    }
}

/// 集合提醒訊息；名單為空時回傳 None
pub fn ping_message(title: &str, members: &[RosterMember]) -> Option<String> {
    if members.is_empty() {
        return None;
    }

    let names = |helper: bool| {
        members
            .iter()
            .filter(|m| m.helper == helper)
            .map(|m| m.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut message = format!("Ping! {}: {}", title, names(false));
    if members.iter().any(|m| m.helper) {
        message.push_str(&format!(" (and helpers {})", names(true)));
    }
    Some(message)
}

/// 把多行文字切成不超過 `max_len` 字元的區塊；單行過長時獨立成一塊。
/// 空行照常保留，各區塊以換行接回即為原文
pub fn chunk_lines<S: AsRef<str>>(lines: &[S], max_len: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;
    let mut started = false;

    for line in lines {
        let line = line.as_ref();
        let line_len = line.chars().count();

        if started && current_len + 1 + line_len > max_len {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
            started = false;
        }

        if started {
            current.push('\n');
            current_len += 1;
        }
        current.push_str(line);
        current_len += line_len;
        started = true;
    }

    if started {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Job;

    fn catalog() -> JobCatalog {
        JobCatalog::new(vec![
            Job::new("PLD", "Paladin", "P", RoleType::Tank),
            Job::new("TNK", "Omni-tank", "T", RoleType::Tank).as_omni(),
            Job::new("WHM", "White Mage", "W", RoleType::Healer),
            Job::new("HLR", "Omni-healer", "H", RoleType::Healer).as_omni(),
            Job::new("DRG", "Dragoon", "D", RoleType::Dps),
            Job::new("DPS", "Omni-dps", "X", RoleType::Dps).as_omni(),
            Job::new("ALR", "All-rounder", "A", RoleType::AllRounder).allow_duplicates(),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_roster_renders_placeholders_in_role_order() {
        let catalog = catalog();
        let renderer = RosterRenderer::new(FeasibilityEngine::new(&catalog));
        let lines = renderer.render(&[], &CompositionTarget::LIGHT_PARTY, false);

        assert_eq!(lines, vec!["T ---", "H ---", "X ---", "X ---"]);
    }

    #[test]
    fn test_members_and_placeholders_interleave() {
        let catalog = catalog();
        let renderer = RosterRenderer::new(FeasibilityEngine::new(&catalog));
        let members = vec![
            RosterMember::new(1, "Zed", &["DRG"]),
            RosterMember::new(2, "Amy", &["ALR"]),
            RosterMember::new(3, "Bob", &["PLD"]).as_mentor(),
        ];
        let lines = renderer.render(&members, &CompositionTarget::LIGHT_PARTY, true);

        // ALR 佔掉總數，所以只剩一個空位可給任一角色
        assert_eq!(lines, vec!["P 👑Bob", "H ---", "D Zed", "X ---", "A Amy"]);
    }

    #[test]
    fn test_unusable_jobs_hint_and_name_tiebreak() {
        let catalog = catalog();
        let renderer = RosterRenderer::new(FeasibilityEngine::new(&catalog));
        let members = vec![
            RosterMember::new(1, "b", &["PLD"]),
            RosterMember::new(2, "a", &["DPS", "PLD"]).as_sprout(),
            RosterMember::new(3, "B", &["DPS"]),
        ];
        let lines = renderer.render(&members, &CompositionTarget::LIGHT_PARTY, false);

        // 名稱比較以位元組為準，大寫排在小寫前
        assert_eq!(lines, vec!["P b", "H ---", "X B", "X 🌱a ~~P~~"]);
    }

    #[test]
    fn test_missing_mentor_line() {
        let catalog = catalog();
        let renderer = RosterRenderer::new(FeasibilityEngine::new(&catalog));
        let members = vec![
            RosterMember::new(1, "helper", &["WHM"]).as_helper().as_mentor(),
            RosterMember::new(2, "tank", &["PLD"]),
        ];
        let lines = renderer.render(&members, &CompositionTarget::LIGHT_PARTY, true);
        assert_eq!(lines.last().map(String::as_str), Some(MISSING_MENTOR_LINE));

        let lines = renderer.render(&members, &CompositionTarget::LIGHT_PARTY, false);
        assert!(!lines.iter().any(|l| l == MISSING_MENTOR_LINE));
    }

    #[test]
    fn test_view_and_helpers_column() {
        let catalog = catalog();
        let renderer = RosterRenderer::new(FeasibilityEngine::new(&catalog));
        let members = vec![
            RosterMember::new(1, "Helpy", &["WHM", "PLD"]).as_helper(),
            RosterMember::new(2, "Tanky", &["PLD"]),
        ];
        let view = renderer.view(&members, &CompositionTarget::new(1, 0, 0), false);
        assert_eq!(view.raiders, "P Tanky");
        assert_eq!(view.helpers, "WP Helpy");

        let empty = renderer.view(&members[1..], &CompositionTarget::new(1, 0, 0), false);
        assert_eq!(empty.helpers, EMPTY_COLUMN);
    }

    #[test]
    fn test_ping_message() {
        let members = vec![
            RosterMember::new(1, "Alpha", &["PLD"]),
            RosterMember::new(2, "Beta", &["WHM"]).as_helper(),
            RosterMember::new(3, "Gamma", &["DRG"]),
        ];
        assert_eq!(
            ping_message("Savage", &members).as_deref(),
            Some("Ping! Savage: Alpha, Gamma (and helpers Beta)")
        );
        assert_eq!(
            ping_message("Savage", &members[..1]).as_deref(),
            Some("Ping! Savage: Alpha")
        );
        assert_eq!(ping_message("Savage", &[]), None);
    }

    #[test]
    fn test_chunk_lines() {
        let lines = ["aaaa", "bbbb", "cc", "dddddddddd"];
        let chunks = chunk_lines(&lines, 9);
        assert_eq!(chunks, vec!["aaaa\nbbbb", "cc", "dddddddddd"]);

        let none: [&str; 0] = [];
        assert!(chunk_lines(&none, 10).is_empty());
    }

    #[test]
    fn test_chunk_lines_keeps_blank_lines() {
        let lines = ["", "aaaa", "", "", "bbbb"];
        assert_eq!(chunk_lines(&lines, 20), vec!["\naaaa\n\n\nbbbb"]);

        let chunks = chunk_lines(&lines, 5);
        assert_eq!(chunks, vec!["\naaaa", "\n", "bbbb"]);
        assert_eq!(chunks.join("\n"), lines.join("\n"));

        assert_eq!(chunk_lines(&[""], 10), vec![""]);
    }
}
