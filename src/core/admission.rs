use crate::core::feasibility::FeasibilityEngine;
use crate::domain::model::{CompositionTarget, MemberId, RosterMember};

/// 報名閘門：判斷成員能否加入或留在名單而不讓編成無解
#[derive(Debug, Clone, Copy)]
pub struct AdmissionControl<'a> {
    engine: FeasibilityEngine<'a>,
}

impl<'a> AdmissionControl<'a> {
    pub fn new(engine: FeasibilityEngine<'a>) -> Self {
        Self { engine }
    }

    /// `ignore` 為要先移出名單的身分（通常是重新報名的本人）。
    ///
    /// 導師規則看加入前的名單：沒有導師時，已滿的隊伍一律拒絕，
    /// 最後一個名額只留給導師候選人。
    pub fn can_add(
        &self,
        members: &[RosterMember],
        candidate: &RosterMember,
        target: &CompositionTarget,
        ignore: MemberId,
        requires_mentor: bool,
    ) -> bool {
        if candidate.helper {
            return true;
        }

        let mut trial: Vec<RosterMember> = members
            .iter()
            .filter(|m| m.id != ignore)
            .cloned()
            .collect();

        if requires_mentor {
            let raiders = trial.iter().filter(|m| !m.helper);
            let (count, has_mentor) =
                raiders.fold((0usize, false), |(n, mentor), m| (n + 1, mentor || m.mentor));
            let total = target.total();
            if !has_mentor && (count >= total || (count + 1 == total && !candidate.mentor)) {
                tracing::debug!(
                    "rejecting {}: last slot needs a mentor ({} raiders, {} slots)",
                    candidate.id,
                    count,
                    total
                );
                return false;
            }
        }

        trial.push(candidate.clone());
        let admissible = self.engine.compute(&trial, target).feasible;
        tracing::debug!("admission of {}: {}", candidate.id, admissible);
        admissible
    }
}
