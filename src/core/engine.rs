use crate::core::admission::AdmissionControl;
use crate::core::feasibility::{FeasibilityEngine, FeasibilityResult};
use crate::core::render::{RosterRenderer, RosterView};
use crate::domain::catalog::JobCatalog;
use crate::domain::model::{CompositionTarget, MemberId, RosterMember};
use crate::domain::roster::Roster;

/// 可行性搜尋、報名閘門與名單顯示的統一入口，共用同一份職業表
#[derive(Debug, Clone, Copy)]
pub struct RaidEngine<'a> {
    feasibility: FeasibilityEngine<'a>,
    admission: AdmissionControl<'a>,
    renderer: RosterRenderer<'a>,
}

impl<'a> RaidEngine<'a> {
    pub fn new(catalog: &'a JobCatalog) -> Self {
        let feasibility = FeasibilityEngine::new(catalog);
        Self {
            feasibility,
            admission: AdmissionControl::new(feasibility),
            renderer: RosterRenderer::new(feasibility),
        }
    }

    pub fn catalog(&self) -> &'a JobCatalog {
        self.feasibility.catalog()
    }

    pub fn compute(&self, members: &[RosterMember], target: &CompositionTarget) -> FeasibilityResult {
        self.feasibility.compute(members, target)
    }

    pub fn can_add(
        &self,
        members: &[RosterMember],
        candidate: &RosterMember,
        target: &CompositionTarget,
        ignore: MemberId,
        requires_mentor: bool,
    ) -> bool {
        self.admission
            .can_add(members, candidate, target, ignore, requires_mentor)
    }

    pub fn render(
        &self,
        members: &[RosterMember],
        target: &CompositionTarget,
        requires_mentor: bool,
    ) -> Vec<String> {
        self.renderer.render(members, target, requires_mentor)
    }

    pub fn render_helpers(&self, members: &[RosterMember]) -> Vec<String> {
        self.renderer.render_helpers(members)
    }

    pub fn view(
        &self,
        members: &[RosterMember],
        target: &CompositionTarget,
        requires_mentor: bool,
    ) -> RosterView {
        self.renderer.view(members, target, requires_mentor)
    }

    /// 通過報名閘門才寫入名單；重新報名的人以新資料取代舊資料
    pub fn sign_up(
        &self,
        roster: &mut Roster,
        member: RosterMember,
        target: &CompositionTarget,
        requires_mentor: bool,
    ) -> bool {
        if !self.can_add(roster.members(), &member, target, member.id, requires_mentor) {
            tracing::info!("Sign-up of {} ({}) rejected", member.name, member.id);
            return false;
        }
        tracing::info!("Signed up {} ({})", member.name, member.id);
        roster.sign_up(member);
        true
    }
}
