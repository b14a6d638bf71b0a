use strum_macros::Display;

use super::unlock::Phase;
use super::PhaseHistory;

/// Score a phase must reach for its milestone to anchor the closing clause.
const QUALIFYING_SCORE: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Milestone {
    IntakeComplete,
    PlanningComplete,
    CrisisComplete,
    TransitionComplete,
    JourneyBegun,
    IntakeAnchored,
    PlanningAnchored,
    CrisisAnchored,
    CaseClosed,
}

/// Clause templates keyed by milestone, kept in one table so the copy can
/// be swapped or localized without touching the narration logic. `{score}`
/// is the only substitution.
pub fn template(milestone: Milestone) -> &'static str {
    match milestone {
        Milestone::IntakeComplete => "completed the intake interview ({score}/100)",
        Milestone::PlanningComplete => "matched the client to a support program ({score}/100)",
        Milestone::CrisisComplete => "worked through the crisis scenarios ({score}/100)",
        Milestone::TransitionComplete => "closed out the case transition ({score}/100)",
        Milestone::JourneyBegun => "The journey has just begun.",
        Milestone::IntakeAnchored => "The case file is open and the client's story is on record.",
        Milestone::PlanningAnchored => "A support plan is in place; the client knows the next step.",
        Milestone::CrisisAnchored => "The client weathered the crisis with the trainee's help.",
        Milestone::CaseClosed => "The case is closed and the client is standing on their own.",
    }
}

fn phase_milestone(phase: Phase) -> Milestone {
    match phase {
        Phase::Intake => Milestone::IntakeComplete,
        Phase::Planning => Milestone::PlanningComplete,
        Phase::Crisis => Milestone::CrisisComplete,
        Phase::Transition => Milestone::TransitionComplete,
    }
}

fn closing_milestone(highest: Option<Phase>) -> Milestone {
    match highest {
        None => Milestone::JourneyBegun,
        Some(Phase::Intake) => Milestone::IntakeAnchored,
        Some(Phase::Planning) => Milestone::PlanningAnchored,
        Some(Phase::Crisis) => Milestone::CrisisAnchored,
        Some(Phase::Transition) => Milestone::CaseClosed,
    }
}

/// One clause per completed phase in order, plus a closing clause keyed on
/// the highest phase completed with a qualifying score.
pub fn narrative(history: &PhaseHistory) -> String {
    let clauses: Vec<String> = history
        .iter_completed()
        .map(|r| {
            let phase = Phase::from_number(r.phase).unwrap_or(Phase::Intake);
            template(phase_milestone(phase)).replace("{score}", &r.score.to_string())
        })
        .collect();

    let closing = template(closing_milestone(
        history.highest_qualifying(QUALIFYING_SCORE),
    ));

    if clauses.is_empty() {
        closing.to_string()
    } else {
        format!("The trainee {}. {}", clauses.join(", "), closing)
    }
}
