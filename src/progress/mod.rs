pub mod narrative;
pub mod unlock;

use serde::Serialize;
use tracing::warn;

use self::unlock::Phase;
use crate::storage::PhaseResult;

pub const PHASE_MAX: u32 = 100;
pub const TOTAL_MAX: u32 = 400;

/// The four saved phase results, indexed by phase. The read-only input for
/// every aggregate view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhaseHistory {
    results: [Option<PhaseResult>; 4],
}

impl PhaseHistory {
    pub fn get(&self, phase: Phase) -> Option<&PhaseResult> {
        self.results[(phase.number() - 1) as usize].as_ref()
    }

    pub fn set(&mut self, result: PhaseResult) {
        match Phase::from_number(result.phase) {
            Some(phase) => self.results[(phase.number() - 1) as usize] = Some(result),
            None => warn!("Dropping result for unknown phase {}", result.phase),
        }
    }

    pub fn completed(&self) -> usize {
        self.results.iter().filter(|r| r.is_some()).count()
    }

    pub fn iter_completed(&self) -> impl Iterator<Item = &PhaseResult> {
        self.results.iter().filter_map(|r| r.as_ref())
    }

    /// Highest completed phase with a score at or above `min_score`.
    pub fn highest_qualifying(&self, min_score: u32) -> Option<Phase> {
        self.results
            .iter()
            .enumerate()
            .rev()
            .find_map(|(idx, slot)| match slot {
                Some(r) if r.score >= min_score => Phase::from_number(idx as u8 + 1),
                _ => None,
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub total_score: u32,
    pub percentage: u32,
    pub completed_phases: usize,
    pub average_score: u32,
}

/// Overall journey view. Malformed scores are capped per phase before
/// summing, so the total can never exceed 400.
pub fn aggregate(history: &PhaseHistory) -> ProgressSummary {
    let total: u32 = history
        .iter_completed()
        .map(|r| r.score.min(PHASE_MAX))
        .sum::<u32>()
        .min(TOTAL_MAX);
    let completed = history.completed();
    ProgressSummary {
        total_score: total,
        percentage: ((total as f32 / TOTAL_MAX as f32) * 100.0).round() as u32,
        completed_phases: completed,
        average_score: if completed > 0 {
            (total as f32 / completed as f32).round() as u32
        } else {
            0
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelBand {
    pub title: &'static str,
    pub color: &'static str,
    pub description: &'static str,
}

/// Single-phase performance band, also used for partial overall progress.
pub fn phase_level(score: u32) -> LevelBand {
    if score >= 90 {
        LevelBand {
            title: "Outstanding",
            color: "gold",
            description: "Handled the phase with exceptional judgment",
        }
    } else if score >= 75 {
        LevelBand {
            title: "Strong",
            color: "green",
            description: "Confident casework with minor gaps",
        }
    } else if score >= 60 {
        LevelBand {
            title: "Competent",
            color: "blue",
            description: "Met the core expectations for the phase",
        }
    } else if score >= 40 {
        LevelBand {
            title: "Emerging",
            color: "orange",
            description: "Some sound instincts, key skills still forming",
        }
    } else {
        LevelBand {
            title: "Needs Support",
            color: "red",
            description: "Review the phase material before retrying",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallLevel {
    pub title: String,
    pub color: String,
    pub description: String,
}

/// Projection over the aggregate score. With all four phases done the full
/// ladder applies; otherwise the single-phase band of the running average,
/// annotated with how far along the trainee is.
pub fn overall_level(total_score: u32, completed_phases: usize) -> OverallLevel {
    if completed_phases == 4 {
        let (title, color, description) = if total_score >= 380 {
            (
                "Distinguished Caseworker",
                "gold",
                "Exceptional judgment across the full case lifecycle",
            )
        } else if total_score >= 340 {
            (
                "Advanced Caseworker",
                "silver",
                "Consistently strong work in every phase",
            )
        } else if total_score >= 280 {
            (
                "Proficient Caseworker",
                "green",
                "Solid casework with room to refine",
            )
        } else if total_score >= 220 {
            (
                "Developing Caseworker",
                "blue",
                "A workable foundation; targeted practice recommended",
            )
        } else {
            (
                "Foundational Caseworker",
                "gray",
                "Revisit the training phases to build core skills",
            )
        };
        return OverallLevel {
            title: title.to_string(),
            color: color.to_string(),
            description: description.to_string(),
        };
    }

    let average = if completed_phases > 0 {
        (total_score as f32 / completed_phases as f32).round() as u32
    } else {
        0
    };
    let band = phase_level(average);
    OverallLevel {
        title: band.title.to_string(),
        color: band.color.to_string(),
        description: format!(
            "{} ({}/4 phases complete)",
            band.description, completed_phases
        ),
    }
}
