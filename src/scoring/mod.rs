pub mod decisions;
pub mod validator;

use crate::config::ScoringWeights;
use crate::metrics::{clamp, Metric};
use crate::quality::WeightedResponse;

use self::decisions::{decision_quality, AvailabilityChoice, CapacityChoice, DECISION_MAX};

/// Mutable per-phase scoring state. All metric writes route through the
/// clamp so stored values never leave their declared ranges.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhaseMetrics {
    pub empathy: f32,
    pub information: f32,
    pub interactions: f32,
    pub categorization_hits: u32,
    pub categorization_total: u32,
    pub documents_found: u32,
    pub documents_total: u32,
    pub availability: Option<AvailabilityChoice>,
    pub capacity: Option<CapacityChoice>,
}

impl PhaseMetrics {
    /// Information is stored as a raw clamped accumulator; its percentage
    /// view is points-out-of-100. Intentional duality carried over from the
    /// scoring tables.
    pub fn information_pct(&self) -> u32 {
        let max = Metric::Information.bounds().max;
        ((self.information / max) * 100.0).round() as u32
    }

    pub fn decision_quality(&self) -> f32 {
        decision_quality(self.availability, self.capacity)
    }
}

pub struct PhaseScorer {
    pub weights: ScoringWeights,
}

impl PhaseScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    /// Fold one weighted response into the phase state. Each metric is
    /// reclamped immediately after the increment.
    pub fn apply_interaction(&self, state: &mut PhaseMetrics, weighted: &WeightedResponse) {
        state.empathy = clamp(Metric::Empathy, state.empathy + weighted.empathy);
        state.information = clamp(Metric::Information, state.information + weighted.information);
        state.interactions = clamp(Metric::Interactions, state.interactions + 1.0);
    }

    pub fn record_categorization(&self, state: &mut PhaseMetrics, correct: bool) {
        state.categorization_total += 1;
        if correct {
            state.categorization_hits += 1;
        }
    }

    pub fn record_document(&self, state: &mut PhaseMetrics, identified: bool) {
        state.documents_total += 1;
        if identified {
            state.documents_found += 1;
        }
    }

    /// Weighted sum of six components, each normalized to [0,1] against its
    /// own max, rounded and clamped to [0,100].
    pub fn compute_phase_score(&self, state: &PhaseMetrics) -> u32 {
        let w = &self.weights;

        let empathy = state.empathy / Metric::Empathy.bounds().max;
        let information = state.information / Metric::Information.bounds().max;
        let interactions = state.interactions / Metric::Interactions.bounds().max;
        let categorization = ratio(state.categorization_hits, state.categorization_total);
        let documents = ratio(state.documents_found, state.documents_total);
        let decisions = state.decision_quality() / DECISION_MAX;

        let combined = w.weight_empathy * empathy
            + w.weight_information * information
            + w.weight_interactions * interactions
            + w.weight_categorization * categorization
            + w.weight_documents * documents
            + w.weight_decisions * decisions;

        let score = (combined * 100.0).round();
        score.max(0.0).min(100.0) as u32
    }
}

fn ratio(hits: u32, total: u32) -> f32 {
    if total == 0 {
        0.0
    } else {
        hits as f32 / total as f32
    }
}
