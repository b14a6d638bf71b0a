use std::collections::HashMap;
use tracing::{info, warn};

use crate::config::Config;
use crate::ledger::SelectionLedger;
use crate::metrics::Metric;
use crate::progress::narrative::narrative;
use crate::progress::unlock::{Phase, UnlockStatus, UnlockThresholds};
use crate::progress::{self, OverallLevel, PhaseHistory, ProgressSummary, PHASE_MAX};
use crate::quality::{RawScores, ResponseTable, WeightedResponse};
use crate::scoring::decisions::{AvailabilityChoice, CapacityChoice};
use crate::scoring::validator::{validate_snapshot, SnapshotReport};
use crate::scoring::{PhaseMetrics, PhaseScorer};
use crate::storage::{now_millis, PhaseResult, ResultStore};

struct ActivePhase {
    phase: Phase,
    metrics: PhaseMetrics,
    started_ms: u64,
}

impl ActivePhase {
    fn new(phase: Phase) -> Self {
        Self {
            phase,
            metrics: PhaseMetrics::default(),
            started_ms: now_millis(),
        }
    }
}

/// One trainee's run through the simulation. Owns its store, ledger and
/// scorer outright; there is no ambient global state.
pub struct Session {
    store: Box<dyn ResultStore>,
    pub ledger: SelectionLedger,
    scorer: PhaseScorer,
    responses: ResponseTable,
    thresholds: UnlockThresholds,
    active: Option<ActivePhase>,
}

impl Session {
    pub fn new(store: Box<dyn ResultStore>, config: &Config) -> Self {
        Self {
            store,
            ledger: SelectionLedger::new(),
            scorer: PhaseScorer::new(config.weights.clone()),
            responses: ResponseTable::builtin(),
            thresholds: UnlockThresholds::from_params(&config.gates),
            active: None,
        }
    }

    pub fn with_responses(mut self, responses: ResponseTable) -> Self {
        self.responses = responses;
        self
    }

    pub fn active_phase(&self) -> Option<Phase> {
        self.active.as_ref().map(|a| a.phase)
    }

    pub fn metrics(&self) -> Option<&PhaseMetrics> {
        self.active.as_ref().map(|a| &a.metrics)
    }

    pub fn unlock_status(&self, target: Phase) -> UnlockStatus {
        let prior = target.prev().and_then(|p| self.store.load(p));
        self.thresholds.check(target, prior.as_ref())
    }

    /// The normal, gated entry point. Activating a phase resets per-phase
    /// state; a retry overwrites the previous attempt on completion.
    pub fn start_phase(&mut self, phase: Phase) -> UnlockStatus {
        let status = self.unlock_status(phase);
        if status.unlocked {
            info!("Starting phase {} ({})", phase.number(), phase.title());
            self.ledger.clear_all();
            self.active = Some(ActivePhase::new(phase));
        } else {
            info!("Phase {} locked: {}", phase.number(), status.reason);
        }
        status
    }

    /// Score one dialogue choice and fold it into the active phase. Returns
    /// None (with a warning) when no phase is active.
    pub fn record_response(
        &mut self,
        interaction: &str,
        option: u8,
        raw: RawScores,
    ) -> Option<WeightedResponse> {
        let active = match self.active.as_mut() {
            Some(a) => a,
            None => {
                warn!("Response to '{}' ignored: no active phase", interaction);
                return None;
            }
        };
        let weighted = self.responses.evaluate(interaction, option, raw);
        self.scorer.apply_interaction(&mut active.metrics, &weighted);
        Some(weighted)
    }

    pub fn record_categorization(&mut self, correct: bool) -> bool {
        match self.active.as_mut() {
            Some(active) => {
                self.scorer
                    .record_categorization(&mut active.metrics, correct);
                true
            }
            None => {
                warn!("Categorization ignored: no active phase");
                false
            }
        }
    }

    pub fn record_document(&mut self, identified: bool) -> bool {
        match self.active.as_mut() {
            Some(active) => {
                self.scorer.record_document(&mut active.metrics, identified);
                true
            }
            None => {
                warn!("Document identification ignored: no active phase");
                false
            }
        }
    }

    pub fn choose_availability(&mut self, choice: AvailabilityChoice) -> bool {
        match self.active.as_mut() {
            Some(active) => {
                active.metrics.availability = Some(choice);
                true
            }
            None => false,
        }
    }

    pub fn choose_capacity(&mut self, choice: CapacityChoice) -> bool {
        match self.active.as_mut() {
            Some(active) => {
                active.metrics.capacity = Some(choice);
                true
            }
            None => false,
        }
    }

    pub fn validate_active_snapshot(&self) -> Option<SnapshotReport> {
        self.active.as_ref().map(|a| validate_snapshot(&a.metrics))
    }

    /// Finalize the active phase: compute the clamped score, persist the
    /// result, reset per-phase state. A failed save is logged and the result
    /// is still returned; the session keeps working in memory.
    pub fn complete_phase(&mut self) -> Option<PhaseResult> {
        let active = match self.active.take() {
            Some(a) => a,
            None => {
                warn!("complete_phase called with no active phase");
                return None;
            }
        };
        let score = self.scorer.compute_phase_score(&active.metrics);
        let result = PhaseResult {
            phase: active.phase.number(),
            score,
            max_score: PHASE_MAX,
            duration: (now_millis().saturating_sub(active.started_ms)) / 1000,
            timestamp: now_millis(),
            metrics: metric_map(&active.metrics),
            level: progress::phase_level(score).title.to_string(),
            generated: false,
        };
        let outcome = self.store.save(active.phase, &result);
        if !outcome.success {
            warn!(
                "Could not persist phase {} result: {}",
                result.phase,
                outcome.error.as_deref().unwrap_or("unknown")
            );
        }
        self.ledger.clear_all();
        Some(result)
    }

    /// Direct phase access, bypassing the gate: synthesizes plausible
    /// results for every preceding phase (marked `generated`), persists
    /// them, and activates the requested phase. A deliberate affordance for
    /// trainees jumping into a later phase, kept separate from the gated
    /// path.
    pub fn direct_access(&mut self, target: Phase, seed: Option<u64>) -> Vec<PhaseResult> {
        let mut rng = match seed {
            Some(s) => fastrand::Rng::with_seed(s),
            None => fastrand::Rng::new(),
        };

        let mut generated = Vec::new();
        for n in 1..target.number() {
            let phase = match Phase::from_number(n) {
                Some(p) => p,
                None => continue,
            };
            // The synthetic score must satisfy the gate of the phase after
            // this one, or the seeded history would be self-contradictory.
            let floor = phase
                .next()
                .map(|next| self.thresholds.required_for(next))
                .unwrap_or(0);
            let score = rng.u32(floor..=95);
            let result = synthesize_result(phase, score, &mut rng);
            let outcome = self.store.save(phase, &result);
            if !outcome.success {
                warn!(
                    "Could not persist generated phase {} result: {}",
                    n,
                    outcome.error.as_deref().unwrap_or("unknown")
                );
            }
            generated.push(result);
        }

        info!(
            "Direct access to phase {} ({} predecessors generated)",
            target.number(),
            generated.len()
        );
        self.ledger.clear_all();
        self.active = Some(ActivePhase::new(target));
        generated
    }

    pub fn history(&self) -> PhaseHistory {
        self.store.history()
    }

    pub fn progress(&self) -> ProgressSummary {
        progress::aggregate(&self.history())
    }

    pub fn overall(&self) -> OverallLevel {
        let summary = self.progress();
        progress::overall_level(summary.total_score, summary.completed_phases)
    }

    pub fn journey(&self) -> String {
        narrative(&self.history())
    }
}

fn metric_map(metrics: &PhaseMetrics) -> HashMap<String, f32> {
    let mut map = HashMap::new();
    map.insert(Metric::Empathy.to_string(), metrics.empathy);
    map.insert(Metric::Information.to_string(), metrics.information);
    map.insert(Metric::Interactions.to_string(), metrics.interactions);
    map.insert(
        Metric::Categorization.to_string(),
        metrics.categorization_hits as f32,
    );
    map.insert(
        Metric::Documents.to_string(),
        metrics.documents_found as f32,
    );
    map.insert(Metric::Decisions.to_string(), metrics.decision_quality());
    map
}

/// Fabricate one plausible prior result for the direct-access path. The
/// metric breakdown tracks the target score so reports stay coherent.
fn synthesize_result(phase: Phase, score: u32, rng: &mut fastrand::Rng) -> PhaseResult {
    let fraction = score as f32 / PHASE_MAX as f32;
    let mut metrics = HashMap::new();
    metrics.insert(
        Metric::Empathy.to_string(),
        (fraction * Metric::Empathy.bounds().max).round(),
    );
    metrics.insert(
        Metric::Information.to_string(),
        (fraction * Metric::Information.bounds().max).round(),
    );
    metrics.insert(
        Metric::Interactions.to_string(),
        (fraction * Metric::Interactions.bounds().max).round(),
    );
    metrics.insert(
        Metric::Categorization.to_string(),
        (fraction * Metric::Categorization.bounds().max).round(),
    );
    metrics.insert(
        Metric::Documents.to_string(),
        (fraction * Metric::Documents.bounds().max).round(),
    );
    metrics.insert(Metric::Decisions.to_string(), fraction * 0.5);

    PhaseResult {
        phase: phase.number(),
        score,
        max_score: PHASE_MAX,
        duration: rng.u64(240..=900),
        timestamp: now_millis(),
        metrics,
        level: progress::phase_level(score).title.to_string(),
        generated: true,
    }
}
