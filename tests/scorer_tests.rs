use saasi::config::ScoringWeights;
use saasi::metrics::Metric;
use saasi::quality::{RawScores, ResponseTable};
use saasi::scoring::decisions::{decision_quality, AvailabilityChoice, CapacityChoice};
use saasi::scoring::validator::{validate_snapshot, SnapshotIssue};
use saasi::scoring::{PhaseMetrics, PhaseScorer};

fn scorer() -> PhaseScorer {
    PhaseScorer::new(ScoringWeights::default())
}

#[test]
fn test_apply_interaction_accumulates_and_clamps() {
    let scorer = scorer();
    let table = ResponseTable::builtin();
    let mut state = PhaseMetrics::default();

    // Three excellent responses worth 12 empathy each would sum to 36;
    // the metric caps at 25.
    for _ in 0..3 {
        let w = table.evaluate(
            "intake_greeting",
            0,
            RawScores {
                empathy: 12.0,
                information: 5.0,
            },
        );
        scorer.apply_interaction(&mut state, &w);
    }
    assert_eq!(state.empathy, 25.0);
    assert_eq!(state.information, 15.0);
    assert_eq!(state.interactions, 3.0);
}

#[test]
fn test_interactions_cap() {
    let scorer = scorer();
    let table = ResponseTable::builtin();
    let mut state = PhaseMetrics::default();
    for _ in 0..30 {
        let w = table.evaluate("intake_greeting", 1, RawScores::default());
        scorer.apply_interaction(&mut state, &w);
    }
    assert_eq!(state.interactions, Metric::Interactions.bounds().max);
}

#[test]
fn test_information_percentage_duality() {
    // Information accumulates as raw points but reads as points-out-of-100.
    let mut state = PhaseMetrics::default();
    state.information = 50.0;
    assert_eq!(state.information_pct(), 50);
    state.information = 100.0;
    assert_eq!(state.information_pct(), 100);
}

#[test]
fn test_empty_state_scores_zero() {
    assert_eq!(scorer().compute_phase_score(&PhaseMetrics::default()), 0);
}

#[test]
fn test_perfect_state_scores_hundred() {
    let mut state = PhaseMetrics::default();
    state.empathy = 25.0;
    state.information = 100.0;
    state.interactions = 20.0;
    state.categorization_hits = 5;
    state.categorization_total = 5;
    state.documents_found = 3;
    state.documents_total = 3;
    state.availability = Some(AvailabilityChoice::Immediate);
    state.capacity = Some(CapacityChoice::OpenSlots);
    assert_eq!(scorer().compute_phase_score(&state), 100);
}

#[test]
fn test_weighted_formula_partial_state() {
    // empathy 12/25 * 0.30 + information 6/100 * 0.25
    // + interactions 1/20 * 0.15 = 0.1665 -> 17 after rounding.
    let mut state = PhaseMetrics::default();
    state.empathy = 12.0;
    state.information = 6.0;
    state.interactions = 1.0;
    assert_eq!(scorer().compute_phase_score(&state), 17);
}

#[test]
fn test_end_to_end_excellent_response() {
    // Spec scenario: empathy raw 12 on an excellent response against an
    // empty state.
    let scorer = scorer();
    let table = ResponseTable::builtin();
    let mut state = PhaseMetrics::default();
    let w = table.evaluate(
        "intake_greeting",
        0,
        RawScores {
            empathy: 12.0,
            information: 6.0,
        },
    );
    scorer.apply_interaction(&mut state, &w);
    assert_eq!(state.empathy, 12.0);
    assert_eq!(w.total_points, 12 + 6 + 2);
}

#[test]
fn test_decision_quality_rankings() {
    assert_eq!(decision_quality(None, None), 0.0);
    assert_eq!(
        decision_quality(Some(AvailabilityChoice::Immediate), None),
        0.0
    );
    assert_eq!(
        decision_quality(
            Some(AvailabilityChoice::Immediate),
            Some(CapacityChoice::OpenSlots)
        ),
        0.5
    );
    let worst = decision_quality(
        Some(AvailabilityChoice::NextMonth),
        Some(CapacityChoice::AtCapacity),
    );
    assert!((worst - 0.1).abs() < 1e-6);
    let mixed = decision_quality(
        Some(AvailabilityChoice::WithinWeek),
        Some(CapacityChoice::Waitlisted),
    );
    assert!((mixed - 0.4).abs() < 1e-6);
}

#[test]
fn test_validator_clean_state() {
    assert!(validate_snapshot(&PhaseMetrics::default()).is_clean());
}

#[test]
fn test_validator_flags_out_of_range() {
    let mut state = PhaseMetrics::default();
    state.empathy = 40.0; // hand-edited state bypassing the limiter
    let report = validate_snapshot(&state);
    assert!(!report.is_clean());
    assert!(matches!(
        report.issues[0],
        SnapshotIssue::OutOfRange {
            metric: Metric::Empathy,
            ..
        }
    ));
}

#[test]
fn test_validator_flags_count_inconsistency() {
    let mut state = PhaseMetrics::default();
    state.categorization_hits = 6;
    state.categorization_total = 4;
    let report = validate_snapshot(&state);
    assert!(report
        .issues
        .iter()
        .any(|i| matches!(i, SnapshotIssue::CountExceedsTotal { what: "categorization", .. })));
}

#[test]
fn test_validator_flags_contradictory_placement() {
    let mut state = PhaseMetrics::default();
    state.availability = Some(AvailabilityChoice::Immediate);
    state.capacity = Some(CapacityChoice::AtCapacity);
    let report = validate_snapshot(&state);
    assert!(report
        .issues
        .iter()
        .any(|i| matches!(i, SnapshotIssue::ContradictoryPlacement)));
}
