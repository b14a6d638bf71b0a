use rstest::rstest;
use saasi::config::GateParams;
use saasi::progress::unlock::{Phase, UnlockThresholds};
use saasi::storage::PhaseResult;
use std::collections::HashMap;

fn prior(phase: u8, score: u32) -> PhaseResult {
    PhaseResult {
        phase,
        score,
        max_score: 100,
        duration: 300,
        timestamp: 0,
        metrics: HashMap::new(),
        level: "Competent".to_string(),
        generated: false,
    }
}

#[test]
fn test_phase_one_always_unlocked() {
    let gate = UnlockThresholds::default();
    let status = gate.check(Phase::Intake, None);
    assert!(status.unlocked);
    assert_eq!(status.required_score, 0);
}

#[rstest]
#[case(Phase::Planning, 59, false, Some(1))]
#[case(Phase::Planning, 60, true, None)]
#[case(Phase::Crisis, 59, false, Some(1))]
#[case(Phase::Crisis, 60, true, None)]
#[case(Phase::Transition, 64, false, Some(1))]
#[case(Phase::Transition, 65, true, None)]
#[case(Phase::Transition, 100, true, None)]
fn test_gate_thresholds(
    #[case] target: Phase,
    #[case] prior_score: u32,
    #[case] unlocked: bool,
    #[case] shortfall: Option<u32>,
) {
    let gate = UnlockThresholds::default();
    let result = prior(target.number() - 1, prior_score);
    let status = gate.check(target, Some(&result));
    assert_eq!(status.unlocked, unlocked);
    assert_eq!(status.shortfall, shortfall);
    assert_eq!(status.current_score, prior_score);
}

#[test]
fn test_missing_predecessor_locks() {
    let gate = UnlockThresholds::default();
    let status = gate.check(Phase::Crisis, None);
    assert!(!status.unlocked);
    assert_eq!(status.current_score, 0);
    assert!(status.reason.contains("Complete phase 2"));
}

#[test]
fn test_generated_results_gate_identically() {
    let gate = UnlockThresholds::default();
    let mut result = prior(1, 70);
    result.generated = true;
    assert!(gate.check(Phase::Planning, Some(&result)).unlocked);
}

#[test]
fn test_thresholds_from_params() {
    let params = GateParams {
        unlock_thresholds: "70,80,90".to_string(),
    };
    let gate = UnlockThresholds::from_params(&params);
    assert_eq!(gate.required_for(Phase::Planning), 70);
    assert_eq!(gate.required_for(Phase::Crisis), 80);
    assert_eq!(gate.required_for(Phase::Transition), 90);
    assert!(!gate.check(Phase::Planning, Some(&prior(1, 69))).unlocked);
}

#[test]
fn test_phase_arithmetic() {
    assert_eq!(Phase::Intake.prev(), None);
    assert_eq!(Phase::Planning.prev(), Some(Phase::Intake));
    assert_eq!(Phase::Crisis.next(), Some(Phase::Transition));
    assert_eq!(Phase::Transition.next(), None);
    assert_eq!(Phase::from_number(5), None);
}
