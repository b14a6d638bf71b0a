use saasi::crisis::{CrisisClock, CrisisResolution, CrisisState};

#[test]
fn test_starts_pending() {
    let clock = CrisisClock::new("eviction_notice", 30_000, -5);
    assert_eq!(clock.state(), CrisisState::Pending);
    assert!(!clock.is_resolved());
    assert_eq!(clock.scenario_id(), "eviction_notice");
    assert_eq!(clock.deadline_ms(), 30_000);
}

#[test]
fn test_response_beats_timeout() {
    let mut clock = CrisisClock::new("eviction_notice", 30_000, -5);
    assert!(clock.resolve_response(1));
    assert_eq!(
        clock.state(),
        CrisisState::Resolved(CrisisResolution::Response { option: 1 })
    );

    // Late expiry signal is a no-op; no penalty is handed out.
    assert_eq!(clock.resolve_timeout(), None);
    // The winning response sticks.
    assert!(!clock.resolve_response(2));
    assert_eq!(
        clock.state(),
        CrisisState::Resolved(CrisisResolution::Response { option: 1 })
    );
}

#[test]
fn test_timeout_beats_response() {
    let mut clock = CrisisClock::new("missed_appointment", 20_000, -8);
    assert_eq!(clock.resolve_timeout(), Some(-8));
    assert_eq!(
        clock.state(),
        CrisisState::Resolved(CrisisResolution::Timeout)
    );

    // A response arriving after expiry loses the race.
    assert!(!clock.resolve_response(0));
    assert_eq!(
        clock.state(),
        CrisisState::Resolved(CrisisResolution::Timeout)
    );
}

#[test]
fn test_penalty_applied_exactly_once() {
    let mut clock = CrisisClock::new("missed_appointment", 20_000, -8);
    assert_eq!(clock.resolve_timeout(), Some(-8));
    assert_eq!(clock.resolve_timeout(), None);
    assert_eq!(clock.resolve_timeout(), None);
}
