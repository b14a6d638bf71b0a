use saasi::metrics::{clamp, clamp_named, Metric};
use strum::IntoEnumIterator;

#[test]
fn test_clamp_idempotence() {
    let samples = [-1e9, -1.0, 0.0, 0.5, 12.0, 25.0, 99.9, 1e9];
    for metric in Metric::iter() {
        for &v in &samples {
            let once = clamp(metric, v);
            assert_eq!(clamp(metric, once), once, "{} not idempotent at {}", metric, v);
        }
    }
}

#[test]
fn test_clamp_totality() {
    let extremes = [
        f32::NEG_INFINITY,
        -1e20,
        -1.0,
        0.0,
        1e20,
        f32::INFINITY,
        f32::NAN,
    ];
    for metric in Metric::iter() {
        let b = metric.bounds();
        for &v in &extremes {
            let clamped = clamp(metric, v);
            assert!(
                clamped >= b.min && clamped <= b.max,
                "{} escaped bounds for input {}: got {}",
                metric,
                v,
                clamped
            );
        }
    }
}

#[test]
fn test_clamp_nan_collapses_to_zero() {
    assert_eq!(clamp(Metric::Empathy, f32::NAN), 0.0);
}

#[test]
fn test_clamp_bounds_table() {
    assert_eq!(clamp(Metric::Empathy, 40.0), 25.0);
    assert_eq!(clamp(Metric::Empathy, -3.0), 0.0);
    assert_eq!(clamp(Metric::Information, 250.0), 100.0);
    assert_eq!(clamp(Metric::Interactions, 21.0), 20.0);
    assert_eq!(clamp(Metric::Decisions, 0.7), 0.5);
}

#[test]
fn test_clamp_named_known_metric() {
    assert_eq!(clamp_named("empathy", 40.0), 25.0);
    assert_eq!(clamp_named("information", -5.0), 0.0);
}

#[test]
fn test_clamp_named_unknown_passes_through() {
    // Configuration gap: never fatal, never clamped.
    assert_eq!(clamp_named("charisma", 999.0), 999.0);
    assert_eq!(clamp_named("", -42.0), -42.0);
}
