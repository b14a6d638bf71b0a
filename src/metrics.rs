use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::warn;

/// A bounded numeric quantity tracked across one phase. Every write to a
/// metric value must pass through `clamp` so stored values never leave the
/// declared range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Metric {
    Empathy,
    Information,
    Interactions,
    Categorization,
    Documents,
    Decisions,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricBounds {
    pub min: f32,
    pub max: f32,
}

impl Metric {
    /// The single source of truth for metric ranges.
    pub fn bounds(&self) -> MetricBounds {
        let (min, max) = match self {
            Metric::Empathy => (0.0, 25.0),
            // Information is a raw point accumulator whose percentage view
            // is points-out-of-100. Keep the 100 cap even though the metric
            // reads like a percentage; the scoring tables rely on it.
            Metric::Information => (0.0, 100.0),
            Metric::Interactions => (0.0, 20.0),
            Metric::Categorization => (0.0, 10.0),
            Metric::Documents => (0.0, 10.0),
            Metric::Decisions => (0.0, 0.5),
        };
        MetricBounds { min, max }
    }
}

/// Total clamp: always lands in the metric's declared range. NaN collapses
/// to zero rather than propagating.
pub fn clamp(metric: Metric, value: f32) -> f32 {
    let v = if value.is_nan() { 0.0 } else { value };
    let b = metric.bounds();
    v.max(b.min).min(b.max)
}

/// String entry point for callers holding persisted metric names. An unknown
/// name is a configuration gap, not a crash: the value passes through
/// unclamped with a warning.
pub fn clamp_named(name: &str, value: f32) -> f32 {
    match Metric::from_str(name) {
        Ok(metric) => clamp(metric, value),
        Err(_) => {
            warn!("Unknown metric '{}': value passed through unclamped", name);
            value
        }
    }
}
