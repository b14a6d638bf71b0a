use super::decisions::{AvailabilityChoice, CapacityChoice};
use super::PhaseMetrics;
use crate::metrics::Metric;
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotIssue {
    OutOfRange { metric: Metric, value: f32 },
    CountExceedsTotal { what: &'static str, found: u32, total: u32 },
    TotalExceedsMax { what: &'static str, total: u32, max: u32 },
    ContradictoryPlacement,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotReport {
    pub issues: Vec<SnapshotIssue>,
}

impl SnapshotReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Sanity-check a phase state snapshot against declared bounds. Diagnostic
/// only: callers that mutate exclusively through the scorer should never
/// see a dirty report, so every issue is also logged.
pub fn validate_snapshot(state: &PhaseMetrics) -> SnapshotReport {
    let mut report = SnapshotReport::default();

    for (metric, value) in [
        (Metric::Empathy, state.empathy),
        (Metric::Information, state.information),
        (Metric::Interactions, state.interactions),
    ] {
        let b = metric.bounds();
        if value.is_nan() || value < b.min || value > b.max {
            report.issues.push(SnapshotIssue::OutOfRange { metric, value });
        }
    }

    if state.categorization_hits > state.categorization_total {
        report.issues.push(SnapshotIssue::CountExceedsTotal {
            what: "categorization",
            found: state.categorization_hits,
            total: state.categorization_total,
        });
    }
    if state.documents_found > state.documents_total {
        report.issues.push(SnapshotIssue::CountExceedsTotal {
            what: "documents",
            found: state.documents_found,
            total: state.documents_total,
        });
    }

    let cat_max = Metric::Categorization.bounds().max as u32;
    if state.categorization_total > cat_max {
        report.issues.push(SnapshotIssue::TotalExceedsMax {
            what: "categorization",
            total: state.categorization_total,
            max: cat_max,
        });
    }
    let doc_max = Metric::Documents.bounds().max as u32;
    if state.documents_total > doc_max {
        report.issues.push(SnapshotIssue::TotalExceedsMax {
            what: "documents",
            total: state.documents_total,
            max: doc_max,
        });
    }

    // An immediate placement into a program at capacity cannot happen.
    if state.availability == Some(AvailabilityChoice::Immediate)
        && state.capacity == Some(CapacityChoice::AtCapacity)
    {
        report.issues.push(SnapshotIssue::ContradictoryPlacement);
    }

    for issue in &report.issues {
        warn!("Snapshot inconsistency: {:?}", issue);
    }
    report
}
