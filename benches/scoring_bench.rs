use criterion::{criterion_group, criterion_main, Criterion};
use saasi::config::ScoringWeights;
use saasi::ledger::SelectionLedger;
use saasi::quality::{RawScores, ResponseTable};
use saasi::scoring::{PhaseMetrics, PhaseScorer};
use std::collections::HashMap;
use std::hint::black_box;

fn bench_phase_score(c: &mut Criterion) {
    let scorer = PhaseScorer::new(ScoringWeights::default());
    let table = ResponseTable::builtin();
    let mut state = PhaseMetrics::default();
    for i in 0..8u8 {
        let weighted = table.evaluate(
            "intake_greeting",
            i % 3,
            RawScores {
                empathy: 3.0,
                information: 4.0,
            },
        );
        scorer.apply_interaction(&mut state, &weighted);
    }

    c.bench_function("compute_phase_score", |b| {
        b.iter(|| scorer.compute_phase_score(black_box(&state)))
    });
}

fn bench_ledger_churn(c: &mut Criterion) {
    c.bench_function("ledger_add_toggle_score", |b| {
        b.iter(|| {
            let mut ledger = SelectionLedger::new();
            for i in 0..32 {
                let id = format!("prog_{}", i);
                ledger.add("programs", &id, 5, HashMap::new());
            }
            for i in 0..32 {
                let id = format!("prog_{}", i);
                ledger.toggle("programs", &id, 5, HashMap::new());
            }
            black_box(ledger.puzzle_score("programs"))
        })
    });
}

criterion_group!(benches, bench_phase_score, bench_ledger_churn);
criterion_main!(benches);
