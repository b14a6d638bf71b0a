use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::warn;

/// Ledger mutation notifications. Replacement of an existing selection is
/// observable as Removed followed by Added; UI consumers refresh on both.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerEvent {
    Added {
        puzzle_id: String,
        selection_id: String,
        points: i32,
    },
    Removed {
        puzzle_id: String,
        selection_id: String,
        points: i32,
    },
}

/// Aggregate snapshot delivered alongside every event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerStats {
    pub selections: usize,
    pub points: i32,
    pub puzzles: usize,
}

pub trait LedgerObserver: Send + Sync {
    fn on_event(&self, event: &LedgerEvent, stats: &LedgerStats) -> Result<(), String>;
}

impl<F> LedgerObserver for F
where
    F: Fn(&LedgerEvent, &LedgerStats) -> Result<(), String> + Send + Sync,
{
    fn on_event(&self, event: &LedgerEvent, stats: &LedgerStats) -> Result<(), String> {
        self(event, stats)
    }
}

/// Publish/subscribe fan-out where failure isolation is a property of the
/// bus. A rejecting or panicking observer is logged and skipped; it never
/// blocks other observers or the mutation that fired the event.
#[derive(Default)]
pub struct EventBus {
    observers: Vec<Box<dyn LedgerObserver>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Box<dyn LedgerObserver>) {
        self.observers.push(observer);
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn publish(&self, event: &LedgerEvent, stats: &LedgerStats) {
        for (idx, observer) in self.observers.iter().enumerate() {
            match catch_unwind(AssertUnwindSafe(|| observer.on_event(event, stats))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!("Observer {} rejected event: {}", idx, e),
                Err(_) => warn!("Observer {} panicked; delivery continues", idx),
            }
        }
    }
}
