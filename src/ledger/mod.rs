pub mod events;
pub mod rules;

use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::warn;

use serde::{Deserialize, Serialize};

use self::events::{EventBus, LedgerEvent, LedgerObserver, LedgerStats};
use self::rules::{RuleVerdict, SelectionRule};
use crate::storage::now_millis;

/// One scored choice made by the trainee within a puzzle. Owned by the
/// ledger for the lifetime of a puzzle attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub puzzle_id: String,
    pub selection_id: String,
    pub points: i32,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    pub timestamp: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

/// Ledger of (puzzle, selection) entries with per-puzzle validation rules
/// and observer notifications. At most one entry exists per key; re-adding
/// replaces, observable as Removed then Added.
#[derive(Default)]
pub struct SelectionLedger {
    entries: BTreeMap<(String, String), Selection>,
    rules: HashMap<String, SelectionRule>,
    bus: EventBus,
}

impl SelectionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_rule(&mut self, puzzle_id: &str, rule: SelectionRule) {
        self.rules.insert(puzzle_id.to_string(), rule);
    }

    pub fn subscribe(&mut self, observer: Box<dyn LedgerObserver>) {
        self.bus.subscribe(observer);
    }

    pub fn add(
        &mut self,
        puzzle_id: &str,
        selection_id: &str,
        points: i32,
        metadata: HashMap<String, String>,
    ) {
        let key = (puzzle_id.to_string(), selection_id.to_string());
        if self.entries.contains_key(&key) {
            // Replacement resets the timestamp and fires both notifications.
            self.remove(puzzle_id, selection_id);
        }
        let selection = Selection {
            puzzle_id: puzzle_id.to_string(),
            selection_id: selection_id.to_string(),
            points,
            metadata,
            timestamp: now_millis(),
        };
        self.entries.insert(key, selection);
        let stats = self.stats();
        self.bus.publish(
            &LedgerEvent::Added {
                puzzle_id: puzzle_id.to_string(),
                selection_id: selection_id.to_string(),
                points,
            },
            &stats,
        );
    }

    /// Removing an absent key is a warn-level no-op, never an error.
    pub fn remove(&mut self, puzzle_id: &str, selection_id: &str) -> bool {
        let key = (puzzle_id.to_string(), selection_id.to_string());
        match self.entries.remove(&key) {
            Some(selection) => {
                let stats = self.stats();
                self.bus.publish(
                    &LedgerEvent::Removed {
                        puzzle_id: selection.puzzle_id,
                        selection_id: selection.selection_id,
                        points: selection.points,
                    },
                    &stats,
                );
                true
            }
            None => {
                warn!(
                    "Removal of absent selection '{}' in puzzle '{}' ignored",
                    selection_id, puzzle_id
                );
                false
            }
        }
    }

    pub fn toggle(
        &mut self,
        puzzle_id: &str,
        selection_id: &str,
        points: i32,
        metadata: HashMap<String, String>,
    ) -> Toggle {
        if self.has(puzzle_id, selection_id) {
            self.remove(puzzle_id, selection_id);
            Toggle::Removed
        } else {
            self.add(puzzle_id, selection_id, points, metadata);
            Toggle::Added
        }
    }

    pub fn has(&self, puzzle_id: &str, selection_id: &str) -> bool {
        self.entries
            .contains_key(&(puzzle_id.to_string(), selection_id.to_string()))
    }

    pub fn selections_for(&self, puzzle_id: &str) -> Vec<&Selection> {
        self.entries
            .values()
            .filter(|s| s.puzzle_id == puzzle_id)
            .collect()
    }

    /// Per-puzzle point total, clamped against the rule's declared
    /// `max_points` when one exists. Clamping lives here so no caller can
    /// forget it; unclamped totals were a recurring overflow bug upstream.
    pub fn puzzle_score(&self, puzzle_id: &str) -> i32 {
        let raw: i32 = self
            .entries
            .values()
            .filter(|s| s.puzzle_id == puzzle_id)
            .map(|s| s.points)
            .sum();
        match self.rules.get(puzzle_id).and_then(|r| r.max_points) {
            Some(max) => raw.clamp(0, max),
            None => raw,
        }
    }

    pub fn validate_puzzle(&self, puzzle_id: &str) -> RuleVerdict {
        let selections = self.selections_for(puzzle_id);
        match self.rules.get(puzzle_id) {
            Some(rule) => rule.check(&selections),
            None => {
                // Configuration gap: no rule means nothing to block on.
                warn!("No validation rule registered for puzzle '{}'", puzzle_id);
                RuleVerdict::ok(selections.len())
            }
        }
    }

    /// One Removed notification per entry; granularity matters to UI code
    /// that refreshes per item.
    pub fn clear_puzzle(&mut self, puzzle_id: &str) -> usize {
        let ids: Vec<String> = self
            .selections_for(puzzle_id)
            .iter()
            .map(|s| s.selection_id.clone())
            .collect();
        for id in &ids {
            self.remove(puzzle_id, id);
        }
        ids.len()
    }

    pub fn clear_all(&mut self) -> usize {
        let keys: Vec<(String, String)> = self.entries.keys().cloned().collect();
        for (puzzle_id, selection_id) in &keys {
            self.remove(puzzle_id, selection_id);
        }
        keys.len()
    }

    pub fn stats(&self) -> LedgerStats {
        let puzzles: HashSet<&str> = self.entries.values().map(|s| s.puzzle_id.as_str()).collect();
        LedgerStats {
            selections: self.entries.len(),
            points: self.entries.values().map(|s| s.points).sum(),
            puzzles: puzzles.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializable view of every live selection, in key order.
    pub fn export(&self) -> Vec<Selection> {
        self.entries.values().cloned().collect()
    }

    /// Restore a previously exported snapshot. Silent: no events fire, since
    /// observers were not watching when the originals were made.
    pub fn import(&mut self, selections: Vec<Selection>) {
        for s in selections {
            self.entries
                .insert((s.puzzle_id.clone(), s.selection_id.clone()), s);
        }
    }
}
