use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{debug, warn};

use crate::progress::unlock::Phase;
use crate::progress::PhaseHistory;

pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Finalized outcome of one phase attempt. Written once on completion,
/// entirely overwritten on retry. Field names are the persisted wire format;
/// existing saved data depends on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseResult {
    pub phase: u8,
    pub score: u32,
    pub max_score: u32,
    /// Seconds spent in the phase.
    pub duration: u64,
    pub timestamp: u64,
    #[serde(default)]
    pub metrics: HashMap<String, f32>,
    pub level: String,
    /// Marks synthetic data produced by the direct-access path.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub generated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaveOutcome {
    pub success: bool,
    pub timestamp: Option<u64>,
    pub error: Option<String>,
}

impl SaveOutcome {
    pub fn ok(timestamp: u64) -> Self {
        Self {
            success: true,
            timestamp: Some(timestamp),
            error: None,
        }
    }

    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            timestamp: None,
            error: Some(error.into()),
        }
    }
}

pub fn storage_key(phase: Phase) -> String {
    format!("saasi_phase{}_results", phase.number())
}

/// Persistence boundary. Implementations catch every host failure here and
/// convert it; the scoring core keeps working in memory when persistence is
/// degraded.
pub trait ResultStore {
    fn load(&self, phase: Phase) -> Option<PhaseResult>;
    fn save(&mut self, phase: Phase, result: &PhaseResult) -> SaveOutcome;
    fn clear(&mut self, phase: Phase) -> bool;

    fn history(&self) -> PhaseHistory {
        let mut history = PhaseHistory::default();
        for phase in Phase::iter() {
            if let Some(result) = self.load(phase) {
                history.set(result);
            }
        }
        history
    }
}

/// Keyed string store mirroring the browser localStorage it replaces.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultStore for MemoryStore {
    fn load(&self, phase: Phase) -> Option<PhaseResult> {
        let raw = self.entries.get(&storage_key(phase))?;
        match serde_json::from_str(raw) {
            Ok(result) => Some(result),
            Err(e) => {
                warn!("Corrupt saved data for {}: {}", storage_key(phase), e);
                None
            }
        }
    }

    fn save(&mut self, phase: Phase, result: &PhaseResult) -> SaveOutcome {
        match serde_json::to_string(result) {
            Ok(json) => {
                self.entries.insert(storage_key(phase), json);
                SaveOutcome::ok(now_millis())
            }
            Err(e) => SaveOutcome::fail(e.to_string()),
        }
    }

    fn clear(&mut self, phase: Phase) -> bool {
        self.entries.remove(&storage_key(phase)).is_some()
    }
}

/// One JSON file per storage key under a session directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, phase: Phase) -> PathBuf {
        self.dir.join(format!("{}.json", storage_key(phase)))
    }
}

impl ResultStore for JsonFileStore {
    fn load(&self, phase: Phase) -> Option<PhaseResult> {
        let path = self.path_for(phase);
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                debug!("No saved data at {}: {}", path.display(), e);
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(result) => Some(result),
            Err(e) => {
                warn!("Corrupt saved data at {}: {}", path.display(), e);
                None
            }
        }
    }

    fn save(&mut self, phase: Phase, result: &PhaseResult) -> SaveOutcome {
        if let Err(e) = fs::create_dir_all(&self.dir) {
            warn!("Could not create store dir {}: {}", self.dir.display(), e);
            return SaveOutcome::fail(e.to_string());
        }
        let json = match serde_json::to_string_pretty(result) {
            Ok(j) => j,
            Err(e) => return SaveOutcome::fail(e.to_string()),
        };
        match fs::write(self.path_for(phase), json) {
            Ok(()) => SaveOutcome::ok(now_millis()),
            Err(e) => {
                warn!("Save failed for phase {}: {}", phase.number(), e);
                SaveOutcome::fail(e.to_string())
            }
        }
    }

    fn clear(&mut self, phase: Phase) -> bool {
        fs::remove_file(self.path_for(phase)).is_ok()
    }
}
