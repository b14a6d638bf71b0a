use saasi::progress::unlock::Phase;
use saasi::storage::{
    storage_key, JsonFileStore, MemoryStore, PhaseResult, ResultStore,
};
use std::collections::HashMap;
use std::fs;

fn result(phase: u8, score: u32) -> PhaseResult {
    let mut metrics = HashMap::new();
    metrics.insert("empathy".to_string(), 20.0);
    metrics.insert("information".to_string(), 75.0);
    PhaseResult {
        phase,
        score,
        max_score: 100,
        duration: 412,
        timestamp: 1700000000000,
        metrics,
        level: "Strong".to_string(),
        generated: false,
    }
}

#[test]
fn test_storage_key_format() {
    assert_eq!(storage_key(Phase::Intake), "saasi_phase1_results");
    assert_eq!(storage_key(Phase::Transition), "saasi_phase4_results");
}

#[test]
fn test_wire_format_field_names() {
    let json = serde_json::to_string(&result(1, 82)).unwrap();
    // Saved-data compatibility: camelCase maxScore, no generated flag when
    // the result was earned.
    assert!(json.contains("\"maxScore\":100"));
    assert!(json.contains("\"score\":82"));
    assert!(json.contains("\"duration\":412"));
    assert!(!json.contains("generated"));

    let mut generated = result(1, 82);
    generated.generated = true;
    let json = serde_json::to_string(&generated).unwrap();
    assert!(json.contains("\"generated\":true"));
}

#[test]
fn test_legacy_json_without_generated_flag() {
    let json = r#"{"phase":2,"score":64,"maxScore":100,"duration":300,"timestamp":0,"metrics":{},"level":"Competent"}"#;
    let parsed: PhaseResult = serde_json::from_str(json).unwrap();
    assert!(!parsed.generated);
    assert_eq!(parsed.score, 64);
}

#[test]
fn test_memory_store_round_trip() {
    let mut store = MemoryStore::new();
    assert!(store.load(Phase::Intake).is_none());

    let outcome = store.save(Phase::Intake, &result(1, 82));
    assert!(outcome.success);
    assert!(outcome.timestamp.is_some());

    let loaded = store.load(Phase::Intake).expect("load failed");
    assert_eq!(loaded.score, 82);
    assert_eq!(loaded.metrics.get("empathy"), Some(&20.0));

    assert!(store.clear(Phase::Intake));
    assert!(store.load(Phase::Intake).is_none());
}

#[test]
fn test_file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonFileStore::new(dir.path());

    let outcome = store.save(Phase::Planning, &result(2, 67));
    assert!(outcome.success);
    assert!(dir.path().join("saasi_phase2_results.json").exists());

    let loaded = store.load(Phase::Planning).expect("load failed");
    assert_eq!(loaded.score, 67);
    assert_eq!(loaded.level, "Strong");
}

#[test]
fn test_file_store_overwrites_on_retry() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonFileStore::new(dir.path());
    store.save(Phase::Intake, &result(1, 40));
    store.save(Phase::Intake, &result(1, 75));
    assert_eq!(store.load(Phase::Intake).unwrap().score, 75);
}

#[test]
fn test_file_store_corrupt_json_degrades_to_none() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonFileStore::new(dir.path());
    store.save(Phase::Intake, &result(1, 80));
    fs::write(dir.path().join("saasi_phase1_results.json"), "{not json").unwrap();
    assert!(store.load(Phase::Intake).is_none());
}

#[test]
fn test_file_store_unwritable_reports_failure() {
    // A directory path routed through an existing file cannot be created.
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "occupied").unwrap();

    let mut store = JsonFileStore::new(blocker.join("session"));
    let outcome = store.save(Phase::Intake, &result(1, 80));
    assert!(!outcome.success);
    assert!(outcome.error.is_some());
}

#[test]
fn test_history_collects_saved_phases() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonFileStore::new(dir.path());
    store.save(Phase::Intake, &result(1, 80));
    store.save(Phase::Crisis, &result(3, 70));

    let history = store.history();
    assert_eq!(history.completed(), 2);
    assert_eq!(history.get(Phase::Intake).unwrap().score, 80);
    assert!(history.get(Phase::Planning).is_none());
}
