use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use gp_calc::{CycleSummary, NodeSummary, SectionForceTable};
use gp_report::*;

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    dir
}

fn manifest(run_id: &str, timestamp: &str) -> RunManifest {
    RunManifest {
        run_id: run_id.to_string(),
        name: "head_gasket".to_string(),
        timestamp: timestamp.to_string(),
        engine_version: "0.1.0".to_string(),
        step_count: 3,
        element_count: 1,
        node_count: 4,
        failures: 1,
        warnings: 0,
    }
}

fn report() -> RunReport {
    RunReport {
        name: "head_gasket".to_string(),
        steps: vec!["BOLT".into(), "HOT".into(), "FIRE1".into()],
        cycles: vec!["FIRE1".into()],
        criteria: vec!["GOODMAN".into()],
        summaries: vec![NodeSummary {
            element: 1,
            node: 10,
            assembly_line_load: 120.0,
            hot_line_load: 110.0,
            thermal_motion: Some(4.0),
            cycles: vec![CycleSummary {
                cycle: 0,
                name: "FIRE1".into(),
                line_load_max: 110.0,
                line_load_min: 90.0,
                line_load_range: 20.0,
                head_lift_um: 2.0,
                safety: vec![1.5],
                wear: 0.25,
            }],
            wear: 0.25,
        }],
        section_forces: Some(SectionForceTable {
            sets: vec!["BEAD".into()],
            steps: vec!["BOLT".into()],
            values: vec![vec![5000.0]],
        }),
        ..Default::default()
    }
}

#[test]
fn save_list_load_roundtrip() {
    let root = unique_temp_dir("gp_report_store");
    let store = ReportStore::new(root.clone()).expect("failed to create store");

    let mut log = RunLog::new();
    log.succeed("Reading model");
    log.failed("Set BROKEN");

    let m = manifest("run-1", "2026-03-01T10:00:00+00:00");
    let dir = store.save_run(&m, &report(), &log).expect("failed to save run");

    assert!(store.has_run("run-1"));
    assert!(dir.join("report.txt").exists());
    let log_text = fs::read_to_string(dir.join("head_gasket_postprocess.log")).unwrap();
    assert!(log_text.contains("Set BROKEN"));
    assert!(log_text.contains("Failed"));

    let loaded = store.load_manifest("run-1").expect("failed to load manifest");
    assert_eq!(loaded, m);
    let loaded = store.load_report("run-1").expect("failed to load report");
    assert_eq!(loaded, report());

    let text = fs::read_to_string(dir.join("report.txt")).unwrap();
    assert!(text.contains("SECTION FORCE"));
    assert!(text.contains("5000.0"));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn list_runs_filters_by_name_and_sorts_newest_first() {
    let root = unique_temp_dir("gp_report_list");
    let store = ReportStore::new(root.clone()).unwrap();
    let log = RunLog::new();

    store
        .save_run(&manifest("old", "2026-03-01T10:00:00+00:00"), &report(), &log)
        .unwrap();
    store
        .save_run(&manifest("new", "2026-03-02T10:00:00+00:00"), &report(), &log)
        .unwrap();
    let mut other = manifest("other", "2026-03-03T10:00:00+00:00");
    other.name = "intake".to_string();
    store.save_run(&other, &report(), &log).unwrap();

    let runs = store.list_runs("head_gasket").unwrap();
    let ids: Vec<&str> = runs.iter().map(|m| m.run_id.as_str()).collect();
    assert_eq!(ids, vec!["new", "old"]);

    store.delete_run("old").unwrap();
    assert!(!store.has_run("old"));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn missing_run_is_reported() {
    let root = unique_temp_dir("gp_report_missing");
    let store = ReportStore::new(root.clone()).unwrap();
    match store.load_manifest("nope") {
        Err(ReportError::RunNotFound { run_id }) => assert_eq!(run_id, "nope"),
        other => panic!("expected RunNotFound, got {other:?}"),
    }
    let _ = fs::remove_dir_all(&root);
}
