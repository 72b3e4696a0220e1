use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const HEADER: &str = r#"{"collections":["offlineBeamSpot","slimmedMuons","prunedGenParticles","packedGenParticles","offlineSlimmedPrimaryVertices"]}"#;

const MATCHED_EVENT: &str = r#"{"truth_particles":[{"pdg_id":13,"charge":-1.0,"eta":0.52,"phi":1.0,"pt":25.0,"vx":1.0,"vy":1.0,"vz":1.0,"prompt_final_state":true,"last_copy":true}],"candidates":[{"standalone":{"eta":0.53,"phi":1.0,"pt":24.0,"charge":-1.0}}]}"#;

fn run_muana(args: &[&str]) -> Output {
    let binary_path = env!("CARGO_BIN_EXE_muana");
    Command::new(binary_path)
        .args(args)
        .output()
        .expect("command should run")
}

fn write_event_file(path: &Path, events: &[&str]) {
    let mut content = format!("{HEADER}\n");
    for event in events {
        content.push_str(event);
        content.push('\n');
    }
    fs::write(path, content).expect("event file should be written");
}

fn analyze_into(events_path: &Path, output_path: &Path) {
    let output = run_muana(&[
        "analyze",
        "--events",
        events_path.to_str().expect("path should be utf-8"),
        "--output",
        output_path.to_str().expect("path should be utf-8"),
    ]);
    assert!(
        output.status.success(),
        "analyze should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn analyze_command_writes_the_histogram_artifact() {
    let temp = TempDir::new().expect("tempdir should be created");
    let events_path = temp.path().join("events.jsonl");
    let output_path = temp.path().join("MyMuonPlots_noPU.json");

    write_event_file(&events_path, &[MATCHED_EVENT]);
    analyze_into(&events_path, &output_path);

    let parsed: Value = serde_json::from_str(
        &fs::read_to_string(&output_path).expect("artifact should be readable"),
    )
    .expect("artifact JSON should parse");
    assert_eq!(parsed["gen_pt"]["entries"], Value::from(1));
    assert_eq!(parsed["sta"]["delta_r"]["entries"], Value::from(1));
    assert_eq!(parsed["trk"]["delta_r"]["overflow"], Value::from(1.0));
}

#[test]
fn analyze_command_honors_the_configuration_file() {
    let temp = TempDir::new().expect("tempdir should be created");
    let events_path = temp.path().join("events.jsonl");
    let config_path = temp.path().join("config.json");
    let output_path = temp.path().join("set.json");

    write_event_file(&events_path, &[MATCHED_EVENT]);
    // The truth muon sits at pt 25, below this fiducial cut.
    fs::write(&config_path, r#"{"pt_bin_edges": [30.0, 60.0]}"#)
        .expect("config should be written");

    let output = run_muana(&[
        "analyze",
        "--events",
        events_path.to_str().expect("path should be utf-8"),
        "--config",
        config_path.to_str().expect("path should be utf-8"),
        "--output",
        output_path.to_str().expect("path should be utf-8"),
    ]);
    assert!(
        output.status.success(),
        "analyze should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let parsed: Value = serde_json::from_str(
        &fs::read_to_string(&output_path).expect("artifact should be readable"),
    )
    .expect("artifact JSON should parse");
    assert_eq!(parsed["gen_pt"]["entries"], Value::from(0));
    assert_eq!(parsed["pt_bin_edges"], serde_json::json!([30.0, 60.0]));
}

#[test]
fn analyze_command_rejects_a_file_without_required_collections() {
    let temp = TempDir::new().expect("tempdir should be created");
    let events_path = temp.path().join("events.jsonl");
    fs::write(&events_path, "{\"collections\":[\"offlineBeamSpot\"]}\n")
        .expect("event file should be written");

    let output = run_muana(&[
        "analyze",
        "--events",
        events_path.to_str().expect("path should be utf-8"),
        "--output",
        temp.path().join("set.json").to_str().expect("path should be utf-8"),
    ]);
    assert_eq!(
        output.status.code(),
        Some(2),
        "missing required collection should map to the configuration exit code"
    );
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("prunedGenParticles"),
        "stderr should name the missing collection"
    );
}

#[test]
fn report_command_writes_the_artifact_and_figures() {
    let temp = TempDir::new().expect("tempdir should be created");
    let events_path = temp.path().join("events.jsonl");
    let baseline_path = temp.path().join("set_noPU.json");
    let pileup_path = temp.path().join("set_PU200.json");
    let out_dir = temp.path().join("report");

    write_event_file(&events_path, &[MATCHED_EVENT]);
    analyze_into(&events_path, &baseline_path);
    analyze_into(&events_path, &pileup_path);

    let output = run_muana(&[
        "report",
        "--baseline",
        baseline_path.to_str().expect("path should be utf-8"),
        "--pileup",
        pileup_path.to_str().expect("path should be utf-8"),
        "--out-dir",
        out_dir.to_str().expect("path should be utf-8"),
    ]);
    assert!(
        output.status.success(),
        "report should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let report_path = out_dir.join("report.json");
    let parsed: Value = serde_json::from_str(
        &fs::read_to_string(&report_path).expect("report should be readable"),
    )
    .expect("report JSON should parse");
    assert_eq!(
        parsed["efficiencies"].as_array().map(Vec::len),
        Some(16),
        "every category and condition should carry both efficiency variables"
    );

    assert!(out_dir.join("Sta_eff_vr_noPU.svg").is_file());
    assert!(out_dir.join("StaMuons_dR_shapes.svg").is_file());
    assert!(out_dir.join("GenMuons_vr_shapes.svg").is_file());
    assert!(out_dir.join("GenStaMuons_eta.svg").is_file());
}

#[test]
fn report_command_rejects_a_zero_rebin_factor() {
    let temp = TempDir::new().expect("tempdir should be created");
    let output = run_muana(&[
        "report",
        "--baseline",
        temp.path().join("a.json").to_str().expect("path should be utf-8"),
        "--pileup",
        temp.path().join("b.json").to_str().expect("path should be utf-8"),
        "--rebin",
        "0",
    ]);
    assert_eq!(output.status.code(), Some(2), "usage errors exit with 2");
}

#[test]
fn unknown_subcommand_is_a_usage_error() {
    let output = run_muana(&["histogram"]);
    assert_eq!(output.status.code(), Some(2));
}
