//! Tests for the `run` subcommand on inputs that never reach the network.

use std::io::Write;

use mlac_cli::run::{run_run, RunArgs};

fn error_lines(path: &std::path::Path) -> Vec<serde_json::Value> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[test]
fn bad_messages_become_error_records() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("messages.jsonl");
    let errors = dir.path().join("errors.jsonl");

    let mut f = std::fs::File::create(&input).unwrap();
    writeln!(f, r#"{{"attributes": {{"artifact": {{"name": "no-id"}}}}}}"#).unwrap();
    writeln!(f).unwrap();
    writeln!(f, "not json").unwrap();
    drop(f);

    let args = RunArgs {
        input: Some(input),
        params: vec![
            ("apiVersion".into(), "v1".into()),
            ("processName".into(), "cli-test".into()),
        ],
        env_params: false,
        errors: Some(errors.clone()),
    };

    assert_eq!(run_run(&args).unwrap(), 0);

    let records = error_lines(&errors);
    assert_eq!(records.len(), 2);
    for record in &records {
        assert_eq!(record["operation"], "incoming message");
        assert_eq!(record["stage"], "InArtifact");
        assert_eq!(record["processName"], "cli-test");
        assert_eq!(record["operatorName"], "ArtifactConsumer");
    }
}

#[test]
fn unsupported_api_version_is_reported_at_setup() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.jsonl");
    std::fs::File::create(&input).unwrap();
    let errors = dir.path().join("errors.jsonl");

    let args = RunArgs {
        input: Some(input),
        params: vec![("apiVersion".into(), "v2".into())],
        env_params: false,
        errors: Some(errors.clone()),
    };

    assert_eq!(run_run(&args).unwrap(), 0);

    let records = error_lines(&errors);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["operation"], "MandatoryParameters");
    assert_eq!(records[0]["stage"], "Setup");
}

#[test]
fn missing_input_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let args = RunArgs {
        input: Some(dir.path().join("absent.jsonl")),
        params: vec![],
        env_params: false,
        errors: Some(dir.path().join("errors.jsonl")),
    };
    assert!(run_run(&args).is_err());
}
