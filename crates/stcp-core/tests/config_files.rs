//! Loading detector configurations from files.

use std::fs;
use std::path::Path;

use stcp_core::{load_detector, AnyEProcess, DetectorConfig, EProcess, Rule, StcpError};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn toml_file_by_extension() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "detector.toml",
        r#"
kind = "likelihood_ratio"
rule = "sr"
threshold = 3.5

[model]
family = "bernoulli"
p = 0.2
q = 0.6
"#,
    );
    let det = load_detector(&path).unwrap();
    assert_eq!(det.threshold(), 3.5);
    match det.e_process() {
        AnyEProcess::LikelihoodRatio(e) => assert_eq!(e.rule(), Rule::Sr),
        other => panic!("unexpected e-process {other:?}"),
    }
}

#[test]
fn json_file_by_extension() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "detector.json",
        r#"{ "kind": "glr", "window_size": 25, "model": { "family": "normal", "sigma": 2.0 } }"#,
    );
    let mut det = load_detector(&path).unwrap();
    det.update_many(&[0.0, 1.0, 2.0]).unwrap();
    assert_eq!(det.e_process().name(), "glr_cu");
    assert_eq!(det.time(), 3.0);
}

#[test]
fn missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = DetectorConfig::from_file(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, StcpError::Io { .. }));
    assert_eq!(err.code(), 40);
}

#[test]
fn malformed_toml_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "broken.toml", "kind = \"mixture\"\nlambdas = [0.5,");
    let err = load_detector(&path).unwrap_err();
    assert!(matches!(err, StcpError::Parse { ref format, .. } if format == "toml"));
}

#[test]
fn semantically_invalid_file_fails_build() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "weights.json",
        r#"{
            "kind": "mixture",
            "model": { "family": "bernoulli", "p": 0.5 },
            "lambdas": [0.5, 1.0, 2.0],
            "weights": [0.5, 0.3, 0.3]
        }"#,
    );
    // Parses fine; the weights fail at build time.
    assert!(DetectorConfig::from_file(&path).is_ok());
    let err = load_detector(&path).unwrap_err();
    assert!(matches!(err, StcpError::InvalidParameter { .. }));
}

#[test]
fn saved_config_reloads() {
    let dir = TempDir::new().unwrap();
    let cfg = DetectorConfig::from_json_str(
        r#"{ "kind": "mixture", "rule": "cu", "model": { "family": "normal", "mu": 1.0 }, "lambdas": [0.5], "alpha": 0.1 }"#,
    )
    .unwrap();
    let path = dir.path().join("saved.json");
    fs::write(&path, cfg.to_json().unwrap()).unwrap();
    assert_eq!(DetectorConfig::from_file(Path::new(&path)).unwrap(), cfg);
}
