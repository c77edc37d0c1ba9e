//! Unit tests for client config resolution
use std::path::PathBuf;
use wg_gate::client::{
    resolve_client_path, write_client_config, write_client_config_to, CLIENT_CONFIG_PATH,
};
use wg_gate::{GateConfig, GateError};

#[test]
fn literal_path_wins_over_blob() {
    let mut cfg = GateConfig::default();
    cfg.wg_client = Some(PathBuf::from("a"));
    cfg.wg_client_b64 = Some("Yg==".into());

    let path = resolve_client_path(&cfg).unwrap();
    assert_eq!(path, PathBuf::from("a"));
}

#[test]
fn no_client_inputs_is_a_config_error() {
    let cfg = GateConfig::default();
    let err = resolve_client_path(&cfg).unwrap_err();
    assert!(matches!(err, GateError::Config(_)));
}

#[test]
fn empty_inputs_count_as_unset() {
    let mut cfg = GateConfig::default();
    cfg.wg_client = Some(PathBuf::new());
    cfg.wg_client_b64 = Some(String::new());

    let err = resolve_client_path(&cfg).unwrap_err();
    assert!(matches!(err, GateError::Config(_)));
}

#[test]
fn invalid_base64_is_a_write_error() {
    let err = write_client_config("!!not base64!!").unwrap_err();
    assert!(matches!(err, GateError::CredentialWrite(_)));
}

#[test]
fn blob_is_materialized_with_overwrite_semantics() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("etc/wg.conf");

    // base64 of "peer config"; the parent directory is created on demand
    let path = write_client_config_to("cGVlciBjb25maWc=", &target).unwrap();
    assert_eq!(path, target);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "peer config");

    // same blob again: identical content, not appended
    write_client_config_to("cGVlciBjb25maWc=", &target).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "peer config");

    // a shorter blob replaces the previous content entirely
    write_client_config_to("Yg==", &target).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "b");
}

#[test]
fn blob_lands_at_the_well_known_path() {
    let path = write_client_config("Yg==").unwrap();
    assert_eq!(path, PathBuf::from(CLIENT_CONFIG_PATH));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "b");
}
