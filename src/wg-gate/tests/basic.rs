use async_trait::async_trait;
use wg_gate::{probe_until_successful, GateConfig, Pinger, ProbeOutcome};

#[test]
fn config_defaults_are_safe() {
    let cfg = GateConfig::default();
    // sensible defaults
    assert_eq!(cfg.log_filepath, std::path::PathBuf::from("/tmp/wg.log"));
    assert_eq!(cfg.timeout_seconds, 180);
    assert!(cfg.wg_client.is_none());
    assert!(cfg.wg_client_b64.is_none());
    assert!(cfg.log_save_as.is_none());
}

#[test]
fn config_requires_probe_address() {
    let mut cfg = GateConfig::default();
    assert!(cfg.validate().is_err());

    cfg.timeout_address = "10.8.0.1".into();
    assert!(cfg.validate().is_ok());
}

#[test]
fn config_accepts_non_positive_timeout() {
    // a zero timeout is the prober's concern, not a validation error
    let mut cfg = GateConfig::default();
    cfg.timeout_address = "10.8.0.1".into();
    cfg.timeout_seconds = 0;
    assert!(cfg.validate().is_ok());
}

#[test]
fn partial_config_file_fills_defaults() {
    let cfg: GateConfig = serde_json::from_str(r#"{"timeout_address": "10.0.0.1"}"#).unwrap();
    assert_eq!(cfg.timeout_address, "10.0.0.1");
    assert_eq!(cfg.timeout_seconds, 180);
    assert_eq!(cfg.log_filepath, std::path::PathBuf::from("/tmp/wg.log"));
}

struct AlwaysUp;

#[async_trait]
impl Pinger for AlwaysUp {
    async fn probe(&self, _address: &str) -> anyhow::Result<ProbeOutcome> {
        Ok(ProbeOutcome {
            alive: true,
            rtt_ms: Some(1.0),
            output: String::new(),
        })
    }
}

#[tokio::test]
async fn gate_opens_on_first_answer() {
    let outcome = probe_until_successful(&AlwaysUp, "10.8.0.1", 5)
        .await
        .unwrap();
    assert!(outcome.alive);
}

#[tokio::test]
async fn failed_stage_short_circuits_the_run() {
    // no client inputs: the first stage fails and nothing after it runs
    let report = wg_gate::run_gate(&GateConfig::default()).await;

    assert!(!report.succeeded());
    assert_eq!(report.stages.len(), 1);
    assert_eq!(report.stages[0].name, "resolve-client");
    assert!(!report.stages[0].passed);
    assert!(report.stages[0].error.is_some());
}
