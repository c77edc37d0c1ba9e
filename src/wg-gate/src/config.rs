//! Gate configuration management
//!
//! Configuration can be loaded from:
//! 1. Config file (./config/wg-gate.json or ~/.wg-gate/config.json)
//! 2. Environment variables (WG_GATE_*)
//! 3. CLI arguments (highest priority)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Tunnel gate configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// Path to an existing WireGuard client config
    #[serde(default)]
    pub wg_client: Option<PathBuf>,
    /// Base64-encoded WireGuard client config; ignored when `wg_client` is set
    #[serde(default)]
    pub wg_client_b64: Option<String>,
    /// File where tunnel bring-up output is captured
    #[serde(default = "default_log_filepath")]
    pub log_filepath: PathBuf,
    /// Copy the captured log here when the run finishes
    #[serde(default)]
    pub log_save_as: Option<PathBuf>,
    /// Address that must answer probes before the gate opens
    #[serde(default)]
    pub timeout_address: String,
    /// Probe deadline in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: i64,
}

fn default_log_filepath() -> PathBuf {
    PathBuf::from("/tmp/wg.log")
}
pub(crate) fn default_timeout_seconds() -> i64 {
    180
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            wg_client: None,
            wg_client_b64: None,
            log_filepath: default_log_filepath(),
            log_save_as: None,
            timeout_address: String::new(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl GateConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let mut config = Self::default();

        // Try loading from config file
        let config_paths = [
            config_path.cloned(),
            Some(PathBuf::from("config/wg-gate.json")),
            dirs::home_dir().map(|h| h.join(".wg-gate/config.json")),
        ];

        for path in config_paths.into_iter().flatten() {
            if path.exists() {
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading config from {:?}", path))?;
                config = serde_json::from_str(&content)
                    .with_context(|| format!("parsing config from {:?}", path))?;
                tracing::info!(?path, "Loaded config from file");
                break;
            }
        }

        // Override with environment variables
        if let Ok(client) = std::env::var("WG_GATE_CLIENT") {
            config.wg_client = Some(PathBuf::from(client));
        }
        if let Ok(encoded) = std::env::var("WG_GATE_CLIENT_B64") {
            config.wg_client_b64 = Some(encoded);
        }
        if let Ok(address) = std::env::var("WG_GATE_ADDRESS") {
            config.timeout_address = address;
        }
        if let Ok(timeout) = std::env::var("WG_GATE_TIMEOUT_SECONDS") {
            config.timeout_seconds = timeout.parse().unwrap_or(default_timeout_seconds());
        }
        if let Ok(path) = std::env::var("WG_GATE_LOG_FILEPATH") {
            config.log_filepath = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("WG_GATE_LOG_SAVE_AS") {
            config.log_save_as = Some(PathBuf::from(path));
        }

        Ok(config)
    }

    /// Validate configuration
    ///
    /// A non-positive timeout is not rejected here: it reaches the prober,
    /// which fails immediately with the timeout error.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_address.is_empty() {
            anyhow::bail!("Probe address is required. Set via --timeout-address or WG_GATE_ADDRESS");
        }
        Ok(())
    }

    /// Create sample config file
    pub fn create_sample(path: &PathBuf) -> Result<()> {
        let sample = Self {
            wg_client: Some(PathBuf::from("/etc/wireguard/wg0.conf")),
            timeout_address: "10.8.0.1".into(),
            ..Default::default()
        };

        let content = serde_json::to_string_pretty(&sample)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}
