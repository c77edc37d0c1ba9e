//! WireGuard client config resolution
//!
//! A client config arrives either as a path to an existing file or as a
//! base64 blob that gets materialized under a well-known path. The literal
//! path always wins; the blob is only consulted when no path is given.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::GateConfig;
use crate::error::{GateError, Result};

/// File path for a base64-supplied client config
pub const CLIENT_CONFIG_PATH: &str = "/tmp/wg.conf";

/// Resolve the path to the WireGuard client config file.
///
/// Empty input strings count as unset, so a blank `--wg-client` does not
/// shadow a base64 blob.
pub fn resolve_client_path(config: &GateConfig) -> Result<PathBuf> {
    if let Some(path) = &config.wg_client {
        if !path.as_os_str().is_empty() {
            debug!(path = %path.display(), "Using client config path from inputs");
            return Ok(path.clone());
        }
    }

    if let Some(encoded) = &config.wg_client_b64 {
        if !encoded.is_empty() {
            return write_client_config(encoded);
        }
    }

    Err(GateError::Config(
        "no WireGuard client specified: set either --wg-client or --wg-client-b64".into(),
    ))
}

/// Decode a base64 client config and write it to [`CLIENT_CONFIG_PATH`].
pub fn write_client_config(encoded: &str) -> Result<PathBuf> {
    write_client_config_to(encoded, Path::new(CLIENT_CONFIG_PATH))
}

/// Decode a base64 client config and write it to `path`, creating the
/// parent directory as needed.
///
/// The write overwrites any previous content, so repeated runs with the same
/// blob are idempotent. Invalid UTF-8 in the decoded bytes is replaced
/// rather than rejected.
pub fn write_client_config_to(encoded: &str, path: &Path) -> Result<PathBuf> {
    let decoded = STANDARD
        .decode(encoded.trim())
        .map_err(|e| GateError::CredentialWrite(e.to_string()))?;
    let content = String::from_utf8_lossy(&decoded);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| GateError::CredentialWrite(e.to_string()))?;
    }
    std::fs::write(path, content.as_bytes())
        .map_err(|e| GateError::CredentialWrite(e.to_string()))?;

    info!(path = %path.display(), "Wrote client config from base64 input");
    Ok(path.to_path_buf())
}
