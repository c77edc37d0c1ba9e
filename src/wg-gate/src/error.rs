//! Error types for tunnel gate operations.
//!
//! All gate operations return [`Result<T>`] which wraps [`GateError`].

use thiserror::Error;

/// Error type for all fatal gate failures.
///
/// Each variant maps to one terminal failure kind of the run. Per-attempt
/// probe failures are not represented here: they are absorbed by the retry
/// loop and never escape it.
///
/// # Example
///
/// ```no_run
/// use wg_gate::{GateConfig, GateError};
/// use wg_gate::client::resolve_client_path;
///
/// match resolve_client_path(&GateConfig::default()) {
///     Ok(path) => println!("client config at {:?}", path),
///     Err(GateError::Config(msg)) => println!("bad inputs: {msg}"),
///     Err(e) => println!("other error: {e}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum GateError {
    /// Missing or contradictory configuration inputs
    #[error("configuration error: {0}")]
    Config(String),

    /// Writing the decoded client config to disk failed
    #[error("error during write for WireGuard client from base64: {0}")]
    CredentialWrite(String),

    /// The external tunnel bring-up command failed
    #[error("tunnel bring-up failed: {0}")]
    Bringup(String),

    /// No probe succeeded before the deadline
    #[error("timeout reached without a successful connection to {address} after {timeout_seconds} seconds")]
    Timeout {
        address: String,
        timeout_seconds: i64,
    },
}

/// Result type alias for gate operations.
pub type Result<T> = std::result::Result<T, GateError>;
