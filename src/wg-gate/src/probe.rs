//! Target reachability probing
//!
//! The prober repeatedly checks a single address until it answers or a
//! wall-clock deadline passes. The deadline is computed once at entry;
//! individual attempts are strictly sequential with a fixed delay between
//! them, and per-attempt failures are absorbed, never propagated.

use async_trait::async_trait;
use serde::Serialize;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::error::{GateError, Result};

/// Delay between reachability attempts
const RETRY_DELAY_MS: u64 = 250;

/// Per-packet reply wait passed to ping, in seconds
const PING_REPLY_WAIT_SECS: u64 = 5;

/// Result of a single reachability attempt
#[derive(Debug, Clone, Serialize)]
pub struct ProbeOutcome {
    /// Whether the target answered
    pub alive: bool,
    /// Round-trip time when the target answered
    pub rtt_ms: Option<f64>,
    /// Raw probe output for diagnostics
    pub output: String,
}

/// A single reachability check against a target address.
///
/// Implementations may take a real network round trip and may fail with a
/// transport-level error; the retry loop treats an error the same as a
/// not-alive response.
#[async_trait]
pub trait Pinger: Send + Sync {
    async fn probe(&self, address: &str) -> anyhow::Result<ProbeOutcome>;
}

/// Pinger that shells out to the system `ping`.
///
/// One echo request per attempt; a non-zero exit means the target did not
/// answer, a spawn failure is a transport error. The `-W` reply wait bounds
/// how long a single attempt can block.
pub struct SystemPinger;

#[async_trait]
impl Pinger for SystemPinger {
    async fn probe(&self, address: &str) -> anyhow::Result<ProbeOutcome> {
        use anyhow::Context;

        let output = Command::new("ping")
            .args(["-c", "1", "-W", &PING_REPLY_WAIT_SECS.to_string()])
            .arg(address)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .context("running ping")?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        Ok(ProbeOutcome {
            alive: output.status.success(),
            rtt_ms: parse_ping_rtt(&stdout),
            output: stdout,
        })
    }
}

/// Probe `address` until it answers or the deadline passes.
///
/// The deadline is `now + timeout_seconds`, fixed at entry; a zero or
/// negative timeout means the loop body never runs and the call fails
/// immediately, while an oversized timeout waits indefinitely. The deadline
/// is only checked between attempts, so an attempt already in flight when it
/// passes is allowed to complete.
pub async fn probe_until_successful(
    pinger: &dyn Pinger,
    address: &str,
    timeout_seconds: i64,
) -> Result<ProbeOutcome> {
    // Elapsed-vs-window comparison; adding an oversized timeout to an
    // Instant would overflow.
    let window = Duration::from_secs(timeout_seconds.max(0) as u64);
    let start = Instant::now();
    let mut attempt = 0u32;

    while start.elapsed() < window {
        attempt += 1;
        match pinger.probe(address).await {
            Ok(outcome) if outcome.alive => {
                info!(
                    address = %address,
                    attempt,
                    rtt_ms = ?outcome.rtt_ms,
                    "Connection to target confirmed"
                );
                return Ok(outcome);
            }
            Ok(_) => {
                debug!(address = %address, attempt, "Target not reachable yet");
            }
            Err(err) => {
                warn!(address = %address, attempt, error = %err, "Probe failed but retrying");
            }
        }

        sleep(Duration::from_millis(RETRY_DELAY_MS)).await;
    }

    Err(GateError::Timeout {
        address: address.to_string(),
        timeout_seconds,
    })
}

/// Parse the average RTT from ping output
fn parse_ping_rtt(output: &str) -> Option<f64> {
    // "rtt min/avg/max/mdev = 0.045/0.045/0.045/0.000 ms"
    for line in output.lines() {
        if line.contains("rtt") || line.contains("round-trip") {
            if let Some(stats) = line.split('=').nth(1) {
                let parts: Vec<&str> = stats.trim().split('/').collect();
                if parts.len() >= 2 {
                    return parts[1].trim().parse().ok();
                }
            }
        }
    }
    None
}
