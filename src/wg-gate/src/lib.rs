//! WireGuard Tunnel Gate
//!
//! This crate brings up a WireGuard tunnel and blocks until a target
//! address becomes reachable:
//! - Client config resolution (literal path or base64 blob)
//! - Tunnel bring-up via wg-quick
//! - Bounded-retry reachability probing
//! - Report generation

pub mod bringup;
pub mod client;
pub mod config;
pub mod error;
pub mod gate;
pub mod probe;
pub mod report;

pub use config::GateConfig;
pub use error::{GateError, Result};
pub use gate::run_gate;
pub use probe::{probe_until_successful, Pinger, ProbeOutcome, SystemPinger};
pub use report::{RunReport, StageResult};
