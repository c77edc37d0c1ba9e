//! WireGuard Tunnel Gate
//!
//! Brings up a WireGuard tunnel via wg-quick, then waits until a target
//! address answers probes or a deadline passes.
//!
//! Usage:
//!   # Existing client config
//!   wg-gate --wg-client /etc/wireguard/wg0.conf --timeout-address 10.8.0.1
//!
//!   # Base64-encoded client config (materialized at /tmp/wg.conf)
//!   wg-gate --wg-client-b64 "$(base64 -w0 wg0.conf)" --timeout-address 10.8.0.1 --timeout-seconds 60
//!
//!   # Generate sample config
//!   wg-gate --init-config

mod bringup;
mod client;
mod config;
mod error;
mod gate;
mod probe;
mod report;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use config::GateConfig;

#[derive(Parser)]
#[command(name = "wg-gate")]
#[command(about = "Bring up a WireGuard tunnel and wait until a target address answers")]
#[command(version)]
struct Cli {
    /// Path to an existing WireGuard client config
    #[arg(long, env = "WG_GATE_CLIENT")]
    wg_client: Option<PathBuf>,

    /// Base64-encoded WireGuard client config (written to /tmp/wg.conf)
    #[arg(long, env = "WG_GATE_CLIENT_B64")]
    wg_client_b64: Option<String>,

    /// Address that must answer probes before the gate opens
    #[arg(long, env = "WG_GATE_ADDRESS")]
    timeout_address: Option<String>,

    /// Give up after this many seconds
    #[arg(
        long,
        env = "WG_GATE_TIMEOUT_SECONDS",
        value_parser = lenient_timeout_seconds
    )]
    timeout_seconds: Option<i64>,

    /// File where tunnel bring-up output is captured
    #[arg(long, env = "WG_GATE_LOG_FILEPATH")]
    log_filepath: Option<PathBuf>,

    /// Copy the captured log here when the run finishes
    #[arg(long, env = "WG_GATE_LOG_SAVE_AS")]
    log_save_as: Option<PathBuf>,

    /// Config file path
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Save a JSON run report here
    #[arg(long)]
    report: Option<PathBuf>,

    /// Verbose output
    #[arg(long, short)]
    verbose: bool,

    /// Initialize sample config file
    #[arg(long)]
    init_config: bool,
}

/// Malformed timeout values fall back to the default instead of aborting
/// argument parsing. Applies to the flag and its env fallback alike.
fn lenient_timeout_seconds(raw: &str) -> Result<i64, String> {
    Ok(raw.parse().unwrap_or_else(|_| config::default_timeout_seconds()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Handle init-config
    if cli.init_config {
        let path = PathBuf::from("config/wg-gate.json");
        GateConfig::create_sample(&path)?;
        println!("Sample config created at: {:?}", path);
        println!("Edit the file and run: wg-gate --config config/wg-gate.json");
        return Ok(());
    }

    // Load config
    let mut config = GateConfig::load(cli.config.as_ref())?;

    // Override with CLI args
    if let Some(client) = cli.wg_client {
        config.wg_client = Some(client);
    }
    if let Some(encoded) = cli.wg_client_b64 {
        config.wg_client_b64 = Some(encoded);
    }
    if let Some(address) = cli.timeout_address {
        config.timeout_address = address;
    }
    if let Some(timeout) = cli.timeout_seconds {
        config.timeout_seconds = timeout;
    }
    if let Some(path) = cli.log_filepath {
        config.log_filepath = path;
    }
    if let Some(path) = cli.log_save_as {
        config.log_save_as = Some(path);
    }

    config.validate()?;

    tracing::info!("Starting WireGuard connection process");

    let report = gate::run_gate(&config).await;
    report.print_summary();

    if let Some(path) = &cli.report {
        report.save_json(path)?;
        println!("JSON report: {:?}", path);
    }

    if !report.succeeded() {
        std::process::exit(1);
    }

    Ok(())
}
