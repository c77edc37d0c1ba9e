//! Stage orchestration for a full gate run

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::{Duration, Instant};

use crate::bringup;
use crate::client;
use crate::config::GateConfig;
use crate::probe::{probe_until_successful, SystemPinger};
use crate::report::{RunReport, StageResult};

/// Walk the run stages in order, recording one result per stage.
///
/// A failed stage short-circuits the rest of the run; the report carries
/// the failing stage's error.
pub async fn run_gate(config: &GateConfig) -> RunReport {
    let mut report = RunReport::new(config.timeout_address.clone(), config.timeout_seconds);

    // Resolve the client config path (materializes the base64 blob if used)
    let start = Instant::now();
    let client_path = match client::resolve_client_path(config) {
        Ok(path) => {
            report.add_stage(StageResult::success(
                "resolve-client",
                start.elapsed().as_millis() as u64,
                &path.display().to_string(),
            ));
            path
        }
        Err(err) => {
            report.add_stage(StageResult::failure(
                "resolve-client",
                start.elapsed().as_millis() as u64,
                &err.to_string(),
            ));
            return report;
        }
    };

    // Bring the tunnel up; the command log is captured before the exit
    // status is judged
    let pb = progress_spinner("Bringing up WireGuard tunnel...");
    let start = Instant::now();
    let up = match bringup::bring_up(&client_path).await {
        Ok(out) => {
            write_tunnel_log(&config.log_filepath, &out.combined());
            out.check()
        }
        Err(err) => {
            write_tunnel_log(&config.log_filepath, &err.to_string());
            Err(err)
        }
    };
    match up {
        Ok(()) => {
            pb.finish_with_message("Tunnel up");
            report.add_stage(StageResult::success(
                "tunnel-up",
                start.elapsed().as_millis() as u64,
                "wg-quick up succeeded",
            ));
        }
        Err(err) => {
            pb.finish_with_message("Tunnel bring-up failed!");
            report.add_stage(StageResult::failure(
                "tunnel-up",
                start.elapsed().as_millis() as u64,
                &err.to_string(),
            ));
            save_log_copy(config);
            return report;
        }
    }

    // Wait for the target to answer
    let pb = progress_spinner(&format!(
        "Waiting for {} to answer...",
        config.timeout_address
    ));
    let start = Instant::now();
    match probe_until_successful(&SystemPinger, &config.timeout_address, config.timeout_seconds)
        .await
    {
        Ok(outcome) => {
            pb.finish_with_message("Target reachable");
            let details = match outcome.rtt_ms {
                Some(rtt) => format!("{} answered (rtt {:.2}ms)", config.timeout_address, rtt),
                None => format!("{} answered", config.timeout_address),
            };
            let mut stage =
                StageResult::success("probe", start.elapsed().as_millis() as u64, &details);
            stage.metrics = serde_json::to_value(&outcome).ok();
            report.add_stage(stage);
        }
        Err(err) => {
            pb.finish_with_message("Target unreachable!");
            report.add_stage(StageResult::failure(
                "probe",
                start.elapsed().as_millis() as u64,
                &err.to_string(),
            ));
        }
    }

    save_log_copy(config);
    report
}

/// Capture tunnel bring-up output for later inspection.
///
/// Best-effort: a log write failure never fails the run.
fn write_tunnel_log(path: &Path, content: &str) {
    if let Err(err) = std::fs::write(path, content) {
        tracing::warn!(?path, error = %err, "Failed to write tunnel log");
    }
}

/// Copy the captured log to the configured destination, if any
fn save_log_copy(config: &GateConfig) {
    if let Some(dest) = &config.log_save_as {
        if let Err(err) = std::fs::copy(&config.log_filepath, dest) {
            tracing::warn!(?dest, error = %err, "Failed to copy tunnel log");
        }
    }
}

fn progress_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.blue} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
