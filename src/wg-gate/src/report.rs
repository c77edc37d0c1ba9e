//! Run report generation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Outcome of one stage of the run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageResult {
    pub name: String,
    pub passed: bool,
    pub duration_ms: u64,
    pub details: Option<String>,
    pub metrics: Option<serde_json::Value>,
    pub error: Option<String>,
}

impl StageResult {
    pub fn success(name: &str, duration_ms: u64, details: &str) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            duration_ms,
            details: Some(details.to_string()),
            metrics: None,
            error: None,
        }
    }

    pub fn failure(name: &str, duration_ms: u64, error: &str) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            duration_ms,
            details: None,
            metrics: None,
            error: Some(error.to_string()),
        }
    }
}

/// Complete report for one tunnel gate run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub timestamp: DateTime<Utc>,
    pub address: String,
    pub timeout_seconds: i64,
    pub total_duration_ms: u64,
    pub stages_passed: usize,
    pub stages_failed: usize,
    pub stages: Vec<StageResult>,
}

impl RunReport {
    pub fn new(address: String, timeout_seconds: i64) -> Self {
        Self {
            timestamp: Utc::now(),
            address,
            timeout_seconds,
            total_duration_ms: 0,
            stages_passed: 0,
            stages_failed: 0,
            stages: Vec::new(),
        }
    }

    pub fn add_stage(&mut self, result: StageResult) {
        if result.passed {
            self.stages_passed += 1;
        } else {
            self.stages_failed += 1;
        }
        self.total_duration_ms += result.duration_ms;
        self.stages.push(result);
    }

    pub fn succeeded(&self) -> bool {
        self.stages_failed == 0
    }

    /// Save report as JSON
    pub fn save_json(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Print summary to console
    pub fn print_summary(&self) {
        use colored::Colorize;

        println!("\n{}", "═".repeat(60).blue());
        println!("{}", " WireGuard Gate Report ".bold().blue());
        println!("{}", "═".repeat(60).blue());

        println!("\nTarget: {}", self.address.cyan());
        println!("Timeout: {}s", self.timeout_seconds);
        println!("Duration: {}ms", self.total_duration_ms);

        println!("\n{}", "─".repeat(60));
        println!("{}", " Stages ".bold());
        println!("{}", "─".repeat(60));

        for stage in &self.stages {
            let status = if stage.passed {
                "PASS".green()
            } else {
                "FAIL".red()
            };
            let details = stage.details.as_deref().unwrap_or("");
            println!("  [{}] {} - {}", status, stage.name, details.dimmed());

            if let Some(error) = &stage.error {
                println!("       Error: {}", error.red());
            }
        }

        println!("\n{}", "─".repeat(60));

        if self.succeeded() {
            println!(
                "{} {}/{}",
                "GATE OPEN".green().bold(),
                self.stages_passed,
                self.stages_passed + self.stages_failed
            );
        } else {
            println!(
                "{} Passed: {}, Failed: {}",
                "GATE CLOSED".red().bold(),
                self.stages_passed,
                self.stages_failed
            );
        }

        println!("{}\n", "═".repeat(60).blue());
    }
}
