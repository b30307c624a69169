use chrono::Local;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::process::Command;
use tracing::{info, warn};

use crate::config::Config;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("powercfg.exe not found")]
    ToolNotFound,
    #[error("powercfg failed: {0}")]
    ToolFailed(String),
    #[error("battery report file was not created: {}", .0.display())]
    OutputMissing(PathBuf),
    #[error("a report generation is already in flight")]
    AlreadyRunning,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Wraps the external report tool. Generation is fatal-per-attempt on any
/// failure; at most one generation runs at a time, an overlapping request
/// is refused rather than queued.
pub struct ReportGenerator {
    config: Arc<Config>,
    in_flight: tokio::sync::Mutex<()>,
}

impl ReportGenerator {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            in_flight: tokio::sync::Mutex::new(()),
        }
    }

    /// Run the tool with a timestamped output path and return the path plus
    /// the raw markup it produced.
    pub async fn generate(&self) -> Result<(PathBuf, String), GenerateError> {
        let _guard = match self.in_flight.try_lock() {
            Ok(guard) => guard,
            Err(_) => {
                warn!("Report generation already in flight, ignoring request");
                return Err(GenerateError::AlreadyRunning);
            }
        };

        if !self.config.powercfg.is_file() {
            return Err(GenerateError::ToolNotFound);
        }

        tokio::fs::create_dir_all(&self.config.reports_dir).await?;
        let ts = Local::now().format("%Y%m%d_%H%M%S");
        let out_path = self
            .config
            .reports_dir
            .join(format!("battery_report_{}.html", ts));

        info!("Running {} /batteryreport", self.config.powercfg.display());
        let output = Command::new(&self.config.powercfg)
            .arg("/batteryreport")
            .arg("/output")
            .arg(&out_path)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let reason = if stderr.is_empty() {
                format!("exit status {}", output.status)
            } else {
                stderr
            };
            return Err(GenerateError::ToolFailed(reason));
        }

        let bytes = match tokio::fs::read(&out_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(GenerateError::OutputMissing(out_path));
            }
            Err(e) => return Err(e.into()),
        };
        // powercfg emits UTF-8 on current builds; older ones used a legacy
        // 8-bit codepage, handled here as a lossy decode.
        let html = match String::from_utf8(bytes) {
            Ok(s) => s,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        };

        info!("Battery report written to {}", out_path.display());
        Ok((out_path, html))
    }
}
