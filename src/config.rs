use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::HISTORY_CAP;

/// Process configuration, resolved once at startup and immutable after.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Full path to powercfg.exe. The 64-bit binary under Sysnative is
    /// preferred when the process runs under WOW64 redirection.
    pub powercfg: PathBuf,
    /// Directory the generated HTML reports are written to.
    pub reports_dir: PathBuf,
    /// JSON file the report history is persisted in.
    pub history_path: PathBuf,
    /// Maximum number of history entries kept on save.
    pub history_cap: usize,
}

impl Config {
    pub fn load() -> Result<Self> {
        let base = data_dir()?;
        Ok(Config {
            powercfg: powercfg_path(),
            reports_dir: base.join("battery_reports"),
            history_path: base.join("battery_history.json"),
            history_cap: HISTORY_CAP,
        })
    }
}

/// Reports and history live next to the executable.
fn data_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    Ok(exe
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".")))
}

fn powercfg_path() -> PathBuf {
    let windir = std::env::var("SystemRoot").unwrap_or_else(|_| r"C:\Windows".to_string());
    let sysnative = PathBuf::from(&windir).join("Sysnative").join("powercfg.exe");
    if sysnative.is_file() {
        sysnative
    } else {
        PathBuf::from(&windir).join("System32").join("powercfg.exe")
    }
}
