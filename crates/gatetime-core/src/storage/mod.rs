mod config;

pub use config::{CheckpointConfig, ClampMode, Config, DisplayConfig};

use std::path::PathBuf;

/// Returns the Gatetime data directory, creating it if needed.
///
/// `GATETIME_HOME` overrides the location outright. Otherwise it is
/// `~/.config/gatetime[-dev]/`, with `GATETIME_ENV=dev` selecting the
/// development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let dir = match std::env::var_os("GATETIME_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("GATETIME_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("gatetime-dev")
            } else {
                base_dir.join("gatetime")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
