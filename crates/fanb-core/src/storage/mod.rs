mod config;

pub use config::{Config, NotificationsConfig, TimerSection, UiConfig};

use std::path::PathBuf;

/// Returns the configuration directory.
///
/// `FANB_CONFIG_DIR` wins when set. Otherwise `~/.config/fanb[-dev]/`,
/// with the `-dev` suffix when `FANB_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("FANB_CONFIG_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("FANB_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("fanb-dev")
            } else {
                base_dir.join("fanb")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
