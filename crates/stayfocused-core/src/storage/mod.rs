mod config;

pub use config::{CadenceConfig, Config, GalleryConfig, SoundConfig};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/stayfocused[-dev]/` based on STAYFOCUSED_ENV.
///
/// Set STAYFOCUSED_ENV=dev to use the development directory, or
/// STAYFOCUSED_CONFIG_DIR to point somewhere else entirely.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn config_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("STAYFOCUSED_CONFIG_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("STAYFOCUSED_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("stayfocused-dev")
            } else {
                base_dir.join("stayfocused")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
