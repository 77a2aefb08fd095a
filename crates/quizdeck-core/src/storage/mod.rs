mod config;
pub mod state_store;

pub use config::{AudioConfig, Config, CountdownConfig};
pub use state_store::{SavedPosition, StateStore};

use std::path::PathBuf;

/// Returns `~/.config/quizdeck[-dev]/` based on QUIZDECK_ENV.
///
/// Set QUIZDECK_ENV=dev to use the development data directory.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("QUIZDECK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("quizdeck-dev")
    } else {
        base_dir.join("quizdeck")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
