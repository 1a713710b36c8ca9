//! Persistence: key-value store, typed state access, configuration.

mod config;
mod state;
mod store;

pub use config::{Config, NotificationsConfig};
pub use state::StateStore;
pub use store::{KeyValueStore, MemoryStore, SqliteStore};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/recharge[-dev]/` based on RECHARGE_ENV.
///
/// Set RECHARGE_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("RECHARGE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("recharge-dev")
    } else {
        base_dir.join("recharge")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
