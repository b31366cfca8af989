//! biaslens-engine: Headless core for the biaslens client
//!
//! This crate provides the non-UI logic for biaslens, including:
//! - An HTTP client for the bias-detection API (generation + evaluation)
//! - Interaction history with bounded, most-recent-first ordering
//! - Configuration loading and persistence

pub mod api;
pub mod config;
pub mod history;

// Re-export commonly used types
pub use api::{ApiClient, ApiError, Evaluation};
pub use config::{default_config_path, Config, ConfigError, CONFIG_DIR};
pub use history::{BiasLabel, History, HistoryError, InteractionRecord};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
