//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `classify` - Classify and score product files
//! - `knowledge` - Reference table dump
//! - `profile` - Profile management (show, set, reset, custom allergens)
//! - `scan` - Resolve an image through the product resolver, then classify
//! - `serve` - Web server command

pub mod classify;
pub mod knowledge;
pub mod profile;
pub mod scan;
pub mod serve;

// Re-export command functions for main.rs
pub use classify::*;
pub use knowledge::*;
pub use profile::*;
pub use scan::*;
pub use serve::*;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use nutriscan_core::{AppConfig, Product, ProfileStore};

/// Load config from an explicit path or the default locations
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    AppConfig::load(path).context("Failed to load config")
}

/// Open the profile store, preferring an explicit `--profile` path
pub fn open_store(config: &AppConfig, profile: Option<&Path>) -> Result<ProfileStore> {
    let path = match profile {
        Some(path) => path.to_path_buf(),
        None => config
            .resolve_profile_path()
            .context("Failed to locate profile")?,
    };
    debug!(path = %path.display(), "Using profile");
    Ok(ProfileStore::new(path))
}

/// Read a product JSON file
pub fn read_product(path: &Path) -> Result<Product> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read product file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid product JSON in {}", path.display()))
}
