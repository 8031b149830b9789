//! Server command implementation

use std::path::Path;

use anyhow::Result;

use nutriscan_core::{AppConfig, ProfileStore};

/// Environment variable holding comma-separated API keys
pub const API_KEYS_ENV: &str = "NUTRISCAN_API_KEYS";

pub async fn cmd_serve(
    store: ProfileStore,
    config: &AppConfig,
    host: Option<&str>,
    port: Option<u16>,
    no_auth: bool,
    static_dir: Option<&Path>,
) -> Result<()> {
    let host = host.unwrap_or(&config.server.host).to_string();
    let port = port.unwrap_or(config.server.port);

    println!("🚀 Starting NutriScan web server...");
    println!("   Profile: {}", store.path().display());
    println!("   Listening: http://{}:{}", host, port);
    println!("   Matching: {}", config.classifier.match_mode);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }

    let api_keys = nutriscan_server::parse_api_keys(&std::env::var(API_KEYS_ENV).unwrap_or_default());

    if no_auth {
        println!();
        println!("   ⚠️  Authentication DISABLED - do not expose to network!");
    } else if api_keys.is_empty() {
        println!();
        println!("   ❌ No API keys configured - every request will be rejected");
        println!("      Set {} or use --no-auth for local development", API_KEYS_ENV);
    } else {
        println!(
            "   🔑 API keys: {} configured ({})",
            api_keys.len(),
            API_KEYS_ENV
        );
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let server_config = nutriscan_server::ServerConfig {
        require_auth: !no_auth,
        allowed_origins: vec![],
        api_keys,
        classifier: config.classifier,
        scanner: config.scanner,
    };

    let static_dir = static_dir.map(|d| d.to_string_lossy().to_string());

    nutriscan_server::serve_with_config(store, &host, port, static_dir.as_deref(), server_config)
        .await
}
