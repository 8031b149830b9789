//! Scan command implementation

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use nutriscan_core::{
    nutrition_score, AppConfig, Capture, Classifier, MockResolver, ProductResolver, ProfileStore,
};

use super::classify::{print_json, print_result};

/// What the image shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanKind {
    Barcode,
    Ingredients,
}

pub async fn cmd_scan(
    store: &ProfileStore,
    config: &AppConfig,
    kind: ScanKind,
    image_path: &Path,
    json: bool,
) -> Result<()> {
    let resolver = MockResolver {
        delay: config.scanner.mock_delay,
    };
    scan_with(&resolver, store, config, kind, image_path, json).await
}

/// Scan through any resolver
pub async fn scan_with(
    resolver: &dyn ProductResolver,
    store: &ProfileStore,
    config: &AppConfig,
    kind: ScanKind,
    image_path: &Path,
    json: bool,
) -> Result<()> {
    let image = fs::read(image_path)
        .with_context(|| format!("Failed to read image {}", image_path.display()))?;

    let capture = match kind {
        ScanKind::Barcode => Capture::Barcode(image),
        ScanKind::Ingredients => Capture::IngredientLabel(image),
    };

    if !json {
        println!("📷 Scanning {}...", image_path.display());
    }

    let product = resolver
        .resolve_capture(capture)
        .await
        .context("Failed to resolve product")?;
    info!(product = %product.name, ingredients = product.ingredients.len(), "Resolved product");

    let profile = store.load().context("Failed to load profile")?;
    let result = Classifier::from_config(&config.classifier).classify_for_profile(&product, &profile);
    let score = nutrition_score(&product.nutritional_info);

    if json {
        print_json(&product, &result, score)?;
    } else {
        print_result(&product, &result, score);
    }
    Ok(())
}
