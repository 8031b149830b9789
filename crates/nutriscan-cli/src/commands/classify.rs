//! Classify and score command implementations

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

use nutriscan_core::{
    nutrition_score, AppConfig, Classification, ClassificationResult, Classifier, Product,
    ProfileStore,
};

use super::read_product;

pub fn cmd_classify(
    store: &ProfileStore,
    config: &AppConfig,
    product_path: &Path,
    json: bool,
) -> Result<()> {
    let product = read_product(product_path)?;
    let profile = store.load().context("Failed to load profile")?;

    let classifier = Classifier::from_config(&config.classifier);
    let result = classifier.classify_for_profile(&product, &profile);
    let score = nutrition_score(&product.nutritional_info);

    if json {
        print_json(&product, &result, score)?;
    } else {
        print_result(&product, &result, score);
    }
    Ok(())
}

pub fn cmd_score(product_path: &Path) -> Result<()> {
    let product = read_product(product_path)?;
    let score = nutrition_score(&product.nutritional_info);

    println!("{} ({}): {}/100", product.name, product.brand, score);
    Ok(())
}

/// Emoji for a classification tier
pub fn tier_icon(classification: Classification) -> &'static str {
    match classification {
        Classification::Healthy => "✅",
        Classification::Ok => "⚠️ ",
        Classification::Risky => "❌",
    }
}

pub(crate) fn print_json(product: &Product, result: &ClassificationResult, score: u8) -> Result<()> {
    let out = json!({
        "product": product,
        "result": result,
        "nutritionScore": score,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

pub(crate) fn print_result(product: &Product, result: &ClassificationResult, score: u8) {
    println!();
    println!("🥫 {} ({})", product.name, product.brand);
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {} {}",
        tier_icon(result.classification),
        result.classification.as_str().to_uppercase()
    );
    println!("   Nutrition score: {}/100", score);

    if let Some(warnings) = &result.warnings {
        println!();
        println!("   🚨 Warnings:");
        for warning in warnings {
            println!("      - {}", warning);
        }
    }

    if !result.reasons.is_empty() {
        println!();
        println!("   📋 Reasons:");
        for reason in &result.reasons {
            println!("      - {}", reason);
        }
    }

    if let Some(alternatives) = &result.alternatives {
        println!();
        println!("   💡 Try instead:");
        for alternative in alternatives {
            println!("      - {}", alternative);
        }
    }

    if let Some(fitness) = &result.fitness_compatibility {
        println!();
        if fitness.compatible {
            println!("   🏃 Fitness: compatible");
        } else {
            println!("   🏃 Fitness: not a good fit for your goals");
        }
        for reason in &fitness.reasons {
            println!("      - {}", reason);
        }
    }

    println!();
}
