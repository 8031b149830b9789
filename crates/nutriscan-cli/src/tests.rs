//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::fs;
use std::path::PathBuf;

use nutriscan_core::{
    Allergen, AppConfig, Classification, Classifier, DietaryRestriction, FitnessGoal,
    HealthCondition, HealthConditions, MatchMode, Product, ProfileStore,
};
use tempfile::TempDir;

use crate::commands::{self, ProfileArgs, ScanKind};

fn setup_store() -> (TempDir, ProfileStore) {
    let dir = TempDir::new().unwrap();
    let store = ProfileStore::new(dir.path().join("profile.json"));
    (dir, store)
}

fn write_product(dir: &TempDir, json: &str) -> PathBuf {
    let path = dir.path().join("product.json");
    fs::write(&path, json).unwrap();
    path
}

const GRANOLA: &str = r#"{
    "name": "Granola Bar",
    "brand": "Trail",
    "ingredients": ["Oats", "Honey", "Almonds", "Sugar"],
    "nutritionalInfo": {"calories": 190, "protein": 4, "carbs": 29, "fat": 7, "sugar": 12, "sodium": 95}
}"#;

// ========== Config & Store Tests ==========

#[test]
fn test_load_config_explicit() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nutriscan.toml");
    fs::write(&path, "[classifier]\nmatch_mode = \"word_boundary\"\n").unwrap();

    let config = commands::load_config(Some(&path)).unwrap();
    assert_eq!(config.classifier.match_mode, MatchMode::WordBoundary);
}

#[test]
fn test_load_config_missing_file() {
    let dir = TempDir::new().unwrap();
    assert!(commands::load_config(Some(&dir.path().join("nope.toml"))).is_err());
}

#[test]
fn test_open_store_prefers_flag() {
    let config = AppConfig::default();
    let path = PathBuf::from("/tmp/explicit-profile.json");
    let store = commands::open_store(&config, Some(&path)).unwrap();
    assert_eq!(store.path(), path.as_path());
}

#[test]
fn test_read_product() {
    let dir = TempDir::new().unwrap();
    let path = write_product(&dir, GRANOLA);
    let product = commands::read_product(&path).unwrap();
    assert_eq!(product.ingredients.len(), 4);
    assert_eq!(product.nutritional_info.calories, 190.0);

    let bad = write_product(&dir, "{\"name\": 1}");
    assert!(commands::read_product(&bad).is_err());
}

// ========== Classify Command Tests ==========

#[test]
fn test_cmd_classify() {
    let (dir, store) = setup_store();
    let path = write_product(&dir, GRANOLA);
    let config = AppConfig::default();

    assert!(commands::cmd_classify(&store, &config, &path, false).is_ok());
    assert!(commands::cmd_classify(&store, &config, &path, true).is_ok());
}

#[test]
fn test_cmd_classify_missing_file() {
    let (dir, store) = setup_store();
    let config = AppConfig::default();
    let result = commands::cmd_classify(&store, &config, &dir.path().join("missing.json"), false);
    assert!(result.is_err());
}

#[test]
fn test_cmd_score() {
    let dir = TempDir::new().unwrap();
    let path = write_product(&dir, GRANOLA);
    assert!(commands::cmd_score(&path).is_ok());
}

// ========== Scan Command Tests ==========

#[tokio::test]
async fn test_cmd_scan_barcode() {
    let (dir, store) = setup_store();
    let image = dir.path().join("barcode.jpg");
    fs::write(&image, [0xffu8, 0xd8, 0xff]).unwrap();

    let result =
        commands::cmd_scan(&store, &AppConfig::default(), ScanKind::Barcode, &image, true).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_cmd_scan_empty_image() {
    let (dir, store) = setup_store();
    let image = dir.path().join("empty.jpg");
    fs::write(&image, b"").unwrap();

    let result = commands::cmd_scan(
        &store,
        &AppConfig::default(),
        ScanKind::Ingredients,
        &image,
        false,
    )
    .await;
    assert!(result.is_err());
}

// ========== Profile Command Tests ==========

#[test]
fn test_build_profile_update() {
    let update = commands::build_profile_update(ProfileArgs {
        age: Some(35),
        allergens: Some("peanuts, tree nuts, Sesame".into()),
        diets: Some("low_carb,vegan".into()),
        goals: Some("muscle gain".into()),
        conditions: Some("none".into()),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(update.age, Some(35));
    assert_eq!(
        update.allergens.unwrap(),
        vec!["peanuts", "tree nuts", "Sesame"]
    );
    assert_eq!(
        update.dietary_restrictions.unwrap(),
        vec![DietaryRestriction::LowCarb, DietaryRestriction::Vegan]
    );
    assert_eq!(update.fitness_goals.unwrap(), vec![FitnessGoal::MuscleGain]);
    assert_eq!(update.health_conditions, Some(HealthConditions::NoConditions));
    assert!(update.name.is_none());
}

#[test]
fn test_build_profile_update_rejects_unknown() {
    let result = commands::build_profile_update(ProfileArgs {
        goals: Some("bulking".into()),
        ..Default::default()
    });
    assert!(result.is_err());

    let result = commands::build_profile_update(ProfileArgs {
        conditions: Some("diabetes,gout".into()),
        ..Default::default()
    });
    assert!(result.is_err());
}

#[test]
fn test_cmd_profile_set_and_show() {
    let (_dir, store) = setup_store();

    let update = commands::build_profile_update(ProfileArgs {
        name: Some("Robin".into()),
        conditions: Some("celiac".into()),
        ..Default::default()
    })
    .unwrap();
    commands::cmd_profile_set(&store, update).unwrap();

    let profile = store.load().unwrap();
    assert_eq!(profile.name, "Robin");
    assert_eq!(
        profile.health_conditions,
        HealthConditions::Conditions(vec![HealthCondition::Celiac])
    );

    assert!(commands::cmd_profile_show(&store, false).is_ok());
    assert!(commands::cmd_profile_show(&store, true).is_ok());
}

#[test]
fn test_cmd_profile_set_empty_is_noop() {
    let (_dir, store) = setup_store();
    commands::cmd_profile_set(&store, Default::default()).unwrap();
    assert!(!store.exists());
}

#[test]
fn test_cmd_profile_allergens() {
    let (_dir, store) = setup_store();

    commands::cmd_profile_add_allergen(&store, "Mustard").unwrap();
    assert!(store.load().unwrap().custom_allergens.contains_key("mustard"));

    commands::cmd_profile_remove_allergen(&store, "mustard").unwrap();
    assert!(store.load().unwrap().custom_allergens.is_empty());

    assert!(commands::cmd_profile_remove_allergen(&store, "mustard").is_err());
}

#[test]
fn test_cmd_profile_set_allergens_replaces_custom() {
    let (_dir, store) = setup_store();

    let set = |allergens: &str| {
        let update = commands::build_profile_update(ProfileArgs {
            allergens: Some(allergens.into()),
            ..Default::default()
        })
        .unwrap();
        commands::cmd_profile_set(&store, update).unwrap();
    };

    set("Kiwi, dairy");
    let profile = store.load().unwrap();
    assert_eq!(profile.allergens, vec![Allergen::Dairy]);
    assert_eq!(profile.custom_allergens.get("kiwi").unwrap(), "Kiwi");

    set("");
    let profile = store.load().unwrap();
    assert!(profile.allergens.is_empty());
    assert!(profile.custom_allergens.is_empty());

    let product = Product::from_ingredients(vec!["Kiwi Puree".into()]);
    let result = Classifier::default().classify_for_profile(&product, &profile);
    assert_eq!(result.classification, Classification::Healthy);
    assert!(result.warnings.is_none());
}

#[test]
fn test_cmd_profile_reset() {
    let (_dir, store) = setup_store();
    commands::cmd_profile_add_allergen(&store, "kiwi").unwrap();
    commands::cmd_profile_reset(&store).unwrap();
    assert!(store.load().unwrap().custom_allergens.is_empty());
}

// ========== Knowledge Command Tests ==========

#[test]
fn test_cmd_knowledge() {
    assert!(commands::cmd_knowledge(false).is_ok());
    assert!(commands::cmd_knowledge(true).is_ok());
}

#[test]
fn test_tier_icons() {
    assert_eq!(commands::tier_icon(Classification::Healthy), "✅");
    assert_eq!(commands::tier_icon(Classification::Risky), "❌");
}
