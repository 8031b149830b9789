//! Domain models for NutriScan

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder name for products resolved from an ingredient label only
pub const UNKNOWN_PRODUCT: &str = "Unknown Product";

/// Placeholder brand for products resolved from an ingredient label only
pub const UNKNOWN_BRAND: &str = "Unknown Brand";

/// Nutrition facts per serving
///
/// Units: kcal, g, g, g, g, mg. Values are not validated; missing JSON fields
/// read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NutritionFacts {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub sugar: f64,
    pub sodium: f64,
}

/// A scanned product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: String,
    pub brand: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub nutritional_info: NutritionFacts,
}

impl Product {
    /// Build a product from an ingredient label capture (no barcode lookup)
    pub fn from_ingredients(ingredients: Vec<String>) -> Self {
        Self {
            name: UNKNOWN_PRODUCT.to_string(),
            brand: UNKNOWN_BRAND.to_string(),
            ingredients,
            nutritional_info: NutritionFacts::default(),
        }
    }
}

/// Food allergen
///
/// The eight common allergens are fixed; anything else the user types in
/// becomes `Custom` with a lower-cased key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Allergen {
    Peanuts,
    Dairy,
    Gluten,
    Shellfish,
    Eggs,
    Soy,
    TreeNuts,
    Fish,
    Custom(String),
}

impl Allergen {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Peanuts => "peanuts",
            Self::Dairy => "dairy",
            Self::Gluten => "gluten",
            Self::Shellfish => "shellfish",
            Self::Eggs => "eggs",
            Self::Soy => "soy",
            Self::TreeNuts => "tree nuts",
            Self::Fish => "fish",
            Self::Custom(key) => key,
        }
    }

    /// The fixed allergens, in display order
    pub fn common() -> &'static [Allergen] {
        &[
            Self::Peanuts,
            Self::Dairy,
            Self::Gluten,
            Self::Shellfish,
            Self::Eggs,
            Self::Soy,
            Self::TreeNuts,
            Self::Fish,
        ]
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

/// Normalize free text into a custom allergen key
pub fn allergen_key(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

impl std::str::FromStr for Allergen {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let key = allergen_key(s);
        if key.is_empty() {
            return Err("Allergen name cannot be empty".to_string());
        }
        Ok(Self::from(key))
    }
}

impl From<String> for Allergen {
    fn from(s: String) -> Self {
        let key = allergen_key(&s);
        match key.as_str() {
            "peanuts" => Self::Peanuts,
            "dairy" => Self::Dairy,
            "gluten" => Self::Gluten,
            "shellfish" => Self::Shellfish,
            "eggs" => Self::Eggs,
            "soy" => Self::Soy,
            "tree nuts" => Self::TreeNuts,
            "fish" => Self::Fish,
            _ => Self::Custom(key),
        }
    }
}

impl From<Allergen> for String {
    fn from(a: Allergen) -> Self {
        a.as_str().to_string()
    }
}

impl std::fmt::Display for Allergen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Dietary restriction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DietaryRestriction {
    #[serde(rename = "vegan")]
    Vegan,
    #[serde(rename = "vegetarian")]
    Vegetarian,
    #[serde(rename = "keto")]
    Keto,
    #[serde(rename = "paleo")]
    Paleo,
    #[serde(rename = "low carb")]
    LowCarb,
    #[serde(rename = "low fat")]
    LowFat,
    #[serde(rename = "low sugar")]
    LowSugar,
    #[serde(rename = "low sodium")]
    LowSodium,
}

impl DietaryRestriction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vegan => "vegan",
            Self::Vegetarian => "vegetarian",
            Self::Keto => "keto",
            Self::Paleo => "paleo",
            Self::LowCarb => "low carb",
            Self::LowFat => "low fat",
            Self::LowSugar => "low sugar",
            Self::LowSodium => "low sodium",
        }
    }

    pub fn all() -> &'static [DietaryRestriction] {
        &[
            Self::Vegan,
            Self::Vegetarian,
            Self::Keto,
            Self::Paleo,
            Self::LowCarb,
            Self::LowFat,
            Self::LowSugar,
            Self::LowSodium,
        ]
    }
}

impl std::str::FromStr for DietaryRestriction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', '-'], " ").as_str() {
            "vegan" => Ok(Self::Vegan),
            "vegetarian" => Ok(Self::Vegetarian),
            "keto" => Ok(Self::Keto),
            "paleo" => Ok(Self::Paleo),
            "low carb" => Ok(Self::LowCarb),
            "low fat" => Ok(Self::LowFat),
            "low sugar" => Ok(Self::LowSugar),
            "low sodium" => Ok(Self::LowSodium),
            _ => Err(format!("Unknown dietary restriction: {}", s)),
        }
    }
}

impl std::fmt::Display for DietaryRestriction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Health condition (real conditions only; "none" is handled by `HealthConditions`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthCondition {
    #[serde(rename = "diabetes")]
    Diabetes,
    #[serde(rename = "hypertension")]
    Hypertension,
    #[serde(rename = "high cholesterol")]
    HighCholesterol,
    #[serde(rename = "heart disease")]
    HeartDisease,
    #[serde(rename = "celiac")]
    Celiac,
    #[serde(rename = "IBS")]
    Ibs,
}

/// Wire value meaning "no health conditions"
pub const NO_CONDITIONS_SENTINEL: &str = "none";

impl HealthCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Diabetes => "diabetes",
            Self::Hypertension => "hypertension",
            Self::HighCholesterol => "high cholesterol",
            Self::HeartDisease => "heart disease",
            Self::Celiac => "celiac",
            Self::Ibs => "IBS",
        }
    }

    pub fn all() -> &'static [HealthCondition] {
        &[
            Self::Diabetes,
            Self::Hypertension,
            Self::HighCholesterol,
            Self::HeartDisease,
            Self::Celiac,
            Self::Ibs,
        ]
    }
}

impl std::str::FromStr for HealthCondition {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', '-'], " ").as_str() {
            "diabetes" => Ok(Self::Diabetes),
            "hypertension" => Ok(Self::Hypertension),
            "high cholesterol" => Ok(Self::HighCholesterol),
            "heart disease" => Ok(Self::HeartDisease),
            "celiac" => Ok(Self::Celiac),
            "ibs" => Ok(Self::Ibs),
            _ => Err(format!("Unknown health condition: {}", s)),
        }
    }
}

impl std::fmt::Display for HealthCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The user's health conditions
///
/// On the wire this is a list that is empty, `["none"]`, or real conditions.
/// A stray `"none"` next to real conditions is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub enum HealthConditions {
    #[default]
    NoConditions,
    Conditions(Vec<HealthCondition>),
}

impl HealthConditions {
    /// Build from a list of conditions, dropping duplicates but keeping order
    pub fn from_conditions<I>(conditions: I) -> Self
    where
        I: IntoIterator<Item = HealthCondition>,
    {
        let mut list: Vec<HealthCondition> = Vec::new();
        for condition in conditions {
            if !list.contains(&condition) {
                list.push(condition);
            }
        }
        if list.is_empty() {
            Self::NoConditions
        } else {
            Self::Conditions(list)
        }
    }

    /// Real conditions to check (empty for `NoConditions`)
    pub fn as_slice(&self) -> &[HealthCondition] {
        match self {
            Self::NoConditions => &[],
            Self::Conditions(list) => list,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl TryFrom<Vec<String>> for HealthConditions {
    type Error = String;

    fn try_from(values: Vec<String>) -> std::result::Result<Self, Self::Error> {
        let mut conditions = Vec::new();
        for value in values {
            if value.trim().eq_ignore_ascii_case(NO_CONDITIONS_SENTINEL) {
                continue;
            }
            conditions.push(value.parse::<HealthCondition>()?);
        }
        Ok(Self::from_conditions(conditions))
    }
}

impl From<HealthConditions> for Vec<String> {
    fn from(conditions: HealthConditions) -> Self {
        conditions
            .as_slice()
            .iter()
            .map(|c| c.as_str().to_string())
            .collect()
    }
}

/// Fitness goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FitnessGoal {
    #[serde(rename = "weight loss")]
    WeightLoss,
    #[serde(rename = "muscle gain")]
    MuscleGain,
    #[serde(rename = "maintenance")]
    Maintenance,
    #[serde(rename = "endurance")]
    Endurance,
    #[serde(rename = "general health")]
    GeneralHealth,
}

impl FitnessGoal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WeightLoss => "weight loss",
            Self::MuscleGain => "muscle gain",
            Self::Maintenance => "maintenance",
            Self::Endurance => "endurance",
            Self::GeneralHealth => "general health",
        }
    }

    pub fn all() -> &'static [FitnessGoal] {
        &[
            Self::WeightLoss,
            Self::MuscleGain,
            Self::Maintenance,
            Self::Endurance,
            Self::GeneralHealth,
        ]
    }
}

impl std::str::FromStr for FitnessGoal {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', '-'], " ").as_str() {
            "weight loss" => Ok(Self::WeightLoss),
            "muscle gain" => Ok(Self::MuscleGain),
            "maintenance" => Ok(Self::Maintenance),
            "endurance" => Ok(Self::Endurance),
            "general health" => Ok(Self::GeneralHealth),
            _ => Err(format!("Unknown fitness goal: {}", s)),
        }
    }
}

impl std::fmt::Display for FitnessGoal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Final verdict for a product, ordered by severity (risky is worst)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Healthy,
    Ok,
    Risky,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Ok => "ok",
            Self::Risky => "risky",
        }
    }
}

impl std::str::FromStr for Classification {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "healthy" => Ok(Self::Healthy),
            "ok" => Ok(Self::Ok),
            "risky" => Ok(Self::Risky),
            _ => Err(format!("Unknown classification: {}", s)),
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Weight of a finding
///
/// `Low` exists in the data model but no matching rule assigns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A matched ingredient or term with its explanation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Matched term (or the allergen name for allergen findings)
    pub ingredient: String,
    pub issue: String,
    pub severity: Severity,
}

/// Outcome of checking nutrition facts against fitness goals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitnessCompatibility {
    pub compatible: bool,
    pub reasons: Vec<String>,
}

impl Default for FitnessCompatibility {
    fn default() -> Self {
        Self {
            compatible: true,
            reasons: vec![],
        }
    }
}

/// Classification of one product against one profile
///
/// Optional fields are `None` when there is nothing to report, never `Some(vec![])`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub classification: Classification,
    pub reasons: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternatives: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitness_compatibility: Option<FitnessCompatibility>,
}

/// The user's health profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    /// cm
    pub height: f64,
    /// kg
    pub weight: f64,
    pub allergens: Vec<Allergen>,
    /// User-added allergens: normalized key -> display label
    pub custom_allergens: BTreeMap<String, String>,
    pub dietary_restrictions: Vec<DietaryRestriction>,
    pub fitness_goals: Vec<FitnessGoal>,
    pub health_conditions: HealthConditions,
    pub additional_notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: String::new(),
            age: 30,
            height: 170.0,
            weight: 70.0,
            allergens: vec![],
            custom_allergens: BTreeMap::new(),
            dietary_restrictions: vec![],
            fitness_goals: vec![FitnessGoal::GeneralHealth],
            health_conditions: HealthConditions::NoConditions,
            additional_notes: String::new(),
            updated_at: None,
        }
    }
}

impl UserProfile {
    /// Every allergen the classifier should check: selected ones plus custom keys
    pub fn effective_allergens(&self) -> Vec<Allergen> {
        let mut allergens = self.allergens.clone();
        for key in self.custom_allergens.keys() {
            let allergen = Allergen::from(key.clone());
            if !allergens.contains(&allergen) {
                allergens.push(allergen);
            }
        }
        allergens
    }
}
