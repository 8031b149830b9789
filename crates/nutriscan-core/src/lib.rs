//! NutriScan Core Library
//!
//! Shared functionality for the NutriScan product classifier:
//! - Domain models for products, profiles and classification results
//! - Static knowledge base of allergens, diets, conditions and fitness targets
//! - Ingredient matcher (substring or word-boundary)
//! - Fitness goal evaluation
//! - Classification resolver (healthy / ok / risky)
//! - Display-only nutrition score
//! - Pluggable product resolver for barcode and label captures
//! - JSON profile store and TOML configuration

pub mod classify;
pub mod config;
pub mod error;
pub mod fitness;
pub mod knowledge;
pub mod matcher;
pub mod models;
pub mod profile;
pub mod scanner;
pub mod score;

pub use classify::{classify, resolve, suggest_alternatives, Classifier, NO_ISSUES_REASON};
pub use config::{AppConfig, ClassifierConfig, ScannerConfig, ServerSettings};
pub use error::{Error, Result};
pub use fitness::evaluate_fitness;
pub use knowledge::KnowledgeSnapshot;
pub use matcher::{IngredientMatcher, MatchMode, MatchReport};
pub use models::{
    Allergen, Classification, ClassificationResult, DietaryRestriction, Finding,
    FitnessCompatibility, FitnessGoal, HealthCondition, HealthConditions, NutritionFacts,
    Product, Severity, UserProfile,
};
pub use profile::{ProfileStore, ProfileUpdate};
pub use scanner::{Capture, MockResolver, ProductResolver};
pub use score::nutrition_score;
