//! Product classification
//!
//! Runs the ingredient matchers and the fitness evaluator, then resolves
//! their output into a healthy/ok/risky verdict with reasons, warnings and
//! alternative suggestions.
//!
//! The tier depends only on counts:
//! 1. any warning or any high-severity finding -> risky
//! 2. otherwise any medium-severity finding or any reason -> ok
//! 3. otherwise healthy, with a single "nothing found" reason
//!
//! Classification never fails and keeps no state between calls.

use tracing::debug;

use crate::config::ClassifierConfig;
use crate::fitness::evaluate_fitness;
use crate::matcher::{IngredientMatcher, MatchMode, MatchReport};
use crate::models::{
    Allergen, Classification, ClassificationResult, DietaryRestriction, Finding,
    FitnessCompatibility, FitnessGoal, HealthConditions, Product, Severity, UserProfile,
};

/// Reason given when nothing was flagged
pub const NO_ISSUES_REASON: &str = "No problematic ingredients detected";

/// Alternative suggestions, keyed by the finding text that triggers them
pub const ALTERNATIVE_SUGGESTIONS: &[(&str, &str)] = &[
    (
        "high fructose corn syrup",
        "Products sweetened with natural sources like honey or monk fruit",
    ),
    ("artificial", "Products with natural ingredients"),
    ("sodium", "Low-sodium alternatives"),
];

/// Classifies products against a profile
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier {
    mode: MatchMode,
}

impl Classifier {
    pub fn new(mode: MatchMode) -> Self {
        Self { mode }
    }

    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self::new(config.match_mode)
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Classify a product against the four profile facets
    pub fn classify(
        &self,
        product: &Product,
        allergens: &[Allergen],
        restrictions: &[DietaryRestriction],
        conditions: &HealthConditions,
        goals: &[FitnessGoal],
    ) -> ClassificationResult {
        let matcher = IngredientMatcher::new(&product.ingredients, self.mode);
        let report = matcher.match_all(allergens, restrictions, conditions);
        let fitness = evaluate_fitness(&product.nutritional_info, goals);

        debug!(
            product = %product.name,
            mode = %self.mode,
            findings = report.findings.len(),
            warnings = report.warnings.len(),
            fitness_reasons = fitness.reasons.len(),
            "Matched product"
        );

        let result = resolve(report, fitness);

        debug!(
            product = %product.name,
            classification = %result.classification,
            "Classified product"
        );

        result
    }

    /// Classify against a stored profile, including custom allergens
    pub fn classify_for_profile(
        &self,
        product: &Product,
        profile: &UserProfile,
    ) -> ClassificationResult {
        self.classify(
            product,
            &profile.effective_allergens(),
            &profile.dietary_restrictions,
            &profile.health_conditions,
            &profile.fitness_goals,
        )
    }
}

/// Classify with default (substring) matching
pub fn classify(
    product: &Product,
    allergens: &[Allergen],
    restrictions: &[DietaryRestriction],
    conditions: &HealthConditions,
    goals: &[FitnessGoal],
) -> ClassificationResult {
    Classifier::default().classify(product, allergens, restrictions, conditions, goals)
}

/// Combine matcher and fitness output into a result
pub fn resolve(report: MatchReport, fitness: FitnessCompatibility) -> ClassificationResult {
    let high_count = report.count(Severity::High);
    let medium_count = report.count(Severity::Medium);

    let alternatives = suggest_alternatives(&report.findings);

    let MatchReport {
        mut reasons,
        warnings,
        ..
    } = report;

    let classification = if !warnings.is_empty() || high_count > 0 {
        Classification::Risky
    } else if medium_count > 0 || !reasons.is_empty() {
        Classification::Ok
    } else {
        reasons.push(NO_ISSUES_REASON.to_string());
        Classification::Healthy
    };

    ClassificationResult {
        classification,
        reasons,
        warnings: non_empty(warnings),
        alternatives: non_empty(alternatives),
        fitness_compatibility: if fitness.reasons.is_empty() {
            None
        } else {
            Some(fitness)
        },
    }
}

/// At most one suggestion per category, in table order
pub fn suggest_alternatives(findings: &[Finding]) -> Vec<String> {
    ALTERNATIVE_SUGGESTIONS
        .iter()
        .filter(|(needle, _)| findings.iter().any(|f| f.ingredient.contains(needle)))
        .map(|(_, suggestion)| suggestion.to_string())
        .collect()
}

fn non_empty(items: Vec<String>) -> Option<Vec<String>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}
