//! Ingredient matching against the knowledge base
//!
//! Ingredients are lower-cased once, then every knowledge-base term is tested
//! as a plain substring. There is no tokenization, so "egg" matches
//! "eggplant". `MatchMode::WordBoundary` narrows this to whole-word matches
//! for callers that opt in through config.

use std::cell::RefCell;
use std::collections::HashMap;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::knowledge::{
    allergen_terms, dietary_terms, health_condition_terms, problematic_ingredients,
};
use crate::models::{Allergen, DietaryRestriction, Finding, HealthConditions, Severity};

/// How a term is tested against an ingredient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Plain case-insensitive substring test
    #[default]
    Substring,
    /// Term must start and end on a word boundary
    WordBoundary,
}

impl MatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Substring => "substring",
            Self::WordBoundary => "word_boundary",
        }
    }
}

impl std::str::FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "substring" => Ok(Self::Substring),
            "word_boundary" | "word" => Ok(Self::WordBoundary),
            _ => Err(format!("Unknown match mode: {}", s)),
        }
    }
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Accumulated output of the matchers
///
/// `reasons` and `warnings` run parallel to `findings`: each finding adds
/// exactly one line to one of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchReport {
    pub findings: Vec<Finding>,
    pub reasons: Vec<String>,
    pub warnings: Vec<String>,
}

impl MatchReport {
    pub fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }
}

/// Matches one product's ingredient list
pub struct IngredientMatcher {
    ingredients: Vec<String>,
    mode: MatchMode,
    /// Compiled word-boundary patterns, keyed by term
    patterns: RefCell<HashMap<String, Regex>>,
}

impl IngredientMatcher {
    pub fn new<S: AsRef<str>>(ingredients: &[S], mode: MatchMode) -> Self {
        Self {
            ingredients: ingredients
                .iter()
                .map(|i| i.as_ref().to_lowercase())
                .collect(),
            mode,
            patterns: RefCell::new(HashMap::new()),
        }
    }

    /// Lower-cased ingredients
    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    /// Whether any ingredient contains the term
    pub fn contains_term(&self, term: &str) -> bool {
        self.ingredients
            .iter()
            .any(|ingredient| self.ingredient_contains(ingredient, term))
    }

    fn ingredient_contains(&self, ingredient: &str, term: &str) -> bool {
        match self.mode {
            MatchMode::Substring => ingredient.contains(term),
            MatchMode::WordBoundary => {
                let mut patterns = self.patterns.borrow_mut();
                if !patterns.contains_key(term) {
                    let pattern = format!(r"\b{}\b", regex::escape(term));
                    match Regex::new(&pattern) {
                        Ok(re) => {
                            patterns.insert(term.to_string(), re);
                        }
                        Err(e) => {
                            warn!(term, error = %e, "Falling back to substring match");
                            return ingredient.contains(term);
                        }
                    }
                }
                patterns
                    .get(term)
                    .map(|re| re.is_match(ingredient))
                    .unwrap_or(false)
            }
        }
    }

    /// One high-severity warning per allergen found
    pub fn match_allergens(&self, allergens: &[Allergen], report: &mut MatchReport) {
        for allergen in allergens {
            let found = allergen_terms(allergen)
                .iter()
                .any(|term| self.contains_term(term));

            if found {
                report
                    .warnings
                    .push(format!("Contains {} allergen", allergen));
                report.findings.push(Finding {
                    ingredient: allergen.to_string(),
                    issue: format!("Contains {} which you are allergic to", allergen),
                    severity: Severity::High,
                });
            }
        }
    }

    /// One medium-severity reason per restricted term found
    pub fn match_dietary(&self, restrictions: &[DietaryRestriction], report: &mut MatchReport) {
        for restriction in restrictions {
            for term in dietary_terms(*restriction) {
                if self.contains_term(term) {
                    report
                        .reasons
                        .push(format!("Contains {} (not {} friendly)", term, restriction));
                    report.findings.push(Finding {
                        ingredient: term.to_string(),
                        issue: format!("Not compatible with {} diet", restriction),
                        severity: Severity::Medium,
                    });
                }
            }
        }
    }

    /// One high-severity warning per term of concern found
    pub fn match_health_conditions(&self, conditions: &HealthConditions, report: &mut MatchReport) {
        for condition in conditions.as_slice() {
            for term in health_condition_terms(*condition) {
                if self.contains_term(term) {
                    report
                        .warnings
                        .push(format!("Contains {} (concern for {})", term, condition));
                    report.findings.push(Finding {
                        ingredient: term.to_string(),
                        issue: format!("Not recommended for people with {}", condition),
                        severity: Severity::High,
                    });
                }
            }
        }
    }

    /// Profile-independent check, once per (ingredient, table entry) hit
    pub fn match_generic(&self, report: &mut MatchReport) {
        for ingredient in &self.ingredients {
            for entry in problematic_ingredients() {
                if self.ingredient_contains(ingredient, entry.term) {
                    report
                        .reasons
                        .push(format!("Contains {}: {}", entry.term, entry.issue));
                    report.findings.push(Finding {
                        ingredient: entry.term.to_string(),
                        issue: entry.issue.to_string(),
                        severity: entry.severity,
                    });
                }
            }
        }
    }

    /// Run all four matchers in order
    pub fn match_all(
        &self,
        allergens: &[Allergen],
        restrictions: &[DietaryRestriction],
        conditions: &HealthConditions,
    ) -> MatchReport {
        let mut report = MatchReport::default();
        self.match_allergens(allergens, &mut report);
        self.match_dietary(restrictions, &mut report);
        self.match_health_conditions(conditions, &mut report);
        self.match_generic(&mut report);
        report
    }
}
