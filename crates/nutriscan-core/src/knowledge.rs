//! Reference knowledge base
//!
//! Static lookup tables mapping allergens, dietary restrictions, health
//! conditions and fitness goals to ingredient terms and nutrition targets.
//! Every term is lower-case; the matcher lower-cases ingredients before
//! comparing. Tables are read-only for the lifetime of the process. User-added
//! allergens live in the profile, not here.

use std::borrow::Cow;

use serde::Serialize;

use crate::models::{allergen_key, Allergen, DietaryRestriction, FitnessGoal, HealthCondition, Severity};

/// An ingredient flagged for every user regardless of profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProblematicIngredient {
    pub term: &'static str,
    pub issue: &'static str,
    pub severity: Severity,
}

/// Globally problematic ingredients, in match order
static PROBLEMATIC_INGREDIENTS: &[ProblematicIngredient] = &[
    ProblematicIngredient {
        term: "high fructose corn syrup",
        issue: "May contribute to obesity and metabolic syndrome",
        severity: Severity::High,
    },
    ProblematicIngredient {
        term: "artificial sweeteners",
        issue: "May affect gut microbiome",
        severity: Severity::Medium,
    },
    ProblematicIngredient {
        term: "sodium benzoate",
        issue: "May cause allergic reactions in some individuals",
        severity: Severity::Medium,
    },
    ProblematicIngredient {
        term: "msg",
        issue: "May cause headaches in sensitive individuals",
        severity: Severity::Medium,
    },
    ProblematicIngredient {
        term: "trans fats",
        issue: "Increases risk of heart disease",
        severity: Severity::High,
    },
    ProblematicIngredient {
        term: "yellow 5",
        issue: "May cause allergic reactions or hyperactivity",
        severity: Severity::Medium,
    },
    ProblematicIngredient {
        term: "red 40",
        issue: "May cause allergic reactions or hyperactivity",
        severity: Severity::Medium,
    },
    ProblematicIngredient {
        term: "bha",
        issue: "Potential carcinogen",
        severity: Severity::High,
    },
    ProblematicIngredient {
        term: "bht",
        issue: "Potential endocrine disruptor",
        severity: Severity::High,
    },
    ProblematicIngredient {
        term: "partially hydrogenated oils",
        issue: "Contains trans fats which increase heart disease risk",
        severity: Severity::High,
    },
];

/// Terms that indicate an allergen
///
/// Custom allergens match on their own normalized key.
/// Ingredients checked for every user, in match order
pub fn problematic_ingredients() -> &'static [ProblematicIngredient] {
    PROBLEMATIC_INGREDIENTS
}

pub fn allergen_terms(allergen: &Allergen) -> Vec<Cow<'static, str>> {
    if let Some(terms) = common_allergen_terms(allergen) {
        return terms.iter().map(|t| Cow::Borrowed(*t)).collect();
    }
    let key = allergen_key(allergen.as_str());
    if key.is_empty() {
        return vec![];
    }
    vec![Cow::Owned(key)]
}

/// Synonym table for the fixed allergens (`None` for custom ones)
pub fn common_allergen_terms(allergen: &Allergen) -> Option<&'static [&'static str]> {
    let terms: &'static [&'static str] = match allergen {
        Allergen::Peanuts => &["peanuts", "peanut oil", "peanut flour", "arachis oil"],
        Allergen::Dairy => &[
            "milk", "cream", "butter", "cheese", "yogurt", "whey", "casein", "lactose",
        ],
        Allergen::Gluten => &["wheat", "barley", "rye", "malt", "seitan", "triticale"],
        Allergen::Shellfish => &["shrimp", "crab", "lobster", "crayfish", "prawn"],
        Allergen::Eggs => &["egg", "albumin", "globulin", "ovomucin", "vitellin"],
        Allergen::Soy => &["soy", "soya", "edamame", "tofu", "miso", "tempeh"],
        Allergen::TreeNuts => &[
            "almond",
            "hazelnut",
            "walnut",
            "cashew",
            "pecan",
            "pistachio",
        ],
        Allergen::Fish => &[
            "fish", "cod", "salmon", "trout", "tuna", "bass", "flounder",
        ],
        Allergen::Custom(_) => return None,
    };
    Some(terms)
}

/// Terms a dietary restriction disallows
pub fn dietary_terms(restriction: DietaryRestriction) -> &'static [&'static str] {
    match restriction {
        DietaryRestriction::Vegan => &[
            "meat", "chicken", "beef", "pork", "fish", "seafood", "dairy", "eggs", "honey",
            "gelatin", "whey", "casein",
        ],
        DietaryRestriction::Vegetarian => &[
            "meat", "chicken", "beef", "pork", "fish", "seafood", "gelatin",
        ],
        DietaryRestriction::Keto => &[
            "sugar",
            "high fructose corn syrup",
            "honey",
            "agave",
            "maple syrup",
            "flour",
            "rice",
            "potato",
        ],
        DietaryRestriction::Paleo => &[
            "dairy",
            "grains",
            "legumes",
            "refined sugar",
            "refined oils",
        ],
        DietaryRestriction::LowCarb => &[
            "sugar",
            "flour",
            "corn syrup",
            "rice",
            "potato",
            "bread",
            "pasta",
        ],
        DietaryRestriction::LowFat => &["oil", "butter", "lard", "cream", "full fat"],
        DietaryRestriction::LowSugar => &[
            "sugar",
            "corn syrup",
            "fructose",
            "sucrose",
            "dextrose",
            "maltose",
            "honey",
        ],
        DietaryRestriction::LowSodium => &[
            "salt",
            "sodium chloride",
            "monosodium glutamate",
            "baking soda",
            "sodium nitrite",
        ],
    }
}

/// Terms of concern for a health condition
pub fn health_condition_terms(condition: HealthCondition) -> &'static [&'static str] {
    match condition {
        HealthCondition::Diabetes => &[
            "sugar",
            "high fructose corn syrup",
            "corn syrup",
            "honey",
            "agave nectar",
            "white flour",
        ],
        HealthCondition::Hypertension => &[
            "salt",
            "sodium",
            "msg",
            "baking soda",
            "sodium nitrite",
            "sodium benzoate",
        ],
        HealthCondition::HighCholesterol => &[
            "trans fats",
            "saturated fats",
            "hydrogenated oils",
            "lard",
            "butter",
            "full fat dairy",
        ],
        HealthCondition::HeartDisease => &[
            "trans fats",
            "sodium",
            "hydrogenated oils",
            "artificial flavors",
            "high fructose corn syrup",
        ],
        HealthCondition::Celiac => &["wheat", "barley", "rye", "malt", "seitan", "triticale"],
        HealthCondition::Ibs => &[
            "dairy",
            "gluten",
            "fructose",
            "caffeine",
            "alcohol",
            "artificial sweeteners",
        ],
    }
}

/// Grams range for a macronutrient
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacroRange {
    pub min: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// Upper bound only
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ceiling {
    pub max: f64,
}

/// kcal bounds, either side optional
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalorieTarget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// Per-goal nutrition thresholds
///
/// Only protein.min, carbs.min, sugar.max and calories are evaluated.
/// protein.max, carbs.max and fat are carried as data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NutritionTarget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<MacroRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs: Option<MacroRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat: Option<MacroRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sugar: Option<Ceiling>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<CalorieTarget>,
}

/// What a fitness goal favours, avoids, and its nutrition targets
///
/// `good` and `avoid` are informational; no decision reads them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FitnessProfile {
    pub good: &'static [&'static str],
    pub avoid: &'static [&'static str],
    pub nutrition_target: NutritionTarget,
}

static WEIGHT_LOSS: FitnessProfile = FitnessProfile {
    good: &["protein", "fiber", "water"],
    avoid: &[
        "added sugar",
        "high fructose corn syrup",
        "trans fats",
        "refined carbs",
    ],
    nutrition_target: NutritionTarget {
        protein: None,
        carbs: None,
        fat: None,
        sugar: Some(Ceiling { max: 25.0 }),
        calories: Some(CalorieTarget {
            min: None,
            max: Some(300.0),
        }),
    },
};

static MUSCLE_GAIN: FitnessProfile = FitnessProfile {
    good: &["protein", "complete proteins", "creatine", "amino acids"],
    avoid: &["added sugar", "trans fats"],
    nutrition_target: NutritionTarget {
        protein: Some(MacroRange {
            min: 20.0,
            max: Some(50.0),
        }),
        carbs: None,
        fat: None,
        sugar: None,
        calories: Some(CalorieTarget {
            min: Some(200.0),
            max: None,
        }),
    },
};

static MAINTENANCE: FitnessProfile = FitnessProfile {
    good: &["balanced nutrients", "protein", "fiber", "healthy fats"],
    avoid: &["excessive sugar", "trans fats"],
    nutrition_target: NutritionTarget {
        protein: None,
        carbs: None,
        fat: None,
        sugar: Some(Ceiling { max: 30.0 }),
        calories: None,
    },
};

static ENDURANCE: FitnessProfile = FitnessProfile {
    good: &["complex carbs", "electrolytes", "protein"],
    avoid: &["excessive fat", "fiber before exercise"],
    nutrition_target: NutritionTarget {
        protein: None,
        carbs: Some(MacroRange {
            min: 30.0,
            max: None,
        }),
        fat: None,
        sugar: None,
        calories: None,
    },
};

static GENERAL_HEALTH: FitnessProfile = FitnessProfile {
    good: &[
        "whole foods",
        "fruits",
        "vegetables",
        "lean protein",
        "fiber",
    ],
    avoid: &["artificial ingredients", "high sugar", "trans fats"],
    nutrition_target: NutritionTarget {
        protein: None,
        carbs: None,
        fat: None,
        sugar: Some(Ceiling { max: 25.0 }),
        calories: None,
    },
};

pub fn fitness_profile(goal: FitnessGoal) -> &'static FitnessProfile {
    match goal {
        FitnessGoal::WeightLoss => &WEIGHT_LOSS,
        FitnessGoal::MuscleGain => &MUSCLE_GAIN,
        FitnessGoal::Maintenance => &MAINTENANCE,
        FitnessGoal::Endurance => &ENDURANCE,
        FitnessGoal::GeneralHealth => &GENERAL_HEALTH,
    }
}

/// A named group of match terms, for display
#[derive(Debug, Clone, Serialize)]
pub struct TermGroup {
    pub name: &'static str,
    pub terms: Vec<&'static str>,
}

/// A fitness goal with its profile, for display
#[derive(Debug, Clone, Serialize)]
pub struct GoalEntry {
    pub goal: &'static str,
    #[serde(flatten)]
    pub profile: FitnessProfile,
}

/// Full dump of the knowledge base
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeSnapshot {
    pub problematic_ingredients: Vec<ProblematicIngredient>,
    pub allergens: Vec<TermGroup>,
    pub dietary_restrictions: Vec<TermGroup>,
    pub health_conditions: Vec<TermGroup>,
    pub fitness_goals: Vec<GoalEntry>,
}

impl KnowledgeSnapshot {
    pub fn collect() -> Self {
        let allergens = Allergen::common()
            .iter()
            .map(|a| TermGroup {
                name: a.as_str(),
                terms: common_allergen_terms(a).unwrap_or_default().to_vec(),
            })
            .collect();

        Self {
            problematic_ingredients: problematic_ingredients().to_vec(),
            allergens,
            dietary_restrictions: DietaryRestriction::all()
                .iter()
                .map(|r| TermGroup {
                    name: r.as_str(),
                    terms: dietary_terms(*r).to_vec(),
                })
                .collect(),
            health_conditions: HealthCondition::all()
                .iter()
                .map(|c| TermGroup {
                    name: c.as_str(),
                    terms: health_condition_terms(*c).to_vec(),
                })
                .collect(),
            fitness_goals: FitnessGoal::all()
                .iter()
                .map(|g| GoalEntry {
                    goal: g.as_str(),
                    profile: *fitness_profile(*g),
                })
                .collect(),
        }
    }
}
