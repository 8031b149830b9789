//! Nutrition score (display only)
//!
//! A 0-100 heuristic shown next to the classification. It does not feed into
//! the verdict.

use crate::models::NutritionFacts;

/// Score nutrition facts on a 0-100 scale, starting from 100
pub fn nutrition_score(facts: &NutritionFacts) -> u8 {
    let mut score: i32 = 100;

    if facts.sugar > 50.0 {
        score -= 30;
    } else if facts.sugar > 25.0 {
        score -= 15;
    }

    if facts.sodium > 300.0 {
        score -= 20;
    } else if facts.sodium > 150.0 {
        score -= 10;
    }

    if facts.fat > 20.0 {
        score -= 20;
    } else if facts.fat > 10.0 {
        score -= 10;
    }

    if facts.protein > 20.0 {
        score += 15;
    } else if facts.protein > 10.0 {
        score += 10;
    }

    clamp_score(score)
}

/// Clamp a raw score into 0-100
fn clamp_score(raw: i32) -> u8 {
    raw.clamp(0, 100) as u8
}
