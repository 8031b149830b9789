//! Fitness goal compatibility
//!
//! Checks nutrition facts against each goal's targets. Violations from all
//! goals accumulate into one list; any violation makes the product
//! incompatible.

use crate::knowledge::fitness_profile;
use crate::models::{FitnessCompatibility, FitnessGoal, NutritionFacts};

/// Evaluate nutrition facts against every selected goal
pub fn evaluate_fitness(facts: &NutritionFacts, goals: &[FitnessGoal]) -> FitnessCompatibility {
    let mut result = FitnessCompatibility::default();

    for goal in goals {
        let target = fitness_profile(*goal).nutrition_target;

        if let Some(protein) = target.protein {
            if facts.protein < protein.min {
                result.reasons.push(format!("Low in protein for {}", goal));
            }
        }

        if let Some(carbs) = target.carbs {
            if facts.carbs < carbs.min {
                result.reasons.push(format!("Low in carbs for {}", goal));
            }
        }

        if let Some(sugar) = target.sugar {
            if facts.sugar > sugar.max {
                result.reasons.push(format!("High in sugar for {}", goal));
            }
        }

        if let Some(calories) = target.calories {
            if calories.max.is_some_and(|max| facts.calories > max) {
                result.reasons.push(format!("High in calories for {}", goal));
            }
            if calories.min.is_some_and(|min| facts.calories < min) {
                result.reasons.push(format!("Low in calories for {}", goal));
            }
        }
    }

    result.compatible = result.reasons.is_empty();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facts(calories: f64, protein: f64, carbs: f64, sugar: f64) -> NutritionFacts {
        NutritionFacts {
            calories,
            protein,
            carbs,
            fat: 0.0,
            sugar,
            sodium: 10.0,
        }
    }

    #[test]
    fn test_muscle_gain_low_protein() {
        let result = evaluate_fitness(&facts(50.0, 2.0, 5.0, 5.0), &[FitnessGoal::MuscleGain]);
        assert!(!result.compatible);
        assert_eq!(
            result.reasons,
            vec!["Low in protein for muscle gain", "Low in calories for muscle gain"]
        );
    }

    #[test]
    fn test_weight_loss_high_sugar_and_calories() {
        let result = evaluate_fitness(&facts(400.0, 0.0, 0.0, 26.0), &[FitnessGoal::WeightLoss]);
        assert_eq!(
            result.reasons,
            vec!["High in sugar for weight loss", "High in calories for weight loss"]
        );
    }

    #[test]
    fn test_thresholds_are_strict() {
        // Exactly at the limit is fine
        let result = evaluate_fitness(
            &facts(300.0, 20.0, 30.0, 25.0),
            &[FitnessGoal::WeightLoss, FitnessGoal::Endurance, FitnessGoal::GeneralHealth],
        );
        assert!(result.compatible);
        assert!(result.reasons.is_empty());
    }

    #[test]
    fn test_reasons_accumulate_across_goals() {
        let result = evaluate_fitness(
            &facts(100.0, 0.0, 10.0, 40.0),
            &[FitnessGoal::Endurance, FitnessGoal::Maintenance, FitnessGoal::GeneralHealth],
        );
        assert!(!result.compatible);
        assert_eq!(
            result.reasons,
            vec![
                "Low in carbs for endurance",
                "High in sugar for maintenance",
                "High in sugar for general health",
            ]
        );
    }

    #[test]
    fn test_unevaluated_targets_ignored() {
        // 80g protein is above muscle gain's protein max, which is never checked
        let result = evaluate_fitness(&facts(500.0, 80.0, 0.0, 0.0), &[FitnessGoal::MuscleGain]);
        assert!(result.compatible);
    }

    #[test]
    fn test_no_goals() {
        let result = evaluate_fitness(&NutritionFacts::default(), &[]);
        assert!(result.compatible);
        assert!(result.reasons.is_empty());
    }
}
