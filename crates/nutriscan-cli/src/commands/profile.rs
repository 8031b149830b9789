//! Profile command implementations

use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

use nutriscan_core::{
    DietaryRestriction, FitnessGoal, HealthConditions, ProfileStore, ProfileUpdate, UserProfile,
};

/// Raw `profile set` arguments
#[derive(Debug, Default)]
pub struct ProfileArgs {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub allergens: Option<String>,
    pub diets: Option<String>,
    pub goals: Option<String>,
    pub conditions: Option<String>,
    pub notes: Option<String>,
}

/// Split a comma-separated list; an empty string clears the list
fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_list<T>(input: &str) -> Result<Vec<T>>
where
    T: FromStr<Err = String>,
{
    split_list(input)
        .iter()
        .map(|s| s.parse::<T>().map_err(|e| anyhow!(e)))
        .collect()
}

/// Turn `profile set` arguments into a partial update
pub fn build_profile_update(args: ProfileArgs) -> Result<ProfileUpdate> {
    let allergens = args.allergens.as_deref().map(split_list);
    let dietary_restrictions = args
        .diets
        .as_deref()
        .map(parse_list::<DietaryRestriction>)
        .transpose()?;
    let fitness_goals = args
        .goals
        .as_deref()
        .map(parse_list::<FitnessGoal>)
        .transpose()?;
    let health_conditions = args
        .conditions
        .as_deref()
        .map(|c| HealthConditions::try_from(split_list(c)).map_err(|e| anyhow!(e)))
        .transpose()?;

    Ok(ProfileUpdate {
        name: args.name,
        age: args.age,
        height: args.height,
        weight: args.weight,
        allergens,
        dietary_restrictions,
        fitness_goals,
        health_conditions,
        additional_notes: args.notes,
    })
}

fn join<T: std::fmt::Display>(items: &[T]) -> String {
    if items.is_empty() {
        return "(none)".to_string();
    }
    items
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_profile(profile: &UserProfile) {
    println!();
    println!("👤 Health Profile");
    println!("   ─────────────────────────────────────────────────────────────");
    if !profile.name.is_empty() {
        println!("   Name:       {}", profile.name);
    }
    println!(
        "   Age:        {}   Height: {} cm   Weight: {} kg",
        profile.age, profile.height, profile.weight
    );
    println!("   Allergens:  {}", join(&profile.allergens));
    if !profile.custom_allergens.is_empty() {
        let custom: Vec<String> = profile
            .custom_allergens
            .iter()
            .map(|(key, label)| format!("{} [{}]", label, key))
            .collect();
        println!("   Custom:     {}", custom.join(", "));
    }
    println!("   Diets:      {}", join(&profile.dietary_restrictions));
    println!("   Goals:      {}", join(&profile.fitness_goals));
    println!("   Conditions: {}", join(profile.health_conditions.as_slice()));
    if !profile.additional_notes.is_empty() {
        println!("   Notes:      {}", profile.additional_notes);
    }
    if let Some(updated) = profile.updated_at {
        println!("   Updated:    {}", updated.format("%Y-%m-%d %H:%M UTC"));
    }
    println!();
}

pub fn cmd_profile_show(store: &ProfileStore, json: bool) -> Result<()> {
    let profile = store.load().context("Failed to load profile")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    if !store.exists() {
        println!("ℹ️  No saved profile yet, showing defaults");
    }
    print_profile(&profile);
    Ok(())
}

pub fn cmd_profile_set(store: &ProfileStore, update: ProfileUpdate) -> Result<()> {
    if update.is_empty() {
        println!("ℹ️  Nothing to update (see `nutriscan profile set --help`)");
        return Ok(());
    }

    let profile = store.update(update).context("Failed to update profile")?;
    println!("✅ Profile saved to {}", store.path().display());
    print_profile(&profile);
    Ok(())
}

pub fn cmd_profile_reset(store: &ProfileStore) -> Result<()> {
    store.reset().context("Failed to reset profile")?;
    println!("✅ Profile reset to defaults");
    Ok(())
}

pub fn cmd_profile_add_allergen(store: &ProfileStore, label: &str) -> Result<()> {
    let key = store
        .add_custom_allergen(label)
        .context("Failed to add allergen")?;
    println!("✅ Added allergen: {}", key);
    Ok(())
}

pub fn cmd_profile_remove_allergen(store: &ProfileStore, key: &str) -> Result<()> {
    store
        .remove_custom_allergen(key)
        .context("Failed to remove allergen")?;
    println!("✅ Removed allergen: {}", key);
    Ok(())
}
