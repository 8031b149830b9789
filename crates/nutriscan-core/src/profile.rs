//! Profile persistence
//!
//! A single user profile stored as pretty-printed JSON. Writes go to a temp
//! file in the same directory and are renamed into place, so a crash never
//! leaves a half-written profile behind.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{
    allergen_key, Allergen, DietaryRestriction, FitnessGoal, HealthConditions, UserProfile,
};

/// Partial profile update; `None` leaves the field alone
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    /// Allergen names as typed; replaces both common and custom allergens
    pub allergens: Option<Vec<String>>,
    pub dietary_restrictions: Option<Vec<DietaryRestriction>>,
    pub fitness_goals: Option<Vec<FitnessGoal>>,
    pub health_conditions: Option<HealthConditions>,
    pub additional_notes: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the set fields to a profile
    pub fn apply(self, profile: &mut UserProfile) {
        if let Some(name) = self.name {
            profile.name = name;
        }
        if let Some(age) = self.age {
            profile.age = age;
        }
        if let Some(height) = self.height {
            profile.height = height;
        }
        if let Some(weight) = self.weight {
            profile.weight = weight;
        }
        if let Some(names) = self.allergens {
            let (allergens, custom) = split_allergens(&names, &profile.custom_allergens);
            profile.allergens = allergens;
            profile.custom_allergens = custom;
        }
        if let Some(restrictions) = self.dietary_restrictions {
            profile.dietary_restrictions = restrictions;
        }
        if let Some(goals) = self.fitness_goals {
            profile.fitness_goals = goals;
        }
        if let Some(conditions) = self.health_conditions {
            profile.health_conditions = conditions;
        }
        if let Some(notes) = self.additional_notes {
            profile.additional_notes = notes;
        }
    }
}

/// Sort typed allergen names into common allergens and a custom key -> label
/// map. Keys already present keep their stored label.
fn split_allergens(
    names: &[String],
    existing: &BTreeMap<String, String>,
) -> (Vec<Allergen>, BTreeMap<String, String>) {
    let mut common = Vec::new();
    let mut custom = BTreeMap::new();

    for name in names {
        let key = allergen_key(name);
        if key.is_empty() {
            continue;
        }
        match Allergen::from(key) {
            Allergen::Custom(key) => {
                let label = existing
                    .get(&key)
                    .cloned()
                    .unwrap_or_else(|| name.trim().to_string());
                custom.insert(key, label);
            }
            allergen => {
                if !common.contains(&allergen) {
                    common.push(allergen);
                }
            }
        }
    }

    (common, custom)
}

/// JSON file holding the user's profile
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the profile, or the default profile if none was saved yet
    pub fn load(&self) -> Result<UserProfile> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No saved profile, using default");
            return Ok(UserProfile::default());
        }

        let content = fs::read_to_string(&self.path)?;
        let profile = serde_json::from_str(&content)?;
        Ok(profile)
    }

    /// Stamp and write the profile, returning what was written
    pub fn save(&self, mut profile: UserProfile) -> Result<UserProfile> {
        profile.updated_at = Some(Utc::now());

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        serde_json::to_writer_pretty(&mut tmp, &profile)?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        info!(path = %self.path.display(), "Saved profile");
        Ok(profile)
    }

    /// Apply a partial update and save
    pub fn update(&self, update: ProfileUpdate) -> Result<UserProfile> {
        let mut profile = self.load()?;
        update.apply(&mut profile);
        self.save(profile)
    }

    /// Replace the stored profile with the default
    pub fn reset(&self) -> Result<UserProfile> {
        info!(path = %self.path.display(), "Resetting profile");
        self.save(UserProfile::default())
    }

    /// Add a user-typed allergen, returning its key
    ///
    /// Labels naming one of the common allergens select that allergen instead
    /// of creating a custom entry.
    pub fn add_custom_allergen(&self, label: &str) -> Result<String> {
        let label = label.trim();
        let allergen: Allergen = label.parse().map_err(Error::InvalidData)?;
        let mut profile = self.load()?;

        let key = if allergen.is_custom() {
            let key = allergen_key(label);
            profile
                .custom_allergens
                .insert(key.clone(), label.to_string());
            key
        } else {
            if !profile.allergens.contains(&allergen) {
                profile.allergens.push(allergen.clone());
            }
            allergen.as_str().to_string()
        };

        self.save(profile)?;
        debug!(key = %key, "Added allergen");
        Ok(key)
    }

    /// Remove a custom allergen by key
    pub fn remove_custom_allergen(&self, key: &str) -> Result<UserProfile> {
        let key = allergen_key(key);
        let mut profile = self.load()?;

        if profile.custom_allergens.remove(&key).is_none() {
            return Err(Error::NotFound(format!("Custom allergen '{}'", key)));
        }

        self.save(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HealthCondition;
    use tempfile::TempDir;

    fn store() -> (TempDir, ProfileStore) {
        let dir = TempDir::new().unwrap();
        let store = ProfileStore::new(dir.path().join("nested").join("profile.json"));
        (dir, store)
    }

    #[test]
    fn test_load_missing_is_default() {
        let (_dir, store) = store();
        assert!(!store.exists());
        assert_eq!(store.load().unwrap(), UserProfile::default());
    }

    #[test]
    fn test_save_and_load() {
        let (_dir, store) = store();
        let profile = UserProfile {
            name: "Sam".into(),
            allergens: vec![Allergen::Peanuts],
            health_conditions: HealthConditions::Conditions(vec![HealthCondition::Celiac]),
            ..Default::default()
        };

        let saved = store.save(profile).unwrap();
        assert!(saved.updated_at.is_some());
        assert_eq!(store.load().unwrap(), saved);

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"healthConditions\""));
        assert!(raw.contains("\"updatedAt\""));
    }

    #[test]
    fn test_partial_update() {
        let (_dir, store) = store();
        store
            .update(ProfileUpdate {
                name: Some("Alex".into()),
                dietary_restrictions: Some(vec![DietaryRestriction::Vegan]),
                ..Default::default()
            })
            .unwrap();

        let profile = store
            .update(ProfileUpdate {
                age: Some(41),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(profile.name, "Alex");
        assert_eq!(profile.age, 41);
        assert_eq!(profile.dietary_restrictions, vec![DietaryRestriction::Vegan]);
        assert_eq!(profile.fitness_goals, vec![FitnessGoal::GeneralHealth]);
    }

    #[test]
    fn test_update_from_json() {
        let update: ProfileUpdate =
            serde_json::from_str(r#"{"healthConditions": ["none"], "allergens": ["soy", "Kiwi"]}"#)
                .unwrap();
        let mut profile = UserProfile::default();
        update.apply(&mut profile);

        assert_eq!(profile.health_conditions, HealthConditions::NoConditions);
        assert_eq!(profile.allergens, vec![Allergen::Soy]);
        assert_eq!(profile.custom_allergens.get("kiwi").unwrap(), "Kiwi");
    }

    #[test]
    fn test_allergen_update_replaces_custom_entries() {
        let (_dir, store) = store();
        store.add_custom_allergen("Sesame Seeds").unwrap();
        store.add_custom_allergen("Mustard").unwrap();

        let profile = store
            .update(ProfileUpdate {
                allergens: Some(vec!["sesame seeds".into(), "Peanuts".into(), "Lupin".into()]),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(profile.allergens, vec![Allergen::Peanuts]);
        assert_eq!(profile.custom_allergens.len(), 2);
        assert_eq!(profile.custom_allergens.get("sesame seeds").unwrap(), "Sesame Seeds");
        assert_eq!(profile.custom_allergens.get("lupin").unwrap(), "Lupin");
        assert!(!profile.custom_allergens.contains_key("mustard"));

        let profile = store
            .update(ProfileUpdate {
                allergens: Some(vec![]),
                ..Default::default()
            })
            .unwrap();
        assert!(profile.allergens.is_empty());
        assert!(profile.custom_allergens.is_empty());
    }

    #[test]
    fn test_update_without_allergens_keeps_custom_entries() {
        let (_dir, store) = store();
        store.add_custom_allergen("Kiwi").unwrap();

        let profile = store
            .update(ProfileUpdate {
                name: Some("Jo".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(profile.custom_allergens.get("kiwi").unwrap(), "Kiwi");
    }

    #[test]
    fn test_custom_allergens() {
        let (_dir, store) = store();
        let key = store.add_custom_allergen("  Sesame   Seeds ").unwrap();
        assert_eq!(key, "sesame seeds");

        let profile = store.load().unwrap();
        assert_eq!(profile.custom_allergens.get("sesame seeds").unwrap(), "Sesame   Seeds");

        let key = store.add_custom_allergen("Dairy").unwrap();
        assert_eq!(key, "dairy");
        let profile = store.load().unwrap();
        assert_eq!(profile.allergens, vec![Allergen::Dairy]);
        assert_eq!(profile.custom_allergens.len(), 1);

        let profile = store.remove_custom_allergen("Sesame Seeds").unwrap();
        assert!(profile.custom_allergens.is_empty());

        assert!(matches!(
            store.remove_custom_allergen("sesame seeds"),
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            store.add_custom_allergen("   "),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn test_reset() {
        let (_dir, store) = store();
        store.add_custom_allergen("mustard").unwrap();
        let profile = store.reset().unwrap();
        assert!(profile.custom_allergens.is_empty());
        assert_eq!(store.load().unwrap(), profile);
    }

    #[test]
    fn test_corrupt_file() {
        let (_dir, store) = store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{not json").unwrap();
        assert!(matches!(store.load(), Err(Error::Json(_))));
    }
}
