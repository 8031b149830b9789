//! Profile handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState};
use nutriscan_core::{ProfileUpdate, UserProfile};

/// Request body for adding a custom allergen
#[derive(Debug, Deserialize)]
pub struct AddAllergenRequest {
    pub label: String,
}

/// Added allergen key with the updated profile
#[derive(Debug, Serialize)]
pub struct AddAllergenResponse {
    pub key: String,
    pub profile: UserProfile,
}

/// GET /api/profile - Get the stored profile
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
) -> Result<Json<UserProfile>, AppError> {
    let _guard = state.profile_lock.read().await;
    let profile = state.profiles.load().map_err(AppError::from_core)?;
    Ok(Json(profile))
}

/// PATCH /api/profile - Update some profile fields
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<UserProfile>, AppError> {
    if update.is_empty() {
        return Err(AppError::bad_request("No profile fields provided"));
    }

    let _guard = state.profile_lock.write().await;
    let profile = state.profiles.update(update).map_err(AppError::from_core)?;
    Ok(Json(profile))
}

/// DELETE /api/profile - Reset the profile to defaults
pub async fn reset_profile(
    State(state): State<Arc<AppState>>,
) -> Result<Json<UserProfile>, AppError> {
    let _guard = state.profile_lock.write().await;
    let profile = state.profiles.reset().map_err(AppError::from_core)?;
    Ok(Json(profile))
}

/// POST /api/profile/allergens - Add a custom allergen
pub async fn add_custom_allergen(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddAllergenRequest>,
) -> Result<Json<AddAllergenResponse>, AppError> {
    let _guard = state.profile_lock.write().await;
    let key = state
        .profiles
        .add_custom_allergen(&req.label)
        .map_err(AppError::from_core)?;
    let profile = state.profiles.load().map_err(AppError::from_core)?;

    Ok(Json(AddAllergenResponse { key, profile }))
}

/// DELETE /api/profile/allergens/:key - Remove a custom allergen
pub async fn remove_custom_allergen(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<UserProfile>, AppError> {
    let _guard = state.profile_lock.write().await;
    let profile = state
        .profiles
        .remove_custom_allergen(&key)
        .map_err(AppError::from_core)?;
    Ok(Json(profile))
}
