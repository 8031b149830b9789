//! Classification, scoring and scan handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{AppError, AppState};
use nutriscan_core::{
    nutrition_score, Capture, ClassificationResult, NutritionFacts, Product, UserProfile,
};

/// Request body for classification
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub product: Product,
    /// Profile to classify against; the stored profile when absent
    #[serde(default)]
    pub profile: Option<UserProfile>,
}

/// Classification result with the display score
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyResponse {
    pub result: ClassificationResult,
    pub nutrition_score: u8,
}

/// Score response
#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub score: u8,
}

/// What the uploaded image shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    Barcode,
    Ingredients,
}

/// Request body for a scan
#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    pub mode: ScanMode,
    /// Base64 image, optionally as a `data:` URL
    pub image: String,
}

/// Resolved product with its classification
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    pub product: Product,
    pub result: ClassificationResult,
    pub nutrition_score: u8,
}

/// Load the stored profile under the read lock
async fn stored_profile(state: &AppState) -> Result<UserProfile, AppError> {
    let _guard = state.profile_lock.read().await;
    state.profiles.load().map_err(AppError::from_core)
}

/// POST /api/classify - Classify a product against a profile
pub async fn classify_product(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ClassifyRequest>,
) -> Result<Json<ClassifyResponse>, AppError> {
    let profile = match req.profile {
        Some(profile) => profile,
        None => stored_profile(&state).await?,
    };

    let result = state.classifier.classify_for_profile(&req.product, &profile);
    let score = nutrition_score(&req.product.nutritional_info);

    Ok(Json(ClassifyResponse {
        result,
        nutrition_score: score,
    }))
}

/// POST /api/score - Score nutrition facts
pub async fn score_product(Json(facts): Json<NutritionFacts>) -> Json<ScoreResponse> {
    Json(ScoreResponse {
        score: nutrition_score(&facts),
    })
}

/// POST /api/scan - Resolve an image into a product and classify it
pub async fn scan_product(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ScanRequest>,
) -> Result<Json<ScanResponse>, AppError> {
    let image = decode_image(&req.image)?;

    let capture = match req.mode {
        ScanMode::Barcode => Capture::Barcode(image),
        ScanMode::Ingredients => Capture::IngredientLabel(image),
    };

    let product = state
        .resolver
        .resolve_capture(capture)
        .await
        .map_err(AppError::from_core)?;

    let profile = stored_profile(&state).await?;
    let result = state.classifier.classify_for_profile(&product, &profile);
    let score = nutrition_score(&product.nutritional_info);

    info!(
        product = %product.name,
        classification = %result.classification,
        "Scanned product"
    );

    Ok(Json(ScanResponse {
        product,
        result,
        nutrition_score: score,
    }))
}

/// Decode a base64 image, accepting a `data:image/...;base64,` prefix
fn decode_image(input: &str) -> Result<Vec<u8>, AppError> {
    let encoded = match input.split_once("base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => input,
    };

    let image = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|_| AppError::bad_request("Image is not valid base64"))?;

    if image.is_empty() {
        return Err(AppError::bad_request("No image data provided"));
    }

    Ok(image)
}
