//! User profile HTTP handlers

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::models::{Category, LocationUpdate, User};
use crate::services::UserService;
use crate::AppState;

#[derive(Deserialize)]
pub struct UpdatePreferencesRequest {
    pub preferences: Vec<Category>,
}

#[derive(Deserialize)]
pub struct UpdatePushTokenRequest {
    pub push_token: String,
}

/// Get the current user's profile
pub async fn get_profile(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<User>> {
    let service = UserService::new(state.db);
    let profile = service.get_profile(current_user.0.user_id).await?;
    Ok(Json(profile))
}

/// Replace the current user's category preferences
pub async fn update_preferences(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<UpdatePreferencesRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let service = UserService::new(state.db);
    service
        .update_preferences(current_user.0.user_id, body.preferences)
        .await?;
    Ok(Json(serde_json::json!({ "message": "Preferences updated" })))
}

/// Update the current user's location
pub async fn update_location(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<LocationUpdate>,
) -> AppResult<Json<serde_json::Value>> {
    let service = UserService::new(state.db);
    service.update_location(current_user.0.user_id, body).await?;
    Ok(Json(serde_json::json!({ "message": "Location updated" })))
}

/// Register the current user's push delivery token
pub async fn update_push_token(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<UpdatePushTokenRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let service = UserService::new(state.db);
    service
        .update_push_token(current_user.0.user_id, body.push_token)
        .await?;
    Ok(Json(serde_json::json!({ "message": "Push token registered" })))
}
