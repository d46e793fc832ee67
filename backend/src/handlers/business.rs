//! Business management HTTP handlers

use axum::{extract::State, http::StatusCode, Json};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::models::{Business, CreateBusinessInput};
use crate::services::business::CategoryEntry;
use crate::services::BusinessService;
use crate::AppState;

/// Register a business for the current user
///
/// The caller becomes a business owner on success.
pub async fn create_business(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateBusinessInput>,
) -> AppResult<(StatusCode, Json<Business>)> {
    let service = BusinessService::new(state.db);
    let business = service
        .create_business(current_user.0.user_id, input)
        .await?;
    Ok((StatusCode::CREATED, Json(business)))
}

/// List businesses owned by the current user
pub async fn my_businesses(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<Business>>> {
    let service = BusinessService::new(state.db);
    let businesses = service.my_businesses(current_user.0.user_id).await?;
    Ok(Json(businesses))
}

/// The fixed category catalog (public)
pub async fn list_categories() -> Json<Vec<CategoryEntry>> {
    Json(BusinessService::categories())
}
