//! Service catalog HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::models::{CreateServiceInput, Service};
use crate::services::CatalogService;
use crate::AppState;

/// Add a service to one of the current user's businesses
pub async fn create_service(
    State(state): State<AppState>,
    Path(business_id): Path<Uuid>,
    current_user: CurrentUser,
    Json(input): Json<CreateServiceInput>,
) -> AppResult<(StatusCode, Json<Service>)> {
    let service = CatalogService::new(state.db)
        .create_service(current_user.0.user_id, business_id, input)
        .await?;
    Ok((StatusCode::CREATED, Json(service)))
}

/// List the active service catalog of a business
pub async fn business_services(
    State(state): State<AppState>,
    Path(business_id): Path<Uuid>,
) -> AppResult<Json<Vec<Service>>> {
    let services = CatalogService::new(state.db)
        .business_services(business_id)
        .await?;
    Ok(Json(services))
}
