//! Nearby-business discovery HTTP handlers

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::services::discovery::NearbyBusinessesResponse;
use crate::services::offer::NearbyQuery;
use crate::services::DiscoveryService;
use crate::AppState;

/// Find active businesses near a location, closest first
pub async fn discover_nearby(
    State(state): State<AppState>,
    Json(query): Json<NearbyQuery>,
) -> AppResult<Json<NearbyBusinessesResponse>> {
    let service = DiscoveryService::new(state.db);
    let response = service.discover_nearby(query).await?;
    Ok(Json(response))
}
