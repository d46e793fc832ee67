//! Offer management HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::models::{CreateOfferInput, Offer};
use crate::services::notification::ExpoPushClient;
use crate::services::offer::{NearbyOffersResponse, NearbyQuery};
use crate::services::{NotificationService, OfferService};
use crate::AppState;

/// Publish an offer for one of the current user's businesses
///
/// Eligible nearby users are alerted in the background; the response never
/// waits on fan-out.
pub async fn create_offer(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(business_id): Path<Uuid>,
    Json(input): Json<CreateOfferInput>,
) -> AppResult<(StatusCode, Json<Offer>)> {
    let service = OfferService::new(state.db.clone());
    let (offer, business) = service
        .create_offer(current_user.0.user_id, business_id, input)
        .await?;

    let push_client = ExpoPushClient::from_config(&state.config.push);
    let notifier = NotificationService::with_push_client(state.db.clone(), push_client);
    let spawned_offer = offer.clone();
    tokio::spawn(async move {
        if let Err(e) = notifier.fan_out_new_offer(&business, &spawned_offer).await {
            tracing::error!(offer_id = %spawned_offer.id, "Offer fan-out failed: {}", e);
        }
    });

    Ok((StatusCode::CREATED, Json(offer)))
}

/// List the active offers of one business
pub async fn business_offers(
    State(state): State<AppState>,
    Path(business_id): Path<Uuid>,
) -> AppResult<Json<Vec<Offer>>> {
    let service = OfferService::new(state.db);
    let offers = service.business_offers(business_id).await?;
    Ok(Json(offers))
}

/// List the current user's offers across all their businesses
pub async fn my_offers(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<serde_json::Value>> {
    let service = OfferService::new(state.db);
    let offers = service.my_offers(current_user.0.user_id).await?;

    let entries: Vec<serde_json::Value> = offers
        .into_iter()
        .map(|(offer, business)| {
            serde_json::json!({
                "offer": offer,
                "business_info": business,
            })
        })
        .collect();

    Ok(Json(serde_json::json!({ "offers": entries })))
}

/// Deactivate one of the current user's offers
pub async fn deactivate_offer(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(offer_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let service = OfferService::new(state.db);
    service
        .deactivate_offer(current_user.0.user_id, offer_id)
        .await?;
    Ok(Json(serde_json::json!({ "message": "Offer deactivated" })))
}

/// Offers near a location, closest business first
pub async fn nearby_offers(
    State(state): State<AppState>,
    Json(query): Json<NearbyQuery>,
) -> AppResult<Json<NearbyOffersResponse>> {
    let service = OfferService::new(state.db);
    let response = service.nearby_offers(query).await?;
    Ok(Json(response))
}
