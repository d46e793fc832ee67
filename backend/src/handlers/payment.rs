//! Payment HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::models::{CompleteOrderInput, CreateOrderInput, PaymentOrder, Purchase};
use crate::services::payment::{CompleteOrderResponse, CreateOrderResponse};
use crate::services::PaymentService;
use crate::AppState;

/// Create a pending payment order
pub async fn create_order(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateOrderInput>,
) -> AppResult<(StatusCode, Json<CreateOrderResponse>)> {
    let service = PaymentService::new(state.db);
    let response = service.create_order(current_user.0.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Confirm a payment order after the gateway reports success
pub async fn complete_order(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(order_id): Path<Uuid>,
    Json(input): Json<CompleteOrderInput>,
) -> AppResult<Json<CompleteOrderResponse>> {
    let service = PaymentService::new(state.db);
    let response = service
        .complete_order(current_user.0.user_id, order_id, input)
        .await?;
    Ok(Json(response))
}

/// List the current user's payment orders
pub async fn list_orders(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<PaymentOrder>>> {
    let service = PaymentService::new(state.db);
    let orders = service.customer_orders(current_user.0.user_id).await?;
    Ok(Json(orders))
}

/// List the current user's purchases
pub async fn list_purchases(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<Purchase>>> {
    let service = PaymentService::new(state.db);
    let purchases = service.customer_purchases(current_user.0.user_id).await?;
    Ok(Json(purchases))
}
