//! Payment order and purchase models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payment order lifecycle (closed set)
///
/// `Pending -> Completed` and `Pending -> Failed` are the only legal
/// transitions; both terminal states are final.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "order_status", rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Completed,
    Failed,
}

/// A payment order recording intent to purchase
///
/// `original_price_snapshot` freezes the referenced offer's original price at
/// order-creation time so the discount accounting on the eventual purchase
/// cannot drift if the offer row changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PaymentOrder {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub merchant_id: Uuid,
    pub business_id: Uuid,
    pub offer_id: Option<Uuid>,
    pub amount: Decimal,
    pub platform_fee: Decimal,
    pub merchant_amount: Decimal,
    pub original_price_snapshot: Option<Decimal>,
    pub status: OrderStatus,
    pub payment_method: String,
    pub external_payment_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Input for creating a payment order
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderInput {
    pub business_id: Uuid,
    pub offer_id: Option<Uuid>,
    pub amount: Decimal,
    pub payment_method: String,
}

/// Input for completing a payment order
#[derive(Debug, Clone, Deserialize)]
pub struct CompleteOrderInput {
    pub external_payment_id: String,
}

/// Immutable record of a completed purchase
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Purchase {
    pub id: Uuid,
    pub payment_order_id: Uuid,
    pub customer_id: Uuid,
    pub merchant_id: Uuid,
    pub business_id: Uuid,
    pub offer_id: Option<Uuid>,
    pub original_amount: Decimal,
    pub discount_amount: Decimal,
    pub final_amount: Decimal,
    pub platform_revenue: Decimal,
    pub created_at: DateTime<Utc>,
}
