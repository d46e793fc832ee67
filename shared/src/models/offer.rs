//! Offer models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Business;

/// How an offer's discount is expressed (closed set)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "discount_type", rename_all = "snake_case")]
pub enum DiscountType {
    Percentage,
    FixedAmount,
}

/// A time-bounded discount published by a business
///
/// `discounted_price` is stamped once at creation and never recomputed,
/// even if the discount fields were later mutated out of band.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Offer {
    pub id: Uuid,
    pub business_id: Uuid,
    pub title: String,
    pub description: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub original_price: Option<Decimal>,
    pub discounted_price: Option<Decimal>,
    /// Inline base64 image from the mobile client
    pub image_base64: Option<String>,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub max_uses: Option<i32>,
    pub current_uses: i32,
    pub is_active: bool,
    pub terms_conditions: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for publishing a new offer
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOfferInput {
    pub title: String,
    pub description: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub original_price: Option<Decimal>,
    pub image_base64: Option<String>,
    /// RFC 3339 timestamp; rejected with a validation error when malformed
    pub valid_until: String,
    pub max_uses: Option<i32>,
    pub terms_conditions: Option<String>,
}

/// An offer joined with its business and distance from a query origin
#[derive(Debug, Clone, Serialize)]
pub struct OfferWithBusiness {
    #[serde(flatten)]
    pub offer: Offer,
    pub business_info: Business,
    pub distance_meters: f64,
}
