//! User models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Category;
use crate::types::GeoPoint;

/// Account capability tier
///
/// A customer is promoted to `BusinessOwner` on their first business
/// registration; the promotion does not remove customer capabilities.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "user_type", rename_all = "snake_case")]
pub enum UserType {
    Customer,
    BusinessOwner,
}

/// A user account on the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub is_phone_verified: bool,
    pub is_email_verified: bool,
    pub name: Option<String>,
    pub user_type: UserType,
    pub preferences: Vec<Category>,
    pub location: Option<GeoPoint>,
    pub push_token: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for updating a user's last-known location
#[derive(Debug, Clone, Deserialize)]
pub struct LocationUpdate {
    pub latitude: f64,
    pub longitude: f64,
}
