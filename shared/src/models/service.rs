//! Service catalog models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Category;

/// A catalog entry a business offers (a haircut, a massage, a lunch set)
///
/// Distinct from an offer: services describe what a business sells, offers
/// describe a time-bounded discount on it.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Service {
    pub id: Uuid,
    pub business_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub duration_minutes: Option<i32>,
    pub category: Category,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for adding a service to a business catalog
#[derive(Debug, Clone, Deserialize)]
pub struct CreateServiceInput {
    pub name: String,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub duration_minutes: Option<i32>,
    pub category: Category,
}

impl CreateServiceInput {
    /// Validate the catalog entry before it is stored
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("Service name must not be empty");
        }
        if matches!(self.price, Some(p) if p <= Decimal::ZERO) {
            return Err("Service price must be positive");
        }
        if matches!(self.duration_minutes, Some(d) if d <= 0) {
            return Err("Service duration must be positive");
        }
        Ok(())
    }
}
