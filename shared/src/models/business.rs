//! Business models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::GeoPoint;

/// Business categories supported by the platform (closed set)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "business_category", rename_all = "snake_case")]
pub enum Category {
    Food,
    Clothing,
    Spa,
}

impl sqlx::postgres::PgHasArrayType for Category {
    fn array_type_info() -> sqlx::postgres::PgTypeInfo {
        sqlx::postgres::PgTypeInfo::with_name("_business_category")
    }
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Food, Category::Clothing, Category::Spa];

    pub fn id(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Clothing => "clothing",
            Category::Spa => "spa",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Clothing => "Clothing",
            Category::Spa => "Beauty & Spa",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::Food => "restaurant",
            Category::Clothing => "tshirt-crew",
            Category::Spa => "spa",
        }
    }
}

/// A merchant business registered on the platform
///
/// Owned by exactly one user. Deactivation is a soft delete; discovery
/// skips inactive businesses but the record remains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Business {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub business_name: String,
    pub description: Option<String>,
    pub category: Category,
    pub phone_number: String,
    pub email: Option<String>,
    pub address: String,
    pub location: Option<GeoPoint>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for registering a new business
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBusinessInput {
    pub business_name: String,
    pub description: Option<String>,
    pub category: Category,
    pub phone_number: String,
    pub email: Option<String>,
    pub address: String,
    pub location: GeoPoint,
}

/// A business annotated with its distance from a query origin
#[derive(Debug, Clone, Serialize)]
pub struct BusinessWithDistance {
    #[serde(flatten)]
    pub business: Business,
    pub distance_meters: f64,
}
