//! Business registration and listing service

use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{Business, Category, CreateBusinessInput};
use shared::types::GeoPoint;
use shared::validation::validate_phone;

/// Business service
#[derive(Clone)]
pub struct BusinessService {
    db: PgPool,
}

/// Database row for a business; location is stored as two nullable columns
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct BusinessRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub business_name: String,
    pub description: Option<String>,
    pub category: Category,
    pub phone_number: String,
    pub email: Option<String>,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<BusinessRow> for Business {
    fn from(row: BusinessRow) -> Self {
        let location = match (row.latitude, row.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint::new(latitude, longitude)),
            _ => None,
        };
        Self {
            id: row.id,
            owner_id: row.owner_id,
            business_name: row.business_name,
            description: row.description,
            category: row.category,
            phone_number: row.phone_number,
            email: row.email,
            address: row.address,
            location,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

pub(crate) const BUSINESS_COLUMNS: &str = "id, owner_id, business_name, description, category, \
     phone_number, email, address, latitude, longitude, is_active, created_at";

/// One entry of the category catalog exposed to clients
#[derive(Debug, Serialize)]
pub struct CategoryEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
}

impl BusinessService {
    /// Create a new BusinessService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Register a new business owned by the current user
    ///
    /// Promotes the owner to `business_owner`; the promotion does not remove
    /// their customer capabilities.
    pub async fn create_business(
        &self,
        owner_id: Uuid,
        input: CreateBusinessInput,
    ) -> AppResult<Business> {
        input.location.validate().map_err(|msg| AppError::Validation {
            field: "location".to_string(),
            message: msg.to_string(),
        })?;
        validate_phone(&input.phone_number).map_err(|msg| AppError::Validation {
            field: "phone_number".to_string(),
            message: msg.to_string(),
        })?;

        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, BusinessRow>(&format!(
            r#"
            INSERT INTO businesses (owner_id, business_name, description, category,
                                    phone_number, email, address, latitude, longitude)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            BUSINESS_COLUMNS
        ))
        .bind(owner_id)
        .bind(&input.business_name)
        .bind(&input.description)
        .bind(input.category)
        .bind(&input.phone_number)
        .bind(&input.email)
        .bind(&input.address)
        .bind(input.location.latitude)
        .bind(input.location.longitude)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE users SET user_type = 'business_owner' WHERE id = $1")
            .bind(owner_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Business::from(row))
    }

    /// Get businesses owned by a user
    pub async fn my_businesses(&self, owner_id: Uuid) -> AppResult<Vec<Business>> {
        let rows = sqlx::query_as::<_, BusinessRow>(&format!(
            "SELECT {} FROM businesses WHERE owner_id = $1 ORDER BY created_at DESC",
            BUSINESS_COLUMNS
        ))
        .bind(owner_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Business::from).collect())
    }

    /// The closed category catalog
    pub fn categories() -> Vec<CategoryEntry> {
        Category::ALL
            .iter()
            .map(|c| CategoryEntry {
                id: c.id(),
                name: c.display_name(),
                icon: c.icon(),
            })
            .collect()
    }
}
