//! Business service-catalog management

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{CreateServiceInput, Service};

/// Service catalog service
#[derive(Clone)]
pub struct CatalogService {
    db: PgPool,
}

const SERVICE_COLUMNS: &str =
    "id, business_id, name, description, price, duration_minutes, category, \
     is_active, created_at";

impl CatalogService {
    /// Create a new CatalogService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Add a service to a business owned by `owner_id`
    ///
    /// The ownership check is folded into the lookup; a business owned by
    /// someone else reads as not found.
    pub async fn create_service(
        &self,
        owner_id: Uuid,
        business_id: Uuid,
        input: CreateServiceInput,
    ) -> AppResult<Service> {
        input.validate().map_err(|msg| AppError::Validation {
            field: "service".to_string(),
            message: msg.to_string(),
        })?;

        let owned = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM businesses WHERE id = $1 AND owner_id = $2 AND is_active = true",
        )
        .bind(business_id)
        .bind(owner_id)
        .fetch_optional(&self.db)
        .await?;

        if owned.is_none() {
            return Err(AppError::NotFound("Business".to_string()));
        }

        let service = sqlx::query_as::<_, Service>(&format!(
            r#"
            INSERT INTO services (business_id, name, description, price,
                                  duration_minutes, category)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            SERVICE_COLUMNS
        ))
        .bind(business_id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.duration_minutes)
        .bind(input.category)
        .fetch_one(&self.db)
        .await?;

        Ok(service)
    }

    /// Active catalog entries of one business
    pub async fn business_services(&self, business_id: Uuid) -> AppResult<Vec<Service>> {
        let services = sqlx::query_as::<_, Service>(&format!(
            r#"
            SELECT {} FROM services
            WHERE business_id = $1 AND is_active = true
            ORDER BY created_at DESC
            "#,
            SERVICE_COLUMNS
        ))
        .bind(business_id)
        .fetch_all(&self.db)
        .await?;

        Ok(services)
    }
}
