//! User profile service

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{Category, LocationUpdate, User, UserType};
use shared::types::GeoPoint;

/// User service for profile, preference and location management
#[derive(Clone)]
pub struct UserService {
    db: PgPool,
}

/// Database row for a user; location is stored as two nullable columns
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub is_phone_verified: bool,
    pub is_email_verified: bool,
    pub name: Option<String>,
    pub user_type: UserType,
    pub preferences: Vec<Category>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub push_token: Option<String>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        let location = match (row.latitude, row.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint::new(latitude, longitude)),
            _ => None,
        };
        Self {
            id: row.id,
            phone_number: row.phone_number,
            email: row.email,
            is_phone_verified: row.is_phone_verified,
            is_email_verified: row.is_email_verified,
            name: row.name,
            user_type: row.user_type,
            preferences: row.preferences,
            location,
            push_token: row.push_token,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

pub(crate) const USER_COLUMNS: &str = "id, phone_number, email, is_phone_verified, \
     is_email_verified, name, user_type, preferences, latitude, longitude, \
     push_token, is_active, created_at";

impl UserService {
    /// Create a new UserService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get a user's profile
    pub async fn get_profile(&self, user_id: Uuid) -> AppResult<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        Ok(User::from(row))
    }

    /// Replace a user's category preferences
    ///
    /// Unknown categories are rejected before this point by enum
    /// deserialization at the request boundary.
    pub async fn update_preferences(
        &self,
        user_id: Uuid,
        preferences: Vec<Category>,
    ) -> AppResult<()> {
        let result = sqlx::query("UPDATE users SET preferences = $2 WHERE id = $1")
            .bind(user_id)
            .bind(&preferences)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User".to_string()));
        }

        Ok(())
    }

    /// Update a user's last-known location
    pub async fn update_location(&self, user_id: Uuid, update: LocationUpdate) -> AppResult<()> {
        let point = GeoPoint::new(update.latitude, update.longitude);
        point.validate().map_err(|msg| AppError::Validation {
            field: "location".to_string(),
            message: msg.to_string(),
        })?;

        let result = sqlx::query("UPDATE users SET latitude = $2, longitude = $3 WHERE id = $1")
            .bind(user_id)
            .bind(point.latitude)
            .bind(point.longitude)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User".to_string()));
        }

        Ok(())
    }

    /// Register or replace a user's push delivery token
    pub async fn update_push_token(&self, user_id: Uuid, push_token: String) -> AppResult<()> {
        let result = sqlx::query("UPDATE users SET push_token = $2 WHERE id = $1")
            .bind(user_id)
            .bind(&push_token)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User".to_string()));
        }

        Ok(())
    }
}
