//! Authentication service: OTP issuance/verification and token management
//!
//! OTP delivery is mocked; the generated code is logged and echoed back in
//! the response for demo flows. Verifying a code finds or creates the user
//! for the contact and issues a bearer JWT.

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::middleware::Claims;
use shared::validation::{validate_email, validate_phone};

/// OTP codes expire after this many minutes
const OTP_EXPIRY_MINUTES: i64 = 10;

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: PgPool,
    jwt_secret: String,
    access_token_expiry: i64,
}

/// Where an OTP is delivered (closed set)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "contact_type", rename_all = "snake_case")]
pub enum ContactType {
    Phone,
    Email,
}

/// Input for requesting an OTP
#[derive(Debug, Deserialize)]
pub struct SendOtpInput {
    pub contact: String,
    pub contact_type: ContactType,
}

/// Response after an OTP send
#[derive(Debug, Serialize)]
pub struct SendOtpResponse {
    pub success: bool,
    pub message: String,
    /// Demo-only echo of the generated code; remove for real delivery
    pub demo_otp: String,
}

/// Input for verifying an OTP
#[derive(Debug, Deserialize)]
pub struct VerifyOtpInput {
    pub contact: String,
    pub contact_type: ContactType,
    pub otp_code: String,
}

/// Bearer token issued after successful verification
#[derive(Debug, Serialize)]
pub struct AuthToken {
    pub access_token: String,
    pub token_type: String,
    pub user_id: Uuid,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(db: PgPool, config: &Config) -> Self {
        Self {
            db,
            jwt_secret: config.jwt.secret.clone(),
            access_token_expiry: config.jwt.access_token_expiry,
        }
    }

    /// Generate a 6-digit OTP code
    ///
    /// Derived from a v4 UUID's random bits; demo-grade, not a CSPRNG
    /// contract.
    fn generate_otp() -> String {
        let n = Uuid::new_v4().as_u128() % 1_000_000;
        format!("{:06}", n)
    }

    /// Send an OTP to a phone or email contact (mock delivery)
    pub async fn send_otp(&self, input: SendOtpInput) -> AppResult<SendOtpResponse> {
        match input.contact_type {
            ContactType::Phone => {
                validate_phone(&input.contact).map_err(|msg| AppError::Validation {
                    field: "contact".to_string(),
                    message: msg.to_string(),
                })?
            }
            ContactType::Email => {
                validate_email(&input.contact).map_err(|msg| AppError::Validation {
                    field: "contact".to_string(),
                    message: msg.to_string(),
                })?
            }
        }

        let otp_code = Self::generate_otp();
        let expires_at = Utc::now() + Duration::minutes(OTP_EXPIRY_MINUTES);

        sqlx::query(
            r#"
            INSERT INTO otp_verifications (contact, contact_type, otp_code, expires_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&input.contact)
        .bind(input.contact_type)
        .bind(&otp_code)
        .bind(expires_at)
        .execute(&self.db)
        .await?;

        // Mock SMS/email delivery
        match input.contact_type {
            ContactType::Phone => {
                tracing::info!("Mock SMS to {}: Your Nearmart OTP is {}", input.contact, otp_code)
            }
            ContactType::Email => {
                tracing::info!("Mock email to {}: Your Nearmart OTP is {}", input.contact, otp_code)
            }
        }

        Ok(SendOtpResponse {
            success: true,
            message: format!("OTP sent to {}", input.contact),
            demo_otp: otp_code,
        })
    }

    /// Verify an OTP and log the user in, creating the account on first use
    pub async fn verify_otp(&self, input: VerifyOtpInput) -> AppResult<AuthToken> {
        // Consume a matching, unexpired, unverified code
        let otp_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT id FROM otp_verifications
            WHERE contact = $1 AND contact_type = $2 AND otp_code = $3
              AND is_verified = false AND expires_at > NOW()
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(&input.contact)
        .bind(input.contact_type)
        .bind(&input.otp_code)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::ValidationError("Invalid or expired OTP".to_string()))?;

        sqlx::query("UPDATE otp_verifications SET is_verified = true WHERE id = $1")
            .bind(otp_id)
            .execute(&self.db)
            .await?;

        // Find or create the user for this contact
        let contact_column = match input.contact_type {
            ContactType::Phone => "phone_number",
            ContactType::Email => "email",
        };
        let verified_column = match input.contact_type {
            ContactType::Phone => "is_phone_verified",
            ContactType::Email => "is_email_verified",
        };

        let existing = sqlx::query_scalar::<_, Uuid>(&format!(
            "SELECT id FROM users WHERE {} = $1",
            contact_column
        ))
        .bind(&input.contact)
        .fetch_optional(&self.db)
        .await?;

        let user_id = match existing {
            Some(id) => {
                sqlx::query(&format!(
                    "UPDATE users SET {} = true WHERE id = $1",
                    verified_column
                ))
                .bind(id)
                .execute(&self.db)
                .await?;
                id
            }
            None => {
                sqlx::query_scalar::<_, Uuid>(&format!(
                    r#"
                    INSERT INTO users ({}, {})
                    VALUES ($1, true)
                    RETURNING id
                    "#,
                    contact_column, verified_column
                ))
                .bind(&input.contact)
                .fetch_one(&self.db)
                .await?
            }
        };

        let access_token = self.create_access_token(user_id)?;

        Ok(AuthToken {
            access_token,
            token_type: "bearer".to_string(),
            user_id,
        })
    }

    /// Create a signed access token for a user
    pub fn create_access_token(&self, user_id: Uuid) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.access_token_expiry)).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }
}
