//! Notification service for offer alerts and payment confirmations
//!
//! Supports:
//! - Fan-out of new-offer alerts to nearby users
//! - Expo push delivery (best effort, never blocks the caller's request)
//! - In-app notification history

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::PushConfig;
use crate::error::AppResult;
use crate::services::user::{UserRow, USER_COLUMNS};
use shared::fanout::{self, compose_offer_message};
use shared::models::{Business, Notification, NotificationKind, Offer, User};

/// Notification service
#[derive(Clone)]
pub struct NotificationService {
    db: PgPool,
    push_client: Option<ExpoPushClient>,
}

/// Expo Push API client
#[derive(Clone)]
pub struct ExpoPushClient {
    endpoint: String,
    http_client: reqwest::Client,
}

/// Expo push message
#[derive(Debug, Serialize)]
struct ExpoPushMessage {
    to: String,
    sound: String,
    title: String,
    body: String,
    data: serde_json::Value,
}

/// Expo API response wrapper
#[derive(Debug, Deserialize)]
struct ExpoPushResponse {
    #[serde(default)]
    data: Vec<ExpoPushTicket>,
}

/// Per-message delivery ticket
#[derive(Debug, Deserialize)]
struct ExpoPushTicket {
    status: String,
    #[serde(default)]
    message: Option<String>,
}

/// Result of one fan-out run
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct FanoutOutcome {
    pub notified: usize,
    pub pushes_attempted: usize,
    pub pushes_delivered: usize,
}

const NOTIFICATION_COLUMNS: &str =
    "id, user_id, recipient_contact, message, kind, created_at";

impl ExpoPushClient {
    /// Create a new Expo push client
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            http_client: reqwest::Client::new(),
        }
    }

    /// Create from push config; None when push delivery is disabled
    pub fn from_config(config: &PushConfig) -> Option<Self> {
        if config.enabled {
            Some(Self::new(config.endpoint.clone()))
        } else {
            None
        }
    }

    /// Send a push notification to one device token
    ///
    /// Tokens that are not Expo tokens are skipped silently; the mobile app
    /// only ever registers `ExponentPushToken[...]` values.
    pub async fn send_push(
        &self,
        push_token: &str,
        title: &str,
        body: &str,
        data: serde_json::Value,
    ) -> Result<(), String> {
        if !push_token.starts_with("ExponentPushToken[") {
            return Err(format!("Not an Expo push token: {}", push_token));
        }

        let message = ExpoPushMessage {
            to: push_token.to_string(),
            sound: "default".to_string(),
            title: title.to_string(),
            body: body.to_string(),
            data,
        };

        let response = self
            .http_client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&vec![message])
            .send()
            .await
            .map_err(|e| format!("Failed to reach Expo push API: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("Expo push API returned {}", response.status()));
        }

        let body: ExpoPushResponse = response
            .json()
            .await
            .map_err(|e| format!("Invalid Expo push API response: {}", e))?;

        match body.data.first() {
            Some(ticket) if ticket.status == "ok" => Ok(()),
            Some(ticket) => Err(ticket
                .message
                .clone()
                .unwrap_or_else(|| "Push rejected".to_string())),
            None => Err("Empty Expo push API response".to_string()),
        }
    }
}

impl NotificationService {
    /// Create a new NotificationService without push delivery
    pub fn new(db: PgPool) -> Self {
        Self {
            db,
            push_client: None,
        }
    }

    /// Create with an Expo push client
    pub fn with_push_client(db: PgPool, push_client: Option<ExpoPushClient>) -> Self {
        Self { db, push_client }
    }

    // ========================================================================
    // Fan-out
    // ========================================================================

    /// Alert every eligible user about a freshly published offer
    ///
    /// Eligibility: a known location within the alert radius of the business
    /// and the business category among the user's preferences. Each user is
    /// handled independently; a failure for one never aborts the rest.
    pub async fn fan_out_new_offer(
        &self,
        business: &Business,
        offer: &Offer,
    ) -> AppResult<FanoutOutcome> {
        let business_location = match business.location {
            Some(loc) => loc,
            None => {
                tracing::warn!(
                    business_id = %business.id,
                    "Skipping offer fan-out: business has no location"
                );
                return Ok(FanoutOutcome::default());
            }
        };

        let rows = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            SELECT {} FROM users
            WHERE is_active = true
              AND latitude IS NOT NULL
              AND longitude IS NOT NULL
            "#,
            USER_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        let message = compose_offer_message(
            &business.business_name,
            &offer.title,
            &offer.description,
            offer.discount_type,
            offer.discount_value,
        );

        let mut outcome = FanoutOutcome::default();
        for user in rows.into_iter().map(User::from) {
            if !fanout::should_alert(business_location, business.category, &user) {
                continue;
            }
            let contact = match user.phone_number.as_deref() {
                Some(c) if !c.is_empty() => c,
                _ => continue,
            };

            if let Err(e) = self
                .record_notification(user.id, contact, &message, NotificationKind::NewOffer)
                .await
            {
                tracing::error!(user_id = %user.id, "Failed to record offer alert: {}", e);
                continue;
            }
            outcome.notified += 1;

            if let (Some(client), Some(token)) = (&self.push_client, user.push_token.as_deref()) {
                outcome.pushes_attempted += 1;
                let data = serde_json::json!({
                    "type": "new_offer",
                    "offer_id": offer.id,
                    "business_id": business.id,
                });
                match client
                    .send_push(token, &business.business_name, &message, data)
                    .await
                {
                    Ok(()) => outcome.pushes_delivered += 1,
                    Err(e) => {
                        tracing::warn!(user_id = %user.id, "Push delivery failed: {}", e);
                    }
                }
            }
        }

        tracing::info!(
            offer_id = %offer.id,
            notified = outcome.notified,
            pushes_delivered = outcome.pushes_delivered,
            "Offer fan-out complete"
        );

        Ok(outcome)
    }

    /// Record a payment confirmation for the paying customer
    pub async fn notify_payment_success(
        &self,
        customer_id: Uuid,
        message: &str,
    ) -> AppResult<()> {
        let contact = sqlx::query_scalar::<_, Option<String>>(
            "SELECT phone_number FROM users WHERE id = $1",
        )
        .bind(customer_id)
        .fetch_optional(&self.db)
        .await?;

        let contact = match contact.flatten() {
            Some(c) if !c.is_empty() => c,
            _ => return Ok(()),
        };

        self.record_notification(customer_id, &contact, message, NotificationKind::PaymentSuccess)
            .await?;

        Ok(())
    }

    /// Notification history for a user, newest first
    pub async fn list_notifications(&self, user_id: Uuid) -> AppResult<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, Notification>(&format!(
            r#"
            SELECT {} FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT 100
            "#,
            NOTIFICATION_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(notifications)
    }

    async fn record_notification(
        &self,
        user_id: Uuid,
        recipient_contact: &str,
        message: &str,
        kind: NotificationKind,
    ) -> AppResult<Notification> {
        let notification = sqlx::query_as::<_, Notification>(&format!(
            r#"
            INSERT INTO notifications (user_id, recipient_contact, message, kind)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            NOTIFICATION_COLUMNS
        ))
        .bind(user_id)
        .bind(recipient_contact)
        .bind(message)
        .bind(kind)
        .fetch_one(&self.db)
        .await?;

        Ok(notification)
    }
}
