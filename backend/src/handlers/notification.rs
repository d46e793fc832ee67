//! Notification history HTTP handlers

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::models::Notification;
use crate::services::NotificationService;
use crate::AppState;

/// List the current user's notifications, newest first
pub async fn list_notifications(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<Notification>>> {
    let service = NotificationService::new(state.db);
    let notifications = service.list_notifications(current_user.0.user_id).await?;
    Ok(Json(notifications))
}
