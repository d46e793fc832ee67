//! Authentication handlers

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::services::auth::{AuthToken, SendOtpInput, SendOtpResponse, VerifyOtpInput};
use crate::services::AuthService;
use crate::AppState;

/// Request an OTP for a phone number or email address
pub async fn send_otp(
    State(state): State<AppState>,
    Json(input): Json<SendOtpInput>,
) -> AppResult<Json<SendOtpResponse>> {
    let service = AuthService::new(state.db.clone(), &state.config);
    let response = service.send_otp(input).await?;
    Ok(Json(response))
}

/// Verify an OTP and receive a bearer token
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(input): Json<VerifyOtpInput>,
) -> AppResult<Json<AuthToken>> {
    let service = AuthService::new(state.db.clone(), &state.config);
    let token = service.verify_otp(input).await?;
    Ok(Json(token))
}
