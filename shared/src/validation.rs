//! Validation helpers shared by the backend request boundary

use chrono::{DateTime, Utc};

/// Validate a phone contact (digits, optional leading +, 7-15 digits)
pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    let trimmed = phone.strip_prefix('+').unwrap_or(phone);
    let digits: String = trimmed.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() < 7 || digits.len() > 15 {
        return Err("Phone number must contain 7-15 digits");
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || c == '-' || c == ' ')
    {
        return Err("Phone number may only contain digits, spaces and dashes");
    }
    Ok(())
}

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate that an offer's validity window has not already closed
pub fn validate_validity_window(
    valid_until: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<(), &'static str> {
    if valid_until <= now {
        return Err("valid_until must be in the future");
    }
    Ok(())
}

/// Validate a discovery radius
pub fn validate_radius(radius_meters: f64) -> Result<(), &'static str> {
    if !radius_meters.is_finite() || radius_meters < 0.0 {
        return Err("Radius must be a non-negative number of meters");
    }
    Ok(())
}
