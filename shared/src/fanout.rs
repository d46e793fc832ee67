//! New-offer alert fan-out policy
//!
//! Decides *who* gets told about a freshly published offer and *what* the
//! message says. Delivery itself lives behind the backend's notification
//! service.

use rust_decimal::Decimal;

use crate::geo::distance_meters;
use crate::models::{Category, DiscountType, User};
use crate::types::GeoPoint;

/// Fixed push-alert radius in meters
///
/// Deliberately independent of the caller-tunable discovery radius: pull
/// discovery lets the client choose how far to look, push alerts always use
/// this policy value.
pub const ALERT_RADIUS_METERS: f64 = 5_000.0;

/// Whether a user qualifies for a new-offer alert from a business
///
/// Requires a stored user location, a preference match on the business
/// category, and a distance within [`ALERT_RADIUS_METERS`].
pub fn should_alert(business_location: GeoPoint, business_category: Category, user: &User) -> bool {
    let Some(user_location) = user.location else {
        return false;
    };
    if !user.preferences.contains(&business_category) {
        return false;
    }
    distance_meters(business_location, user_location) <= ALERT_RADIUS_METERS
}

/// Human-readable discount tag: "20% OFF" or "$100 OFF"
pub fn discount_descriptor(discount_type: DiscountType, discount_value: Decimal) -> String {
    match discount_type {
        DiscountType::Percentage => format!("{}% OFF", discount_value),
        DiscountType::FixedAmount => format!("${} OFF", discount_value),
    }
}

/// Compose the alert message body for a new offer
pub fn compose_offer_message(
    business_name: &str,
    title: &str,
    description: &str,
    discount_type: DiscountType,
    discount_value: Decimal,
) -> String {
    format!(
        "{} at {}: {} - {}",
        discount_descriptor(discount_type, discount_value),
        business_name,
        title,
        description
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    use crate::models::UserType;

    fn user_at(location: Option<GeoPoint>, preferences: Vec<Category>) -> User {
        User {
            id: Uuid::new_v4(),
            phone_number: Some("+919812345678".to_string()),
            email: None,
            is_phone_verified: true,
            is_email_verified: false,
            name: None,
            user_type: UserType::Customer,
            preferences,
            location,
            push_token: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    const BUSINESS: GeoPoint = GeoPoint {
        latitude: 12.9716,
        longitude: 77.5946,
    };

    #[test]
    fn test_nearby_matching_user_alerted() {
        // ~1.1 km north
        let user = user_at(Some(GeoPoint::new(12.9816, 77.5946)), vec![Category::Food]);
        assert!(should_alert(BUSINESS, Category::Food, &user));
    }

    #[test]
    fn test_preference_mismatch_not_alerted() {
        // In range, wrong category preference
        let user = user_at(Some(GeoPoint::new(12.9816, 77.5946)), vec![Category::Spa]);
        assert!(!should_alert(BUSINESS, Category::Food, &user));
    }

    #[test]
    fn test_out_of_range_not_alerted() {
        // ~5.6 km north: preference matches but too far
        let user = user_at(Some(GeoPoint::new(13.0221, 77.5946)), vec![Category::Food]);
        assert!(!should_alert(BUSINESS, Category::Food, &user));
    }

    #[test]
    fn test_just_inside_radius_alerted() {
        // ~4.4 km north
        let user = user_at(Some(GeoPoint::new(13.0116, 77.5946)), vec![Category::Food]);
        assert!(should_alert(BUSINESS, Category::Food, &user));
    }

    #[test]
    fn test_unlocated_user_not_alerted() {
        let user = user_at(None, vec![Category::Food]);
        assert!(!should_alert(BUSINESS, Category::Food, &user));
    }

    #[test]
    fn test_discount_descriptor() {
        use rust_decimal::Decimal;

        assert_eq!(
            discount_descriptor(DiscountType::Percentage, Decimal::from(20)),
            "20% OFF"
        );
        assert_eq!(
            discount_descriptor(DiscountType::FixedAmount, Decimal::from(100)),
            "$100 OFF"
        );
    }

    #[test]
    fn test_message_contains_offer_details() {
        use rust_decimal::Decimal;

        let message = compose_offer_message(
            "Corner Cafe",
            "Monsoon special",
            "Flat discount on all mains",
            DiscountType::Percentage,
            Decimal::from(20),
        );
        assert!(message.contains("Monsoon special"));
        assert!(message.contains("Flat discount on all mains"));
        assert!(message.contains("20% OFF"));
        assert!(message.contains("Corner Cafe"));
    }
}
