//! Offer pricing rules
//!
//! The discounted price is computed exactly once, when an offer is created.
//! It is never re-derived from later state.

use rust_decimal::Decimal;

use crate::models::DiscountType;

/// Compute the discounted price for an offer
///
/// Returns `None` when no original price is known. Fixed-amount discounts
/// floor at zero; they never produce a negative price.
pub fn discounted_price(
    original_price: Option<Decimal>,
    discount_type: DiscountType,
    discount_value: Decimal,
) -> Option<Decimal> {
    let original = original_price?;
    let discounted = match discount_type {
        DiscountType::Percentage => {
            original * (Decimal::ONE - discount_value / Decimal::ONE_HUNDRED)
        }
        DiscountType::FixedAmount => (original - discount_value).max(Decimal::ZERO),
    };
    Some(discounted)
}

/// Validate a discount before an offer is created
///
/// Percentage discounts are capped at 100 so a stamped price can never go
/// negative, mirroring the fixed-amount floor.
pub fn validate_discount(
    discount_type: DiscountType,
    discount_value: Decimal,
) -> Result<(), &'static str> {
    if discount_value <= Decimal::ZERO {
        return Err("Discount value must be greater than zero");
    }
    if discount_type == DiscountType::Percentage && discount_value > Decimal::ONE_HUNDRED {
        return Err("Percentage discount cannot exceed 100");
    }
    Ok(())
}
