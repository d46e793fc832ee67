//! Offer pricing and ledger arithmetic tests
//!
//! Tests for discount computation and the platform fee split including:
//! - Percentage and fixed-amount discounts
//! - Zero floor on discounted prices
//! - Exact fee/merchant decomposition

use proptest::prelude::*;
use rust_decimal::Decimal;

use shared::ledger::{discount_amount, fee_split, PLATFORM_FEE_RATE};
use shared::models::DiscountType;
use shared::pricing::{discounted_price, validate_discount};

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// 20% off 500 is 400
    #[test]
    fn test_percentage_discount() {
        let price = discounted_price(
            Some(Decimal::from(500)),
            DiscountType::Percentage,
            Decimal::from(20),
        );
        assert_eq!(price, Some(Decimal::from(400)));
    }

    /// 50 off 200 is 150
    #[test]
    fn test_fixed_discount() {
        let price = discounted_price(
            Some(Decimal::from(200)),
            DiscountType::FixedAmount,
            Decimal::from(50),
        );
        assert_eq!(price, Some(Decimal::from(150)));
    }

    /// A fixed discount larger than the price floors at zero
    #[test]
    fn test_fixed_discount_floors_at_zero() {
        let price = discounted_price(
            Some(Decimal::from(30)),
            DiscountType::FixedAmount,
            Decimal::from(50),
        );
        assert_eq!(price, Some(Decimal::ZERO));
    }

    /// 100% off is free, not negative
    #[test]
    fn test_full_percentage_discount() {
        let price = discounted_price(
            Some(Decimal::from(250)),
            DiscountType::Percentage,
            Decimal::ONE_HUNDRED,
        );
        assert_eq!(price, Some(Decimal::ZERO));
    }

    /// Without an original price there is nothing to discount
    #[test]
    fn test_no_original_price() {
        let price = discounted_price(None, DiscountType::Percentage, Decimal::from(20));
        assert_eq!(price, None);
    }

    /// Discount values must be positive
    #[test]
    fn test_rejects_nonpositive_discount() {
        assert!(validate_discount(DiscountType::Percentage, Decimal::ZERO).is_err());
        assert!(validate_discount(DiscountType::FixedAmount, Decimal::from(-5)).is_err());
    }

    /// Percentages cannot exceed 100
    #[test]
    fn test_rejects_percentage_over_100() {
        assert!(validate_discount(DiscountType::Percentage, Decimal::from(101)).is_err());
        assert!(validate_discount(DiscountType::Percentage, Decimal::ONE_HUNDRED).is_ok());
    }

    /// Large fixed amounts are fine; the floor handles them at pricing time
    #[test]
    fn test_accepts_large_fixed_amount() {
        assert!(validate_discount(DiscountType::FixedAmount, Decimal::from(10_000)).is_ok());
    }

    /// The platform takes 2%
    #[test]
    fn test_fee_rate() {
        assert_eq!(PLATFORM_FEE_RATE, Decimal::new(2, 2));
    }

    /// 400 splits into an 8 fee and 392 for the merchant
    #[test]
    fn test_fee_split() {
        let (fee, merchant) = fee_split(Decimal::from(400));
        assert_eq!(fee, Decimal::from(8));
        assert_eq!(merchant, Decimal::from(392));
    }

    /// Fees round to cents
    #[test]
    fn test_fee_rounds_to_cents() {
        let (fee, merchant) = fee_split(Decimal::new(9999, 2));
        assert_eq!(fee, Decimal::new(200, 2));
        assert_eq!(merchant, Decimal::new(9799, 2));
    }

    /// Paying 400 against a 500 snapshot saved 100
    #[test]
    fn test_discount_amount_from_snapshot() {
        let saved = discount_amount(Some(Decimal::from(500)), Decimal::from(400));
        assert_eq!(saved, Decimal::from(100));
    }

    /// No snapshot means no recorded discount
    #[test]
    fn test_discount_amount_without_snapshot() {
        assert_eq!(discount_amount(None, Decimal::from(400)), Decimal::ZERO);
    }

    /// Paying more than the snapshot never yields a negative discount
    #[test]
    fn test_discount_amount_clamped() {
        let saved = discount_amount(Some(Decimal::from(300)), Decimal::from(400));
        assert_eq!(saved, Decimal::ZERO);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

fn money() -> impl Strategy<Value = Decimal> {
    (1i64..=1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    /// Percentage discounts follow price * (1 - value/100)
    #[test]
    fn prop_percentage_formula(original in money(), pct in 1u32..=100) {
        let value = Decimal::from(pct);
        let price = discounted_price(Some(original), DiscountType::Percentage, value).unwrap();
        let expected = original * (Decimal::ONE - value / Decimal::ONE_HUNDRED);
        prop_assert_eq!(price, expected);
    }

    /// Discounted prices are never negative
    #[test]
    fn prop_price_never_negative(original in money(), value in money()) {
        let price = discounted_price(Some(original), DiscountType::FixedAmount, value).unwrap();
        prop_assert!(price >= Decimal::ZERO);
    }

    /// The fee split loses nothing: fee + merchant == amount
    #[test]
    fn prop_fee_split_conserves_amount(amount in money()) {
        let (fee, merchant) = fee_split(amount);
        prop_assert_eq!(fee + merchant, amount);
        prop_assert!(fee >= Decimal::ZERO);
        prop_assert!(merchant >= Decimal::ZERO);
    }

    /// Recorded discounts are never negative
    #[test]
    fn prop_discount_nonnegative(snapshot in money(), charged in money()) {
        prop_assert!(discount_amount(Some(snapshot), charged) >= Decimal::ZERO);
    }
}
