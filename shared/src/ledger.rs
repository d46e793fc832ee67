//! Platform fee and discount accounting
//!
//! Pure money math backing the payment ledger. All values are `Decimal`;
//! the fee side of a split is rounded to cents and the merchant side takes
//! the remainder, so fee + merchant amount always equals the charged amount.

use rust_decimal::Decimal;

/// Platform commission on every completed purchase (2%)
pub const PLATFORM_FEE_RATE: Decimal = Decimal::from_parts(2, 0, 0, false, 2);

/// Split a charged amount into (platform fee, merchant amount)
///
/// The fee is rounded to cents; the merchant amount is the remainder, so the
/// two always sum back to `amount`.
pub fn fee_split(amount: Decimal) -> (Decimal, Decimal) {
    let fee = (amount * PLATFORM_FEE_RATE).round_dp(2);
    (fee, amount - fee)
}

/// Discount granted on a purchase, derived from the price snapshot taken at
/// order creation
///
/// Zero when no snapshot exists or the snapshot does not exceed the charged
/// amount; a purchase never records a negative discount.
pub fn discount_amount(original_price_snapshot: Option<Decimal>, charged: Decimal) -> Decimal {
    match original_price_snapshot {
        Some(original) => (original - charged).max(Decimal::ZERO),
        None => Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::prelude::FromPrimitive;

    #[test]
    fn test_fee_rate_is_two_percent() {
        assert_eq!(PLATFORM_FEE_RATE, Decimal::new(2, 2));
    }

    #[test]
    fn test_fee_split() {
        // 2% of 400 -> fee 8, merchant 392
        let (fee, merchant) = fee_split(Decimal::from(400));
        assert_eq!(fee, Decimal::from(8));
        assert_eq!(merchant, Decimal::from(392));
    }

    #[test]
    fn test_discount_amount_from_snapshot() {
        // snapshot 500, charged 400 -> discount 100
        let d = discount_amount(Some(Decimal::from(500)), Decimal::from(400));
        assert_eq!(d, Decimal::from(100));
    }

    #[test]
    fn test_discount_amount_without_snapshot() {
        assert_eq!(
            discount_amount(None, Decimal::from(400)),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_discount_amount_never_negative() {
        // Charged more than the snapshot (offer mutated out of band)
        let d = discount_amount(Some(Decimal::from(300)), Decimal::from(400));
        assert_eq!(d, Decimal::ZERO);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// fee + merchant amount always reconstructs the charged amount
        #[test]
        fn prop_fee_split_conserves_amount(amount in 0.0_f64..1_000_000.0) {
            let amount = Decimal::from_f64(amount).unwrap().round_dp(2);
            let (fee, merchant) = fee_split(amount);
            prop_assert_eq!(fee + merchant, amount);
            prop_assert!(fee >= Decimal::ZERO);
            prop_assert!(merchant <= amount);
        }
    }
}
