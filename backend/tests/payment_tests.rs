//! Payment order lifecycle tests
//!
//! Tests for the order state machine and purchase derivation including:
//! - Pending to completed exactly once
//! - Conflict on repeated completion
//! - Purchase amounts derived from the order's frozen snapshot

use rust_decimal::Decimal;

use shared::ledger::{discount_amount, fee_split};
use shared::models::OrderStatus;

/// Minimal in-memory mirror of the order lifecycle, matching the conditional
/// update the service issues against Postgres.
struct OrderSim {
    status: OrderStatus,
    amount: Decimal,
    platform_fee: Decimal,
    merchant_amount: Decimal,
    original_price_snapshot: Option<Decimal>,
    offer_uses: i32,
    external_payment_id: Option<String>,
}

enum CompleteError {
    AlreadyProcessed,
}

impl OrderSim {
    fn create(amount: Decimal, original_price_snapshot: Option<Decimal>) -> Self {
        let (platform_fee, merchant_amount) = fee_split(amount);
        Self {
            status: OrderStatus::Pending,
            amount,
            platform_fee,
            merchant_amount,
            original_price_snapshot,
            offer_uses: 0,
            external_payment_id: None,
        }
    }

    /// Succeeds only while pending, mirroring `WHERE status = 'pending'`.
    fn complete(&mut self, external_payment_id: &str) -> Result<(), CompleteError> {
        if self.status != OrderStatus::Pending {
            return Err(CompleteError::AlreadyProcessed);
        }
        self.status = OrderStatus::Completed;
        self.external_payment_id = Some(external_payment_id.to_string());
        self.offer_uses += 1;
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Orders start pending with the fee split already computed
    #[test]
    fn test_order_created_pending() {
        let order = OrderSim::create(Decimal::from(400), Some(Decimal::from(500)));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.platform_fee, Decimal::from(8));
        assert_eq!(order.merchant_amount, Decimal::from(392));
        assert!(order.external_payment_id.is_none());
    }

    /// The first completion flips the order and records the gateway id
    #[test]
    fn test_first_completion_succeeds() {
        let mut order = OrderSim::create(Decimal::from(400), None);
        assert!(order.complete("pay_123").is_ok());
        assert_eq!(order.status, OrderStatus::Completed);
        assert_eq!(order.external_payment_id.as_deref(), Some("pay_123"));
    }

    /// A second completion is rejected and changes nothing
    #[test]
    fn test_double_completion_conflicts() {
        let mut order = OrderSim::create(Decimal::from(400), None);
        order.complete("pay_123").ok();

        assert!(matches!(
            order.complete("pay_456"),
            Err(CompleteError::AlreadyProcessed)
        ));
        assert_eq!(order.external_payment_id.as_deref(), Some("pay_123"));
    }

    /// Offer usage increments exactly once across repeated confirmations
    #[test]
    fn test_usage_increments_once() {
        let mut order = OrderSim::create(Decimal::from(400), Some(Decimal::from(500)));
        order.complete("pay_123").ok();
        order.complete("pay_123").ok();
        order.complete("pay_789").ok();

        assert_eq!(order.offer_uses, 1);
    }

    /// Purchase amounts come from the frozen snapshot, not the live offer
    #[test]
    fn test_purchase_derivation() {
        let order = OrderSim::create(Decimal::from(400), Some(Decimal::from(500)));

        let discount = discount_amount(order.original_price_snapshot, order.amount);
        let original = order.original_price_snapshot.unwrap_or(order.amount);

        assert_eq!(original, Decimal::from(500));
        assert_eq!(discount, Decimal::from(100));
        assert_eq!(order.amount, Decimal::from(400));
        assert_eq!(order.platform_fee, Decimal::from(8));
    }

    /// Orders without an offer record the charged amount as the original
    #[test]
    fn test_purchase_without_offer() {
        let order = OrderSim::create(Decimal::from(250), None);

        let discount = discount_amount(order.original_price_snapshot, order.amount);
        let original = order.original_price_snapshot.unwrap_or(order.amount);

        assert_eq!(original, Decimal::from(250));
        assert_eq!(discount, Decimal::ZERO);
    }

    /// Two racing confirmations: exactly one wins
    #[test]
    fn test_exactly_one_winner() {
        let mut order = OrderSim::create(Decimal::from(100), None);
        let attempts = ["pay_a", "pay_b", "pay_c"];

        let successes = attempts
            .iter()
            .filter(|id| order.complete(id).is_ok())
            .count();

        assert_eq!(successes, 1);
        assert_eq!(order.status, OrderStatus::Completed);
    }
}
