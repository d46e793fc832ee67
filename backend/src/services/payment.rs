//! Payment order lifecycle and purchase ledger
//!
//! Orders are created pending with the platform fee split already computed.
//! Completion is a single conditional update, so two racing confirmations for
//! the same order can never both succeed.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::notification::NotificationService;
use shared::ledger;
use shared::models::{CompleteOrderInput, CreateOrderInput, OrderStatus, PaymentOrder, Purchase};

/// Payment service
#[derive(Clone)]
pub struct PaymentService {
    db: PgPool,
}

const ORDER_COLUMNS: &str = "id, customer_id, merchant_id, business_id, offer_id, \
     amount, platform_fee, merchant_amount, original_price_snapshot, status, \
     payment_method, external_payment_id, created_at, completed_at";

const PURCHASE_COLUMNS: &str = "id, payment_order_id, customer_id, merchant_id, \
     business_id, offer_id, original_amount, discount_amount, final_amount, \
     platform_revenue, created_at";

/// Response for order creation, with the payload the mobile client hands to
/// the payment gateway
#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub order: PaymentOrder,
    pub gateway: GatewayPayload,
}

/// Mock gateway checkout payload
#[derive(Debug, Serialize)]
pub struct GatewayPayload {
    pub order_reference: Uuid,
    pub amount: Decimal,
    pub currency: &'static str,
    pub payment_method: String,
}

/// Response for order completion
#[derive(Debug, Serialize)]
pub struct CompleteOrderResponse {
    pub order: PaymentOrder,
    pub purchase: Purchase,
}

impl PaymentService {
    /// Create a new PaymentService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a pending payment order
    ///
    /// The fee split and the offer's original-price snapshot are both fixed
    /// here; nothing recomputes them at completion time.
    pub async fn create_order(
        &self,
        customer_id: Uuid,
        input: CreateOrderInput,
    ) -> AppResult<CreateOrderResponse> {
        if input.amount <= Decimal::ZERO {
            return Err(AppError::Validation {
                field: "amount".to_string(),
                message: "Amount must be greater than zero".to_string(),
            });
        }

        let merchant_id = sqlx::query_scalar::<_, Uuid>(
            "SELECT owner_id FROM businesses WHERE id = $1 AND is_active = true",
        )
        .bind(input.business_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Business".to_string()))?;

        let original_price_snapshot = match input.offer_id {
            Some(offer_id) => {
                let snapshot = sqlx::query_scalar::<_, Option<Decimal>>(
                    r#"
                    SELECT original_price FROM offers
                    WHERE id = $1 AND business_id = $2 AND is_active = true
                    "#,
                )
                .bind(offer_id)
                .bind(input.business_id)
                .fetch_optional(&self.db)
                .await?
                .ok_or_else(|| AppError::NotFound("Offer".to_string()))?;
                snapshot
            }
            None => None,
        };

        let (platform_fee, merchant_amount) = ledger::fee_split(input.amount);

        let order = sqlx::query_as::<_, PaymentOrder>(&format!(
            r#"
            INSERT INTO payment_orders (customer_id, merchant_id, business_id, offer_id,
                                        amount, platform_fee, merchant_amount,
                                        original_price_snapshot, payment_method)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            ORDER_COLUMNS
        ))
        .bind(customer_id)
        .bind(merchant_id)
        .bind(input.business_id)
        .bind(input.offer_id)
        .bind(input.amount)
        .bind(platform_fee)
        .bind(merchant_amount)
        .bind(original_price_snapshot)
        .bind(&input.payment_method)
        .fetch_one(&self.db)
        .await?;

        let gateway = GatewayPayload {
            order_reference: order.id,
            amount: order.amount,
            currency: "USD",
            payment_method: order.payment_method.clone(),
        };

        Ok(CreateOrderResponse { order, gateway })
    }

    /// Confirm a pending order and write the purchase record
    ///
    /// Exactly-once: the update only matches while the order is still
    /// pending, so the second of two confirmations finds zero rows and is
    /// reported as a conflict. The purchase insert and the offer usage
    /// increment commit atomically with the status flip.
    pub async fn complete_order(
        &self,
        customer_id: Uuid,
        order_id: Uuid,
        input: CompleteOrderInput,
    ) -> AppResult<CompleteOrderResponse> {
        let mut tx = self.db.begin().await?;

        let order = sqlx::query_as::<_, PaymentOrder>(&format!(
            r#"
            UPDATE payment_orders
            SET status = 'completed', external_payment_id = $3, completed_at = NOW()
            WHERE id = $1 AND customer_id = $2 AND status = 'pending'
            RETURNING {}
            "#,
            ORDER_COLUMNS
        ))
        .bind(order_id)
        .bind(customer_id)
        .bind(&input.external_payment_id)
        .fetch_optional(&mut *tx)
        .await?;

        let order = match order {
            Some(order) => order,
            None => {
                // Distinguish a missing order from one already driven to a
                // terminal state.
                let status = sqlx::query_scalar::<_, OrderStatus>(
                    "SELECT status FROM payment_orders WHERE id = $1 AND customer_id = $2",
                )
                .bind(order_id)
                .bind(customer_id)
                .fetch_optional(&mut *tx)
                .await?;
                return match status {
                    Some(_) => Err(AppError::Conflict(
                        "Payment order already processed".to_string(),
                    )),
                    None => Err(AppError::NotFound("Payment order".to_string())),
                };
            }
        };

        let discount_amount = ledger::discount_amount(order.original_price_snapshot, order.amount);
        let original_amount = order.original_price_snapshot.unwrap_or(order.amount);

        let purchase = sqlx::query_as::<_, Purchase>(&format!(
            r#"
            INSERT INTO purchases (payment_order_id, customer_id, merchant_id, business_id,
                                   offer_id, original_amount, discount_amount,
                                   final_amount, platform_revenue)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            PURCHASE_COLUMNS
        ))
        .bind(order.id)
        .bind(order.customer_id)
        .bind(order.merchant_id)
        .bind(order.business_id)
        .bind(order.offer_id)
        .bind(original_amount)
        .bind(discount_amount)
        .bind(order.amount)
        .bind(order.platform_fee)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(offer_id) = order.offer_id {
            sqlx::query("UPDATE offers SET current_uses = current_uses + 1 WHERE id = $1")
                .bind(offer_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        // Best effort; the payment result never depends on notification
        // delivery.
        let db = self.db.clone();
        let paid_customer = order.customer_id;
        let amount = order.amount;
        tokio::spawn(async move {
            let message = format!("Payment of ${} completed successfully", amount);
            if let Err(e) = NotificationService::new(db)
                .notify_payment_success(paid_customer, &message)
                .await
            {
                tracing::warn!(order_id = %order_id, "Payment notification failed: {}", e);
            }
        });

        Ok(CompleteOrderResponse { order, purchase })
    }

    /// Orders placed by a customer, newest first
    pub async fn customer_orders(&self, customer_id: Uuid) -> AppResult<Vec<PaymentOrder>> {
        let orders = sqlx::query_as::<_, PaymentOrder>(&format!(
            r#"
            SELECT {} FROM payment_orders
            WHERE customer_id = $1
            ORDER BY created_at DESC
            "#,
            ORDER_COLUMNS
        ))
        .bind(customer_id)
        .fetch_all(&self.db)
        .await?;

        Ok(orders)
    }

    /// Purchase history for a customer, newest first
    pub async fn customer_purchases(&self, customer_id: Uuid) -> AppResult<Vec<Purchase>> {
        let purchases = sqlx::query_as::<_, Purchase>(&format!(
            r#"
            SELECT {} FROM purchases
            WHERE customer_id = $1
            ORDER BY created_at DESC
            "#,
            PURCHASE_COLUMNS
        ))
        .bind(customer_id)
        .fetch_all(&self.db)
        .await?;

        Ok(purchases)
    }
}
