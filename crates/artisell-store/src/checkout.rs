//! # Checkout Workflow
//!
//! The order placement workflow: cart snapshot → validation → transactional
//! order write → cart clearing.
//!
//! ## Control Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Workflow                                    │
//! │                                                                         │
//! │  checkout(user_id, form, cart_state)                                   │
//! │       │                                                                 │
//! │       ├── snapshot items + totals under the cart lock                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  place_order(user_id, form, items, totals)   ← the Order Writer entry  │
//! │       │                                                                 │
//! │       ├── 1. user_id blank/unknown?   → AuthRequired                   │
//! │       ├── 2. cart empty?              → rejected BEFORE persistence    │
//! │       ├── 3. form invalid?            → Validation([per-field])        │
//! │       ├── 4. totals ≠ items?          → TotalsMismatch                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  OrderRepository::create_order  ← one transaction, bounded retry       │
//! │       │                                                                 │
//! │       ├── failure → logged, surfaced as generic OrderNotProcessed      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  success → cart cleared (by checkout(), never by the Order Writer)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use artisell_core::{CartItem, CartTotals, CheckoutForm, CoreError, Money, Order, OrderItem};
use artisell_db::OrderSummary;

use crate::error::StoreError;
use crate::session::CartState;
use crate::Storefront;

/// Response for a successfully placed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedOrder {
    pub order_id: String,
    pub order_number: String,
    pub total_cents: i64,
    pub item_count: usize,
}

impl Storefront {
    /// The Order Writer entry point: converts a checkout submission into a
    /// durable order.
    ///
    /// ## Preconditions
    /// - `user_id` must identify an existing, authenticated user
    /// - `items` must be non-empty
    /// - `form` must pass [`CheckoutForm::validate`]
    /// - `totals` must match what `items` actually sum to at this store's
    ///   rates (line totals + shipping + tax == total)
    ///
    /// ## Side Effects
    /// One order row and N order_item rows, written atomically. The cart
    /// is NOT cleared here; that is the caller's job (see
    /// [`Storefront::checkout`]).
    ///
    /// ## Errors
    /// Validation failures are reported per-field; persistence failures
    /// roll back completely and surface as the generic
    /// [`StoreError::OrderNotProcessed`].
    pub async fn place_order(
        &self,
        user_id: &str,
        form: &CheckoutForm,
        items: &[CartItem],
        totals: &CartTotals,
    ) -> Result<PlacedOrder, StoreError> {
        debug!(user_id = %user_id, items = items.len(), "place_order");

        // Checkout requires a logged-in user. The id arrives pre-validated
        // from the session layer, but a blank or unknown one is still an
        // auth failure, never a silently-proceeding order.
        if user_id.trim().is_empty() {
            return Err(StoreError::AuthRequired);
        }
        if self.db().users().get_by_id(user_id).await?.is_none() {
            return Err(StoreError::AuthRequired);
        }

        // Empty carts are rejected before any persistence attempt
        if items.is_empty() {
            return Err(StoreError::Cart(CoreError::EmptyCart));
        }

        // Per-field form validation; all violations reported at once
        let payment_method = form.validate().map_err(StoreError::Validation)?;

        // Creation invariant: the order's line items plus shipping and tax
        // must account for its total
        let line_sum: i64 = items.iter().map(CartItem::line_total_cents).sum();
        let expected_tax = Money::from_cents(line_sum).calculate_tax(self.tax_rate());
        let consistent = totals.subtotal_cents == line_sum
            && totals.shipping_cents == self.shipping_fee().cents()
            && totals.tax_cents == expected_tax.cents()
            && totals.total_cents
                == totals.subtotal_cents + totals.shipping_cents + totals.tax_cents;
        if !consistent {
            return Err(StoreError::TotalsMismatch);
        }

        let order = self
            .db()
            .orders()
            .create_order(user_id, form, payment_method, items, totals)
            .await
            .map_err(|err| {
                // Full detail for the operator; a generic failure for the
                // customer, clearly distinct from validation errors
                error!(user_id = %user_id, "Order transaction failed: {}", err);
                StoreError::OrderNotProcessed
            })?;

        info!(
            order_id = %order.id,
            order_number = %order.order_number,
            total = %order.total(),
            "Order placed"
        );

        Ok(PlacedOrder {
            order_id: order.id,
            order_number: order.order_number,
            total_cents: order.total_cents,
            item_count: items.len(),
        })
    }

    /// The full checkout workflow over a session cart: snapshot the cart,
    /// place the order, and clear the cart on success.
    ///
    /// On any error the cart is left untouched, so the customer can fix
    /// the form and resubmit.
    pub async fn checkout(
        &self,
        user_id: &str,
        form: &CheckoutForm,
        cart: &CartState,
    ) -> Result<PlacedOrder, StoreError> {
        let (items, totals) = cart.with_cart(|c| (c.items.clone(), self.cart_totals(c)));

        let placed = self.place_order(user_id, form, &items, &totals).await?;

        cart.with_cart_mut(|c| c.clear());

        Ok(placed)
    }

    /// Lists a customer's orders, newest first, with line-item counts.
    pub async fn user_orders(&self, user_id: &str) -> Result<Vec<OrderSummary>, StoreError> {
        Ok(self.db().orders().list_for_user(user_id).await?)
    }

    /// Fetches an order and its line items (the confirmation page).
    pub async fn order_details(
        &self,
        order_id: &str,
    ) -> Result<(Order, Vec<OrderItem>), StoreError> {
        let order = self
            .db()
            .orders()
            .get_by_id(order_id)
            .await?
            .ok_or_else(|| StoreError::not_found("Order", order_id))?;
        let items = self.db().orders().get_items(order_id).await?;

        Ok((order, items))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use artisell_core::{OrderStatus, Product};
    use artisell_db::repository::product::generate_product_id;
    use artisell_db::{Database, DbConfig};
    use chrono::Utc;

    fn artwork(title: &str, price_cents: i64) -> Product {
        Product {
            id: generate_product_id(),
            title: title.to_string(),
            artist: "Miguel Cruz".to_string(),
            price_cents,
            description: None,
            region: Some("Luzon".to_string()),
            medium: Some("Oil on Canvas".to_string()),
            dimensions: None,
            year: Some(2020),
            is_featured: false,
            in_stock: true,
            primary_image_url: None,
            created_at: Utc::now(),
        }
    }

    fn form() -> CheckoutForm {
        CheckoutForm {
            full_name: "Juan Dela Cruz".to_string(),
            email: "juan@example.com".to_string(),
            phone: "+63 912 345 6789".to_string(),
            address: "123 Filipino Art Street".to_string(),
            city: "Makati City".to_string(),
            region: "Metro Manila".to_string(),
            postal_code: "1200".to_string(),
            payment_method: "cod".to_string(),
            notes: None,
        }
    }

    /// Store with one registered user and two artworks in a session cart.
    async fn checkout_fixture() -> (Storefront, String, CartState) {
        // Log output for failing tests (RUST_LOG=debug for SQL detail)
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();

        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = Storefront::new(db);

        let user = store
            .register("Juan Dela Cruz", "juan@example.com", "password123")
            .await
            .unwrap();

        let a = artwork("Vibrant Filipino Landscape", 1_250_000);
        let b = artwork("Urban Manila", 1_850_000);
        store.db().products().insert(&a).await.unwrap();
        store.db().products().insert(&b).await.unwrap();

        let cart = CartState::new();
        store.add_to_cart(&cart, &a.id, None).await.unwrap();
        store.add_to_cart(&cart, &b.id, None).await.unwrap();

        (store, user.id, cart)
    }

    #[tokio::test]
    async fn test_checkout_happy_path() {
        let (store, user_id, cart) = checkout_fixture().await;

        let placed = store.checkout(&user_id, &form(), &cart).await.unwrap();

        assert!(placed.order_number.starts_with("ART-"));
        assert_eq!(placed.item_count, 2);
        // ₱31,000 subtotal + ₱250 shipping + ₱3,720 tax
        assert_eq!(placed.total_cents, 3_497_000);

        // Cart cleared only after success
        assert!(store.cart_view(&cart).items.is_empty());

        // Persisted order is consistent
        let (order, items) = store.order_details(&placed.order_id).await.unwrap();
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(items.len(), 2);
        let line_sum: i64 = items.iter().map(|i| i.quantity * i.price_cents).sum();
        assert_eq!(
            line_sum + order.shipping_cents + order.tax_cents,
            order.total_cents
        );

        // ...and shows up in the customer's history
        let history = store.user_orders(&user_id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].items_count, 2);
    }

    #[tokio::test]
    async fn test_checkout_empty_cart_rejected_before_persistence() {
        let (store, user_id, _) = checkout_fixture().await;
        let empty = CartState::new();

        let err = store.checkout(&user_id, &form(), &empty).await.unwrap_err();
        assert!(matches!(err, StoreError::Cart(CoreError::EmptyCart)));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(store.db().pool())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_checkout_invalid_payment_method_writes_nothing() {
        let (store, user_id, cart) = checkout_fixture().await;

        let mut bad_form = form();
        bad_form.payment_method = "invalid_method".to_string();

        let err = store.checkout(&user_id, &bad_form, &cart).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError);
        assert_eq!(err.fields()[0].field(), "paymentMethod");

        // No rows written, cart untouched
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(store.db().pool())
            .await
            .unwrap();
        assert_eq!(count, 0);
        assert_eq!(store.cart_view(&cart).items.len(), 2);
    }

    #[tokio::test]
    async fn test_checkout_missing_fields_reported_per_field() {
        let (store, user_id, cart) = checkout_fixture().await;

        let mut bad_form = form();
        bad_form.phone = String::new();
        bad_form.postal_code = "  ".to_string();

        let err = store.checkout(&user_id, &bad_form, &cart).await.unwrap_err();
        let fields: Vec<&str> = err.fields().iter().map(|f| f.field()).collect();
        assert_eq!(fields, vec!["phone", "postalCode"]);
    }

    #[tokio::test]
    async fn test_checkout_requires_authenticated_user() {
        let (store, _, cart) = checkout_fixture().await;

        let err = store.checkout("", &form(), &cart).await.unwrap_err();
        assert!(matches!(err, StoreError::AuthRequired));

        // An id that doesn't exist is just as unauthenticated
        let err = store
            .checkout("ghost-user", &form(), &cart)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::AuthRequired));

        // Cart untouched after the failures
        assert_eq!(store.cart_view(&cart).items.len(), 2);
    }

    #[tokio::test]
    async fn test_place_order_rejects_inconsistent_totals() {
        let (store, user_id, cart) = checkout_fixture().await;
        let (items, mut totals) = cart.with_cart(|c| (c.items.clone(), store.cart_totals(c)));

        totals.total_cents += 1;

        let err = store
            .place_order(&user_id, &form(), &items, &totals)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::TotalsMismatch));
    }

    #[tokio::test]
    async fn test_sequential_checkouts_distinct_order_numbers() {
        let (store, user_id, cart) = checkout_fixture().await;

        let first = store.checkout(&user_id, &form(), &cart).await.unwrap();

        // Refill the cart for a second order
        let history = store.user_orders(&user_id).await.unwrap();
        let items = store
            .order_details(&history[0].order.id)
            .await
            .unwrap()
            .1;
        for item in &items {
            store
                .add_to_cart(&cart, &item.product_id, Some(item.quantity))
                .await
                .unwrap();
        }
        let second = store.checkout(&user_id, &form(), &cart).await.unwrap();

        assert_ne!(first.order_number, second.order_number);
    }

    #[tokio::test]
    async fn test_order_details_not_found() {
        let (store, _, _) = checkout_fixture().await;

        let err = store.order_details("missing").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }
}
