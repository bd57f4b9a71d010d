//! # Order Repository
//!
//! Database operations for orders and order items, including the
//! transactional Order Writer.
//!
//! ## Order Placement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Order Placement                                   │
//! │                                                                         │
//! │  create_order(user_id, form, method, cart items, totals)               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  generate_order_number() → "ART-3F2A9C1B-4821"                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN TRANSACTION                                                     │
//! │   ├── INSERT INTO orders (header, totals, status='processing')         │
//! │   ├── INSERT INTO order_items (one row per cart entry,                 │
//! │   │                            price frozen at purchase time)          │
//! │   └── COMMIT  ── only after every insert succeeds                      │
//! │       │                                                                 │
//! │       ├── order_number collision? → regenerate, retry (bounded)        │
//! │       └── any other failure?      → ROLLBACK, nothing visible          │
//! │                                                                         │
//! │  The UNIQUE constraint on orders.order_number is the real              │
//! │  uniqueness guarantee; generation is only probabilistic.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use rand::Rng;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use artisell_core::{
    CartItem, CartTotals, CheckoutForm, Order, OrderItem, OrderStatus, PaymentMethod,
    ORDER_NUMBER_PREFIX,
};

/// How many fresh order numbers to try before giving up on a collision
/// storm. Collisions are ~1-in-10^12; hitting this limit means something
/// else is wrong.
const MAX_ORDER_NUMBER_ATTEMPTS: u32 = 3;

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

/// An order header plus its line-item count, for the order-history page.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrderSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub order: Order,
    pub items_count: i64,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// The Order Writer: persists a validated checkout as an order header
    /// plus one line item per cart entry, atomically.
    ///
    /// ## Arguments
    /// * `user_id` - The authenticated customer (pre-validated by the caller)
    /// * `form` - The validated checkout form (shipping fields, notes)
    /// * `payment_method` - Already parsed from the form's wire value
    /// * `items` - Cart entries; unit prices are frozen into the order lines
    /// * `totals` - The cart's computed totals, recorded on the header
    ///
    /// ## Atomicity
    /// Header and items are written inside one transaction: either the
    /// order and every line land, or none do. On an `order_number`
    /// collision the whole transaction is retried with a fresh number, a
    /// bounded number of times; every other failure is returned as-is
    /// after rollback.
    ///
    /// ## Returns
    /// The persisted [`Order`] (status `Processing`).
    pub async fn create_order(
        &self,
        user_id: &str,
        form: &CheckoutForm,
        payment_method: PaymentMethod,
        items: &[CartItem],
        totals: &CartTotals,
    ) -> DbResult<Order> {
        let order_id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let order_items: Vec<OrderItem> = items
            .iter()
            .map(|item| OrderItem {
                id: Uuid::new_v4().to_string(),
                order_id: order_id.clone(),
                product_id: item.product_id.clone(),
                quantity: item.quantity,
                price_cents: item.unit_price_cents,
            })
            .collect();

        for attempt in 1..=MAX_ORDER_NUMBER_ATTEMPTS {
            let order = Order {
                id: order_id.clone(),
                user_id: user_id.to_string(),
                order_number: generate_order_number(),
                full_name: form.full_name.trim().to_string(),
                email: form.email.trim().to_string(),
                phone: form.phone.trim().to_string(),
                address: form.address.trim().to_string(),
                city: form.city.trim().to_string(),
                region: form.region.trim().to_string(),
                postal_code: form.postal_code.trim().to_string(),
                payment_method,
                notes: form.normalized_notes(),
                subtotal_cents: totals.subtotal_cents,
                shipping_cents: totals.shipping_cents,
                tax_cents: totals.tax_cents,
                total_cents: totals.total_cents,
                status: OrderStatus::Processing,
                created_at: now,
            };

            match self.insert_order(&order, &order_items).await {
                Ok(()) => {
                    info!(
                        order_id = %order.id,
                        order_number = %order.order_number,
                        total = %order.total_cents,
                        items = order_items.len(),
                        "Order created"
                    );
                    return Ok(order);
                }
                Err(err) if err.is_unique_violation_on("order_number") => {
                    warn!(
                        attempt,
                        order_number = %order.order_number,
                        "Order number collision, regenerating"
                    );
                    continue;
                }
                Err(err) => return Err(err),
            }
        }

        Err(DbError::TransactionFailed(format!(
            "could not allocate a unique order number after {} attempts",
            MAX_ORDER_NUMBER_ATTEMPTS
        )))
    }

    /// Inserts a prebuilt order header and its items in one transaction.
    ///
    /// All-or-nothing: the transaction commits only after the header and
    /// every item row succeed; dropping the transaction on any error path
    /// rolls everything back, so no partial order is ever visible.
    pub async fn insert_order(&self, order: &Order, items: &[OrderItem]) -> DbResult<()> {
        debug!(id = %order.id, order_number = %order.order_number, "Inserting order");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO orders ( \
                id, user_id, order_number, \
                full_name, email, phone, address, city, region, postal_code, \
                payment_method, notes, \
                subtotal_cents, shipping_cents, tax_cents, total_cents, \
                status, created_at \
            ) VALUES ( \
                ?1, ?2, ?3, \
                ?4, ?5, ?6, ?7, ?8, ?9, ?10, \
                ?11, ?12, \
                ?13, ?14, ?15, ?16, \
                ?17, ?18 \
            )",
        )
        .bind(&order.id)
        .bind(&order.user_id)
        .bind(&order.order_number)
        .bind(&order.full_name)
        .bind(&order.email)
        .bind(&order.phone)
        .bind(&order.address)
        .bind(&order.city)
        .bind(&order.region)
        .bind(&order.postal_code)
        .bind(order.payment_method)
        .bind(&order.notes)
        .bind(order.subtotal_cents)
        .bind(order.shipping_cents)
        .bind(order.tax_cents)
        .bind(order.total_cents)
        .bind(order.status)
        .bind(order.created_at)
        .execute(&mut *tx)
        .await?;

        for item in items {
            sqlx::query(
                "INSERT INTO order_items (id, order_id, product_id, quantity, price_cents) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )
            .bind(&item.id)
            .bind(&item.order_id)
            .bind(&item.product_id)
            .bind(item.quantity)
            .bind(item.price_cents)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Gets an order by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            "SELECT \
                id, user_id, order_number, \
                full_name, email, phone, address, city, region, postal_code, \
                payment_method, notes, \
                subtotal_cents, shipping_cents, tax_cents, total_cents, \
                status, created_at \
             FROM orders \
             WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Gets all line items for an order, in insertion order.
    pub async fn get_items(&self, order_id: &str) -> DbResult<Vec<OrderItem>> {
        let items = sqlx::query_as::<_, OrderItem>(
            "SELECT id, order_id, product_id, quantity, price_cents \
             FROM order_items \
             WHERE order_id = ?1 \
             ORDER BY rowid",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists a customer's orders, newest first, with line-item counts.
    ///
    /// ## Usage
    /// The "My Orders" page.
    pub async fn list_for_user(&self, user_id: &str) -> DbResult<Vec<OrderSummary>> {
        let orders = sqlx::query_as::<_, OrderSummary>(
            "SELECT \
                o.id, o.user_id, o.order_number, \
                o.full_name, o.email, o.phone, o.address, o.city, o.region, o.postal_code, \
                o.payment_method, o.notes, \
                o.subtotal_cents, o.shipping_cents, o.tax_cents, o.total_cents, \
                o.status, o.created_at, \
                (SELECT COUNT(*) FROM order_items oi WHERE oi.order_id = o.id) AS items_count \
             FROM orders o \
             WHERE o.user_id = ?1 \
             ORDER BY o.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// Updates an order's fulfillment status.
    ///
    /// Transitions are driven by external order management; this only
    /// records the new value.
    pub async fn update_status(&self, order_id: &str, status: OrderStatus) -> DbResult<()> {
        let result = sqlx::query("UPDATE orders SET status = ?2 WHERE id = ?1")
            .bind(order_id)
            .bind(status)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", order_id));
        }

        Ok(())
    }
}

/// Generates an order number: `ART-` + 8 uppercase hex chars from a fresh
/// UUID + a 4-digit random suffix.
///
/// ## Example
/// `ART-3F2A9C1B-4821`
///
/// Uniqueness is probabilistic, not guaranteed; the database's UNIQUE
/// constraint is the actual correctness guarantee, and
/// [`OrderRepository::create_order`] retries on collision.
pub fn generate_order_number() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    let fragment = hex[..8].to_uppercase();
    let suffix: u32 = rand::thread_rng().gen_range(1000..=9999);
    format!("{}-{}-{}", ORDER_NUMBER_PREFIX, fragment, suffix)
}

// =============================================================================
// Unit Tests
// =============================================================================
