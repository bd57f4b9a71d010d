//! # Cart Service Operations
//!
//! Session cart manipulation: catalog lookup, price freezing, totals.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Placed  │       │
//! │  │  Cart    │     │          │     │   Form   │     │  Order   │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                              │
//! │                   add_to_cart       checkout()                         │
//! │                   update_cart_item  (checkout.rs)                      │
//! │                   remove_from_cart                                      │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use artisell_core::{Cart, CartItem, CartTotals};

use crate::error::StoreError;
use crate::session::CartState;
use crate::Storefront;

/// Cart response including items and totals, ready for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
}

impl Storefront {
    /// Totals for a cart at this store's configured rates.
    pub(crate) fn cart_totals(&self, cart: &Cart) -> CartTotals {
        cart.totals_with(self.shipping_fee(), self.tax_rate())
    }

    fn view(&self, cart: &Cart) -> CartView {
        CartView {
            items: cart.items.clone(),
            totals: self.cart_totals(cart),
        }
    }

    /// Gets the current cart contents with computed totals.
    pub fn cart_view(&self, cart: &CartState) -> CartView {
        cart.with_cart(|c| self.view(c))
    }

    /// Adds an artwork to the session cart.
    ///
    /// ## Behavior
    /// - Product is resolved from the catalog; an unknown id fails with
    ///   `NotFound`, an out-of-stock artwork with `OutOfStock`
    /// - If already in cart: quantity increases
    /// - If not in cart: added with its price/title/image frozen at this
    ///   moment (a later catalog reprice won't change the cart line)
    ///
    /// ## Arguments
    /// * `product_id` - Product UUID to add
    /// * `quantity` - Quantity to add (default: 1)
    ///
    /// ## Returns
    /// Updated cart with all items and totals
    pub async fn add_to_cart(
        &self,
        cart: &CartState,
        product_id: &str,
        quantity: Option<i64>,
    ) -> Result<CartView, StoreError> {
        let quantity = quantity.unwrap_or(1);
        debug!(product_id = %product_id, quantity = %quantity, "add_to_cart");

        let product = self
            .db()
            .products()
            .get_by_id(product_id)
            .await?
            .ok_or_else(|| StoreError::not_found("Product", product_id))?;

        if !product.in_stock {
            return Err(StoreError::OutOfStock(product_id.to_string()));
        }

        cart.with_cart_mut(|c| {
            c.add_item(&product, quantity)?;
            Ok(self.view(c))
        })
    }

    /// Updates the quantity of an item in the session cart.
    ///
    /// Quantities <= 0 and unknown product ids are silent no-ops (the cart
    /// page re-renders from cart state either way); see
    /// [`Cart::update_quantity`].
    pub fn update_cart_item(
        &self,
        cart: &CartState,
        product_id: &str,
        quantity: i64,
    ) -> Result<CartView, StoreError> {
        debug!(product_id = %product_id, quantity = %quantity, "update_cart_item");

        cart.with_cart_mut(|c| {
            c.update_quantity(product_id, quantity)?;
            Ok(self.view(c))
        })
    }

    /// Removes an item from the session cart.
    pub fn remove_from_cart(&self, cart: &CartState, product_id: &str) -> CartView {
        debug!(product_id = %product_id, "remove_from_cart");

        cart.with_cart_mut(|c| {
            c.remove_item(product_id);
            self.view(c)
        })
    }

    /// Clears all items from the session cart.
    ///
    /// ## When Used
    /// - The customer abandons the cart
    /// - After checkout succeeds (done by [`Storefront::checkout`])
    pub fn clear_cart(&self, cart: &CartState) -> CartView {
        debug!("clear_cart");

        cart.with_cart_mut(|c| {
            c.clear();
            self.view(c)
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use artisell_core::Product;
    use artisell_db::repository::product::generate_product_id;
    use artisell_db::{Database, DbConfig};
    use chrono::Utc;

    async fn store_with_products() -> (Storefront, String, String) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let landscape = Product {
            id: generate_product_id(),
            title: "Vibrant Filipino Landscape".to_string(),
            artist: "Maria Santos".to_string(),
            price_cents: 1_250_000,
            description: None,
            region: Some("Visayas".to_string()),
            medium: Some("Oil on Canvas".to_string()),
            dimensions: None,
            year: Some(2023),
            is_featured: true,
            in_stock: true,
            primary_image_url: None,
            created_at: Utc::now(),
        };
        let mut sold_out = landscape.clone();
        sold_out.id = generate_product_id();
        sold_out.title = "Urban Manila".to_string();
        sold_out.in_stock = false;

        db.products().insert(&landscape).await.unwrap();
        db.products().insert(&sold_out).await.unwrap();

        let landscape_id = landscape.id.clone();
        let sold_out_id = sold_out.id.clone();
        (Storefront::new(db), landscape_id, sold_out_id)
    }

    #[tokio::test]
    async fn test_add_to_cart_freezes_price_and_computes_totals() {
        let (store, product_id, _) = store_with_products().await;
        let cart = CartState::new();

        let view = store.add_to_cart(&cart, &product_id, Some(2)).await.unwrap();

        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].unit_price_cents, 1_250_000);
        assert_eq!(view.totals.subtotal_cents, 2_500_000);
        assert_eq!(view.totals.shipping_cents, 25_000);
        assert_eq!(
            view.totals.total_cents,
            view.totals.subtotal_cents + view.totals.shipping_cents + view.totals.tax_cents
        );
    }

    #[tokio::test]
    async fn test_add_to_cart_unknown_product_is_not_found() {
        let (store, _, _) = store_with_products().await;
        let cart = CartState::new();

        let err = store
            .add_to_cart(&cart, "no-such-id", None)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
        assert!(store.cart_view(&cart).items.is_empty());
    }

    #[tokio::test]
    async fn test_add_to_cart_out_of_stock_rejected() {
        let (store, _, sold_out_id) = store_with_products().await;
        let cart = CartState::new();

        let err = store
            .add_to_cart(&cart, &sold_out_id, None)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::OutOfStock(_)));
    }

    /// The frontend reads cart JSON by camelCase key; lock the wire shape.
    #[tokio::test]
    async fn test_cart_view_wire_format() {
        let (store, product_id, _) = store_with_products().await;
        let cart = CartState::new();
        store.add_to_cart(&cart, &product_id, None).await.unwrap();

        let json = serde_json::to_value(store.cart_view(&cart)).unwrap();
        assert_eq!(json["items"][0]["unitPriceCents"], 1_250_000);
        assert_eq!(json["totals"]["shippingCents"], 25_000);
        assert_eq!(json["items"][0]["title"], "Vibrant Filipino Landscape");
    }

    #[tokio::test]
    async fn test_update_and_remove() {
        let (store, product_id, _) = store_with_products().await;
        let cart = CartState::new();

        store.add_to_cart(&cart, &product_id, None).await.unwrap();

        let view = store.update_cart_item(&cart, &product_id, 3).unwrap();
        assert_eq!(view.items[0].quantity, 3);

        // Unknown product: silent no-op
        let view = store.update_cart_item(&cart, "missing", 9).unwrap();
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].quantity, 3);

        let view = store.remove_from_cart(&cart, &product_id);
        assert!(view.items.is_empty());
    }
}
