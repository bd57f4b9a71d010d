//! # Cart Module
//!
//! The Cart Aggregator: tracks the artworks a customer intends to buy and
//! computes display/checkout totals.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Customer Action          Service Call            Cart Change           │
//! │  ───────────────          ────────────            ───────────           │
//! │                                                                         │
//! │  Click "Add to Cart" ────► add_to_cart() ───────► items.push(item)     │
//! │                                                    (or qty += n)        │
//! │  Change Quantity ────────► update_cart_item() ──► items[i].qty = n     │
//! │                                                                         │
//! │  Click Remove ───────────► remove_from_cart() ──► items.remove(i)      │
//! │                                                                         │
//! │  Successful Checkout ────► clear() ─────────────► items.clear()        │
//! │                                                                         │
//! │  Totals are DERIVED: recomputed from items on every read,              │
//! │  never cached, never persisted independently of an order.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::money::Money;
use crate::types::{Product, TaxRate};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY, SHIPPING_FEE_CENTS, TAX_RATE_BPS};

// =============================================================================
// Cart Item
// =============================================================================

/// An artwork in the shopping cart.
///
/// ## Design Notes
/// - `product_id`: Reference to the product (for database lookup at checkout)
/// - Everything else is a frozen snapshot of the product at add time.
///   The cart displays consistent data even if the catalog entry is
///   updated after the item was added, and the frozen `unit_price_cents`
///   is what the order line ultimately records.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartItem {
    /// Product ID (UUID)
    pub product_id: String,

    /// Artwork title at time of adding (frozen)
    pub title: String,

    /// Artist name at time of adding (frozen)
    pub artist: String,

    /// Price in centavos at time of adding (frozen)
    /// This is critical: we lock in the price when added to cart
    pub unit_price_cents: i64,

    /// Primary image URL at time of adding (frozen)
    pub image_url: Option<String>,

    /// Quantity in cart (always >= 1)
    pub quantity: i64,

    /// When this item was added to cart
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Creates a new cart item from a product and quantity.
    ///
    /// ## Price Freezing
    /// The price is captured at this moment. If the artwork is repriced
    /// in the catalog, this cart item retains the original price.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartItem {
            product_id: product.id.clone(),
            title: product.title.clone(),
            artist: product.artist.clone(),
            unit_price_cents: product.price_cents,
            image_url: product.primary_image_url.clone(),
            quantity,
            added_at: Utc::now(),
        }
    }

    /// Calculates the line total (unit price × quantity).
    pub fn line_total_cents(&self) -> i64 {
        self.unit_price_cents * self.quantity
    }

    /// Line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents())
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Derived totals for a cart. Never stored; recomputed on every read.
///
/// `total == subtotal + shipping + tax` by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub subtotal_cents: i64,
    pub shipping_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
}

impl CartTotals {
    /// Subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    /// Grand total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `product_id` (adding same artwork increases quantity)
/// - Quantity is always >= 1 (removal is an explicit operation)
/// - Maximum items: 100, maximum quantity per item: 999
/// - Lives only for the duration of a session; cleared after a successful
///   order placement by the caller
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Cart {
    /// Items in the cart, in the order they were added
    pub items: Vec<CartItem>,

    /// When the cart was created/last cleared
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds a product to the cart or increases quantity if already present.
    ///
    /// ## Behavior
    /// - If artwork already in cart: quantity increases by `quantity`
    /// - If not in cart: added as a new entry with quantity `max(quantity, 1)`
    ///
    /// Product resolution (and the NotFound failure for an unknown id)
    /// happens in the store layer; by the time this runs we hold a real
    /// `Product`.
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> Result<(), CoreError> {
        // Check if product already in cart
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|i| i.product_id == product.id)
        {
            let new_qty = item.quantity + quantity;
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            item.quantity = new_qty;
            return Ok(());
        }

        // Check max items
        if self.items.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        // New entries always start with at least one unit
        let quantity = quantity.max(1);
        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        self.items.push(CartItem::from_product(product, quantity));
        Ok(())
    }

    /// Updates the quantity of an item in the cart.
    ///
    /// ## Behavior
    /// - Quantity <= 0: no-op (the cart page only submits positive values;
    ///   removal is its own operation)
    /// - Product not in cart: silent no-op. The cart page re-renders from
    ///   cart state either way, so there is nothing useful to report.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> Result<(), CoreError> {
        if quantity <= 0 {
            return Ok(());
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            item.quantity = quantity;
        }

        Ok(())
    }

    /// Removes an item from the cart by product ID.
    ///
    /// Preserves the relative order of the remaining items. Silent if the
    /// product is not in the cart.
    pub fn remove_item(&mut self, product_id: &str) {
        self.items.retain(|i| i.product_id != product_id);
    }

    /// Clears all items from the cart.
    ///
    /// ## When Used
    /// - After a successful order placement (by the caller, not the
    ///   Order Writer)
    /// - When the customer abandons the cart
    pub fn clear(&mut self) {
        self.items.clear();
        self.created_at = Utc::now();
    }

    /// Returns the number of unique artworks in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity of all items.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Calculates the subtotal (sum of line totals, before shipping/tax).
    pub fn subtotal_cents(&self) -> i64 {
        self.items.iter().map(|i| i.line_total_cents()).sum()
    }

    /// Computes the full totals breakdown with the given rates.
    ///
    /// Shipping is a flat fee; tax applies to the subtotal only (shipping
    /// is not taxed).
    pub fn totals_with(&self, shipping: Money, tax_rate: TaxRate) -> CartTotals {
        let subtotal = Money::from_cents(self.subtotal_cents());
        let tax = subtotal.calculate_tax(tax_rate);
        let total = subtotal + shipping + tax;

        CartTotals {
            subtotal_cents: subtotal.cents(),
            shipping_cents: shipping.cents(),
            tax_cents: tax.cents(),
            total_cents: total.cents(),
        }
    }

    /// Computes totals with the standard storefront rates
    /// (₱250.00 flat shipping, 12% tax).
    ///
    /// Recomputed on every call; calling twice on an unchanged cart yields
    /// identical results.
    pub fn totals(&self) -> CartTotals {
        self.totals_with(
            Money::from_cents(SHIPPING_FEE_CENTS),
            TaxRate::from_bps(TAX_RATE_BPS),
        )
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: &str, price_cents: i64) -> Product {
        Product {
            id: id.to_string(),
            title: format!("Artwork {}", id),
            artist: "Maria Santos".to_string(),
            price_cents,
            description: None,
            region: Some("Luzon".to_string()),
            medium: Some("Oil on Canvas".to_string()),
            dimensions: None,
            year: Some(2023),
            is_featured: false,
            in_stock: true,
            primary_image_url: Some("https://example.com/art.jpg".to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_cart_add_item() {
        let mut cart = Cart::new();
        let product = test_product("1", 1_250_000); // ₱12,500.00

        cart.add_item(&product, 2).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.subtotal_cents(), 2_500_000);
    }

    #[test]
    fn test_cart_add_same_product_increases_quantity() {
        let mut cart = Cart::new();
        let product = test_product("1", 1_250_000);

        cart.add_item(&product, 2).unwrap();
        cart.add_item(&product, 3).unwrap();

        assert_eq!(cart.item_count(), 1); // Still one unique item
        assert_eq!(cart.total_quantity(), 5);
    }

    /// addItem is associative-additive: q1 then q2 of the same product
    /// yields the same cart as q1+q2 once.
    #[test]
    fn test_cart_add_item_additive() {
        let product = test_product("1", 980_000);

        let mut split = Cart::new();
        split.add_item(&product, 2).unwrap();
        split.add_item(&product, 3).unwrap();

        let mut combined = Cart::new();
        combined.add_item(&product, 5).unwrap();

        assert_eq!(split.items[0].quantity, combined.items[0].quantity);
        assert_eq!(split.totals(), combined.totals());
    }

    #[test]
    fn test_cart_add_item_zero_quantity_becomes_one() {
        let mut cart = Cart::new();
        let product = test_product("1", 980_000);

        cart.add_item(&product, 0).unwrap();
        assert_eq!(cart.items[0].quantity, 1);
    }

    #[test]
    fn test_cart_update_quantity() {
        let mut cart = Cart::new();
        let product = test_product("1", 980_000);
        cart.add_item(&product, 1).unwrap();

        cart.update_quantity("1", 4).unwrap();
        assert_eq!(cart.items[0].quantity, 4);
    }

    #[test]
    fn test_cart_update_quantity_non_positive_is_noop() {
        let mut cart = Cart::new();
        let product = test_product("1", 980_000);
        cart.add_item(&product, 3).unwrap();

        cart.update_quantity("1", 0).unwrap();
        cart.update_quantity("1", -5).unwrap();
        assert_eq!(cart.items[0].quantity, 3);
    }

    #[test]
    fn test_cart_update_quantity_missing_product_is_silent() {
        let mut cart = Cart::new();
        let product = test_product("1", 980_000);
        cart.add_item(&product, 3).unwrap();

        // Unknown product id: nothing changes, no error
        cart.update_quantity("does-not-exist", 7).unwrap();
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.items[0].quantity, 3);
    }

    #[test]
    fn test_cart_remove_item_preserves_order() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 100), 1).unwrap();
        cart.add_item(&test_product("2", 200), 1).unwrap();
        cart.add_item(&test_product("3", 300), 1).unwrap();

        cart.remove_item("2");

        let ids: Vec<&str> = cart.items.iter().map(|i| i.product_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);

        // Removing a missing product is silent
        cart.remove_item("2");
        assert_eq!(cart.item_count(), 2);
    }

    /// Totals match the storefront's sample display values:
    /// ₱12,500 + ₱18,500 → subtotal ₱31,000, shipping ₱250,
    /// tax ₱3,720, total ₱34,970.
    #[test]
    fn test_cart_totals_sample_scenario() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 1_250_000), 1).unwrap();
        cart.add_item(&test_product("2", 1_850_000), 1).unwrap();

        let totals = cart.totals();
        assert_eq!(totals.subtotal_cents, 3_100_000);
        assert_eq!(totals.shipping_cents, 25_000);
        assert_eq!(totals.tax_cents, 372_000);
        assert_eq!(totals.total_cents, 3_497_000);
    }

    #[test]
    fn test_cart_totals_breakdown_always_sums() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 1_420_033), 3).unwrap();
        cart.add_item(&test_product("2", 750_099), 2).unwrap();

        let totals = cart.totals();
        assert_eq!(
            totals.total_cents,
            totals.subtotal_cents + totals.shipping_cents + totals.tax_cents
        );
    }

    #[test]
    fn test_cart_totals_idempotent() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 1_250_000), 2).unwrap();

        assert_eq!(cart.totals(), cart.totals());
    }

    #[test]
    fn test_cart_quantity_cap() {
        let mut cart = Cart::new();
        let product = test_product("1", 100);

        cart.add_item(&product, 999).unwrap();
        let err = cart.add_item(&product, 1).unwrap_err();
        assert!(matches!(err, CoreError::QuantityTooLarge { .. }));
    }

    #[test]
    fn test_cart_clear() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 980_000), 2).unwrap();
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal_cents(), 0);
    }
}
