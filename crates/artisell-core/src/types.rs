//! # Domain Types
//!
//! Core domain types used throughout Artisell.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Order       │   │      User       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  title, artist  │   │  order_number   │   │  email (unique) │       │
//! │  │  price_cents    │   │  status, totals │   │  password_hash  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │  OrderStatus    │   │ PaymentMethod   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  Processing     │   │  CreditCard     │       │
//! │  │  1200 = 12%     │   │  Shipped        │   │  Gcash          │       │
//! │  └─────────────────┘   │  Delivered      │   │  BankTransfer   │       │
//! │                        │  Cancelled      │   │  Cod            │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Orders have:
//! - `id`: UUID v4 - immutable, used for database relations
//! - `order_number`: human-readable business id shown to customers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1200 bps = 12% (PH VAT applied at checkout)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Product
// =============================================================================

/// An artwork available for purchase.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Artwork title shown in the gallery and on order lines.
    pub title: String,

    /// Artist name.
    pub artist: String,

    /// Price in centavos (smallest currency unit).
    pub price_cents: i64,

    /// Optional long-form description.
    pub description: Option<String>,

    /// Region of origin (Luzon, Visayas, Mindanao).
    pub region: Option<String>,

    /// Medium (e.g. "Oil on Canvas").
    pub medium: Option<String>,

    /// Physical dimensions (e.g. "24 x 36 inches").
    pub dimensions: Option<String>,

    /// Year the artwork was created.
    pub year: Option<i64>,

    /// Whether the artwork appears in the featured carousel.
    pub is_featured: bool,

    /// Whether the artwork can currently be purchased.
    pub in_stock: bool,

    /// URL of the primary image (joined from product_images).
    pub primary_image_url: Option<String>,

    /// When the product was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Product Image
// =============================================================================

/// One image attached to a product. Each product has exactly one primary
/// image plus any number of secondary views.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct ProductImage {
    pub id: String,
    pub product_id: String,
    pub image_url: String,
    pub is_primary: bool,
}

// =============================================================================
// Order Status
// =============================================================================

/// The fulfillment status of an order.
///
/// Transitions (`processing → shipped → delivered`, or
/// `processing → cancelled`) are driven by external order management;
/// this crate only ever sets the initial `Processing` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order placed, payment/packing in progress.
    Processing,
    /// Order handed to the courier.
    Shipped,
    /// Order received by the customer.
    Delivered,
    /// Order cancelled before delivery.
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Processing
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// Payment methods accepted at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Visa, Mastercard, or JCB.
    CreditCard,
    /// GCash e-wallet.
    Gcash,
    /// Direct bank transfer.
    BankTransfer,
    /// Cash on delivery.
    Cod,
}

impl PaymentMethod {
    /// All methods accepted at checkout, in display order.
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::CreditCard,
        PaymentMethod::Gcash,
        PaymentMethod::BankTransfer,
        PaymentMethod::Cod,
    ];

    /// Parses the wire/form value (`credit_card`, `gcash`, `bank_transfer`,
    /// `cod`). Returns `None` for anything outside the allowed set.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "credit_card" => Some(PaymentMethod::CreditCard),
            "gcash" => Some(PaymentMethod::Gcash),
            "bank_transfer" => Some(PaymentMethod::BankTransfer),
            "cod" => Some(PaymentMethod::Cod),
            _ => None,
        }
    }

    /// The wire/form value for this method.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::Gcash => "gcash",
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::Cod => "cod",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Order
// =============================================================================

/// An immutable record of a completed checkout.
///
/// Shipping fields are captured from the checkout form, not the user
/// profile, so later profile edits never rewrite order history.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    /// Human-readable business id (`ART-XXXXXXXX-NNNN`), globally unique.
    pub order_number: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub region: String,
    pub postal_code: String,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
    pub subtotal_cents: i64,
    pub shipping_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
    pub status: OrderStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Returns the grand total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// One product line within an order.
/// Uses the snapshot pattern: `price_cents` is the unit price at purchase
/// time, decoupled from the live catalog price.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    /// Quantity purchased.
    pub quantity: i64,
    /// Unit price in centavos at time of purchase (frozen).
    pub price_cents: i64,
}

impl OrderItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns the line total (unit price × quantity) as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.price_cents * self.quantity)
    }
}

// =============================================================================
// User
// =============================================================================

/// A registered customer account.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct User {
    pub id: String,
    pub name: String,
    /// Unique login identifier.
    pub email: String,
    /// Argon2 password hash. Never the plaintext password.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Favorite
// =============================================================================

/// A user's bookmark of an artwork. Unique per (user, product).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Favorite {
    pub id: String,
    pub user_id: String,
    pub product_id: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(1200);
        assert_eq!(rate.bps(), 1200);
        assert!((rate.percentage() - 12.0).abs() < 0.001);
    }

    #[test]
    fn test_tax_rate_from_percentage() {
        let rate = TaxRate::from_percentage(12.0);
        assert_eq!(rate.bps(), 1200);
    }

    #[test]
    fn test_order_status_default() {
        let status = OrderStatus::default();
        assert_eq!(status, OrderStatus::Processing);
    }

    #[test]
    fn test_payment_method_parse() {
        assert_eq!(
            PaymentMethod::parse("credit_card"),
            Some(PaymentMethod::CreditCard)
        );
        assert_eq!(PaymentMethod::parse("gcash"), Some(PaymentMethod::Gcash));
        assert_eq!(
            PaymentMethod::parse("bank_transfer"),
            Some(PaymentMethod::BankTransfer)
        );
        assert_eq!(PaymentMethod::parse("cod"), Some(PaymentMethod::Cod));
        assert_eq!(PaymentMethod::parse("invalid_method"), None);
        assert_eq!(PaymentMethod::parse(""), None);
    }

    #[test]
    fn test_payment_method_round_trip() {
        for method in PaymentMethod::ALL {
            assert_eq!(PaymentMethod::parse(method.as_str()), Some(method));
        }
    }

    #[test]
    fn test_order_item_line_total() {
        let item = OrderItem {
            id: "i1".to_string(),
            order_id: "o1".to_string(),
            product_id: "p1".to_string(),
            quantity: 3,
            price_cents: 1_850_000,
        };
        assert_eq!(item.line_total().cents(), 5_550_000);
    }
}
