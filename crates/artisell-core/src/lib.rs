//! # artisell-core: Pure Business Logic for Artisell
//!
//! This crate is the **heart** of the Artisell storefront. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Artisell Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (React/TS)                          │   │
//! │  │    Gallery UI ──► Cart UI ──► Checkout UI ──► Confirmation     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  artisell-store (Service Layer)                 │   │
//! │  │    add_to_cart, place_order, register, login, etc.             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ artisell-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ checkout  │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │   form    │  │   │
//! │  │   │   Order   │  │  TaxRate  │  │ CartItem  │  │ validation│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  artisell-db (Database Layer)                   │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Order, User, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Cart aggregation and totals math
//! - [`checkout`] - Checkout form validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in centavos (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use artisell_core::money::Money;
//! use artisell_core::types::TaxRate;
//! use artisell_core::TAX_RATE_BPS;
//!
//! // Create money from centavos (never from floats!)
//! let subtotal = Money::from_major_minor(31_000, 0); // ₱31,000.00
//!
//! // Checkout tax is 12% of the subtotal
//! let tax = subtotal.calculate_tax(TaxRate::from_bps(TAX_RATE_BPS));
//! assert_eq!(tax, Money::from_major_minor(3_720, 0));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod error;
pub mod money;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use artisell_core::Money` instead of
// `use artisell_core::money::Money`

pub use cart::{Cart, CartItem, CartTotals};
pub use checkout::CheckoutForm;
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Flat shipping fee in centavos (₱250.00), charged on every order.
///
/// Shipping is a single nationwide flat rate in v0.1. Per-region rates
/// would be a catalog concern, not a cart concern.
pub const SHIPPING_FEE_CENTS: i64 = 25_000;

/// Checkout tax rate in basis points (1200 = 12%, PH VAT).
pub const TAX_RATE_BPS: u32 = 1200;

/// Prefix for human-readable order numbers (`ART-XXXXXXXX-NNNN`).
pub const ORDER_NUMBER_PREFIX: &str = "ART";

/// Maximum items allowed in a single cart
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable order sizes.
/// Can be made configurable in future versions.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single artwork in a cart
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;
