//! # artisell-store: Storefront Service Layer
//!
//! The orchestration layer of Artisell: everything the frontend calls,
//! built on artisell-core (pure logic) and artisell-db (persistence).
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Artisell Service Layer                             │
//! │                                                                         │
//! │  Frontend request                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 artisell-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   cart    │  │ checkout  │  │   auth    │  │  catalog  │  │   │
//! │  │   │ CartState │  │place_order│  │ register  │  │ products  │  │   │
//! │  │   │ add/remove│  │ checkout  │  │  login    │  │ favorites │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   One Storefront handle per process; one CartState per          │   │
//! │  │   user session, passed explicitly through request context.      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                          │                                      │
//! │       ▼                          ▼                                      │
//! │  artisell-core              artisell-db                                │
//! │  (Cart math, validation)    (repositories, transactions)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Checkout Workflow
//!
//! ```rust,ignore
//! let db = Database::new(DbConfig::new("./artisell.db")).await?;
//! let store = Storefront::new(db);
//!
//! // One cart per session
//! let cart = CartState::new();
//! store.add_to_cart(&cart, &product_id, Some(1)).await?;
//!
//! // Cart → validation → transactional order write → cart cleared
//! let placed = store.checkout(&user.id, &form, &cart).await?;
//! println!("order {}", placed.order_number);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod session;

// =============================================================================
// Re-exports
// =============================================================================

pub use cart::CartView;
pub use checkout::PlacedOrder;
pub use config::StoreConfig;
pub use error::{ErrorCode, StoreError};
pub use session::CartState;

use artisell_core::{Money, TaxRate};
use artisell_db::Database;

/// The storefront service facade.
///
/// Owns the database handle and the configured rates; each domain module
/// (`cart`, `checkout`, `auth`, `catalog`) adds its operations in an
/// `impl Storefront` block.
///
/// Cheap to clone; safe to share across request handlers.
#[derive(Debug, Clone)]
pub struct Storefront {
    db: Database,
    store_name: String,
    shipping_fee: Money,
    tax_rate: TaxRate,
}

impl Storefront {
    /// Creates a storefront with the standard rates
    /// (₱250.00 flat shipping, 12% tax).
    pub fn new(db: Database) -> Self {
        Storefront {
            db,
            store_name: "Artisell".to_string(),
            shipping_fee: Money::from_cents(artisell_core::SHIPPING_FEE_CENTS),
            tax_rate: TaxRate::from_bps(artisell_core::TAX_RATE_BPS),
        }
    }

    /// Creates a storefront from loaded configuration.
    pub fn with_config(db: Database, config: &StoreConfig) -> Self {
        Storefront {
            db,
            store_name: config.store_name.clone(),
            shipping_fee: Money::from_cents(config.shipping_fee_cents),
            tax_rate: TaxRate::from_bps(config.tax_rate_bps),
        }
    }

    /// The display name of the store (receipts, confirmation emails).
    pub fn store_name(&self) -> &str {
        &self.store_name
    }

    /// The configured flat shipping fee.
    pub fn shipping_fee(&self) -> Money {
        self.shipping_fee
    }

    /// The configured checkout tax rate.
    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    /// Direct access to the database handle, for callers that need
    /// repository operations not wrapped here.
    pub fn db(&self) -> &Database {
        &self.db
    }
}
