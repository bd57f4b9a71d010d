//! # artisell-db: Database Layer for Artisell
//!
//! This crate provides database access for the Artisell storefront.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Artisell Data Flow                               │
//! │                                                                         │
//! │  Store service call (place_order, add_to_cart, ...)                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     artisell-db (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ (product.rs)  │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │    │ ProductRepo   │    │ 001_init.sql │  │   │
//! │  │   │ Connection    │◄───│ OrderRepo     │    │              │  │   │
//! │  │   │ Management    │    │ UserRepo      │    │              │  │   │
//! │  │   │               │    │ FavoriteRepo  │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (or :memory: in tests)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (product, order, user, favorite)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use artisell_db::{Database, DbConfig};
//!
//! // Create database with default config
//! let config = DbConfig::new("path/to/artisell.db");
//! let db = Database::new(config).await?;
//!
//! // Use repositories
//! let featured = db.products().list(Some(3), true).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::DbError;
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::favorite::FavoriteRepository;
pub use repository::order::{OrderRepository, OrderSummary};
pub use repository::product::ProductRepository;
pub use repository::user::UserRepository;
