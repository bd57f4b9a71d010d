//! # Repository Module
//!
//! Database repository implementations for Artisell.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Store service call                                                    │
//! │       │                                                                 │
//! │       │  db.orders().create_order(user_id, form, method, items, totals)│
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  OrderRepository                                                       │
//! │  ├── create_order(...)   ← transactional order writer                  │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── get_items(&self, order_id)                                        │
//! │  └── list_for_user(&self, user_id)                                     │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • Easy to test (in-memory database)                                   │
//! │  • SQL is isolated in one place                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Catalog reads and writes
//! - [`OrderRepository`](order::OrderRepository) - Transactional order placement and history
//! - [`UserRepository`](user::UserRepository) - Customer accounts
//! - [`FavoriteRepository`](favorite::FavoriteRepository) - Bookmarked artworks

pub mod favorite;
pub mod order;
pub mod product;
pub mod user;
