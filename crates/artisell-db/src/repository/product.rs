//! # Product Repository
//!
//! Database operations for the artwork catalog.
//!
//! ## Key Operations
//! - Catalog listing (optionally featured-only, newest first)
//! - Single-product lookup with its image gallery
//! - Inserts for seeding/administration
//!
//! ## Primary Image Join
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Every product read joins the primary image so the Cart Aggregator      │
//! │  can freeze a display image without a second query:                     │
//! │                                                                         │
//! │  products p ──► LEFT JOIN product_images pi                            │
//! │                 ON pi.product_id = p.id AND pi.is_primary = 1          │
//! │                                                                         │
//! │  → Product.primary_image_url (None if the product has no images)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use artisell_core::{Product, ProductImage};

/// Product columns with the primary-image join, shared by every read.
const PRODUCT_SELECT: &str = "\
    SELECT \
        p.id, p.title, p.artist, p.price_cents, p.description, \
        p.region, p.medium, p.dimensions, p.year, \
        p.is_featured, p.in_stock, \
        pi.image_url AS primary_image_url, \
        p.created_at \
    FROM products p \
    LEFT JOIN product_images pi \
        ON pi.product_id = p.id AND pi.is_primary = 1";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// // Featured carousel
/// let featured = repo.list(Some(3), true).await?;
///
/// // Get by ID
/// let product = repo.get_by_id("uuid-here").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets a product by its ID, with the primary image joined in.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found (the caller decides whether that
    ///   is a NotFound error or a skippable condition)
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let sql = format!("{PRODUCT_SELECT} WHERE p.id = ?1");

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Lists products, newest first.
    ///
    /// ## Arguments
    /// * `limit` - Maximum results to return (`None` = all)
    /// * `featured_only` - Restrict to the featured carousel set
    ///
    /// ## Example
    /// ```rust,ignore
    /// // Home page: three featured artworks
    /// let featured = repo.list(Some(3), true).await?;
    ///
    /// // Gallery: full catalog
    /// let all = repo.list(None, false).await?;
    /// ```
    pub async fn list(&self, limit: Option<u32>, featured_only: bool) -> DbResult<Vec<Product>> {
        debug!(?limit, featured_only, "Listing products");

        let filter = if featured_only {
            " WHERE p.is_featured = 1"
        } else {
            ""
        };
        let sql = format!("{PRODUCT_SELECT}{filter} ORDER BY p.created_at DESC LIMIT ?1");

        // SQLite treats a negative LIMIT as "no limit"
        let limit = limit.map(|l| l as i64).unwrap_or(-1);

        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Listing returned products");
        Ok(products)
    }

    /// Gets all images for a product, primary first.
    pub async fn get_images(&self, product_id: &str) -> DbResult<Vec<ProductImage>> {
        let images = sqlx::query_as::<_, ProductImage>(
            "SELECT id, product_id, image_url, is_primary \
             FROM product_images \
             WHERE product_id = ?1 \
             ORDER BY is_primary DESC, id",
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(images)
    }

    /// Inserts a new product.
    ///
    /// ## Note
    /// `primary_image_url` is a join artifact, not a column; attach images
    /// with [`add_image`](Self::add_image) after the insert.
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, title = %product.title, "Inserting product");

        sqlx::query(
            "INSERT INTO products ( \
                id, title, artist, price_cents, description, \
                region, medium, dimensions, year, \
                is_featured, in_stock, created_at \
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        )
        .bind(&product.id)
        .bind(&product.title)
        .bind(&product.artist)
        .bind(product.price_cents)
        .bind(&product.description)
        .bind(&product.region)
        .bind(&product.medium)
        .bind(&product.dimensions)
        .bind(product.year)
        .bind(product.is_featured)
        .bind(product.in_stock)
        .bind(product.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Attaches an image to a product.
    pub async fn add_image(
        &self,
        product_id: &str,
        image_url: &str,
        is_primary: bool,
    ) -> DbResult<ProductImage> {
        let image = ProductImage {
            id: Uuid::new_v4().to_string(),
            product_id: product_id.to_string(),
            image_url: image_url.to_string(),
            is_primary,
        };

        sqlx::query(
            "INSERT INTO product_images (id, product_id, image_url, is_primary) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&image.id)
        .bind(&image.product_id)
        .bind(&image.image_url)
        .bind(image.is_primary)
        .execute(&self.pool)
        .await?;

        Ok(image)
    }

    /// Marks a product as in or out of stock.
    ///
    /// Out-of-stock artworks stay visible in the gallery but cannot be
    /// added to a cart.
    pub async fn set_in_stock(&self, id: &str, in_stock: bool) -> DbResult<()> {
        debug!(id = %id, in_stock, "Updating stock flag");

        let result = sqlx::query("UPDATE products SET in_stock = ?2 WHERE id = ?1")
            .bind(id)
            .bind(in_stock)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts products in the catalog (for diagnostics and seeding).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to generate a new product ID.
///
/// ## Usage
/// ```rust,ignore
/// let id = generate_product_id();
/// let product = Product { id, ... };
/// ```
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
