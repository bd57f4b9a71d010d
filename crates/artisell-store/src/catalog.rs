//! # Catalog Service Operations
//!
//! Gallery listings, single-artwork lookups, and favorites. Thin wrappers
//! over the repositories that turn "missing" into the `NotFound` the
//! frontend routes on.

use tracing::debug;

use artisell_core::{Product, ProductImage};

use crate::error::StoreError;
use crate::Storefront;

impl Storefront {
    /// Lists artworks, newest first.
    ///
    /// ## Arguments
    /// * `limit` - Maximum results (`None` = full catalog)
    /// * `featured_only` - Restrict to the featured carousel set
    pub async fn products(
        &self,
        limit: Option<u32>,
        featured_only: bool,
    ) -> Result<Vec<Product>, StoreError> {
        Ok(self.db().products().list(limit, featured_only).await?)
    }

    /// Fetches a single artwork, failing with `NotFound` if it does not
    /// exist (the detail page's 404 path).
    pub async fn product(&self, product_id: &str) -> Result<Product, StoreError> {
        self.db()
            .products()
            .get_by_id(product_id)
            .await?
            .ok_or_else(|| StoreError::not_found("Product", product_id))
    }

    /// Fetches an artwork's image gallery, primary first.
    pub async fn product_images(&self, product_id: &str) -> Result<Vec<ProductImage>, StoreError> {
        Ok(self.db().products().get_images(product_id).await?)
    }

    /// Bookmarks an artwork for a user (idempotent).
    pub async fn add_favorite(&self, user_id: &str, product_id: &str) -> Result<(), StoreError> {
        debug!(user_id = %user_id, product_id = %product_id, "add_favorite");
        Ok(self.db().favorites().add(user_id, product_id).await?)
    }

    /// Removes a bookmark (silent if absent).
    pub async fn remove_favorite(&self, user_id: &str, product_id: &str) -> Result<(), StoreError> {
        Ok(self.db().favorites().remove(user_id, product_id).await?)
    }

    /// Lists a user's favorited artworks, most recently added first.
    pub async fn favorites(&self, user_id: &str) -> Result<Vec<Product>, StoreError> {
        Ok(self.db().favorites().list_for_user(user_id).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use artisell_db::repository::product::generate_product_id;
    use artisell_db::{Database, DbConfig};
    use chrono::Utc;

    async fn store_with_catalog() -> (Storefront, String) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = Storefront::new(db);

        let product = Product {
            id: generate_product_id(),
            title: "Mayon Volcano".to_string(),
            artist: "Rafael Mendoza".to_string(),
            price_cents: 1_420_000,
            description: None,
            region: Some("Luzon".to_string()),
            medium: Some("Acrylic on Canvas".to_string()),
            dimensions: None,
            year: Some(2021),
            is_featured: true,
            in_stock: true,
            primary_image_url: None,
            created_at: Utc::now(),
        };
        store.db().products().insert(&product).await.unwrap();
        store
            .db()
            .products()
            .add_image(&product.id, "https://img.example/mayon.jpg", true)
            .await
            .unwrap();

        (store, product.id)
    }

    #[tokio::test]
    async fn test_product_lookup_and_not_found() {
        let (store, product_id) = store_with_catalog().await;

        let product = store.product(&product_id).await.unwrap();
        assert_eq!(product.title, "Mayon Volcano");
        assert_eq!(
            product.primary_image_url.as_deref(),
            Some("https://img.example/mayon.jpg")
        );

        let err = store.product("missing").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_favorites_flow() {
        let (store, product_id) = store_with_catalog().await;
        let user = store
            .register("Ana Reyes", "ana@example.com", "password123")
            .await
            .unwrap();

        store.add_favorite(&user.id, &product_id).await.unwrap();
        let favorites = store.favorites(&user.id).await.unwrap();
        assert_eq!(favorites.len(), 1);

        store.remove_favorite(&user.id, &product_id).await.unwrap();
        assert!(store.favorites(&user.id).await.unwrap().is_empty());
    }
}
