//! # Favorite Repository
//!
//! Database operations for bookmarked artworks.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use artisell_core::Product;

/// Repository for favorite database operations.
#[derive(Debug, Clone)]
pub struct FavoriteRepository {
    pool: SqlitePool,
}

impl FavoriteRepository {
    /// Creates a new FavoriteRepository.
    pub fn new(pool: SqlitePool) -> Self {
        FavoriteRepository { pool }
    }

    /// Bookmarks an artwork for a user. Idempotent: favoriting an
    /// already-favorited artwork is a no-op.
    pub async fn add(&self, user_id: &str, product_id: &str) -> DbResult<()> {
        debug!(user_id = %user_id, product_id = %product_id, "Adding favorite");

        let result = sqlx::query(
            "INSERT INTO favorites (id, user_id, product_id, created_at) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(user_id)
        .bind(product_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await;

        match result.map_err(DbError::from) {
            Ok(_) => Ok(()),
            // Already favorited: the (user, product) UNIQUE pair fired
            Err(err) if err.is_unique_violation_on("favorites") => Ok(()),
            Err(err) => Err(err),
        }
    }

    /// Removes a bookmark. Silent if it does not exist.
    pub async fn remove(&self, user_id: &str, product_id: &str) -> DbResult<()> {
        sqlx::query("DELETE FROM favorites WHERE user_id = ?1 AND product_id = ?2")
            .bind(user_id)
            .bind(product_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Lists a user's favorited artworks, most recently added first.
    pub async fn list_for_user(&self, user_id: &str) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT \
                p.id, p.title, p.artist, p.price_cents, p.description, \
                p.region, p.medium, p.dimensions, p.year, \
                p.is_featured, p.in_stock, \
                pi.image_url AS primary_image_url, \
                p.created_at \
             FROM favorites f \
             JOIN products p ON p.id = f.product_id \
             LEFT JOIN product_images pi \
                ON pi.product_id = p.id AND pi.is_primary = 1 \
             WHERE f.user_id = ?1 \
             ORDER BY f.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::product::generate_product_id;
    use crate::repository::user::generate_user_id;
    use artisell_core::User;

    async fn seed(db: &Database) -> (String, String) {
        let user = User {
            id: generate_user_id(),
            name: "Elena Gomez".to_string(),
            email: "elena@example.com".to_string(),
            password_hash: "$argon2id$test".to_string(),
            phone: None,
            address: None,
            city: None,
            region: None,
            postal_code: None,
            created_at: Utc::now(),
        };
        db.users().insert(&user).await.unwrap();

        let product = Product {
            id: generate_product_id(),
            title: "Tarsier Portrait".to_string(),
            artist: "Elena Gomez".to_string(),
            price_cents: 750_000,
            description: None,
            region: Some("Visayas".to_string()),
            medium: Some("Colored Pencil".to_string()),
            dimensions: None,
            year: Some(2023),
            is_featured: false,
            in_stock: true,
            primary_image_url: None,
            created_at: Utc::now(),
        };
        db.products().insert(&product).await.unwrap();

        (user.id, product.id)
    }

    #[tokio::test]
    async fn test_add_list_remove() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let (user_id, product_id) = seed(&db).await;
        let repo = db.favorites();

        repo.add(&user_id, &product_id).await.unwrap();
        // Idempotent second add
        repo.add(&user_id, &product_id).await.unwrap();

        let favorites = repo.list_for_user(&user_id).await.unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].title, "Tarsier Portrait");

        repo.remove(&user_id, &product_id).await.unwrap();
        assert!(repo.list_for_user(&user_id).await.unwrap().is_empty());

        // Removing again is silent
        repo.remove(&user_id, &product_id).await.unwrap();
    }
}
