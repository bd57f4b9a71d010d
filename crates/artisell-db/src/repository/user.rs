//! # User Repository
//!
//! Database operations for customer accounts.
//!
//! Password hashing/verification lives in the store layer; this repository
//! only ever sees the finished argon2 hash.

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use artisell_core::User;

/// User columns, shared by every read.
const USER_SELECT: &str = "\
    SELECT id, name, email, password_hash, \
           phone, address, city, region, postal_code, created_at \
    FROM users";

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Inserts a new user.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - email already registered
    pub async fn insert(&self, user: &User) -> DbResult<()> {
        debug!(id = %user.id, email = %user.email, "Inserting user");

        sqlx::query(
            "INSERT INTO users ( \
                id, name, email, password_hash, \
                phone, address, city, region, postal_code, created_at \
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.phone)
        .bind(&user.address)
        .bind(&user.city)
        .bind(&user.region)
        .bind(&user.postal_code)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a user by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<User>> {
        let sql = format!("{USER_SELECT} WHERE id = ?1");

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Gets a user by email (the login identifier).
    pub async fn find_by_email(&self, email: &str) -> DbResult<Option<User>> {
        let sql = format!("{USER_SELECT} WHERE email = ?1");

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Updates a user's profile fields (everything except email and
    /// password, which have their own flows).
    pub async fn update_profile(
        &self,
        id: &str,
        name: &str,
        phone: Option<&str>,
        address: Option<&str>,
        city: Option<&str>,
        region: Option<&str>,
        postal_code: Option<&str>,
    ) -> DbResult<()> {
        debug!(id = %id, "Updating user profile");

        let result = sqlx::query(
            "UPDATE users SET \
                name = ?2, \
                phone = ?3, \
                address = ?4, \
                city = ?5, \
                region = ?6, \
                postal_code = ?7 \
             WHERE id = ?1",
        )
        .bind(id)
        .bind(name)
        .bind(phone)
        .bind(address)
        .bind(city)
        .bind(region)
        .bind(postal_code)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", id));
        }

        Ok(())
    }
}

/// Helper to generate a new user ID.
pub fn generate_user_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::Utc;

    fn sample_user(email: &str) -> User {
        User {
            id: generate_user_id(),
            name: "Ana Reyes".to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$test".to_string(),
            phone: Some("+63 917 000 1111".to_string()),
            address: None,
            city: None,
            region: None,
            postal_code: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_by_email() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.users();

        let user = sample_user("ana@example.com");
        repo.insert(&user).await.unwrap();

        let found = repo.find_by_email("ana@example.com").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(found.name, "Ana Reyes");

        assert!(repo.find_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.users();

        repo.insert(&sample_user("ana@example.com")).await.unwrap();
        let err = repo.insert(&sample_user("ana@example.com")).await.unwrap_err();

        assert!(err.is_unique_violation_on("email"));
    }

    #[tokio::test]
    async fn test_update_profile() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.users();

        let user = sample_user("ana@example.com");
        repo.insert(&user).await.unwrap();

        repo.update_profile(
            &user.id,
            "Ana R. Reyes",
            Some("+63 917 222 3333"),
            Some("45 Mabini St"),
            Some("Cebu City"),
            Some("Central Visayas"),
            Some("6000"),
        )
        .await
        .unwrap();

        let found = repo.get_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Ana R. Reyes");
        assert_eq!(found.city.as_deref(), Some("Cebu City"));

        let err = repo
            .update_profile("missing", "X", None, None, None, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
