//! # Authentication Service
//!
//! Registration, login, and profile updates.
//!
//! ## Password Handling
//! Passwords are hashed with Argon2 (salted, memory-hard) before they ever
//! reach the database; verification re-derives from the stored hash.
//! Session/cookie mechanics live in the frontend layer - this module only
//! answers "who is this user" questions.
//!
//! ## Login Failure Shape
//! Unknown email and wrong password both return the same
//! `InvalidCredentials` error, so the response does not reveal which
//! emails are registered.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use artisell_core::{User, ValidationError};

use crate::error::StoreError;
use crate::Storefront;

/// Profile fields a customer can edit (email and password have their own
/// flows and are not included).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
}

impl Storefront {
    /// Registers a new customer account.
    ///
    /// ## Behavior
    /// - name, email, password must be non-empty (reported per-field)
    /// - A duplicate email is reported as a field error on `email`
    /// - The password is Argon2-hashed; the plaintext is never stored
    ///
    /// ## Returns
    /// The created user, ready to be treated as logged in.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, StoreError> {
        let name = name.trim();
        let email = email.trim();
        debug!(email = %email, "register");

        let mut errors = Vec::new();
        for (field, value) in [("name", name), ("email", email), ("password", password)] {
            if value.is_empty() {
                errors.push(ValidationError::Required {
                    field: field.to_string(),
                });
            }
        }
        if !errors.is_empty() {
            return Err(StoreError::Validation(errors));
        }

        // Check first for a friendly error; the UNIQUE constraint still
        // backstops the race between check and insert
        if self.db().users().find_by_email(email).await?.is_some() {
            return Err(StoreError::Validation(vec![ValidationError::Duplicate {
                field: "email".to_string(),
                value: email.to_string(),
            }]));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: hash_password(password)?,
            phone: None,
            address: None,
            city: None,
            region: None,
            postal_code: None,
            created_at: Utc::now(),
        };

        self.db().users().insert(&user).await?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Logs a customer in.
    ///
    /// ## Returns
    /// The authenticated user, or [`StoreError::InvalidCredentials`] for
    /// both unknown emails and wrong passwords.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, StoreError> {
        let email = email.trim();
        debug!(email = %email, "login");

        let user = match self.db().users().find_by_email(email).await? {
            Some(user) => user,
            None => return Err(StoreError::InvalidCredentials),
        };

        if !verify_password(password, &user.password_hash) {
            return Err(StoreError::InvalidCredentials);
        }

        info!(user_id = %user.id, "User logged in");
        Ok(user)
    }

    /// Updates a customer's profile and returns the fresh record.
    pub async fn update_profile(
        &self,
        user_id: &str,
        update: &ProfileUpdate,
    ) -> Result<User, StoreError> {
        let name = update.name.trim();
        if name.is_empty() {
            return Err(StoreError::Validation(vec![ValidationError::Required {
                field: "name".to_string(),
            }]));
        }

        self.db()
            .users()
            .update_profile(
                user_id,
                name,
                update.phone.as_deref(),
                update.address.as_deref(),
                update.city.as_deref(),
                update.region.as_deref(),
                update.postal_code.as_deref(),
            )
            .await?;

        self.db()
            .users()
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| StoreError::not_found("User", user_id))
    }
}

// =============================================================================
// Password Helpers
// =============================================================================

/// Hash a password for storage.
fn hash_password(password: &str) -> Result<String, StoreError> {
    use argon2::{
        password_hash::{rand_core::OsRng, SaltString},
        Argon2, PasswordHasher,
    };

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| StoreError::Internal(format!("Failed to hash password: {}", e)))?;

    Ok(hash.to_string())
}

/// Verify a password against its stored hash.
fn verify_password(password: &str, hash: &str) -> bool {
    use argon2::{Argon2, PasswordHash, PasswordVerifier};

    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use artisell_db::{Database, DbConfig};

    async fn store() -> Storefront {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        Storefront::new(db)
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let store = store().await;

        let user = store
            .register("Juan Dela Cruz", "juan@example.com", "password123")
            .await
            .unwrap();
        assert_ne!(user.password_hash, "password123");
        assert!(user.password_hash.starts_with("$argon2"));

        let logged_in = store.login("juan@example.com", "password123").await.unwrap();
        assert_eq!(logged_in.id, user.id);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinct() {
        let store = store().await;
        store
            .register("Juan Dela Cruz", "juan@example.com", "password123")
            .await
            .unwrap();

        let wrong_password = store
            .login("juan@example.com", "not-the-password")
            .await
            .unwrap_err();
        let unknown_email = store
            .login("nobody@example.com", "password123")
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, StoreError::InvalidCredentials));
        assert!(matches!(unknown_email, StoreError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_duplicate_email_reported_on_field() {
        let store = store().await;
        store
            .register("Juan Dela Cruz", "juan@example.com", "password123")
            .await
            .unwrap();

        let err = store
            .register("Another Juan", "juan@example.com", "hunter2!")
            .await
            .unwrap_err();
        assert_eq!(err.fields()[0].field(), "email");
    }

    #[tokio::test]
    async fn test_register_requires_fields() {
        let store = store().await;

        let err = store.register("", "juan@example.com", "").await.unwrap_err();
        let fields: Vec<&str> = err.fields().iter().map(|f| f.field()).collect();
        assert_eq!(fields, vec!["name", "password"]);
    }

    #[tokio::test]
    async fn test_update_profile() {
        let store = store().await;
        let user = store
            .register("Juan Dela Cruz", "juan@example.com", "password123")
            .await
            .unwrap();

        let updated = store
            .update_profile(
                &user.id,
                &ProfileUpdate {
                    name: "Juan D. Cruz".to_string(),
                    phone: Some("+63 912 345 6789".to_string()),
                    city: Some("Makati City".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Juan D. Cruz");
        assert_eq!(updated.city.as_deref(), Some("Makati City"));
    }
}
