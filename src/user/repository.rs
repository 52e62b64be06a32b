//! User repository for retromail.
//!
//! CRUD operations for the `users` table.

use sqlx::SqlitePool;

use super::types::{NewUser, User};
use crate::{Result, RetromailError};

const USER_COLUMNS: &str =
    "id, username, domain, display_name, bio, user_id, email, created_at";

/// Repository for user records.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user.
    ///
    /// Returns the created user with the assigned ID.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let result = sqlx::query(
            "INSERT INTO users (username, domain, display_name, bio, user_id, email)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&new_user.username)
        .bind(&new_user.domain)
        .bind(&new_user.display_name)
        .bind(&new_user.bio)
        .bind(&new_user.user_id)
        .bind(&new_user.email)
        .execute(self.pool)
        .await
        .map_err(|e| RetromailError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| RetromailError::NotFound("user".to_string()))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(user)
    }

    /// Get a user by identity-provider subject id.
    pub async fn get_by_subject(&self, subject: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = ?"
        ))
        .bind(subject)
        .fetch_optional(self.pool)
        .await?;
        Ok(user)
    }

    /// Get a user by `(username, domain)` address pair.
    pub async fn get_by_address(&self, username: &str, domain: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ? AND domain = ?"
        ))
        .bind(username)
        .bind(domain)
        .fetch_optional(self.pool)
        .await?;
        Ok(user)
    }

    /// List all registered users.
    pub async fn list(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY username, domain"
        ))
        .fetch_all(self.pool)
        .await?;
        Ok(users)
    }
}
