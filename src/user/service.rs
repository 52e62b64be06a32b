//! User service for retromail.
//!
//! High-level user operations: explicit registration, idempotent
//! auto-provisioning from the caller's identity, lookup and search.

use sqlx::SqlitePool;

use crate::config::ProvisionConfig;
use crate::identity::Identity;
use crate::{Result, RetromailError};

use super::repository::UserRepository;
use super::types::{NewUser, User};

/// Placeholder bio for auto-provisioned accounts.
const DEFAULT_BIO: &str = "New around here.";

/// Request to register an address explicitly.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Desired local part.
    pub username: String,
    /// Desired domain.
    pub domain: String,
    /// Display name.
    pub display_name: Option<String>,
    /// Self-introduction text.
    pub bio: Option<String>,
}

/// Service for user operations.
pub struct UserService<'a> {
    pool: &'a SqlitePool,
    provision: ProvisionConfig,
}

impl<'a> UserService<'a> {
    /// Create a new UserService with the given pool and provisioning settings.
    pub fn new(pool: &'a SqlitePool, provision: ProvisionConfig) -> Self {
        Self { pool, provision }
    }

    /// Register an address for the caller.
    ///
    /// # Errors
    ///
    /// - `IdentityIncomplete` if the provider gave no email
    /// - `DuplicateAddress` if the `(username, domain)` pair is taken
    /// - `AccountExists` if the caller's subject already owns a user
    pub async fn create(&self, caller: &Identity, request: &CreateUser) -> Result<User> {
        let email = caller
            .email
            .as_deref()
            .ok_or(RetromailError::IdentityIncomplete)?;

        let repo = UserRepository::new(self.pool);

        if repo
            .get_by_address(&request.username, &request.domain)
            .await?
            .is_some()
        {
            return Err(RetromailError::DuplicateAddress(format!(
                "{}@{}",
                request.username, request.domain
            )));
        }

        if repo.get_by_subject(&caller.subject).await?.is_some() {
            return Err(RetromailError::AccountExists);
        }

        let mut new_user = NewUser::new(
            &request.username,
            &request.domain,
            &caller.subject,
            email,
        );
        new_user.display_name = request.display_name.clone();
        new_user.bio = request.bio.clone();

        repo.create(&new_user).await
    }

    /// Resolve the caller to a registered user, provisioning one if absent.
    ///
    /// Idempotent: a second call for the same subject returns the existing
    /// user. The username candidate is the local part of the provider email;
    /// taken candidates are retried with an incrementing integer suffix up to
    /// the configured cap.
    ///
    /// # Errors
    ///
    /// - `IdentityIncomplete` if the provider gave no usable email
    /// - `ProvisioningExhausted` if no free username was found within the cap
    pub async fn ensure(&self, caller: &Identity) -> Result<User> {
        let repo = UserRepository::new(self.pool);

        if let Some(user) = repo.get_by_subject(&caller.subject).await? {
            return Ok(user);
        }

        let email = caller
            .email
            .as_deref()
            .ok_or(RetromailError::IdentityIncomplete)?;
        let local = email
            .split('@')
            .next()
            .filter(|s| !s.is_empty())
            .ok_or(RetromailError::IdentityIncomplete)?;

        for attempt in 0..self.provision.max_attempts {
            let username = if attempt == 0 {
                local.to_string()
            } else {
                format!("{local}{attempt}")
            };

            if repo
                .get_by_address(&username, &self.provision.domain)
                .await?
                .is_some()
            {
                continue;
            }

            let display_name = caller.name.clone().unwrap_or_else(|| username.clone());
            let new_user = NewUser::new(&username, &self.provision.domain, &caller.subject, email)
                .with_display_name(display_name)
                .with_bio(DEFAULT_BIO);

            tracing::info!(
                subject = %caller.subject,
                address = %format!("{username}@{}", self.provision.domain),
                "Auto-provisioned user"
            );
            return repo.create(&new_user).await;
        }

        Err(RetromailError::ProvisioningExhausted(
            self.provision.max_attempts,
        ))
    }

    /// Get the caller's registered user, if any.
    pub async fn current(&self, caller: &Identity) -> Result<Option<User>> {
        UserRepository::new(self.pool)
            .get_by_subject(&caller.subject)
            .await
    }

    /// Get a user by address pair, if any.
    pub async fn get_by_address(&self, username: &str, domain: &str) -> Result<Option<User>> {
        UserRepository::new(self.pool)
            .get_by_address(username, domain)
            .await
    }

    /// List all registered users.
    pub async fn list(&self) -> Result<Vec<User>> {
        UserRepository::new(self.pool).list().await
    }

    /// Search users by case-insensitive substring over username, domain and
    /// display name. An empty query returns all users.
    pub async fn search(&self, query: &str) -> Result<Vec<User>> {
        let users = UserRepository::new(self.pool).list().await?;

        if query.is_empty() {
            return Ok(users);
        }

        let needle = query.to_lowercase();
        Ok(users
            .into_iter()
            .filter(|u| {
                u.username.to_lowercase().contains(&needle)
                    || u.domain.to_lowercase().contains(&needle)
                    || u.display_name
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            })
            .collect())
    }
}
