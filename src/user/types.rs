//! User types for retromail.

use std::fmt;
use std::str::FromStr;

use crate::RetromailError;

/// A `username@domain` address uniquely identifying a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    /// Local part.
    pub username: String,
    /// Domain part.
    pub domain: String,
}

impl Address {
    /// Create a new address.
    pub fn new(username: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            domain: domain.into(),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.username, self.domain)
    }
}

impl FromStr for Address {
    type Err = RetromailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('@') {
            Some((username, domain)) if !username.is_empty() && !domain.is_empty() => {
                Ok(Address::new(username, domain))
            }
            _ => Err(RetromailError::InvalidAddress(s.to_string())),
        }
    }
}

/// A registered user.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Local part of the address.
    pub username: String,
    /// Domain part of the address.
    pub domain: String,
    /// Display name (presentation only).
    pub display_name: Option<String>,
    /// Self-introduction text (presentation only).
    pub bio: Option<String>,
    /// Identity-provider subject id; at most one user per subject.
    pub user_id: String,
    /// Provider email captured at creation, never re-validated.
    pub email: String,
    /// Account creation timestamp.
    pub created_at: String,
}

impl User {
    /// The user's registered address.
    pub fn address(&self) -> Address {
        Address::new(&self.username, &self.domain)
    }
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Local part of the address.
    pub username: String,
    /// Domain part of the address.
    pub domain: String,
    /// Display name.
    pub display_name: Option<String>,
    /// Self-introduction text.
    pub bio: Option<String>,
    /// Identity-provider subject id.
    pub user_id: String,
    /// Provider email.
    pub email: String,
}

impl NewUser {
    /// Create a new user with the required fields.
    pub fn new(
        username: impl Into<String>,
        domain: impl Into<String>,
        user_id: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            domain: domain.into(),
            display_name: None,
            bio: None,
            user_id: user_id.into(),
            email: email.into(),
        }
    }

    /// Set the display name.
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Set the bio.
    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }
}
