//! Response DTOs for the Web API.

use serde::Serialize;

use crate::mail::Mail;
use crate::user::User;

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Response carrying the id of a created or updated record.
#[derive(Debug, Serialize)]
pub struct IdResponse {
    /// Record ID.
    pub id: i64,
}

/// Mail in responses.
#[derive(Debug, Serialize)]
pub struct MailResponse {
    /// Mail ID.
    pub id: i64,
    /// Sender address.
    pub from: String,
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub body: String,
    /// Creation timestamp (RFC 3339).
    pub date: String,
    /// Whether the mail is a draft.
    pub is_draft: bool,
    /// Whether the mail is soft-deleted.
    pub is_deleted: bool,
    /// Whether the recipient has marked the mail read.
    pub is_read: bool,
}

impl From<Mail> for MailResponse {
    fn from(mail: Mail) -> Self {
        Self {
            id: mail.id,
            from: mail.from,
            to: mail.to,
            subject: mail.subject,
            body: mail.body,
            date: mail.date.to_rfc3339(),
            is_draft: mail.is_draft,
            is_deleted: mail.is_deleted,
            is_read: mail.is_read,
        }
    }
}

/// User in responses.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// User ID.
    pub id: i64,
    /// Local part of the address.
    pub username: String,
    /// Domain part of the address.
    pub domain: String,
    /// Full address in `username@domain` form.
    pub address: String,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Self-introduction text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Provider email address.
    pub email: String,
    /// Account creation timestamp.
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let address = user.address().to_string();
        Self {
            id: user.id,
            username: user.username,
            domain: user.domain,
            address,
            display_name: user.display_name,
            bio: user.bio,
            email: user.email,
            created_at: user.created_at,
        }
    }
}
