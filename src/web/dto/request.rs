//! Request DTOs for the Web API.

use serde::Deserialize;

/// Request body for POST /api/mail.
#[derive(Debug, Deserialize)]
pub struct SendMailRequest {
    /// Recipient address in `username@domain` form.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub body: String,
    /// File as a draft instead of sending.
    #[serde(default)]
    pub is_draft: bool,
}

/// Request body for POST /api/mail/draft.
#[derive(Debug, Deserialize)]
pub struct SaveDraftRequest {
    /// Existing draft to overwrite, if any.
    pub id: Option<i64>,
    /// Recipient address (may be partial).
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub body: String,
}

/// Request body for POST /api/users.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    /// Desired local part.
    pub username: String,
    /// Desired domain.
    pub domain: String,
    /// Display name.
    pub display_name: Option<String>,
    /// Self-introduction text.
    pub bio: Option<String>,
}

/// Query parameters for GET /api/mail.
#[derive(Debug, Deserialize)]
pub struct MailListQuery {
    /// Folder name; missing or unknown names mean the inbox.
    pub folder: Option<String>,
}

/// Query parameters for GET /api/users.
#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    /// Substring filter over username, domain and display name.
    pub q: Option<String>,
}
