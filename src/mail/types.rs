//! Mail types for retromail.

use chrono::{DateTime, Utc};

/// A client-facing folder view.
///
/// Folder membership is derived from mail fields at query time, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Folder {
    /// Received, not deleted, not a draft.
    #[default]
    Inbox,
    /// Sent by the caller, not a draft, not deleted.
    Sent,
    /// Authored by the caller, still a draft, not deleted.
    Drafts,
    /// Soft-deleted mail the caller sent or received.
    Deleted,
}

impl Folder {
    /// Parse a folder name. Missing or unrecognized names map to the inbox.
    pub fn parse(name: Option<&str>) -> Folder {
        match name {
            Some("sent") => Folder::Sent,
            Some("drafts") => Folder::Drafts,
            Some("deleted") => Folder::Deleted,
            _ => Folder::Inbox,
        }
    }

    /// Folder name as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Folder::Inbox => "inbox",
            Folder::Sent => "sent",
            Folder::Drafts => "drafts",
            Folder::Deleted => "deleted",
        }
    }
}

/// A mail message.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Mail {
    /// Mail ID.
    pub id: i64,
    /// Sender address in `username@domain` form.
    #[sqlx(rename = "sender")]
    pub from: String,
    /// Recipient address in `username@domain` form.
    #[sqlx(rename = "recipient")]
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub body: String,
    /// Creation timestamp; never changes, not even on draft edits.
    pub date: DateTime<Utc>,
    /// Whether the mail is a draft.
    pub is_draft: bool,
    /// Whether the mail is soft-deleted.
    pub is_deleted: bool,
    /// Whether the recipient has marked the mail read.
    pub is_read: bool,
    /// Authoring identity subject (provenance only, never used for routing).
    pub user_id: String,
}

impl Mail {
    /// The pure folder-membership predicate, evaluated against a caller
    /// address. The repository's per-folder SQL mirrors this exactly.
    pub fn in_folder(&self, folder: Folder, address: &str) -> bool {
        match folder {
            Folder::Inbox => self.to == address && !self.is_deleted && !self.is_draft,
            Folder::Sent => self.from == address && !self.is_draft && !self.is_deleted,
            Folder::Drafts => self.from == address && self.is_draft && !self.is_deleted,
            Folder::Deleted => (self.to == address || self.from == address) && self.is_deleted,
        }
    }

    /// Check whether the given address is a party to this mail.
    pub fn involves(&self, address: &str) -> bool {
        self.to == address || self.from == address
    }
}

/// New mail for creation.
#[derive(Debug, Clone)]
pub struct NewMail {
    /// Sender address.
    pub from: String,
    /// Recipient address (may be anything for drafts).
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub body: String,
    /// Creation timestamp.
    pub date: DateTime<Utc>,
    /// Whether the mail is created as a draft.
    pub is_draft: bool,
    /// Authoring identity subject.
    pub user_id: String,
}

impl NewMail {
    /// Create a new outgoing mail dated now.
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
            date: Utc::now(),
            is_draft: false,
            user_id: user_id.into(),
        }
    }

    /// Mark this mail as a draft.
    pub fn draft(mut self) -> Self {
        self.is_draft = true;
        self
    }
}
