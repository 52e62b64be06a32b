//! Mail service for retromail.
//!
//! The access-layer contract: every operation takes the caller's identity
//! explicitly, resolves it to a registered address, applies the relevant
//! authorization predicate and performs a single record read or write.

use sqlx::SqlitePool;

use crate::identity::Identity;
use crate::user::{Address, User, UserRepository};
use crate::{Result, RetromailError};

use super::repository::MailRepository;
use super::types::{Folder, Mail, NewMail};

/// Request to send a mail (or file it as a draft).
#[derive(Debug, Clone)]
pub struct SendMail {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub body: String,
    /// File as a draft instead of sending.
    pub is_draft: bool,
}

/// Request to save a draft, creating it when `id` is absent.
#[derive(Debug, Clone)]
pub struct SaveDraft {
    /// Existing draft to overwrite, if any.
    pub id: Option<i64>,
    /// Recipient address (may be partial or invalid for drafts).
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub body: String,
}

/// Service for mail operations.
pub struct MailService<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MailService<'a> {
    /// Create a new MailService with the given pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    async fn caller_user(&self, caller: &Identity) -> Result<Option<User>> {
        UserRepository::new(self.pool)
            .get_by_subject(&caller.subject)
            .await
    }

    /// List the caller's mail in a folder, newest first.
    ///
    /// A caller without a registered address sees an empty mailbox rather
    /// than an error.
    pub async fn list(&self, caller: &Identity, folder: Folder) -> Result<Vec<Mail>> {
        let Some(user) = self.caller_user(caller).await? else {
            return Ok(Vec::new());
        };

        let mails = MailRepository::new(self.pool)
            .list_folder(&user.address().to_string(), folder)
            .await?;
        tracing::debug!(folder = folder.as_str(), count = mails.len(), "Listed mail");
        Ok(mails)
    }

    /// Get a single mail.
    ///
    /// Returns `None` (not an error) when the caller has no registered
    /// address, mirroring the empty mailbox in [`list`](Self::list).
    ///
    /// # Errors
    ///
    /// - `NotFound` if the id does not resolve
    /// - `Unauthorized` if the caller is neither sender nor recipient
    pub async fn get(&self, caller: &Identity, id: i64) -> Result<Option<Mail>> {
        let mail = MailRepository::new(self.pool)
            .get_by_id(id)
            .await?
            .ok_or_else(|| RetromailError::NotFound("mail".to_string()))?;

        let Some(user) = self.caller_user(caller).await? else {
            return Ok(None);
        };

        let address = user.address().to_string();
        if !mail.involves(&address) {
            return Err(RetromailError::Unauthorized(
                "not a party to this mail".to_string(),
            ));
        }

        Ok(Some(mail))
    }

    /// Send a mail, or file it as a draft.
    ///
    /// Non-drafts require the recipient address to resolve to a registered
    /// user; drafts skip the check entirely and may target anything.
    ///
    /// # Errors
    ///
    /// - `RegistrationRequired` if the caller has no registered address
    /// - `RecipientNotFound` if sending and the target has no user
    pub async fn send(&self, caller: &Identity, request: &SendMail) -> Result<i64> {
        let user = self
            .caller_user(caller)
            .await?
            .ok_or(RetromailError::RegistrationRequired)?;

        if !request.is_draft {
            // A malformed address cannot match any registered user
            let address: Address = request
                .to
                .parse()
                .map_err(|_| RetromailError::RecipientNotFound(request.to.clone()))?;

            if UserRepository::new(self.pool)
                .get_by_address(&address.username, &address.domain)
                .await?
                .is_none()
            {
                return Err(RetromailError::RecipientNotFound(request.to.clone()));
            }
        }

        let mut new_mail = NewMail::new(
            user.address().to_string(),
            &request.to,
            &request.subject,
            &request.body,
            &caller.subject,
        );
        if request.is_draft {
            new_mail = new_mail.draft();
        }

        let mail = MailRepository::new(self.pool).create(&new_mail).await?;
        tracing::debug!(id = mail.id, from = %mail.from, to = %mail.to, draft = mail.is_draft, "Stored mail");
        Ok(mail.id)
    }

    /// Save a draft, overwriting in place when `id` is given.
    ///
    /// Safe to call repeatedly with the same `id`; concurrent saves are
    /// last-write-wins.
    ///
    /// # Errors
    ///
    /// - `RegistrationRequired` if the caller has no registered address
    /// - `NotFound` if `id` does not resolve
    /// - `Unauthorized` unless the record is the caller's own, still-draft mail
    pub async fn save_draft(&self, caller: &Identity, request: &SaveDraft) -> Result<i64> {
        let user = self
            .caller_user(caller)
            .await?
            .ok_or(RetromailError::RegistrationRequired)?;
        let address = user.address().to_string();

        let repo = MailRepository::new(self.pool);

        match request.id {
            Some(id) => {
                let mail = repo
                    .get_by_id(id)
                    .await?
                    .ok_or_else(|| RetromailError::NotFound("mail".to_string()))?;

                if mail.from != address || !mail.is_draft {
                    return Err(RetromailError::Unauthorized(
                        "only the author may edit a draft".to_string(),
                    ));
                }

                repo.update_draft(id, &request.to, &request.subject, &request.body)
                    .await?;
                Ok(id)
            }
            None => {
                let new_mail = NewMail::new(
                    address,
                    &request.to,
                    &request.subject,
                    &request.body,
                    &caller.subject,
                )
                .draft();
                Ok(repo.create(&new_mail).await?.id)
            }
        }
    }

    /// Soft-delete a mail the caller sent or received.
    pub async fn delete(&self, caller: &Identity, id: i64) -> Result<()> {
        self.set_deleted(caller, id, true).await
    }

    /// Restore a soft-deleted mail the caller sent or received.
    pub async fn restore(&self, caller: &Identity, id: i64) -> Result<()> {
        self.set_deleted(caller, id, false).await
    }

    async fn set_deleted(&self, caller: &Identity, id: i64, deleted: bool) -> Result<()> {
        let repo = MailRepository::new(self.pool);
        let mail = repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| RetromailError::NotFound("mail".to_string()))?;

        let user = self
            .caller_user(caller)
            .await?
            .ok_or(RetromailError::RegistrationRequired)?;

        if !mail.involves(&user.address().to_string()) {
            return Err(RetromailError::Unauthorized(
                "not a party to this mail".to_string(),
            ));
        }

        repo.set_deleted(id, deleted).await?;
        Ok(())
    }

    /// Mark a mail as read. Recipient only; there is no mark-unread.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the id does not resolve
    /// - `Unauthorized` for anyone but the recipient, the sender included
    pub async fn mark_read(&self, caller: &Identity, id: i64) -> Result<()> {
        let repo = MailRepository::new(self.pool);
        let mail = repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| RetromailError::NotFound("mail".to_string()))?;

        let user = self
            .caller_user(caller)
            .await?
            .ok_or(RetromailError::RegistrationRequired)?;

        if mail.to != user.address().to_string() {
            return Err(RetromailError::Unauthorized(
                "only the recipient may mark a mail read".to_string(),
            ));
        }

        repo.mark_read(id).await?;
        Ok(())
    }
}
