//! Mail repository for retromail.
//!
//! Per-folder list queries mirror the pure predicates on [`Mail`]; ordering
//! is newest first with insertion order breaking ties.

use sqlx::SqlitePool;

use super::types::{Folder, Mail, NewMail};
use crate::{Result, RetromailError};

const MAIL_COLUMNS: &str =
    "id, sender, recipient, subject, body, date, is_draft, is_deleted, is_read, user_id";

/// Repository for mail records.
pub struct MailRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MailRepository<'a> {
    /// Create a new MailRepository with the given pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new mail.
    pub async fn create(&self, mail: &NewMail) -> Result<Mail> {
        let result = sqlx::query(
            "INSERT INTO mail (sender, recipient, subject, body, date, is_draft, is_deleted, is_read, user_id)
             VALUES (?, ?, ?, ?, ?, ?, 0, 0, ?)",
        )
        .bind(&mail.from)
        .bind(&mail.to)
        .bind(&mail.subject)
        .bind(&mail.body)
        .bind(mail.date)
        .bind(mail.is_draft)
        .bind(&mail.user_id)
        .execute(self.pool)
        .await
        .map_err(|e| RetromailError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| RetromailError::NotFound("mail".to_string()))
    }

    /// Get a mail by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Mail>> {
        let mail = sqlx::query_as::<_, Mail>(&format!(
            "SELECT {MAIL_COLUMNS} FROM mail WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(mail)
    }

    /// List mail in the given folder view for an address, newest first.
    pub async fn list_folder(&self, address: &str, folder: Folder) -> Result<Vec<Mail>> {
        let mails = match folder {
            Folder::Inbox => {
                sqlx::query_as::<_, Mail>(&format!(
                    "SELECT {MAIL_COLUMNS} FROM mail
                     WHERE recipient = ? AND is_deleted = 0 AND is_draft = 0
                     ORDER BY date DESC, id DESC"
                ))
                .bind(address)
                .fetch_all(self.pool)
                .await?
            }
            Folder::Sent => {
                sqlx::query_as::<_, Mail>(&format!(
                    "SELECT {MAIL_COLUMNS} FROM mail
                     WHERE sender = ? AND is_draft = 0 AND is_deleted = 0
                     ORDER BY date DESC, id DESC"
                ))
                .bind(address)
                .fetch_all(self.pool)
                .await?
            }
            Folder::Drafts => {
                sqlx::query_as::<_, Mail>(&format!(
                    "SELECT {MAIL_COLUMNS} FROM mail
                     WHERE sender = ? AND is_draft = 1 AND is_deleted = 0
                     ORDER BY date DESC, id DESC"
                ))
                .bind(address)
                .fetch_all(self.pool)
                .await?
            }
            Folder::Deleted => {
                sqlx::query_as::<_, Mail>(&format!(
                    "SELECT {MAIL_COLUMNS} FROM mail
                     WHERE (recipient = ? OR sender = ?) AND is_deleted = 1
                     ORDER BY date DESC, id DESC"
                ))
                .bind(address)
                .bind(address)
                .fetch_all(self.pool)
                .await?
            }
        };
        Ok(mails)
    }

    /// Overwrite a draft's recipient, subject and body in place.
    ///
    /// The `date` column is deliberately untouched; it reflects creation, not
    /// last edit.
    pub async fn update_draft(
        &self,
        id: i64,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<bool> {
        let rows = sqlx::query("UPDATE mail SET recipient = ?, subject = ?, body = ? WHERE id = ?")
            .bind(to)
            .bind(subject)
            .bind(body)
            .bind(id)
            .execute(self.pool)
            .await?
            .rows_affected();
        Ok(rows > 0)
    }

    /// Set or clear the soft-delete flag.
    pub async fn set_deleted(&self, id: i64, deleted: bool) -> Result<bool> {
        let rows = sqlx::query("UPDATE mail SET is_deleted = ? WHERE id = ?")
            .bind(deleted)
            .bind(id)
            .execute(self.pool)
            .await?
            .rows_affected();
        Ok(rows > 0)
    }

    /// Mark a mail as read.
    pub async fn mark_read(&self, id: i64) -> Result<bool> {
        let rows = sqlx::query("UPDATE mail SET is_read = 1 WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?
            .rows_affected();
        Ok(rows > 0)
    }
}
