//! Database schema migrations for retromail.
//!
//! Migrations are applied in order; each entry runs inside a transaction and
//! is recorded in the `schema_version` table.

/// All schema migrations, oldest first.
pub const MIGRATIONS: &[&str] = &[
    // v1: users and mail tables
    r#"
    CREATE TABLE users (
        id           INTEGER PRIMARY KEY AUTOINCREMENT,
        username     TEXT NOT NULL,
        domain       TEXT NOT NULL,
        display_name TEXT,
        bio          TEXT,
        user_id      TEXT NOT NULL,
        email        TEXT NOT NULL,
        created_at   TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE UNIQUE INDEX idx_users_address ON users(username, domain);
    CREATE UNIQUE INDEX idx_users_subject ON users(user_id);

    CREATE TABLE mail (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        sender     TEXT NOT NULL,
        recipient  TEXT NOT NULL,
        subject    TEXT NOT NULL,
        body       TEXT NOT NULL,
        date       TEXT NOT NULL,
        is_draft   INTEGER NOT NULL DEFAULT 0,
        is_deleted INTEGER NOT NULL DEFAULT 0,
        is_read    INTEGER NOT NULL DEFAULT 0,
        user_id    TEXT NOT NULL
    );

    CREATE INDEX idx_mail_recipient ON mail(recipient);
    CREATE INDEX idx_mail_sender ON mail(sender);
    "#,
];
