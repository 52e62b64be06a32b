//! Mail storage and access control for retromail.

mod repository;
mod service;
mod types;

pub use repository::MailRepository;
pub use service::{MailService, SaveDraft, SendMail};
pub use types::{Folder, Mail, NewMail};
