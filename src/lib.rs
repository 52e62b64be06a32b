//! retromail - a retro-styled webmail backend.
//!
//! Users register addresses in a `username@domain` namespace, and mail moves
//! between registered addresses. Folders are derived views over stored mail,
//! never stored state. Authentication is delegated to an external identity
//! provider; this crate only verifies its tokens.

pub mod config;
pub mod db;
pub mod error;
pub mod identity;
pub mod logging;
pub mod mail;
pub mod user;
pub mod web;

pub use config::Config;
pub use db::Database;
pub use error::{Result, RetromailError};
pub use identity::Identity;
pub use mail::{Folder, Mail, MailService};
pub use user::{Address, User, UserService};
pub use web::WebServer;
