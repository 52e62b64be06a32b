//! Web API module for retromail.
//!
//! A REST API over the mail and user services, authenticated with provider
//! JWTs.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
