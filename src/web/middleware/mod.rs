//! Web middleware.

pub mod auth;
pub mod cors;

pub use auth::{jwt_auth, AuthUser, JwtState, ProviderClaims};
pub use cors::create_cors_layer;
