//! JWT authentication middleware.
//!
//! Tokens are minted by an external identity provider; this layer only
//! verifies them and hands the claims to handlers as an [`Identity`].

use axum::{
    body::Body,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, Request},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::identity::Identity;
use crate::web::error::ApiError;
use crate::RetromailError;

/// Claims as issued by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderClaims {
    /// Stable subject identifier.
    pub sub: String,
    /// Verified email address, when the provider has one.
    #[serde(default)]
    pub email: Option<String>,
    /// Display name, when the provider has one.
    #[serde(default)]
    pub name: Option<String>,
    /// Issued at timestamp.
    pub iat: u64,
    /// Expiration timestamp.
    pub exp: u64,
}

impl ProviderClaims {
    /// Convert the verified claims into a caller identity.
    pub fn identity(&self) -> Identity {
        Identity {
            subject: self.sub.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}

/// Application state for JWT verification.
#[derive(Clone)]
pub struct JwtState {
    /// Decoding key for JWT verification.
    pub decoding_key: DecodingKey,
    /// Validation settings.
    pub validation: Validation,
}

impl JwtState {
    /// Create a new JWT state from a secret key.
    pub fn new(secret: &str) -> Self {
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());
        let mut validation = Validation::default();
        validation.validate_exp = true;

        Self {
            decoding_key,
            validation,
        }
    }
}

/// Extractor for authenticated callers.
///
/// Use this extractor to require authentication for a handler. The handler
/// receives the verified provider claims.
#[derive(Debug, Clone)]
pub struct AuthUser(pub ProviderClaims);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let token = parts
                .headers
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .and_then(|header| header.strip_prefix("Bearer "))
                .ok_or(RetromailError::Unauthenticated)
                .map_err(ApiError::from)?;

            // Set by the jwt_auth middleware
            let jwt_state = parts
                .extensions
                .get::<Arc<JwtState>>()
                .ok_or_else(|| ApiError::internal("JWT state not configured"))?;

            let token_data =
                decode::<ProviderClaims>(token, &jwt_state.decoding_key, &jwt_state.validation)
                    .map_err(|e| {
                        tracing::debug!("JWT validation failed: {}", e);
                        ApiError::unauthorized("Invalid or expired token")
                    })?;

            Ok(AuthUser(token_data.claims))
        })
    }
}

/// Middleware function to inject JWT state into request extensions.
pub async fn jwt_auth(
    jwt_state: Arc<JwtState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    request.extensions_mut().insert(jwt_state);
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn create_test_token(secret: &str, claims: &ProviderClaims) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn sample_claims() -> ProviderClaims {
        ProviderClaims {
            sub: "subject-1".to_string(),
            email: Some("alice@example.com".to_string()),
            name: Some("Alice".to_string()),
            iat: chrono::Utc::now().timestamp() as u64,
            exp: (chrono::Utc::now().timestamp() + 3600) as u64,
        }
    }

    #[test]
    fn test_jwt_state_new() {
        let state = JwtState::new("test-secret");
        assert!(state.validation.validate_exp);
    }

    #[test]
    fn test_create_and_verify_token() {
        let secret = "test-secret";
        let state = JwtState::new(secret);

        let token = create_test_token(secret, &sample_claims());

        let decoded =
            decode::<ProviderClaims>(&token, &state.decoding_key, &state.validation).unwrap();
        assert_eq!(decoded.claims.sub, "subject-1");
        assert_eq!(decoded.claims.email.as_deref(), Some("alice@example.com"));
    }

    #[test]
    fn test_expired_token() {
        let secret = "test-secret";
        let state = JwtState::new(secret);

        let claims = ProviderClaims {
            iat: (chrono::Utc::now().timestamp() - 7200) as u64,
            exp: (chrono::Utc::now().timestamp() - 3600) as u64, // Expired 1 hour ago
            ..sample_claims()
        };

        let token = create_test_token(secret, &claims);

        let result = decode::<ProviderClaims>(&token, &state.decoding_key, &state.validation);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_secret() {
        let token = create_test_token("secret1", &sample_claims());
        let state = JwtState::new("secret2"); // Different secret

        let result = decode::<ProviderClaims>(&token, &state.decoding_key, &state.validation);
        assert!(result.is_err());
    }

    #[test]
    fn test_claims_without_optional_fields() {
        let secret = "test-secret";
        let state = JwtState::new(secret);

        let claims = ProviderClaims {
            email: None,
            name: None,
            ..sample_claims()
        };
        let token = create_test_token(secret, &claims);

        let decoded =
            decode::<ProviderClaims>(&token, &state.decoding_key, &state.validation).unwrap();
        assert!(decoded.claims.email.is_none());

        let identity = decoded.claims.identity();
        assert_eq!(identity.subject, "subject-1");
        assert!(identity.email.is_none());
    }
}
