//! Caller identity resolved from the authentication token.
//!
//! The identity provider is external; retromail only sees the subject id
//! plus whatever email and display name the provider attached. The identity
//! is passed explicitly into every operation rather than held as ambient
//! state.

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Opaque identity-provider subject id.
    pub subject: String,
    /// Email address supplied by the provider, if any.
    pub email: Option<String>,
    /// Display name supplied by the provider, if any.
    pub name: Option<String>,
}

impl Identity {
    /// Create an identity with only a subject id.
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            email: None,
            name: None,
        }
    }

    /// Set the provider email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the provider display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
