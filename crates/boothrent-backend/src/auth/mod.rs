//! Auth Layer
//!
//! The gateway contract the application signs in through, plus the
//! in-memory provider used in place of the real identity service. Provider
//! error codes map onto a small set of fixed user-facing messages; the UI
//! never sees a raw code.

mod memory;

pub use memory::InMemoryAuth;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::BusinessProfileInput;
use crate::repository::Subscription;

/// The signed-in session identity. `uid` is the tenancy key for every
/// document the user owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub uid: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Sign-up also carries the business profile; the gateway writes the
/// profile document before the call resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub business_profile: BusinessProfileInput,
}

/// Session-change callback: `Some` on sign-in, `None` on sign-out. Invoked
/// once immediately on registration with the current session.
pub type AuthStateCallback = Arc<dyn Fn(Option<AuthUser>) + Send + Sync>;

/// Provider error codes, before mapping to user-facing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorCode {
    EmailAlreadyInUse,
    InvalidEmail,
    WeakPassword,
    InvalidCredential,
    SignOutFailed,
    Other,
}

/// An auth failure carrying its provider code. `user_message` is the only
/// text the UI shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthError {
    code: AuthErrorCode,
}

impl AuthError {
    pub fn new(code: AuthErrorCode) -> Self {
        AuthError { code }
    }

    pub fn code(&self) -> AuthErrorCode {
        self.code
    }

    /// Maps the provider code to its fixed user-facing string.
    pub fn user_message(&self) -> &'static str {
        match self.code {
            AuthErrorCode::EmailAlreadyInUse => {
                "This email is already in use. Please sign in instead."
            }
            AuthErrorCode::InvalidEmail => "Please enter a valid email address.",
            AuthErrorCode::WeakPassword => "Password must be at least 6 characters.",
            AuthErrorCode::InvalidCredential => "Email or password is incorrect.",
            AuthErrorCode::SignOutFailed => "Sign out failed. Please try again.",
            AuthErrorCode::Other => {
                "We could not complete that request right now. Please try again."
            }
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.user_message())
    }
}

impl std::error::Error for AuthError {}

/// The identity service surface the application programs against.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Watches session changes. The callback fires immediately with the
    /// current session and again on every subsequent change.
    fn listen(&self, on_change: AuthStateCallback) -> Subscription;

    async fn sign_up(&self, request: SignUpRequest) -> Result<AuthUser, AuthError>;

    async fn sign_in(&self, credentials: Credentials) -> Result<AuthUser, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;
}
