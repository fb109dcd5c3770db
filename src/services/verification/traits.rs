//! Traits for the backend API, session store and navigator collaborators

use async_trait::async_trait;

use crate::domain::value_objects::VerifyResponse;
use crate::domain::Role;

/// Trait for the backend authentication API
///
/// Errors carry a human-readable message suitable for display; the
/// controller falls back to a fixed default when the message is blank.
#[async_trait]
pub trait AuthApiTrait: Send + Sync {
    /// Submit a code for verification
    async fn verify_otp(
        &self,
        email: &str,
        code: &str,
        role: Role,
    ) -> Result<VerifyResponse, String>;

    /// Request a fresh code for the given email
    async fn resend_otp(&self, email: &str, role: Role) -> Result<(), String>;
}

/// Trait for the authenticated session store
#[async_trait]
pub trait SessionStoreTrait: Send + Sync {
    /// Establish an authenticated session from a verify response
    async fn login(&self, response: &VerifyResponse) -> Result<(), String>;
}

/// Trait for screen navigation
pub trait NavigatorTrait: Send + Sync {
    /// Fire-and-forget transition to another screen
    fn navigate(&self, path: &str);
}
