//! Classification policy for backend verification responses
//!
//! The backend reports outcomes as free-text prose, so the flow has to
//! recover the actual status by substring matching. The rules live in this
//! one place so they can be swapped for a structured status field once the
//! backend grows one.

use crate::domain::value_objects::VerifyResponse;
use crate::domain::Role;

/// Fallback when a failure response carries no message
pub const VERIFICATION_FAILED_MESSAGE: &str = "Verification failed";

/// Classified outcome of a verification response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// The code was rejected; the user may retry or resend
    Failure { message: String },
    /// Vendor is code-verified but awaits manual admin approval
    PendingApproval,
    /// A token is present; a session should be established from it
    AutoLogin,
    /// Classified as success but no token was issued
    MissingToken,
}

/// Classifies a verification response for the given role
///
/// Rules, in order:
/// 1. The response counts as a success when the message contains
///    "verified" or "success" (case-insensitive).
/// 2. Not a success and no token: failure. A blank message falls back to
///    a fixed default; blank deliberately includes whitespace-only, a
///    widening of the upstream empty-string check.
/// 3. Vendor whose message contains "awaiting": pending approval, token
///    or not. Approval pending means no session must be established even
///    though the code itself was accepted.
/// 4. Token present: establish a session.
/// 5. Otherwise the backend claimed success without issuing a token.
pub fn classify(role: Role, response: &VerifyResponse) -> VerifyOutcome {
    let message = response.message.to_lowercase();
    let is_success = message.contains("verified") || message.contains("success");

    if !is_success && response.token.is_none() {
        let message = if response.message.trim().is_empty() {
            VERIFICATION_FAILED_MESSAGE.to_string()
        } else {
            response.message.clone()
        };
        return VerifyOutcome::Failure { message };
    }

    if role == Role::Vendor && message.contains("awaiting") {
        return VerifyOutcome::PendingApproval;
    }

    if response.token.is_some() {
        return VerifyOutcome::AutoLogin;
    }

    VerifyOutcome::MissingToken
}
