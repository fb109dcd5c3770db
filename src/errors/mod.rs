//! Domain-specific error types and error handling.

use thiserror::Error;

/// Errors for verification flow operations.
///
/// These represent rejected operations: the call was refused up front and
/// the session state was left untouched. Collaborator failures (network,
/// backend validation, login) are never surfaced through this type; the
/// controller converts them into the session's `last_error` and a
/// retryable state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error("verification code must be exactly 6 digits, got {length}")]
    CodeIncomplete { length: usize },

    #[error("a submission is already in flight")]
    AlreadySubmitting,

    #[error("a resend request is already in flight")]
    AlreadyResending,

    #[error("resend is cooling down for another {seconds_remaining} seconds")]
    CooldownActive { seconds_remaining: u32 },

    #[error("the session reached a terminal state; only navigation is allowed")]
    SessionTerminal,
}

pub type FlowResult<T> = Result<T, FlowError>;
