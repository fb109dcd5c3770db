//! Verification response value object returned by the backend API.

use serde::{Deserialize, Serialize};

/// Response of the backend OTP verification endpoint
///
/// The backend reports the outcome as free-text prose plus an optional
/// session token. The controller never inspects the token contents; it
/// only cares whether one is present and hands the full response to the
/// session store for login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyResponse {
    /// Human-readable outcome message
    #[serde(default)]
    pub message: String,

    /// Authentication token, present when a session may be established
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl VerifyResponse {
    /// Creates a response with a message and no token
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            token: None,
        }
    }

    /// Creates a response with a message and a token
    pub fn with_token(message: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            token: Some(token.into()),
        }
    }
}
