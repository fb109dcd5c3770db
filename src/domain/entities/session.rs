//! Verification session entity for the signup OTP flow.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{FlowError, FlowResult};

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Login path offered from the vendor pending-approval screen
pub const VENDOR_LOGIN_PATH: &str = "/login?role=vendor";

/// Everything that is not an ASCII digit, stripped from code input.
/// Unicode digits do not count: only `0-9` may survive, which keeps the
/// stripped string single-byte and makes byte truncation sound.
static NON_DIGIT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9]").unwrap());

/// Actor role the signup flow was entered with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// An end-user booking venues
    User,
    /// A vendor listing venues, subject to admin approval
    Vendor,
}

impl Role {
    /// Lowercased role segment used in navigation paths
    pub fn as_path_segment(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Vendor => "vendor",
        }
    }

    /// Dashboard destination after a successful login
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Role::User => "/user/dashboard",
            Role::Vendor => "/vendor/dashboard",
        }
    }

    /// Default back-navigation destination
    pub fn signup_path(&self) -> String {
        format!("/signup?role={}", self.as_path_segment())
    }
}

/// Authoritative submission state of a verification session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionState {
    /// Waiting for code entry
    Idle,
    /// A verify request is in flight
    Submitting,
    /// The last attempt failed; `last_error` carries the message
    Error,
    /// Code verified but the vendor awaits admin approval (terminal)
    VendorPending,
    /// Logged in, navigation to the dashboard is scheduled (terminal)
    Redirecting,
}

/// State of the resend-with-cooldown sub-machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResendState {
    /// Resend locked out until the countdown reaches zero
    CooldownActive { seconds_remaining: u32 },
    /// Resend may be triggered
    CooldownExpired,
    /// A resend request is in flight
    Resending,
}

/// Verification session entity for the signup OTP flow
///
/// Created when the verification screen is entered (right after a code was
/// sent to `email`) and destroyed when the flow exits to another screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationSession {
    /// Unique identifier for the session
    pub id: Uuid,

    /// Email address the pending OTP was sent to (immutable)
    pub email: String,

    /// Actor role, determines post-verification routing (immutable)
    pub role: Role,

    /// Current code input, always 0-6 ASCII digits
    pub code: String,

    /// Authoritative machine state
    pub submission_state: SubmissionState,

    /// Human-readable message, present exactly in the `Error` state
    pub last_error: Option<String>,

    /// Resend cooldown sub-state
    pub resend_state: ResendState,

    /// Timestamp when the session was created
    pub created_at: DateTime<Utc>,
}

impl VerificationSession {
    /// Creates a new session with the resend cooldown already armed
    ///
    /// The flow is entered immediately after a code was sent, so the
    /// cooldown starts counting from creation. A zero-second cooldown
    /// starts directly in `CooldownExpired`.
    pub fn new(email: String, role: Role, cooldown_seconds: u32) -> Self {
        let resend_state = if cooldown_seconds == 0 {
            ResendState::CooldownExpired
        } else {
            ResendState::CooldownActive {
                seconds_remaining: cooldown_seconds,
            }
        };

        Self {
            id: Uuid::new_v4(),
            email,
            role,
            code: String::new(),
            submission_state: SubmissionState::Idle,
            last_error: None,
            resend_state,
            created_at: Utc::now(),
        }
    }

    /// Replaces the code input with a normalized copy of `raw`
    ///
    /// Non-digit characters are stripped (pasted input included) and the
    /// result is truncated to [`CODE_LENGTH`] digits.
    pub fn set_code(&mut self, raw: &str) {
        let digits = NON_DIGIT_REGEX.replace_all(raw, "");
        let mut normalized = digits.into_owned();
        normalized.truncate(CODE_LENGTH);
        self.code = normalized;
    }

    /// Whether the code input is a complete 6-digit code
    pub fn is_code_complete(&self) -> bool {
        self.code.len() == CODE_LENGTH
    }

    /// Whether the session reached a state that only allows navigation
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.submission_state,
            SubmissionState::VendorPending | SubmissionState::Redirecting
        )
    }

    /// Whether a submit would currently be accepted
    pub fn can_submit(&self) -> bool {
        self.is_code_complete()
            && self.submission_state != SubmissionState::Submitting
            && !self.is_terminal()
    }

    /// Whether a resend would currently be accepted
    pub fn can_resend(&self) -> bool {
        self.resend_state == ResendState::CooldownExpired && !self.is_terminal()
    }

    /// Transitions into `Submitting`, enforcing the submit preconditions
    ///
    /// Clears any previous error. Rejections leave the session untouched.
    pub fn begin_submit(&mut self) -> FlowResult<()> {
        if self.submission_state == SubmissionState::Submitting {
            return Err(FlowError::AlreadySubmitting);
        }
        if self.is_terminal() {
            return Err(FlowError::SessionTerminal);
        }
        if !self.is_code_complete() {
            return Err(FlowError::CodeIncomplete {
                length: self.code.len(),
            });
        }

        self.clear_error();
        self.submission_state = SubmissionState::Submitting;
        Ok(())
    }

    /// Transitions into `Resending`, enforcing the resend preconditions
    ///
    /// Clears any previous error. Rejections leave the session untouched.
    pub fn begin_resend(&mut self) -> FlowResult<()> {
        if self.is_terminal() {
            return Err(FlowError::SessionTerminal);
        }
        match self.resend_state {
            ResendState::Resending => Err(FlowError::AlreadyResending),
            ResendState::CooldownActive { seconds_remaining } => {
                Err(FlowError::CooldownActive { seconds_remaining })
            }
            ResendState::CooldownExpired => {
                self.clear_error();
                self.resend_state = ResendState::Resending;
                Ok(())
            }
        }
    }

    /// Records a recoverable failure; the user may retry
    pub fn record_error(&mut self, message: String) {
        self.last_error = Some(message);
        self.submission_state = SubmissionState::Error;
    }

    /// Clears the error message and leaves the `Error` state
    pub fn clear_error(&mut self) {
        self.last_error = None;
        if self.submission_state == SubmissionState::Error {
            self.submission_state = SubmissionState::Idle;
        }
    }

    /// Enters the terminal vendor pending-approval state
    pub fn mark_vendor_pending(&mut self) {
        self.last_error = None;
        self.submission_state = SubmissionState::VendorPending;
    }

    /// Enters the terminal redirecting state after a successful login
    pub fn mark_redirecting(&mut self) {
        self.last_error = None;
        self.submission_state = SubmissionState::Redirecting;
    }

    /// Arms the resend cooldown after a successful resend
    pub fn start_cooldown(&mut self, seconds: u32) {
        self.resend_state = if seconds == 0 {
            ResendState::CooldownExpired
        } else {
            ResendState::CooldownActive {
                seconds_remaining: seconds,
            }
        };
    }

    /// Advances the countdown by one second
    ///
    /// Returns `true` while the cooldown is still active and further ticks
    /// are expected, `false` once the cooldown expired or the session left
    /// the `CooldownActive` state.
    pub fn tick_cooldown(&mut self) -> bool {
        match self.resend_state {
            ResendState::CooldownActive { seconds_remaining } if seconds_remaining > 1 => {
                self.resend_state = ResendState::CooldownActive {
                    seconds_remaining: seconds_remaining - 1,
                };
                true
            }
            ResendState::CooldownActive { .. } => {
                self.resend_state = ResendState::CooldownExpired;
                false
            }
            _ => false,
        }
    }
}
