//! Verification flow module for the signup OTP screen
//!
//! This module provides the complete client-side verification workflow:
//! - Code entry with input normalization
//! - Single-flight submission with response classification
//! - Resend with a ticking cooldown timer
//! - Role-dependent post-verification routing

mod config;
mod controller;
mod outcome;
mod traits;

#[cfg(test)]
mod tests;

pub use config::VerificationFlowConfig;
pub use controller::{
    SubmitOutcome, VerificationController, INVALID_OTP_MESSAGE, LOGIN_FAILED_MESSAGE,
    MISSING_TOKEN_MESSAGE, RESEND_FAILED_MESSAGE,
};
pub use outcome::{classify, VerifyOutcome, VERIFICATION_FAILED_MESSAGE};
pub use traits::{AuthApiTrait, NavigatorTrait, SessionStoreTrait};
