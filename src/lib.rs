//! # EventVenue Core
//!
//! Client-side signup verification flow for the EventVenue platform.
//! This crate contains the verification session entity, the controller
//! state machine that drives code entry, submission, resend cooldown and
//! post-verification routing, and the trait boundaries for the backend
//! API, session store and navigator collaborators.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
