//! Domain entities representing core business objects.

pub mod session;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use session::{
    ResendState, Role, SubmissionState, VerificationSession, CODE_LENGTH,
};
