//! Business services containing the verification flow logic.

pub mod verification;

// Re-export commonly used types
pub use verification::{
    AuthApiTrait, NavigatorTrait, SessionStoreTrait, SubmitOutcome,
    VerificationController, VerificationFlowConfig,
};
