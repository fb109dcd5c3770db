//! Value objects representing immutable domain concepts.

pub mod verify_response;

// Re-export commonly used types
pub use verify_response::VerifyResponse;
