//! Configuration for the verification flow

use std::time::Duration;

/// Default seconds of cooldown between resend requests
pub const DEFAULT_RESEND_COOLDOWN_SECONDS: u32 = 30;

/// Default UI-feedback pause before navigating after login, in milliseconds
pub const DEFAULT_REDIRECT_DELAY_MS: u64 = 500;

/// Default countdown tick interval in milliseconds
pub const DEFAULT_COUNTDOWN_TICK_MS: u64 = 1000;

/// Configuration for the verification flow
#[derive(Debug, Clone)]
pub struct VerificationFlowConfig {
    /// Seconds the resend action stays locked after a code was sent
    pub resend_cooldown_seconds: u32,
    /// Pause between a successful login and the dashboard navigation
    pub redirect_delay_ms: u64,
    /// Interval between countdown ticks
    pub countdown_tick_ms: u64,
}

impl Default for VerificationFlowConfig {
    fn default() -> Self {
        Self {
            resend_cooldown_seconds: DEFAULT_RESEND_COOLDOWN_SECONDS,
            redirect_delay_ms: DEFAULT_REDIRECT_DELAY_MS,
            countdown_tick_ms: DEFAULT_COUNTDOWN_TICK_MS,
        }
    }
}

impl VerificationFlowConfig {
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }

    pub fn countdown_tick(&self) -> Duration {
        Duration::from_millis(self.countdown_tick_ms)
    }
}
