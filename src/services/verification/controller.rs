//! Verification flow controller implementation

use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant};

use crate::domain::entities::session::{VerificationSession, VENDOR_LOGIN_PATH};
use crate::domain::{ResendState, Role, SubmissionState};
use crate::errors::FlowResult;

use super::config::VerificationFlowConfig;
use super::outcome::{classify, VerifyOutcome};
use super::traits::{AuthApiTrait, NavigatorTrait, SessionStoreTrait};

/// Fallback when the verify call fails without a message
pub const INVALID_OTP_MESSAGE: &str = "Invalid OTP. Please try again.";

/// Shown when verification succeeded but the login call failed
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please try logging in manually.";

/// Shown when the backend claimed success without issuing a token
pub const MISSING_TOKEN_MESSAGE: &str =
    "Verification successful, but auto-login failed. Please log in manually.";

/// Fallback when the resend call fails without a message
pub const RESEND_FAILED_MESSAGE: &str = "Failed to resend OTP.";

/// Resolved result of a submit invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The attempt failed recoverably; the session carries the message
    Failed,
    /// Vendor is code-verified and awaits admin approval (terminal)
    PendingApproval,
    /// Logged in; navigation to `destination` is scheduled (terminal)
    Redirecting { destination: String },
}

/// Controller owning all state transitions of one verification session
///
/// UI events are thin triggers calling [`set_code`](Self::set_code),
/// [`submit`](Self::submit) and [`resend`](Self::resend); the controller
/// enforces the single-flight guards, classifies backend responses and
/// drives the resend countdown. Must be created inside a Tokio runtime
/// since creation arms the initial cooldown ticker.
pub struct VerificationController<A, S, N>
where
    A: AuthApiTrait,
    S: SessionStoreTrait,
    N: NavigatorTrait + 'static,
{
    /// Backend API for verify and resend calls
    auth_api: Arc<A>,
    /// Session store establishing the authenticated session
    session_store: Arc<S>,
    /// Navigator for screen transitions
    navigator: Arc<N>,
    /// Flow configuration
    config: VerificationFlowConfig,
    /// Actor role, immutable for the session
    role: Role,
    /// Caller-supplied back handler overriding the default signup path
    on_back: Option<Box<dyn Fn() + Send + Sync>>,
    /// The session state, shared with the countdown ticker
    session: Arc<Mutex<VerificationSession>>,
    /// Running countdown ticker, if any
    countdown: StdMutex<Option<JoinHandle<()>>>,
    /// Scheduled post-login navigation, if any
    redirect: StdMutex<Option<JoinHandle<()>>>,
}

impl<A, S, N> VerificationController<A, S, N>
where
    A: AuthApiTrait,
    S: SessionStoreTrait,
    N: NavigatorTrait + 'static,
{
    /// Creates a controller for a freshly sent code
    ///
    /// The resend cooldown starts armed: the screen is entered right after
    /// a code was sent to `email`.
    pub fn new(
        email: String,
        role: Role,
        auth_api: Arc<A>,
        session_store: Arc<S>,
        navigator: Arc<N>,
        config: VerificationFlowConfig,
    ) -> Self {
        let session = VerificationSession::new(email, role, config.resend_cooldown_seconds);
        let cooldown_armed = matches!(session.resend_state, ResendState::CooldownActive { .. });

        let controller = Self {
            auth_api,
            session_store,
            navigator,
            config,
            role,
            on_back: None,
            session: Arc::new(Mutex::new(session)),
            countdown: StdMutex::new(None),
            redirect: StdMutex::new(None),
        };

        if cooldown_armed {
            controller.spawn_countdown();
        }

        controller
    }

    /// Replaces the default back-navigation with a caller-supplied handler
    pub fn with_back_handler(mut self, on_back: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_back = Some(Box::new(on_back));
        self
    }

    /// Actor role this session was entered with
    pub fn role(&self) -> Role {
        self.role
    }

    /// Email address the pending code was sent to
    pub async fn email(&self) -> String {
        self.session.lock().await.email.clone()
    }

    /// Replaces the code input with a normalized copy of `raw`
    pub async fn set_code(&self, raw: &str) {
        self.session.lock().await.set_code(raw);
    }

    /// Current code input
    pub async fn code(&self) -> String {
        self.session.lock().await.code.clone()
    }

    /// Current submission state
    pub async fn submission_state(&self) -> SubmissionState {
        self.session.lock().await.submission_state
    }

    /// Current resend sub-state
    pub async fn resend_state(&self) -> ResendState {
        self.session.lock().await.resend_state
    }

    /// Message of the last recoverable failure, if any
    pub async fn last_error(&self) -> Option<String> {
        self.session.lock().await.last_error.clone()
    }

    /// Whether a submit would currently be accepted
    pub async fn can_submit(&self) -> bool {
        self.session.lock().await.can_submit()
    }

    /// Whether a resend would currently be accepted
    pub async fn can_resend(&self) -> bool {
        self.session.lock().await.can_resend()
    }

    /// Snapshot of the full session state for UI binding
    pub async fn snapshot(&self) -> VerificationSession {
        self.session.lock().await.clone()
    }

    /// Submits the entered code for verification
    ///
    /// Rejected with a [`FlowError`](crate::errors::FlowError) when the
    /// code is incomplete, a submission is in flight, or the session is
    /// terminal; rejections leave the session untouched. Collaborator
    /// failures resolve to [`SubmitOutcome::Failed`] with the message
    /// recorded on the session.
    pub async fn submit(&self) -> FlowResult<SubmitOutcome> {
        let (email, code) = {
            let mut session = self.session.lock().await;
            session.begin_submit()?;
            (session.email.clone(), session.code.clone())
        };

        tracing::info!(
            email = %email,
            role = ?self.role,
            event = "otp_submitted",
            "Submitting verification code"
        );

        let response = match self.auth_api.verify_otp(&email, &code, self.role).await {
            Ok(response) => response,
            Err(message) => {
                tracing::warn!(
                    email = %email,
                    error = %message,
                    event = "otp_verify_call_failed",
                    "Verify call failed"
                );
                return Ok(self
                    .fail_submit(message_or(message, INVALID_OTP_MESSAGE))
                    .await);
            }
        };

        match classify(self.role, &response) {
            VerifyOutcome::Failure { message } => {
                tracing::warn!(
                    email = %email,
                    error = %message,
                    event = "otp_verification_failed",
                    "Verification code rejected"
                );
                Ok(self.fail_submit(message).await)
            }
            VerifyOutcome::PendingApproval => {
                tracing::info!(
                    email = %email,
                    event = "vendor_pending_approval",
                    "Vendor verified, awaiting admin approval"
                );
                self.session.lock().await.mark_vendor_pending();
                self.stop_countdown();
                Ok(SubmitOutcome::PendingApproval)
            }
            VerifyOutcome::AutoLogin => match self.session_store.login(&response).await {
                Ok(()) => {
                    let destination = self.role.dashboard_path().to_string();
                    tracing::info!(
                        email = %email,
                        destination = %destination,
                        event = "redirect_scheduled",
                        "Verification and login succeeded"
                    );
                    self.session.lock().await.mark_redirecting();
                    self.stop_countdown();
                    self.spawn_redirect(destination.clone());
                    Ok(SubmitOutcome::Redirecting { destination })
                }
                Err(error) => {
                    tracing::error!(
                        email = %email,
                        error = %error,
                        event = "auto_login_failed",
                        "Session establishment failed after verification"
                    );
                    Ok(self.fail_submit(LOGIN_FAILED_MESSAGE.to_string()).await)
                }
            },
            VerifyOutcome::MissingToken => {
                tracing::error!(
                    email = %email,
                    event = "otp_token_missing",
                    "Backend classified success without issuing a token"
                );
                Ok(self.fail_submit(MISSING_TOKEN_MESSAGE.to_string()).await)
            }
        }
    }

    /// Requests a fresh code, restarting the cooldown on success
    ///
    /// Rejected while the cooldown is active, a resend is in flight, or
    /// the session is terminal; rejections make no collaborator call and
    /// queue nothing. A failed resend records the message and returns the
    /// sub-state to `CooldownExpired` so the user may retry immediately.
    pub async fn resend(&self) -> FlowResult<()> {
        let email = {
            let mut session = self.session.lock().await;
            session.begin_resend()?;
            session.email.clone()
        };

        // A stale ticker from a previous cooldown must not outlive this
        // resend attempt.
        self.stop_countdown();

        tracing::info!(
            email = %email,
            role = ?self.role,
            event = "otp_resend_requested",
            "Requesting a fresh verification code"
        );

        match self.auth_api.resend_otp(&email, self.role).await {
            Ok(()) => {
                let seconds = self.config.resend_cooldown_seconds;
                self.session.lock().await.start_cooldown(seconds);
                if seconds > 0 {
                    self.spawn_countdown();
                }
            }
            Err(error) => {
                tracing::warn!(
                    email = %email,
                    error = %error,
                    event = "otp_resend_failed",
                    "Resend request failed"
                );
                let mut session = self.session.lock().await;
                session.record_error(message_or(error, RESEND_FAILED_MESSAGE));
                session.resend_state = ResendState::CooldownExpired;
            }
        }

        Ok(())
    }

    /// Navigates back out of the flow
    ///
    /// Invokes the caller-supplied handler when one was registered,
    /// otherwise navigates to the role's signup path.
    pub fn go_back(&self) {
        match &self.on_back {
            Some(on_back) => on_back(),
            None => self.navigator.navigate(&self.role.signup_path()),
        }
    }

    /// Navigates to the login screen from the vendor pending state
    pub fn return_to_login(&self) {
        self.navigator.navigate(VENDOR_LOGIN_PATH);
    }

    /// Tears the session down, stopping the ticker and any pending redirect
    ///
    /// In-flight verify/resend calls are not aborted; their futures are
    /// simply dropped with the caller.
    pub fn shutdown(&self) {
        self.stop_countdown();
        if let Some(handle) = take_handle(&self.redirect) {
            handle.abort();
        }
    }

    /// Records a recoverable failure and resolves the submission
    async fn fail_submit(&self, message: String) -> SubmitOutcome {
        self.session.lock().await.record_error(message);
        SubmitOutcome::Failed
    }

    /// Spawns the countdown ticker for the current cooldown
    ///
    /// The ticker holds only a weak reference to the session so it can
    /// never write into a torn-down session; it exits once the cooldown
    /// expired or the session is gone.
    fn spawn_countdown(&self) {
        let session = Arc::downgrade(&self.session);
        let tick = self.config.countdown_tick();

        let handle = tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + tick, tick);
            loop {
                ticks.tick().await;
                let Some(session) = session.upgrade() else {
                    break;
                };
                let mut session = session.lock().await;
                if !session.tick_cooldown() {
                    break;
                }
            }
        });

        self.replace_countdown(handle);
    }

    /// Schedules the post-login navigation after the configured pause
    fn spawn_redirect(&self, destination: String) {
        let navigator = Arc::clone(&self.navigator);
        let delay = self.config.redirect_delay();

        let handle = tokio::spawn(async move {
            sleep(delay).await;
            navigator.navigate(&destination);
        });

        let mut slot = lock_handles(&self.redirect);
        if let Some(old) = slot.replace(handle) {
            old.abort();
        }
    }

    /// Installs a new countdown ticker, aborting any previous one
    fn replace_countdown(&self, handle: JoinHandle<()>) {
        let mut slot = lock_handles(&self.countdown);
        if let Some(old) = slot.replace(handle) {
            old.abort();
        }
    }

    /// Stops the countdown ticker if one is running
    fn stop_countdown(&self) {
        if let Some(handle) = take_handle(&self.countdown) {
            handle.abort();
        }
    }
}

impl<A, S, N> Drop for VerificationController<A, S, N>
where
    A: AuthApiTrait,
    S: SessionStoreTrait,
    N: NavigatorTrait + 'static,
{
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Locks a task-handle slot, recovering from a poisoned lock
///
/// The critical sections only swap the handle, so a panic while holding
/// the lock cannot leave the slot inconsistent.
fn lock_handles(
    slot: &StdMutex<Option<JoinHandle<()>>>,
) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Takes the handle out of a slot, if any
fn take_handle(slot: &StdMutex<Option<JoinHandle<()>>>) -> Option<JoinHandle<()>> {
    lock_handles(slot).take()
}

/// Uses `message` unless it is blank, falling back to a fixed default
///
/// Blank deliberately includes whitespace-only messages, a widening of
/// the upstream empty-string check: the user never sees an empty banner.
fn message_or(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
