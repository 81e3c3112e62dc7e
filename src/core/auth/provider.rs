//! Identity provider contract
//!
//! The hosted identity service is an external collaborator; this trait is
//! the seam the session state machine talks through, and the seam the test
//! suite substitutes.

use std::rc::Rc;

use super::error::AuthError;
use super::types::{PendingIdentity, Profile, Session, SessionEvent, SignUpData};

/// Callback invoked for every session-change event.
///
/// Handlers run synchronously while the provider's listener registry is
/// borrowed: a handler must not call back into the provider in the same
/// scheduler turn, or it will re-enter that borrow. Defer follow-up work
/// (see `SessionManager::handle_event`) instead.
pub type SessionChangeHandler = Rc<dyn Fn(SessionEvent, Option<Session>)>;

/// External authentication/session service.
///
/// All calls are short-lived and idempotent from the client's perspective;
/// failures surface as `AuthError` and are never retried automatically.
/// Futures are deliberately not `Send`: everything here runs on the UI
/// thread.
#[allow(async_fn_in_trait)]
pub trait IdentityProvider {
    /// Password sign-in. A successful call also produces a `SignedIn`
    /// session-change event; state updates ride on the event, not on the
    /// returned session.
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError>;

    /// Register a new identity with profile metadata attached. Does not
    /// create a session; the identity is unusable until verified.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        data: SignUpData,
    ) -> Result<PendingIdentity, AuthError>;

    /// Exchange a one-time email verification code for a session.
    async fn verify_otp(&self, code: &str) -> Result<Session, AuthError>;

    /// Terminate the current session. Emits `SignedOut` even when the remote
    /// call fails, since local capability must go away regardless.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// The session as currently known, if any. Used once during bootstrap;
    /// later changes arrive as events.
    async fn current_session(&self) -> Result<Option<Session>, AuthError>;

    /// Look up the application profile for an identity id.
    async fn fetch_profile(&self, user_id: &str) -> Result<Profile, AuthError>;

    /// Subscribe to session-change events. Dropping the returned handle
    /// unsubscribes.
    fn on_session_change(&self, handler: SessionChangeHandler) -> SessionSubscription;
}

/// Handle for an active session-change subscription.
///
/// Unsubscribes when dropped; the owner keeps it alive for as long as events
/// should be delivered and releases it on teardown.
pub struct SessionSubscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl SessionSubscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        SessionSubscription {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Explicitly release the subscription.
    pub fn unsubscribe(self) {
        // Drop does the work.
    }
}

impl Drop for SessionSubscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}
