//! Client-side session state machine
//!
//! `SessionManager` is the single source of truth for "who is the current
//! actor, and are we sure yet". It is the only component that calls the
//! identity provider, and for every state transition exactly one async
//! source is the writer: direct calls (`login`, `verify_email`) never set
//! the user themselves, the session-change subscription does, while
//! `logout` clears locally and treats a later `SignedOut` event as a no-op.

use std::cell::Cell;

use leptos::prelude::*;

use super::error::AuthError;
use super::provider::IdentityProvider;
use super::types::{CurrentUser, PendingIdentity, Role, Session, SessionEvent, SignUpData};

/// Authentication state
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AuthState {
    /// Initial state: the stored session, if any, is still being resolved.
    /// No route decision may be made while here.
    #[default]
    Bootstrapping,
    /// No usable identity.
    Unauthenticated,
    /// Session live and profile resolved.
    Authenticated(CurrentUser),
}

/// Session state machine over an identity provider.
///
/// Constructed once at application start and injected into the component
/// tree by reference; holds reactive state so consumers re-render on
/// transitions.
pub struct SessionManager<P: IdentityProvider> {
    provider: P,
    state: RwSignal<AuthState>,
    /// Number of in-flight login/register/verify/logout calls.
    in_flight: RwSignal<u32>,
    /// Bumped by every session-change event and by logout. A deferred
    /// profile lookup only writes state while its epoch is still current,
    /// which orders racing completions by event arrival rather than by call
    /// start.
    epoch: Cell<u64>,
}

impl<P: IdentityProvider> SessionManager<P> {
    pub fn new(provider: P) -> Self {
        SessionManager {
            provider,
            state: RwSignal::new(AuthState::Bootstrapping),
            in_flight: RwSignal::new(0),
            epoch: Cell::new(0),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Current state snapshot; reactive when read inside a tracking scope.
    pub fn auth_state(&self) -> AuthState {
        self.state.get()
    }

    pub fn current_user(&self) -> Option<CurrentUser> {
        match self.state.get() {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state.get(), AuthState::Authenticated(_))
    }

    /// True during bootstrap and while any auth operation is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self.state.get(), AuthState::Bootstrapping) || self.in_flight.get() > 0
    }

    pub fn role(&self) -> Option<Role> {
        self.current_user().map(|user| user.role)
    }

    /// Resolve the stored session once at startup.
    ///
    /// The caller must already be subscribed to session-change events, so
    /// that an event firing during this fetch is not lost; if one arrives it
    /// wins and this resolution is discarded.
    pub async fn bootstrap(&self) {
        let epoch = self.epoch.get();
        let resolved = match self.provider.current_session().await {
            Ok(Some(session)) => self.resolve_user(&session).await,
            Ok(None) => None,
            Err(err) => {
                leptos::logging::warn!("session bootstrap failed: {err}");
                None
            }
        };
        if self.epoch.get() != epoch {
            return;
        }
        self.apply_user(resolved);
    }

    /// Single writer for event-driven transitions.
    ///
    /// Must not call into the provider in the turn the event was delivered:
    /// the provider dispatches events while its listener registry is
    /// borrowed, and re-entering it would deadlock that borrow. The profile
    /// lookup is therefore pushed to the next scheduler turn; a zero-delay
    /// deferral is sufficient.
    pub async fn handle_event(&self, event: SessionEvent, session: Option<Session>) {
        let epoch = self.bump_epoch();

        let Some(session) = session else {
            self.state.set(AuthState::Unauthenticated);
            return;
        };
        if event == SessionEvent::SignedOut {
            self.state.set(AuthState::Unauthenticated);
            return;
        }

        next_tick().await;
        let resolved = self.resolve_user(&session).await;
        if self.epoch.get() != epoch {
            // A later event already decided the state; this result is stale.
            return;
        }
        self.apply_user(resolved);
    }

    /// Password sign-in. Does not write the user state: the `SignedIn`
    /// event emitted by the provider is the writer for this transition.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.begin_op();
        let result = self
            .provider
            .sign_in_with_password(email, password)
            .await
            .map(|_session| ());
        self.end_op();
        result
    }

    /// Register a new identity with the chosen role. Does not log in; the
    /// account stays pending until email verification.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        role: Role,
    ) -> Result<PendingIdentity, AuthError> {
        self.begin_op();
        let result = self
            .provider
            .sign_up(
                email,
                password,
                SignUpData {
                    name: name.to_string(),
                    role,
                },
            )
            .await;
        self.end_op();
        result
    }

    /// Exchange the emailed one-time code for a session. On success the
    /// subscription populates the user; on failure state is untouched.
    pub async fn verify_email(&self, code: &str) -> Result<(), AuthError> {
        self.begin_op();
        let result = self.provider.verify_otp(code).await.map(|_session| ());
        self.end_op();
        result
    }

    /// Sign out. Local state is cleared whatever the remote call returns:
    /// the point of logout is to remove local capability. The error, if
    /// any, is reported for a best-effort notice only.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.begin_op();
        let result = self.provider.sign_out().await;
        // Clearing races a possible SignedOut event; both paths bump the
        // epoch so a stale sign-in resolution can never resurrect the user.
        self.bump_epoch();
        self.state.set(AuthState::Unauthenticated);
        self.end_op();
        result
    }

    async fn resolve_user(&self, session: &Session) -> Option<CurrentUser> {
        match self.provider.fetch_profile(&session.user_id).await {
            Ok(profile) => Some(CurrentUser::from(profile)),
            Err(AuthError::ProfileNotFound) => {
                // Expected right after sign-up: a session without a profile
                // row renders as signed out, never as a user with holes.
                None
            }
            Err(err) => {
                leptos::logging::warn!(
                    "profile lookup failed for {}: {err}",
                    session.user_id
                );
                None
            }
        }
    }

    fn apply_user(&self, user: Option<CurrentUser>) {
        self.state.set(match user {
            Some(user) => AuthState::Authenticated(user),
            None => AuthState::Unauthenticated,
        });
    }

    fn bump_epoch(&self) -> u64 {
        let next = self.epoch.get() + 1;
        self.epoch.set(next);
        next
    }

    fn begin_op(&self) {
        self.in_flight.update(|n| *n += 1);
    }

    fn end_op(&self) {
        self.in_flight.update(|n| *n = n.saturating_sub(1));
    }
}

/// Yield to the scheduler for one turn before touching the provider again.
#[cfg(not(feature = "ssr"))]
async fn next_tick() {
    gloo_timers::future::TimeoutFuture::new(0).await;
}

#[cfg(feature = "ssr")]
async fn next_tick() {
    tokio::task::yield_now().await;
}
