//! Auth context for the component tree
//!
//! Bridges the session state machine into Leptos. The `SessionManager` is
//! constructed once at application start and injected here; components read
//! reactive snapshots and invoke operations through this handle.
//!
//! Each operation surfaces its outcome exactly once: failures through the
//! inline `error` signal the forms render, successes as a toast. The
//! session-change subscription only feeds the state machine and never
//! notifies on its own, so a transition is never announced twice.

use std::rc::Rc;

use leptos::prelude::*;

use crate::core::auth::{
    AuthError, AuthState, CurrentUser, IdentityProvider, RemoteIdentityProvider, Role,
    SessionManager,
};
use crate::ui::notifications::{use_notifications, NotificationManager};

type Manager = SessionManager<RemoteIdentityProvider>;

/// Auth context providing session state and operations
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// The injected session manager; single-threaded, so kept in local
    /// storage and handed out as a cheap handle.
    manager: StoredValue<Rc<Manager>, LocalStorage>,
    /// Error message from the last failed operation, for inline display.
    pub error: RwSignal<Option<String>>,
    notifications: NotificationManager,
}

impl AuthContext {
    /// Current state snapshot; reactive inside tracking scopes.
    pub fn auth_state(&self) -> AuthState {
        self.manager.get_value().auth_state()
    }

    pub fn current_user(&self) -> Option<CurrentUser> {
        self.manager.get_value().current_user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.manager.get_value().is_authenticated()
    }

    /// True during session bootstrap and while any auth call is in flight.
    pub fn is_loading(&self) -> bool {
        self.manager.get_value().is_loading()
    }

    pub fn role(&self) -> Option<Role> {
        self.manager.get_value().role()
    }

    /// Clear error message
    pub fn clear_error(&self) {
        self.error.set(None);
    }

    /// Sign in with email and password. The session-change event populates
    /// the user state; this call only reports the outcome.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.error.set(None);
        let result = self.manager.get_value().login(email, password).await;
        match &result {
            Ok(()) => self.notifications.success("Signed in", "Welcome back!"),
            Err(err) => self.error.set(Some(err.to_string())),
        }
        result
    }

    /// Register a new account with the chosen role. The account stays
    /// pending until the emailed code is verified.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        role: Role,
    ) -> Result<(), AuthError> {
        self.error.set(None);
        let result = self
            .manager
            .get_value()
            .register(email, password, name, role)
            .await;
        match &result {
            Ok(pending) => self.notifications.success(
                "Check your email",
                format!("We sent a verification code to {}.", pending.email),
            ),
            Err(err) => self.error.set(Some(err.to_string())),
        }
        result.map(|_pending| ())
    }

    /// Exchange the emailed one-time code for a verified account.
    pub async fn verify_email(&self, code: &str) -> Result<(), AuthError> {
        self.error.set(None);
        let result = self.manager.get_value().verify_email(code).await;
        match &result {
            Ok(()) => self.notifications.success(
                "Email verified",
                "Your account is ready. You can sign in now.",
            ),
            Err(err) => self.error.set(Some(err.to_string())),
        }
        result
    }

    /// Sign out. Local state is cleared even when the server is
    /// unreachable; the notice downgrades to a warning in that case.
    pub async fn logout(&self) {
        self.error.set(None);
        match self.manager.get_value().logout().await {
            Ok(()) => self
                .notifications
                .success("Signed out", "You have been signed out."),
            Err(_) => self.notifications.warning(
                "Signed out on this device",
                "The server could not be reached; your session was cleared locally.",
            ),
        }
    }
}

/// Provide the auth context to the component tree.
///
/// Takes the session manager built at application start. Subscribes to
/// session-change events *before* resolving the stored session, so an event
/// firing mid-bootstrap is not lost, and releases the subscription when the
/// owning scope is torn down.
pub fn provide_auth_context(manager: Rc<Manager>) -> AuthContext {
    let ctx = AuthContext {
        manager: StoredValue::new_local(manager),
        error: RwSignal::new(None),
        notifications: use_notifications(),
    };

    // Effects only run on the client, after hydration; the server renders
    // the bootstrapping state and performs no identity work.
    Effect::new(move |_| {
        let manager = ctx.manager.get_value();

        let handler_manager = Rc::clone(&manager);
        let subscription = manager.provider().on_session_change(Rc::new(
            move |event, session| {
                // The provider is mid-dispatch here; the manager defers its
                // own follow-up work off this turn.
                let manager = Rc::clone(&handler_manager);
                leptos::task::spawn_local(async move {
                    manager.handle_event(event, session).await;
                });
            },
        ));
        let subscription = StoredValue::new_local(Some(subscription));
        on_cleanup(move || {
            subscription.update_value(|sub| {
                sub.take();
            });
        });

        leptos::task::spawn_local(async move {
            manager.bootstrap().await;
        });
    });

    provide_context(ctx);
    ctx
}

/// Get auth context from the component tree
pub fn use_auth_context() -> AuthContext {
    expect_context::<AuthContext>()
}
