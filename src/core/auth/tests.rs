//! Session state machine tests over a scripted identity provider.
//!
//! The mock mirrors the remote adapter's observable behavior: it emits
//! session-change events while its listener registry is borrowed, keeps an
//! in-memory account/profile table, and can hold individual calls open so
//! tests control exactly which completion arrives first.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use chrono::Utc;
use futures::{pin_mut, poll};
use leptos::prelude::Owner;
use tokio::sync::Semaphore;

use super::error::AuthError;
use super::provider::{IdentityProvider, SessionChangeHandler, SessionSubscription};
use super::session::{AuthState, SessionManager};
use super::types::{
    PendingIdentity, Profile, Role, Session, SessionEvent, SignUpData,
};

const VERIFICATION_CODE: &str = "314159";

struct MockAccount {
    id: String,
    password: String,
    verified: bool,
}

#[derive(Default)]
struct MockInner {
    listeners: RefCell<Vec<(u64, SessionChangeHandler)>>,
    next_listener_id: Cell<u64>,
    accounts: RefCell<HashMap<String, MockAccount>>,
    profiles: RefCell<HashMap<String, Profile>>,
    current: RefCell<Option<Session>>,
    pending: RefCell<Option<String>>,
    /// When set, `fetch_profile` consumes one permit per call.
    profile_gate: RefCell<Option<Rc<Semaphore>>>,
    /// When set, `sign_in_with_password` consumes one permit per call.
    sign_in_gate: RefCell<Option<Rc<Semaphore>>>,
    fail_profile_with: RefCell<Option<AuthError>>,
}

#[derive(Clone, Default)]
struct MockProvider {
    inner: Rc<MockInner>,
}

impl MockProvider {
    fn add_user(&self, email: &str, password: &str, role: Role, approved: bool) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.inner.accounts.borrow_mut().insert(
            email.to_string(),
            MockAccount {
                id: id.clone(),
                password: password.to_string(),
                verified: true,
            },
        );
        self.inner.profiles.borrow_mut().insert(
            id.clone(),
            Profile {
                id: id.clone(),
                email: email.to_string(),
                name: email.split('@').next().unwrap_or(email).to_string(),
                role,
                approved,
                created_at: Utc::now(),
            },
        );
        id
    }

    fn session_for(&self, email: &str) -> Session {
        let accounts = self.inner.accounts.borrow();
        let account = accounts.get(email).expect("unknown mock account");
        Session {
            user_id: account.id.clone(),
            email: email.to_string(),
            access_token: format!("token-{}", account.id),
            expires_at: None,
        }
    }

    fn set_current(&self, session: Option<Session>) {
        *self.inner.current.borrow_mut() = session;
    }

    fn gate_profile(&self) -> Rc<Semaphore> {
        let gate = Rc::new(Semaphore::new(0));
        *self.inner.profile_gate.borrow_mut() = Some(Rc::clone(&gate));
        gate
    }

    fn gate_sign_in(&self) -> Rc<Semaphore> {
        let gate = Rc::new(Semaphore::new(0));
        *self.inner.sign_in_gate.borrow_mut() = Some(Rc::clone(&gate));
        gate
    }

    fn fail_profile_with(&self, err: AuthError) {
        *self.inner.fail_profile_with.borrow_mut() = Some(err);
    }

    fn emit(&self, event: SessionEvent, session: Option<Session>) {
        let listeners = self.inner.listeners.borrow();
        for (_, handler) in listeners.iter() {
            handler(event, session.clone());
        }
    }
}

impl IdentityProvider for MockProvider {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let gate = self.inner.sign_in_gate.borrow().clone();
        if let Some(gate) = gate {
            gate.acquire().await.expect("gate closed").forget();
        }
        let ok = {
            let accounts = self.inner.accounts.borrow();
            accounts
                .get(email)
                .is_some_and(|a| a.password == password && a.verified)
        };
        if !ok {
            return Err(AuthError::InvalidCredentials);
        }
        let session = self.session_for(email);
        self.set_current(Some(session.clone()));
        self.emit(SessionEvent::SignedIn, Some(session.clone()));
        Ok(session)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        data: SignUpData,
    ) -> Result<PendingIdentity, AuthError> {
        if self.inner.accounts.borrow().contains_key(email) {
            return Err(AuthError::EmailTaken);
        }
        if password.len() < 8 {
            return Err(AuthError::WeakPassword);
        }
        let id = uuid::Uuid::new_v4().to_string();
        self.inner.accounts.borrow_mut().insert(
            email.to_string(),
            MockAccount {
                id: id.clone(),
                password: password.to_string(),
                verified: false,
            },
        );
        self.inner.profiles.borrow_mut().insert(
            id.clone(),
            Profile {
                id: id.clone(),
                email: email.to_string(),
                name: data.name,
                role: data.role,
                approved: false,
                created_at: Utc::now(),
            },
        );
        *self.inner.pending.borrow_mut() = Some(email.to_string());
        Ok(PendingIdentity {
            id,
            email: email.to_string(),
        })
    }

    async fn verify_otp(&self, code: &str) -> Result<Session, AuthError> {
        let email = self.inner.pending.borrow().clone();
        let Some(email) = email else {
            return Err(AuthError::InvalidOrExpiredCode);
        };
        if code != VERIFICATION_CODE {
            return Err(AuthError::InvalidOrExpiredCode);
        }
        self.inner
            .accounts
            .borrow_mut()
            .get_mut(&email)
            .expect("pending account vanished")
            .verified = true;
        *self.inner.pending.borrow_mut() = None;
        let session = self.session_for(&email);
        self.set_current(Some(session.clone()));
        self.emit(SessionEvent::SignedIn, Some(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.set_current(None);
        self.emit(SessionEvent::SignedOut, None);
        Ok(())
    }

    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        Ok(self.inner.current.borrow().clone())
    }

    async fn fetch_profile(&self, user_id: &str) -> Result<Profile, AuthError> {
        let gate = self.inner.profile_gate.borrow().clone();
        if let Some(gate) = gate {
            gate.acquire().await.expect("gate closed").forget();
        }
        if let Some(err) = self.inner.fail_profile_with.borrow().clone() {
            return Err(err);
        }
        self.inner
            .profiles
            .borrow()
            .get(user_id)
            .cloned()
            .ok_or(AuthError::ProfileNotFound)
    }

    fn on_session_change(&self, handler: SessionChangeHandler) -> SessionSubscription {
        let id = self.inner.next_listener_id.get();
        self.inner.next_listener_id.set(id + 1);
        self.inner.listeners.borrow_mut().push((id, handler));

        let inner = Rc::clone(&self.inner);
        SessionSubscription::new(move || {
            inner.listeners.borrow_mut().retain(|(l, _)| *l != id);
        })
    }
}

type EventQueue = Rc<RefCell<Vec<(SessionEvent, Option<Session>)>>>;

/// Subscribe with a handler that only records; the tests pump recorded
/// events through `handle_event` in arrival order, the way the UI wiring
/// defers them to their own tasks.
fn record_events(provider: &MockProvider) -> (SessionSubscription, EventQueue) {
    let queue: EventQueue = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&queue);
    let sub = provider.on_session_change(Rc::new(move |event, session| {
        sink.borrow_mut().push((event, session));
    }));
    (sub, queue)
}

async fn pump(manager: &SessionManager<MockProvider>, queue: &EventQueue) {
    loop {
        let next = {
            let mut queue = queue.borrow_mut();
            if queue.is_empty() {
                return;
            }
            queue.remove(0)
        };
        manager.handle_event(next.0, next.1).await;
    }
}

fn assert_invariant(manager: &SessionManager<MockProvider>) {
    assert_eq!(
        manager.is_authenticated(),
        manager.current_user().is_some(),
        "authenticated flag must track the presence of a current user"
    );
}

#[tokio::test]
async fn bootstrap_without_session_resolves_unauthenticated() {
    let owner = Owner::new();
    owner.set();
    let provider = MockProvider::default();
    let manager = SessionManager::new(provider);

    assert!(manager.is_loading());
    assert_invariant(&manager);

    manager.bootstrap().await;

    assert!(!manager.is_loading());
    assert!(!manager.is_authenticated());
    assert_eq!(manager.current_user(), None);
}

#[tokio::test]
async fn bootstrap_stays_loading_until_stored_session_is_resolved() {
    let owner = Owner::new();
    owner.set();
    let provider = MockProvider::default();
    provider.add_user("head@classtrack.test", "correct-horse", Role::Admin, true);
    provider.set_current(Some(provider.session_for("head@classtrack.test")));
    let gate = provider.gate_profile();
    let manager = SessionManager::new(provider);

    let fut = manager.bootstrap();
    pin_mut!(fut);
    assert!(poll!(&mut fut).is_pending());
    // The profile lookup is still in flight: no route decision may happen yet.
    assert!(manager.is_loading());
    assert!(!manager.is_authenticated());

    gate.add_permits(1);
    fut.await;

    assert!(!manager.is_loading());
    let user = manager.current_user().expect("session should resolve");
    assert_eq!(user.role, Role::Admin);
    assert_eq!(user.email, "head@classtrack.test");
    assert_invariant(&manager);
}

#[tokio::test]
async fn session_without_profile_renders_signed_out() {
    let owner = Owner::new();
    owner.set();
    let provider = MockProvider::default();
    let orphan = Session {
        user_id: "no-such-profile".to_string(),
        email: "ghost@classtrack.test".to_string(),
        access_token: "token-ghost".to_string(),
        expires_at: None,
    };
    let manager = SessionManager::new(provider);
    manager.bootstrap().await;

    manager
        .handle_event(SessionEvent::SignedIn, Some(orphan))
        .await;

    assert!(!manager.is_authenticated());
    assert_eq!(manager.current_user(), None);
    assert_invariant(&manager);
}

#[tokio::test]
async fn profile_fetch_failure_is_not_fatal() {
    let owner = Owner::new();
    owner.set();
    let provider = MockProvider::default();
    let id = provider.add_user("flaky@classtrack.test", "correct-horse", Role::Student, true);
    provider.fail_profile_with(AuthError::Network("connection reset".to_string()));
    let session = Session {
        user_id: id,
        email: "flaky@classtrack.test".to_string(),
        access_token: "token".to_string(),
        expires_at: None,
    };
    let manager = SessionManager::new(provider);
    manager.bootstrap().await;

    manager
        .handle_event(SessionEvent::SignedIn, Some(session))
        .await;

    assert!(!manager.is_authenticated());
    assert_invariant(&manager);
}

#[tokio::test]
async fn invariant_holds_across_event_sequences() {
    let owner = Owner::new();
    owner.set();
    let provider = MockProvider::default();
    provider.add_user("ada@classtrack.test", "correct-horse", Role::Student, true);
    let session = provider.session_for("ada@classtrack.test");
    let manager = SessionManager::new(provider);
    manager.bootstrap().await;
    assert_invariant(&manager);

    let sequence = [
        (SessionEvent::SignedIn, Some(session.clone())),
        (SessionEvent::TokenRefreshed, Some(session.clone())),
        (SessionEvent::SignedOut, None),
        (SessionEvent::InitialSession, Some(session.clone())),
        // A change event that carries no session means the session is gone.
        (SessionEvent::TokenRefreshed, None),
        (SessionEvent::SignedIn, Some(session)),
    ];
    let expected_authenticated = [true, true, false, true, false, true];

    for ((event, session), expected) in sequence.into_iter().zip(expected_authenticated) {
        manager.handle_event(event, session).await;
        assert_invariant(&manager);
        assert_eq!(manager.is_authenticated(), expected, "after {event:?}");
    }
}

#[tokio::test]
async fn loading_tracks_in_flight_operations() {
    let owner = Owner::new();
    owner.set();
    let provider = MockProvider::default();
    provider.add_user("ada@classtrack.test", "correct-horse", Role::Student, true);
    let gate = provider.gate_sign_in();
    let manager = SessionManager::new(provider);
    manager.bootstrap().await;
    assert!(!manager.is_loading());

    let fut = manager.login("ada@classtrack.test", "correct-horse");
    pin_mut!(fut);
    assert!(poll!(&mut fut).is_pending());
    assert!(manager.is_loading());

    gate.add_permits(1);
    fut.await.expect("login should succeed");
    assert!(!manager.is_loading());
}

#[tokio::test]
async fn login_state_is_written_by_the_event_not_the_call() {
    let owner = Owner::new();
    owner.set();
    let provider = MockProvider::default();
    provider.add_user("ada@classtrack.test", "correct-horse", Role::Student, true);
    let (_sub, queue) = record_events(&provider);
    let manager = SessionManager::new(provider);
    manager.bootstrap().await;

    manager
        .login("ada@classtrack.test", "correct-horse")
        .await
        .expect("login should succeed");

    // The direct call path does not write the user.
    assert!(!manager.is_authenticated());

    pump(&manager, &queue).await;
    assert!(manager.is_authenticated());
    assert_invariant(&manager);
}

#[tokio::test]
async fn failed_login_reports_invalid_credentials_and_keeps_state() {
    let owner = Owner::new();
    owner.set();
    let provider = MockProvider::default();
    provider.add_user("ada@classtrack.test", "correct-horse", Role::Student, true);
    let (_sub, queue) = record_events(&provider);
    let manager = SessionManager::new(provider);
    manager.bootstrap().await;

    let err = manager
        .login("ada@classtrack.test", "wrong")
        .await
        .expect_err("wrong password must fail");
    assert_eq!(err, AuthError::InvalidCredentials);
    assert!(queue.borrow().is_empty(), "no event for a failed login");
    assert!(!manager.is_authenticated());
    assert!(!manager.is_loading());
}

#[tokio::test]
async fn stale_sign_in_resolution_cannot_resurrect_a_logged_out_session() {
    let owner = Owner::new();
    owner.set();
    let provider = MockProvider::default();
    provider.add_user("ada@classtrack.test", "correct-horse", Role::Student, true);
    let session = provider.session_for("ada@classtrack.test");
    let gate = provider.gate_profile();
    let manager = SessionManager::new(provider);
    manager.bootstrap().await;

    // The sign-in event arrives first but its profile lookup is still in
    // flight when the logout lands.
    let ev_fut = manager.handle_event(SessionEvent::SignedIn, Some(session));
    pin_mut!(ev_fut);
    assert!(poll!(&mut ev_fut).is_pending());

    manager.logout().await.expect("logout should succeed");
    assert!(!manager.is_authenticated());

    gate.add_permits(1);
    ev_fut.await;

    // Ordered by arrival: logout was later, so the stale result is dropped.
    assert!(!manager.is_authenticated());
    assert_eq!(manager.current_user(), None);
    assert_invariant(&manager);
}

#[tokio::test]
async fn sign_in_event_arriving_after_logout_wins() {
    let owner = Owner::new();
    owner.set();
    let provider = MockProvider::default();
    provider.add_user("ada@classtrack.test", "correct-horse", Role::Student, true);
    let session = provider.session_for("ada@classtrack.test");
    let manager = SessionManager::new(provider);
    manager.bootstrap().await;

    manager.logout().await.expect("logout should succeed");
    manager
        .handle_event(SessionEvent::SignedIn, Some(session))
        .await;

    assert!(manager.is_authenticated());
    assert_invariant(&manager);
}

#[tokio::test]
async fn logout_is_idempotent_under_the_trailing_event() {
    let owner = Owner::new();
    owner.set();
    let provider = MockProvider::default();
    provider.add_user("ada@classtrack.test", "correct-horse", Role::Student, true);
    let (_sub, queue) = record_events(&provider);
    let manager = SessionManager::new(provider);
    manager.bootstrap().await;

    manager
        .login("ada@classtrack.test", "correct-horse")
        .await
        .expect("login should succeed");
    pump(&manager, &queue).await;
    assert!(manager.is_authenticated());

    // Local clear happens in the call; the provider's SignedOut event then
    // arrives and must change nothing.
    manager.logout().await.expect("logout should succeed");
    assert!(!manager.is_authenticated());
    pump(&manager, &queue).await;
    assert!(!manager.is_authenticated());
    assert_invariant(&manager);
}

#[tokio::test]
async fn verify_with_unknown_code_fails_and_leaves_state_untouched() {
    let owner = Owner::new();
    owner.set();
    let provider = MockProvider::default();
    let manager = SessionManager::new(provider);
    manager.bootstrap().await;

    let err = manager
        .verify_email("000000")
        .await
        .expect_err("no pending registration");
    assert_eq!(err, AuthError::InvalidOrExpiredCode);
    assert_eq!(manager.current_user(), None);
    assert!(!manager.is_loading());
}

#[tokio::test]
async fn register_verify_login_round_trip_preserves_role() {
    let owner = Owner::new();
    owner.set();
    let provider = MockProvider::default();
    let (_sub, queue) = record_events(&provider);
    let manager = SessionManager::new(provider.clone());
    manager.bootstrap().await;

    let pending = manager
        .register("rosa@classtrack.test", "long-enough-password", "Rosa", Role::Admin)
        .await
        .expect("registration should succeed");
    assert_eq!(pending.email, "rosa@classtrack.test");
    // Registration alone never logs in.
    assert!(!manager.is_authenticated());
    assert!(queue.borrow().is_empty());

    // Wrong code first, as a user would plausibly fat-finger it.
    assert_eq!(
        manager.verify_email("999999").await.expect_err("bad code"),
        AuthError::InvalidOrExpiredCode
    );
    assert!(!manager.is_authenticated());

    manager
        .verify_email(VERIFICATION_CODE)
        .await
        .expect("correct code should verify");
    pump(&manager, &queue).await;
    assert_eq!(
        manager.current_user().map(|u| u.role),
        Some(Role::Admin),
        "role chosen at registration must survive the round trip"
    );

    manager.logout().await.expect("logout should succeed");
    pump(&manager, &queue).await;
    assert!(!manager.is_authenticated());

    manager
        .login("rosa@classtrack.test", "long-enough-password")
        .await
        .expect("verified account should log in");
    pump(&manager, &queue).await;
    let user = manager.current_user().expect("logged in");
    assert_eq!(user.role, Role::Admin);
    assert_eq!(user.name, "Rosa");
    assert_invariant(&manager);
}

#[tokio::test]
async fn duplicate_registration_reports_email_taken() {
    let owner = Owner::new();
    owner.set();
    let provider = MockProvider::default();
    provider.add_user("ada@classtrack.test", "correct-horse", Role::Student, true);
    let manager = SessionManager::new(provider);
    manager.bootstrap().await;

    let err = manager
        .register("ada@classtrack.test", "long-enough-password", "Ada", Role::Student)
        .await
        .expect_err("duplicate email must fail");
    assert_eq!(err, AuthError::EmailTaken);
}

#[tokio::test]
async fn unsubscribed_listeners_stop_receiving_events() {
    let provider = MockProvider::default();
    provider.add_user("ada@classtrack.test", "correct-horse", Role::Student, true);
    let (sub, queue) = record_events(&provider);

    provider.emit(SessionEvent::SignedIn, Some(provider.session_for("ada@classtrack.test")));
    assert_eq!(queue.borrow().len(), 1);

    sub.unsubscribe();
    provider.emit(SessionEvent::SignedOut, None);
    assert_eq!(queue.borrow().len(), 1, "no delivery after unsubscribe");
}

#[tokio::test]
async fn bootstrap_result_yields_to_an_event_that_arrived_meanwhile() {
    let provider = MockProvider::default();
    provider.add_user("ada@classtrack.test", "correct-horse", Role::Student, true);
    provider.set_current(Some(provider.session_for("ada@classtrack.test")));
    let gate = provider.gate_profile();
    let manager = SessionManager::new(provider);

    let boot = manager.bootstrap();
    pin_mut!(boot);
    assert!(poll!(&mut boot).is_pending());

    // A sign-out lands while bootstrap is still resolving the profile.
    manager.handle_event(SessionEvent::SignedOut, None).await;
    assert!(!manager.is_loading());

    gate.add_permits(1);
    boot.await;

    // The event decided the state; the bootstrap result is stale.
    assert!(!manager.is_authenticated());
}

#[tokio::test]
async fn bootstrapping_state_never_reappears_after_first_resolution() {
    let provider = MockProvider::default();
    provider.add_user("ada@classtrack.test", "correct-horse", Role::Student, true);
    let session = provider.session_for("ada@classtrack.test");
    let (_sub, queue) = record_events(&provider);
    let manager = SessionManager::new(provider);

    manager.bootstrap().await;
    assert!(!matches!(manager.auth_state(), AuthState::Bootstrapping));

    manager
        .login("ada@classtrack.test", "correct-horse")
        .await
        .expect("login should succeed");
    pump(&manager, &queue).await;
    assert!(!matches!(manager.auth_state(), AuthState::Bootstrapping));

    manager.handle_event(SessionEvent::SignedOut, None).await;
    assert!(!matches!(manager.auth_state(), AuthState::Bootstrapping));

    manager
        .handle_event(SessionEvent::SignedIn, Some(session))
        .await;
    assert!(!matches!(manager.auth_state(), AuthState::Bootstrapping));
}
