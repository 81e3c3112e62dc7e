//! Hosted-backend identity provider
//!
//! HTTP adapter over the ClassTrack backend: GoTrue-compatible auth
//! endpoints plus a PostgREST-style `profiles` table. Runs in the browser
//! only; on the server every operation is a stub, since the shell server
//! performs no identity work.
//!
//! Session-change events have no server push channel; the adapter emits
//! them itself after its own successful sign-in/verify/sign-out calls,
//! which is all the subscription surface the session state machine needs.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::Deserialize;

use super::error::AuthError;
#[cfg(not(feature = "ssr"))]
use super::error::AuthOp;
use super::provider::{IdentityProvider, SessionChangeHandler, SessionSubscription};
use super::types::{PendingIdentity, Profile, Session, SignUpData};
#[cfg(not(feature = "ssr"))]
use super::types::SessionEvent;

const STORAGE_KEY_SESSION: &str = "classtrack_session";
const STORAGE_KEY_PENDING_EMAIL: &str = "classtrack_pending_email";

/// Ignore stored sessions this close to expiry (seconds).
#[cfg(not(feature = "ssr"))]
const EXPIRY_BUFFER_SECS: i64 = 60;

/// Connection settings for the hosted backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the backend; empty means same-origin.
    pub base_url: String,
    /// Publishable key sent as the `apikey` header, when the deployment
    /// requires one.
    pub api_key: Option<String>,
}

impl BackendConfig {
    /// Build-time configuration, falling back to same-origin endpoints.
    pub fn from_build_env() -> Self {
        BackendConfig {
            base_url: option_env!("CLASSTRACK_BACKEND_URL")
                .unwrap_or_default()
                .to_string(),
            api_key: option_env!("CLASSTRACK_BACKEND_KEY").map(str::to_string),
        }
    }
}

struct Listener {
    id: u64,
    handler: SessionChangeHandler,
}

/// Identity provider backed by the hosted backend.
pub struct RemoteIdentityProvider {
    #[cfg_attr(feature = "ssr", allow(dead_code))]
    config: BackendConfig,
    listeners: Rc<RefCell<Vec<Listener>>>,
    next_listener_id: Cell<u64>,
}

impl RemoteIdentityProvider {
    pub fn new(config: BackendConfig) -> Self {
        RemoteIdentityProvider {
            config,
            listeners: Rc::new(RefCell::new(Vec::new())),
            next_listener_id: Cell::new(0),
        }
    }

    #[cfg_attr(feature = "ssr", allow(dead_code))]
    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Dispatch an event to every subscriber.
    ///
    /// Handlers run while the registry borrow is held: a handler that calls
    /// back into this provider in the same turn re-enters the borrow and
    /// panics. Subscribers defer provider calls to the next scheduler turn.
    #[cfg(not(feature = "ssr"))]
    fn emit(&self, event: SessionEvent, session: Option<Session>) {
        let listeners = self.listeners.borrow();
        for listener in listeners.iter() {
            (listener.handler)(event, session.clone());
        }
    }

    #[cfg(not(feature = "ssr"))]
    fn attach_keys(&self, req: gloo_net::http::RequestBuilder) -> gloo_net::http::RequestBuilder {
        match &self.config.api_key {
            Some(key) => req.header("apikey", key),
            None => req,
        }
    }

    #[cfg(not(feature = "ssr"))]
    fn stored_session(&self) -> Option<Session> {
        let storage = local_storage()?;
        let json = storage.get_item(STORAGE_KEY_SESSION).ok()??;
        serde_json::from_str(&json).ok()
    }

    #[cfg(not(feature = "ssr"))]
    fn store_session(&self, session: &Session) {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(
                STORAGE_KEY_SESSION,
                &serde_json::to_string(session).unwrap_or_default(),
            );
        }
    }

    #[cfg(not(feature = "ssr"))]
    fn clear_session(&self) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(STORAGE_KEY_SESSION);
        }
    }

    #[cfg(not(feature = "ssr"))]
    fn store_pending_email(&self, email: &str) {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(STORAGE_KEY_PENDING_EMAIL, email);
        }
    }

    #[cfg(not(feature = "ssr"))]
    fn pending_email(&self) -> Option<String> {
        let storage = local_storage()?;
        storage.get_item(STORAGE_KEY_PENDING_EMAIL).ok()?
    }

    #[cfg(not(feature = "ssr"))]
    fn clear_pending_email(&self) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(STORAGE_KEY_PENDING_EMAIL);
        }
    }
}

impl Default for RemoteIdentityProvider {
    fn default() -> Self {
        RemoteIdentityProvider::new(BackendConfig::from_build_env())
    }
}

impl IdentityProvider for RemoteIdentityProvider {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        #[cfg(not(feature = "ssr"))]
        {
            let request = self
                .attach_keys(gloo_net::http::Request::post(
                    &self.endpoint("/auth/v1/token?grant_type=password"),
                ))
                .json(&serde_json::json!({ "email": email, "password": password }))
                .map_err(|e| AuthError::Network(e.to_string()))?;
            let response = request
                .send()
                .await
                .map_err(|e| AuthError::Network(e.to_string()))?;
            if !response.ok() {
                return Err(error_from_response(AuthOp::SignIn, &response).await);
            }
            let token: TokenResponse = response
                .json()
                .await
                .map_err(|e| AuthError::Network(e.to_string()))?;
            let session = token.into_session();
            self.store_session(&session);
            self.emit(SessionEvent::SignedIn, Some(session.clone()));
            Ok(session)
        }
        #[cfg(feature = "ssr")]
        {
            let _ = (email, password);
            Err(server_side())
        }
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        data: SignUpData,
    ) -> Result<PendingIdentity, AuthError> {
        #[cfg(not(feature = "ssr"))]
        {
            let request = self
                .attach_keys(gloo_net::http::Request::post(
                    &self.endpoint("/auth/v1/signup"),
                ))
                .json(&serde_json::json!({
                    "email": email,
                    "password": password,
                    "data": data,
                }))
                .map_err(|e| AuthError::Network(e.to_string()))?;
            let response = request
                .send()
                .await
                .map_err(|e| AuthError::Network(e.to_string()))?;
            if !response.ok() {
                return Err(error_from_response(AuthOp::SignUp, &response).await);
            }
            let pending: PendingIdentity = response
                .json()
                .await
                .map_err(|e| AuthError::Network(e.to_string()))?;
            // The verify endpoint needs the address alongside the code.
            self.store_pending_email(&pending.email);
            Ok(pending)
        }
        #[cfg(feature = "ssr")]
        {
            let _ = (email, password, data);
            Err(server_side())
        }
    }

    async fn verify_otp(&self, code: &str) -> Result<Session, AuthError> {
        #[cfg(not(feature = "ssr"))]
        {
            let Some(email) = self.pending_email() else {
                // No registration in progress on this client.
                return Err(AuthError::InvalidOrExpiredCode);
            };
            let request = self
                .attach_keys(gloo_net::http::Request::post(
                    &self.endpoint("/auth/v1/verify"),
                ))
                .json(&serde_json::json!({
                    "type": "signup",
                    "email": email,
                    "token": code,
                }))
                .map_err(|e| AuthError::Network(e.to_string()))?;
            let response = request
                .send()
                .await
                .map_err(|e| AuthError::Network(e.to_string()))?;
            if !response.ok() {
                return Err(error_from_response(AuthOp::Verify, &response).await);
            }
            let token: TokenResponse = response
                .json()
                .await
                .map_err(|e| AuthError::Network(e.to_string()))?;
            let session = token.into_session();
            self.clear_pending_email();
            self.store_session(&session);
            self.emit(SessionEvent::SignedIn, Some(session.clone()));
            Ok(session)
        }
        #[cfg(feature = "ssr")]
        {
            let _ = code;
            Err(server_side())
        }
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        #[cfg(not(feature = "ssr"))]
        {
            let remote = match self.stored_session() {
                Some(session) => {
                    let request = self
                        .attach_keys(gloo_net::http::Request::post(
                            &self.endpoint("/auth/v1/logout"),
                        ))
                        .header(
                            "Authorization",
                            &format!("Bearer {}", session.access_token),
                        );
                    match request.send().await {
                        Ok(response) if response.ok() => Ok(()),
                        Ok(response) => {
                            Err(error_from_response(AuthOp::SignOut, &response).await)
                        }
                        Err(e) => Err(AuthError::Network(e.to_string())),
                    }
                }
                None => Ok(()),
            };
            // Local capability goes away regardless of the remote outcome.
            self.clear_session();
            self.emit(SessionEvent::SignedOut, None);
            remote
        }
        #[cfg(feature = "ssr")]
        {
            Ok(())
        }
    }

    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        #[cfg(not(feature = "ssr"))]
        {
            let now = js_sys::Date::now() as i64 / 1000;
            let session = self.stored_session().filter(|s| {
                s.expires_at
                    .is_none_or(|expires_at| expires_at > now + EXPIRY_BUFFER_SECS)
            });
            if session.is_none() {
                self.clear_session();
            }
            Ok(session)
        }
        #[cfg(feature = "ssr")]
        {
            Ok(None)
        }
    }

    async fn fetch_profile(&self, user_id: &str) -> Result<Profile, AuthError> {
        #[cfg(not(feature = "ssr"))]
        {
            let url = self.endpoint(&format!("/rest/v1/profiles?id=eq.{user_id}&limit=1"));
            let mut request = self.attach_keys(gloo_net::http::Request::get(&url));
            if let Some(session) = self.stored_session() {
                request = request.header(
                    "Authorization",
                    &format!("Bearer {}", session.access_token),
                );
            }
            let response = request
                .send()
                .await
                .map_err(|e| AuthError::Network(e.to_string()))?;
            if !response.ok() {
                return Err(if response.status() == 404 {
                    AuthError::ProfileNotFound
                } else {
                    AuthError::Network(format!(
                        "profile lookup returned status {}",
                        response.status()
                    ))
                });
            }
            let mut rows: Vec<Profile> = response
                .json()
                .await
                .map_err(|e| AuthError::Network(e.to_string()))?;
            match rows.pop() {
                Some(profile) => Ok(profile),
                None => Err(AuthError::ProfileNotFound),
            }
        }
        #[cfg(feature = "ssr")]
        {
            let _ = user_id;
            Err(server_side())
        }
    }

    fn on_session_change(&self, handler: SessionChangeHandler) -> SessionSubscription {
        let id = self.next_listener_id.get();
        self.next_listener_id.set(id + 1);
        self.listeners.borrow_mut().push(Listener { id, handler });

        let listeners = Rc::clone(&self.listeners);
        SessionSubscription::new(move || {
            listeners.borrow_mut().retain(|listener| listener.id != id);
        })
    }
}

#[cfg(feature = "ssr")]
fn server_side() -> AuthError {
    AuthError::Network("identity provider is not available on the server".to_string())
}

#[cfg(not(feature = "ssr"))]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Token grant payload from the auth endpoints.
#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "ssr", allow(dead_code))]
struct TokenResponse {
    access_token: String,
    expires_in: Option<i64>,
    expires_at: Option<i64>,
    user: TokenUser,
}

#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "ssr", allow(dead_code))]
struct TokenUser {
    id: String,
    email: String,
}

impl TokenResponse {
    #[cfg(not(feature = "ssr"))]
    fn into_session(self) -> Session {
        let now = js_sys::Date::now() as i64 / 1000;
        Session {
            user_id: self.user.id,
            email: self.user.email,
            access_token: self.access_token,
            expires_at: self.expires_at.or(self.expires_in.map(|d| now + d)),
        }
    }
}

/// Pull the machine-readable error code out of a failing auth response.
#[cfg(not(feature = "ssr"))]
async fn error_from_response(op: AuthOp, response: &gloo_net::http::Response) -> AuthError {
    #[derive(Default, Deserialize)]
    struct ErrorBody {
        error_code: Option<String>,
        error: Option<String>,
        msg: Option<String>,
        error_description: Option<String>,
    }

    let body: ErrorBody = response.json().await.unwrap_or_default();
    let code = body
        .error_code
        .or(body.error)
        .or(body.msg)
        .or(body.error_description)
        .unwrap_or_default();
    AuthError::from_status(op, response.status(), &code)
}
