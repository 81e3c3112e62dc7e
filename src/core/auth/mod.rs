//! Client-side authentication core
//!
//! This module owns the session state machine and the identity provider
//! boundary:
//! - `SessionManager`: reactive auth state plus the login/register/
//!   verify/logout operations
//! - `IdentityProvider`: the contract the hosted identity service is
//!   consumed through
//! - `RemoteIdentityProvider`: the HTTP adapter over the hosted backend

mod error;
mod provider;
mod remote;
mod session;
#[cfg(test)]
mod tests;
mod types;

pub use error::AuthError;
pub use provider::{IdentityProvider, SessionChangeHandler, SessionSubscription};
pub use remote::{BackendConfig, RemoteIdentityProvider};
pub use session::{AuthState, SessionManager};
pub use types::{
    CurrentUser, PendingIdentity, Profile, Role, Session, SessionEvent, SignUpData,
};
