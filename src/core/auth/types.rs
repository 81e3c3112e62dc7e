//! Domain types for authentication and identity
//!
//! The raw identity (credentials, verification state) lives in the hosted
//! identity provider; the application-level `Profile` row is joined onto it
//! to produce the `CurrentUser` view model held by the session state.

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Account role chosen at registration and stored on the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[display("student")]
    Student,
    #[display("admin")]
    Admin,
}

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Landing route for this role after a successful login.
    pub fn home_path(self) -> &'static str {
        match self {
            Role::Student => "/dashboard",
            Role::Admin => "/admin",
        }
    }
}

/// Application-level user record, one row per identity, keyed by identity id.
///
/// Owned and mutated by the backend (admin approval, profile edits); the
/// client holds read-only copies and never updates it speculatively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

/// Read-only copy of the identity provider's session.
///
/// The provider owns the real thing; this copy may be stale and is refreshed
/// through session-change events rather than polling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub access_token: String,
    /// Unix timestamp (seconds); `None` when the backend did not report one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}

/// The Session ⋈ Profile join: who the current actor is.
///
/// Exists only while a session is live and its profile resolved; recomputed
/// on every session change and absent otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub approved: bool,
}

impl From<Profile> for CurrentUser {
    fn from(profile: Profile) -> Self {
        CurrentUser {
            id: profile.id,
            email: profile.email,
            name: profile.name,
            role: profile.role,
            approved: profile.approved,
        }
    }
}

/// Push notification from the identity provider about a session transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The session found at client startup, if any.
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
}

/// Profile metadata attached to a sign-up request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignUpData {
    pub name: String,
    pub role: Role,
}

/// A registered identity awaiting email verification.
///
/// Carries no session: the account is unusable until the one-time code is
/// exchanged successfully.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PendingIdentity {
    pub id: String,
    pub email: String,
}
