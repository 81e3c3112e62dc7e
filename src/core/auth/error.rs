//! Authentication error taxonomy
//!
//! Every variant is non-fatal: callers convert errors to a single
//! user-facing notification and re-signal them so page-level submit state
//! stays consistent. Nothing here is retried automatically.

/// Authentication error types surfaced by the identity provider boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email already registered")]
    EmailTaken,

    #[error("Password too weak")]
    WeakPassword,

    #[error("Invalid or expired verification code")]
    InvalidOrExpiredCode,

    #[error("Profile not found")]
    ProfileNotFound,

    #[error("Network error: {0}")]
    Network(String),
}

/// Which provider operation produced a failing response.
///
/// Ambiguous 4xx statuses map to the operation's credential-shaped error so
/// the user sees "wrong code" rather than a raw transport message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOp {
    SignIn,
    SignUp,
    Verify,
    SignOut,
}

impl AuthError {
    /// Map an HTTP failure from an auth endpoint to the taxonomy.
    ///
    /// `code` is the backend's machine-readable error code when the response
    /// body carried one, empty otherwise.
    pub fn from_status(op: AuthOp, status: u16, code: &str) -> Self {
        if status >= 500 || status == 0 {
            return AuthError::Network(format!("backend returned status {status}"));
        }
        match op {
            AuthOp::SignIn => AuthError::InvalidCredentials,
            AuthOp::SignUp => {
                if status == 422 || code.contains("weak_password") {
                    AuthError::WeakPassword
                } else if status == 409
                    || code.contains("user_already_exists")
                    || code.contains("email_exists")
                {
                    AuthError::EmailTaken
                } else {
                    AuthError::Network(format!("sign-up rejected with status {status}"))
                }
            }
            AuthOp::Verify => AuthError::InvalidOrExpiredCode,
            AuthOp::SignOut => AuthError::Network(format!("sign-out failed with status {status}")),
        }
    }

    /// Whether the error is a transport-level failure rather than a
    /// credential/validation rejection.
    pub fn is_network(&self) -> bool {
        matches!(self, AuthError::Network(_))
    }
}
