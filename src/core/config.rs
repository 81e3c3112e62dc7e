//! Application configuration from environment variables.
//!
//! Load configuration using `Config::from_env()` after calling
//! `dotenvy::dotenv()`.

/// Server-side configuration loaded from environment variables.
///
/// The shell server never talks to the backend itself; these values exist
/// for deploy-time diagnostics and for templating them into client builds.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the hosted backend the browser talks to.
    /// Example: <https://classtrack.example.com>
    pub backend_url: Option<String>,

    /// Publishable API key for the hosted backend, if the deployment
    /// requires one.
    pub backend_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` before this to load from `.env` file.
    pub fn from_env() -> Self {
        Self {
            backend_url: std::env::var("CLASSTRACK_BACKEND_URL").ok(),
            backend_key: std::env::var("CLASSTRACK_BACKEND_KEY").ok(),
        }
    }

    /// Check if a backend endpoint is configured
    pub fn has_backend(&self) -> bool {
        self.backend_url.is_some()
    }

    /// Check if a publishable key is configured
    pub fn has_backend_key(&self) -> bool {
        self.backend_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_vars_leave_fields_unset() {
        let config = Config {
            backend_url: None,
            backend_key: None,
        };
        assert!(!config.has_backend());
        assert!(!config.has_backend_key());
    }

    #[test]
    fn set_fields_are_reported_configured() {
        let config = Config {
            backend_url: Some("https://backend.classtrack.test".to_string()),
            backend_key: Some("publishable-key".to_string()),
        };
        assert!(config.has_backend());
        assert!(config.has_backend_key());
    }
}
