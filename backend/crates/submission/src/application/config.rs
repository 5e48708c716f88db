//! Application Configuration
//!
//! Configuration for the submitted-hyperlink application layer.

use std::time::Duration;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Submitted-hyperlink configuration
#[derive(Debug, Clone)]
pub struct SubmissionConfig {
    /// Cookie carrying the signed user id
    pub session_cookie_name: String,
    /// HMAC key for session tokens (32 bytes)
    pub session_secret: [u8; 32],
    /// Cookie carrying the one-shot flash message
    pub flash_cookie_name: String,
    pub flash_max_age: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Path the `edit`/`view` redirects are built on
    pub content_base_path: String,
    /// Probe submitted links over HTTP before accepting them
    pub verify_reachability: bool,
    pub probe_timeout: Duration,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "session".to_string(),
            session_secret: [0u8; 32],
            flash_cookie_name: "flash".to_string(),
            flash_max_age: Duration::from_secs(60),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            content_base_path: "/submitted_content".to_string(),
            verify_reachability: false,
            probe_timeout: Duration::from_secs(5),
        }
    }
}

impl SubmissionConfig {
    /// Create config with a random session secret
    pub fn with_random_secret() -> Self {
        Self {
            session_secret: platform::crypto::random_key(),
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    pub fn flash_max_age_secs(&self) -> i64 {
        self.flash_max_age.as_secs() as i64
    }
}
