//! Current User Use Case
//!
//! Session tokens are `<user_id>.<signature>` where the signature is the
//! URL-safe base64 HMAC-SHA256 of the decimal user id. They are issued by
//! the host application; this service only verifies them.

use crate::application::config::SubmissionConfig;
use crate::domain::entities::User;
use crate::domain::repository::UserRepository;
use crate::error::SubmissionResult;
use kernel::id::UserId;
use std::sync::Arc;

/// Resolve the signed-in user from a session token
pub struct CurrentUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<SubmissionConfig>,
}

impl<U> CurrentUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<SubmissionConfig>) -> Self {
        Self { user_repo, config }
    }

    /// `Ok(None)` for a missing, forged, or dangling token
    pub async fn execute(&self, token: Option<&str>) -> SubmissionResult<Option<User>> {
        let Some(user_id) = token.and_then(|t| verify_session_token(t, &self.config.session_secret))
        else {
            return Ok(None);
        };

        let user = self.user_repo.find_user(user_id).await?;
        if user.is_none() {
            tracing::debug!(user_id = %user_id, "Session refers to unknown user");
        }
        Ok(user)
    }
}

/// Create a signed session token for `user_id`
pub fn sign_session_token(user_id: UserId, secret: &[u8; 32]) -> String {
    let id = user_id.to_string();
    let signature = platform::crypto::hmac_sha256(secret, id.as_bytes());
    format!("{}.{}", id, platform::crypto::to_base64(&signature))
}

/// Verify and extract the user id from a signed token
fn verify_session_token(token: &str, secret: &[u8; 32]) -> Option<UserId> {
    let (id, signature) = token.split_once('.')?;
    let provided_signature = platform::crypto::from_base64(signature).ok()?;

    let expected_signature = platform::crypto::hmac_sha256(secret, id.as_bytes());

    // Constant-time comparison
    if !platform::crypto::constant_time_eq(&provided_signature, &expected_signature) {
        return None;
    }

    id.parse::<i64>().ok().map(UserId::new)
}
