//! Reviewer Mail Delivery
//!
//! `Http` posts to a transactional mail API (Resend-compatible JSON body,
//! bearer key). `LogOnly` is used when no API key is configured.

use crate::domain::entities::ReviewNotice;
use crate::domain::gateway::{GatewayError, ReviewerNotifier};
use serde::Serialize;
use std::time::Duration;

/// Mail API settings
#[derive(Debug, Clone)]
pub struct MailApiConfig {
    pub endpoint: String,
    pub api_key: String,
    pub from: String,
    pub timeout: Duration,
}

#[derive(Debug, Serialize)]
struct SendEmail<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: String,
}

#[derive(Debug, Clone)]
pub enum ReviewerMailer {
    Http {
        client: reqwest::Client,
        config: MailApiConfig,
    },
    LogOnly,
}

impl ReviewerMailer {
    pub fn http(config: MailApiConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("submitted-hyperlink/", env!("CARGO_PKG_VERSION")))
            .pool_idle_timeout(Duration::from_secs(30))
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError(format!("build client failed: {e}")))?;

        Ok(Self::Http { client, config })
    }

    pub fn log_only() -> Self {
        Self::LogOnly
    }
}

impl ReviewerNotifier for ReviewerMailer {
    async fn notify(&self, notice: &ReviewNotice) -> Result<(), GatewayError> {
        let (client, config) = match self {
            ReviewerMailer::LogOnly => {
                tracing::info!(
                    to = %notice.reviewer.email,
                    subject = notice.subject(),
                    team = %notice.team_name,
                    "Reviewer mail not sent (no mail API configured)"
                );
                return Ok(());
            }
            ReviewerMailer::Http { client, config } => (client, config),
        };

        let payload = serde_json::to_string(&SendEmail {
            from: &config.from,
            to: [notice.reviewer.email.as_str()],
            subject: notice.subject(),
            text: notice.body(),
        })
        .map_err(|e| GatewayError(format!("serialize email failed: {e}")))?;

        let response = client
            .post(&config.endpoint)
            .bearer_auth(&config.api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|e| GatewayError(format!("send failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError(format!("mail API error: HTTP {status}: {body}")));
        }

        tracing::info!(to = %notice.reviewer.email, status = %status, "Reviewer mail sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ReviewerContact;

    fn notice() -> ReviewNotice {
        ReviewNotice {
            reviewer: ReviewerContact {
                name: "Rita".to_string(),
                email: "rita@example.edu".to_string(),
            },
            assignment_name: "Wiki 1".to_string(),
            team_name: "Team Seven".to_string(),
        }
    }

    #[test]
    fn test_payload_shape() {
        let notice = notice();
        let json = serde_json::to_value(SendEmail {
            from: "noreply@example.edu",
            to: [notice.reviewer.email.as_str()],
            subject: notice.subject(),
            text: notice.body(),
        })
        .unwrap();

        assert_eq!(json["to"][0], "rita@example.edu");
        assert_eq!(json["subject"], "Link to review");
        assert_eq!(json["from"], "noreply@example.edu");
    }

    #[tokio::test]
    async fn test_log_only_always_succeeds() {
        assert!(ReviewerMailer::log_only().notify(&notice()).await.is_ok());
    }

    #[tokio::test]
    async fn test_http_reports_transport_failure() {
        let mailer = ReviewerMailer::http(MailApiConfig {
            endpoint: "http://127.0.0.1:9/emails".to_string(),
            api_key: "test".to_string(),
            from: "noreply@example.edu".to_string(),
            timeout: Duration::from_secs(1),
        })
        .unwrap();

        let err = mailer.notify(&notice()).await.unwrap_err();
        assert!(err.0.starts_with("send failed"));
    }
}
