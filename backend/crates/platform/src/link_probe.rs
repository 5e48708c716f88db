//! Outbound link reachability probe
//!
//! Issues a single `GET` and reports whether the target answered at all.
//! Any HTTP status counts as reachable; only transport failures (DNS,
//! connect, TLS, timeout) are errors.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum LinkProbeError {
    #[error("could not build HTTP client: {0}")]
    Client(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("{0}")]
    Unreachable(String),
}

/// Reusable probe; holds a pooled `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpLinkProbe {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpLinkProbe {
    pub fn new(timeout: Duration) -> Result<Self, LinkProbeError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("submitted-hyperlink/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(timeout)
            .build()
            .map_err(|e| LinkProbeError::Client(e.to_string()))?;

        Ok(Self { client, timeout })
    }

    /// Returns the HTTP status the target answered with
    pub async fn probe(&self, url: &str) -> Result<u16, LinkProbeError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                LinkProbeError::Timeout(self.timeout)
            } else {
                LinkProbeError::Unreachable(e.to_string())
            }
        })?;

        Ok(response.status().as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_builds() {
        assert!(HttpLinkProbe::new(Duration::from_secs(2)).is_ok());
    }

    #[tokio::test]
    async fn test_unparseable_url_is_unreachable() {
        let probe = HttpLinkProbe::new(Duration::from_secs(1)).unwrap();
        let err = probe.probe("not a url").await.unwrap_err();
        assert!(matches!(err, LinkProbeError::Unreachable(_)));
    }

    #[test]
    fn test_timeout_message() {
        let err = LinkProbeError::Timeout(Duration::from_secs(3));
        assert_eq!(err.to_string(), "request timed out after 3s");
    }
}
