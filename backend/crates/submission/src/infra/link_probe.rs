//! Link reachability check backed by the platform HTTP probe

use crate::domain::gateway::{GatewayError, LinkProbe};
use platform::link_probe::HttpLinkProbe;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpLinkChecker {
    probe: HttpLinkProbe,
}

impl HttpLinkChecker {
    pub fn new(timeout: Duration) -> Result<Self, GatewayError> {
        let probe = HttpLinkProbe::new(timeout).map_err(|e| GatewayError(e.to_string()))?;
        Ok(Self { probe })
    }
}

impl LinkProbe for HttpLinkChecker {
    async fn check(&self, url: &str) -> Result<(), GatewayError> {
        let status = self
            .probe
            .probe(url)
            .await
            .map_err(|e| GatewayError(e.to_string()))?;

        tracing::debug!(url, status, "Submitted link answered");
        Ok(())
    }
}
