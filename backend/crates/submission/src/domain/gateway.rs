//! Outbound Gateways
//!
//! Side effects that leave the process: reviewer mail and link probing.

use crate::domain::entities::ReviewNotice;

/// Failure of an outbound call; never fatal to a submission
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct GatewayError(pub String);

/// Delivers "submission updated" notices to reviewers
#[trait_variant::make(ReviewerNotifier: Send)]
pub trait LocalReviewerNotifier {
    async fn notify(&self, notice: &ReviewNotice) -> Result<(), GatewayError>;
}

/// Checks that a submitted link answers at all
#[trait_variant::make(LinkProbe: Send)]
pub trait LocalLinkProbe {
    async fn check(&self, url: &str) -> Result<(), GatewayError>;
}
