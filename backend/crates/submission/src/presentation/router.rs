//! Submitted Hyperlink Router

use crate::application::config::SubmissionConfig;
use crate::domain::gateway::{LinkProbe, ReviewerNotifier};
use crate::domain::repository::SubmissionStore;
use crate::infra::link_probe::HttpLinkChecker;
use crate::infra::mailer::ReviewerMailer;
use crate::infra::postgres::PgSubmissionRepository;
use crate::presentation::handlers::{self, SubmissionAppState};
use axum::{Router, routing::post};
use std::sync::Arc;

/// Create the router with the PostgreSQL repository and HTTP gateways
pub fn submission_router(
    repo: PgSubmissionRepository,
    mailer: ReviewerMailer,
    link_checker: HttpLinkChecker,
    config: SubmissionConfig,
) -> Router {
    submission_router_generic(repo, mailer, link_checker, config)
}

/// Create a router for any repository and gateway implementation
pub fn submission_router_generic<R, N, L>(
    repo: R,
    notifier: N,
    probe: L,
    config: SubmissionConfig,
) -> Router
where
    R: SubmissionStore + Clone,
    N: ReviewerNotifier + Clone + Send + Sync + 'static,
    L: LinkProbe + Clone + Send + Sync + 'static,
{
    let state = SubmissionAppState {
        repo: Arc::new(repo),
        notifier: Arc::new(notifier),
        probe: Arc::new(probe),
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/submit_hyperlink",
            post(handlers::submit_hyperlink::<R, N, L>),
        )
        .route(
            "/remove_hyperlink",
            post(handlers::remove_hyperlink::<R, N, L>),
        )
        .with_state(state)
}
