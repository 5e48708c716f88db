//! HTTP Handlers

use crate::application::authorize::{Authorization, AuthorizeActionUseCase};
use crate::application::config::SubmissionConfig;
use crate::application::current_user::CurrentUserUseCase;
use crate::application::outcome::ActionOutcome;
use crate::application::remove_hyperlink::{RemoveHyperlinkInput, RemoveHyperlinkUseCase};
use crate::application::submit_hyperlink::{SubmitHyperlinkInput, SubmitHyperlinkUseCase};
use crate::domain::entities::User;
use crate::domain::gateway::{LinkProbe, ReviewerNotifier};
use crate::domain::repository::SubmissionStore;
use crate::domain::value_objects::{ControllerAction, Flash};
use crate::error::{SubmissionError, SubmissionResult};
use crate::presentation::dto::{RemoveHyperlinkForm, SubmitHyperlinkForm};
use crate::presentation::flash::{content_location, redirect_back, redirect_with_flash};
use axum::Form;
use axum::extract::{ConnectInfo, State};
use axum::http::{Extensions, HeaderMap};
use axum::response::Response;
use kernel::id::ParticipantId;
use platform::client::extract_client_ip;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tracing::Instrument;

/// Shared state for submitted-hyperlink handlers
#[derive(Clone)]
pub struct SubmissionAppState<R, N, L>
where
    R: SubmissionStore + Clone,
    N: ReviewerNotifier + Clone + Send + Sync + 'static,
    L: LinkProbe + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub notifier: Arc<N>,
    pub probe: Arc<L>,
    pub config: Arc<SubmissionConfig>,
}

/// POST /submitted_hyperlink/submit_hyperlink
pub async fn submit_hyperlink<R, N, L>(
    State(state): State<SubmissionAppState<R, N, L>>,
    headers: HeaderMap,
    extensions: Extensions,
    Form(form): Form<SubmitHyperlinkForm>,
) -> SubmissionResult<Response>
where
    R: SubmissionStore + Clone,
    N: ReviewerNotifier + Clone + Send + Sync + 'static,
    L: LinkProbe + Clone + Send + Sync + 'static,
{
    let span = tracing::info_span!(
        "submitted_hyperlink",
        action = %ControllerAction::SubmitHyperlink,
        client_ip = ?client_ip(&headers, &extensions),
        participant_id = ?form.participant_id(),
    );

    submit(state, headers, form).instrument(span).await
}

/// POST /submitted_hyperlink/remove_hyperlink
pub async fn remove_hyperlink<R, N, L>(
    State(state): State<SubmissionAppState<R, N, L>>,
    headers: HeaderMap,
    extensions: Extensions,
    Form(form): Form<RemoveHyperlinkForm>,
) -> SubmissionResult<Response>
where
    R: SubmissionStore + Clone,
    N: ReviewerNotifier + Clone + Send + Sync + 'static,
    L: LinkProbe + Clone + Send + Sync + 'static,
{
    let span = tracing::info_span!(
        "submitted_hyperlink",
        action = %ControllerAction::RemoveHyperlink,
        client_ip = ?client_ip(&headers, &extensions),
        participant_id = ?form.participant_id(),
    );

    remove(state, headers, form).instrument(span).await
}

async fn submit<R, N, L>(
    state: SubmissionAppState<R, N, L>,
    headers: HeaderMap,
    form: SubmitHyperlinkForm,
) -> SubmissionResult<Response>
where
    R: SubmissionStore + Clone,
    N: ReviewerNotifier + Clone + Send + Sync + 'static,
    L: LinkProbe + Clone + Send + Sync + 'static,
{
    let participant_id = form.participant_id();
    let user = match authorize(&state, &headers, ControllerAction::SubmitHyperlink, participant_id)
        .await?
    {
        Ok(user) => user,
        Err(denied) => return Ok(denied),
    };

    let use_case = SubmitHyperlinkUseCase::new(
        state.repo.clone(),
        state.notifier.clone(),
        state.probe.clone(),
        state.config.clone(),
    );

    let input = SubmitHyperlinkInput {
        participant_id: participant_id.ok_or(SubmissionError::MissingParticipantId)?,
        submission: form.submission,
        user_id: user.id,
    };

    let outcome = use_case.execute(input).await?;

    Ok(redirect_to_content(&state.config, &outcome))
}

async fn remove<R, N, L>(
    state: SubmissionAppState<R, N, L>,
    headers: HeaderMap,
    form: RemoveHyperlinkForm,
) -> SubmissionResult<Response>
where
    R: SubmissionStore + Clone,
    N: ReviewerNotifier + Clone + Send + Sync + 'static,
    L: LinkProbe + Clone + Send + Sync + 'static,
{
    let participant_id = form.participant_id();
    let user = match authorize(&state, &headers, ControllerAction::RemoveHyperlink, participant_id)
        .await?
    {
        Ok(user) => user,
        Err(denied) => return Ok(denied),
    };

    let use_case = RemoveHyperlinkUseCase::new(state.repo.clone());

    let input = RemoveHyperlinkInput {
        participant_id: participant_id.ok_or(SubmissionError::MissingParticipantId)?,
        index: form.index(),
        expected: form.expected_hyperlink(),
        user_id: user.id,
    };

    let outcome = use_case.execute(input).await?;

    Ok(redirect_to_content(&state.config, &outcome))
}

/// Resolve the session user and run the role gate
///
/// The inner `Err` is the ready-made redirect for a denied request.
async fn authorize<R, N, L>(
    state: &SubmissionAppState<R, N, L>,
    headers: &HeaderMap,
    action: ControllerAction,
    participant_id: Option<ParticipantId>,
) -> SubmissionResult<Result<User, Response>>
where
    R: SubmissionStore + Clone,
    N: ReviewerNotifier + Clone + Send + Sync + 'static,
    L: LinkProbe + Clone + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(headers, &state.config.session_cookie_name);
    let user = CurrentUserUseCase::new(state.repo.clone(), state.config.clone())
        .execute(token.as_deref())
        .await?;

    let authorization = AuthorizeActionUseCase::new(state.repo.clone())
        .execute(user.as_ref(), action, participant_id)
        .await?;

    match (authorization, user) {
        (Authorization::Allowed, Some(user)) => Ok(Ok(user)),
        (Authorization::Denied(message), _) => Ok(Err(redirect_back(
            &state.config,
            headers,
            &Flash::Error(message),
        ))),
        (Authorization::Allowed, None) => Err(SubmissionError::Internal(
            "request without a session passed the role gate".to_string(),
        )),
    }
}

fn redirect_to_content(config: &SubmissionConfig, outcome: &ActionOutcome) -> Response {
    let location = content_location(config, outcome.redirect, outcome.participant_id);
    redirect_with_flash(config, &location, &outcome.flash)
}

fn client_ip(headers: &HeaderMap, extensions: &Extensions) -> Option<IpAddr> {
    let direct_ip = extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());
    extract_client_ip(headers, direct_ip)
}
