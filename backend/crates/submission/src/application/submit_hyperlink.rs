//! Submit Hyperlink Use Case

use crate::application::config::SubmissionConfig;
use crate::application::outcome::ActionOutcome;
use crate::application::ownership::load_owned_team;
use crate::domain::entities::{Participant, ReviewNotice, SubmissionRecord, Team};
use crate::domain::gateway::{LinkProbe, ReviewerNotifier};
use crate::domain::repository::SubmissionStore;
use crate::domain::services::{InvalidHyperlink, ValidatedHyperlink, validate_hyperlink};
use crate::domain::value_objects::{ControllerAction, Flash, SubmissionOperation};
use crate::error::{SubmissionError, SubmissionResult};
use kernel::id::{ParticipantId, UserId};
use std::sync::Arc;

pub const DUPLICATE_MESSAGE: &str =
    "You or your teammate(s) have already submitted the same hyperlink.";
pub const SUBMITTED_MESSAGE: &str = "The link has been successfully submitted.";

/// Input DTO for submit hyperlink
#[derive(Debug, Clone)]
pub struct SubmitHyperlinkInput {
    pub participant_id: ParticipantId,
    pub submission: String,
    /// Signed-in user making the request
    pub user_id: UserId,
}

/// Submit Hyperlink Use Case
pub struct SubmitHyperlinkUseCase<R, N, L>
where
    R: SubmissionStore,
    N: ReviewerNotifier,
    L: LinkProbe,
{
    repo: Arc<R>,
    notifier: Arc<N>,
    probe: Arc<L>,
    config: Arc<SubmissionConfig>,
}

impl<R, N, L> SubmitHyperlinkUseCase<R, N, L>
where
    R: SubmissionStore,
    N: ReviewerNotifier,
    L: LinkProbe,
{
    pub fn new(repo: Arc<R>, notifier: Arc<N>, probe: Arc<L>, config: Arc<SubmissionConfig>) -> Self {
        Self {
            repo,
            notifier,
            probe,
            config,
        }
    }

    pub async fn execute(&self, input: SubmitHyperlinkInput) -> SubmissionResult<ActionOutcome> {
        let (participant, team) =
            load_owned_team(self.repo.as_ref(), input.participant_id, input.user_id).await?;

        let entry = input.submission.trim();

        if team.hyperlinks.contains(entry) {
            return Ok(self.duplicate(&participant, &team));
        }

        let link = match self.validate(entry).await {
            Ok(link) => link,
            Err(reason) => {
                let message = format!("The URL or URI is invalid. Reason: {reason}");
                tracing::error!(
                    controller = ControllerAction::CONTROLLER_NAME,
                    participant = %participant.name,
                    team_id = %team.id,
                    "{}",
                    message
                );
                return Ok(ActionOutcome::edit(participant.id, Flash::Error(message)));
            }
        };

        let assignment = self
            .repo
            .find_assignment(participant.assignment_id)
            .await?
            .ok_or(SubmissionError::AssignmentNotFound(participant.assignment_id))?;

        let record = SubmissionRecord::new(
            team.id,
            link.entry.as_str(),
            participant.name.as_str(),
            assignment.id,
            SubmissionOperation::SubmitHyperlink,
        );
        let Some(record_id) = self.repo.append_hyperlink(&record).await? else {
            // A teammate stored the same link after the list above was read
            return Ok(self.duplicate(&participant, &team));
        };

        self.mail_assigned_reviewers(&participant, &team, &assignment.name)
            .await;

        tracing::info!(
            controller = ControllerAction::CONTROLLER_NAME,
            participant = %participant.name,
            team_id = %team.id,
            record_id = %record_id,
            operation = %SubmissionOperation::SubmitHyperlink,
            "{}",
            SUBMITTED_MESSAGE
        );

        Ok(ActionOutcome::edit(
            participant.id,
            Flash::Success(SUBMITTED_MESSAGE.to_string()),
        ))
    }

    fn duplicate(&self, participant: &Participant, team: &Team) -> ActionOutcome {
        tracing::error!(
            controller = ControllerAction::CONTROLLER_NAME,
            participant = %participant.name,
            team_id = %team.id,
            "{}",
            DUPLICATE_MESSAGE
        );
        ActionOutcome::edit(participant.id, Flash::Error(DUPLICATE_MESSAGE.to_string()))
    }

    async fn validate(&self, entry: &str) -> Result<ValidatedHyperlink, InvalidHyperlink> {
        let link = validate_hyperlink(entry)?;

        if self.config.verify_reachability {
            self.probe
                .check(link.url.as_str())
                .await
                .map_err(|e| InvalidHyperlink::Unreachable(e.to_string()))?;
        }

        Ok(link)
    }

    /// Notify every reviewer mapped to the team
    ///
    /// Runs after the submission is stored; failures are logged only.
    async fn mail_assigned_reviewers(&self, participant: &Participant, team: &Team, assignment_name: &str) {
        let reviewers = match self
            .repo
            .reviewers_for_team(participant.assignment_id, team.id)
            .await
        {
            Ok(reviewers) => reviewers,
            Err(e) => {
                tracing::warn!(error = %e, team_id = %team.id, "Could not load assigned reviewers");
                return;
            }
        };

        for reviewer in reviewers {
            let notice = ReviewNotice {
                reviewer,
                assignment_name: assignment_name.to_string(),
                team_name: team.name.clone(),
            };
            if let Err(e) = self.notifier.notify(&notice).await {
                tracing::warn!(
                    error = %e,
                    reviewer = %notice.reviewer.email,
                    team_id = %team.id,
                    "Failed to notify reviewer"
                );
            }
        }
    }
}
