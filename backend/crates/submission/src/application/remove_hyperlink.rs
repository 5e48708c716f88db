//! Remove Hyperlink Use Case

use crate::application::outcome::ActionOutcome;
use crate::application::ownership::load_owned_team;
use crate::domain::entities::SubmissionRecord;
use crate::domain::repository::SubmissionStore;
use crate::domain::value_objects::{ControllerAction, Flash, RedirectTarget, SubmissionOperation};
use crate::error::{SubmissionError, SubmissionResult};
use chrono::Utc;
use kernel::id::{ParticipantId, UserId};
use std::sync::Arc;

pub const REMOVED_MESSAGE: &str = "The link has been successfully removed.";
pub const STALE_SELECTION_MESSAGE: &str =
    "The link you selected is no longer in your submission list.";

/// Input DTO for remove hyperlink
#[derive(Debug, Clone)]
pub struct RemoveHyperlinkInput {
    pub participant_id: ParticipantId,
    /// Position in the team's list as rendered; `None` if unparseable
    pub index: Option<usize>,
    /// Link text the page showed at `index`, when the form sent it
    pub expected: Option<String>,
    pub user_id: UserId,
}

/// Remove Hyperlink Use Case
pub struct RemoveHyperlinkUseCase<R>
where
    R: SubmissionStore,
{
    repo: Arc<R>,
}

impl<R> RemoveHyperlinkUseCase<R>
where
    R: SubmissionStore,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: RemoveHyperlinkInput) -> SubmissionResult<ActionOutcome> {
        let (participant, team) =
            load_owned_team(self.repo.as_ref(), input.participant_id, input.user_id).await?;

        let assignment = self
            .repo
            .find_assignment(participant.assignment_id)
            .await?
            .ok_or(SubmissionError::AssignmentNotFound(participant.assignment_id))?;

        // Resolved against the loaded list; the unit of work re-checks it
        // against the stored one
        let selected = input.index.and_then(|index| {
            team.selected_hyperlink(index, input.expected.as_deref())
                .map(|link| (index, link.to_string()))
        });

        let removed = match selected {
            Some((index, link)) => {
                let record = SubmissionRecord::new(
                    team.id,
                    link,
                    participant.name.as_str(),
                    assignment.id,
                    SubmissionOperation::RemoveHyperlink,
                );
                self.repo
                    .remove_hyperlink(index, &record)
                    .await?
                    .map(|record_id| (record_id, record.content))
            }
            None => None,
        };

        let flash = match removed {
            Some((record_id, link)) => {
                tracing::info!(
                    controller = ControllerAction::CONTROLLER_NAME,
                    participant = %participant.name,
                    team_id = %team.id,
                    record_id = %record_id,
                    operation = %SubmissionOperation::RemoveHyperlink,
                    link = %link,
                    "{}",
                    REMOVED_MESSAGE
                );
                Flash::Success(REMOVED_MESSAGE.to_string())
            }
            None => {
                tracing::warn!(
                    controller = ControllerAction::CONTROLLER_NAME,
                    participant = %participant.name,
                    team_id = %team.id,
                    index = ?input.index,
                    expected = ?input.expected,
                    "{}",
                    STALE_SELECTION_MESSAGE
                );
                Flash::Error(STALE_SELECTION_MESSAGE.to_string())
            }
        };

        // Keep editing while the current deadline still accepts submissions
        let topic_id = self
            .repo
            .topic_held_by_team(assignment.id, team.id)
            .await?;
        let redirect = if assignment.submission_allowed(topic_id, Utc::now()) {
            RedirectTarget::Edit
        } else {
            RedirectTarget::View
        };

        Ok(ActionOutcome {
            participant_id: participant.id,
            flash,
            redirect,
        })
    }
}
