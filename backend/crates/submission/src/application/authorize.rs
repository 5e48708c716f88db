//! Authorize Action Use Case
//!
//! Runs the role gate, resolving team eligibility only when the gate needs
//! it (a student-tier user submitting).

use crate::domain::entities::User;
use crate::domain::repository::{AssignmentRepository, ParticipantRepository};
use crate::domain::services::{action_allowed, denial_message, team_can_submit_work};
use crate::domain::value_objects::ControllerAction;
use crate::error::{SubmissionError, SubmissionResult};
use kernel::id::ParticipantId;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authorization {
    Allowed,
    /// Carries the flash text for the denial
    Denied(String),
}

impl Authorization {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Authorization::Allowed)
    }
}

pub struct AuthorizeActionUseCase<R>
where
    R: ParticipantRepository + AssignmentRepository,
{
    repo: Arc<R>,
}

impl<R> AuthorizeActionUseCase<R>
where
    R: ParticipantRepository + AssignmentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        user: Option<&User>,
        action: ControllerAction,
        participant_id: Option<ParticipantId>,
    ) -> SubmissionResult<Authorization> {
        let role = user.map(|u| u.role);

        let needs_eligibility = action == ControllerAction::SubmitHyperlink
            && role.is_some_and(|r| r.has_student_privileges() && !r.is_admin_or_higher());

        let team_can_submit = if needs_eligibility {
            let participant_id = participant_id.ok_or(SubmissionError::MissingParticipantId)?;
            self.one_team_can_submit_work(participant_id).await?
        } else {
            false
        };

        if action_allowed(role, action, team_can_submit) {
            Ok(Authorization::Allowed)
        } else {
            let message = denial_message(role, action);
            tracing::warn!(
                user_id = ?user.map(|u| u.id),
                action = %action,
                "{}",
                message
            );
            Ok(Authorization::Denied(message))
        }
    }

    /// A team on a waitlist does not hold a topic and cannot submit
    pub async fn one_team_can_submit_work(
        &self,
        participant_id: ParticipantId,
    ) -> SubmissionResult<bool> {
        let participant = self
            .repo
            .find_participant(participant_id)
            .await?
            .ok_or(SubmissionError::ParticipantNotFound(participant_id))?;

        let topic_count = self.repo.count_topics(participant.assignment_id).await?;
        if topic_count == 0 {
            return Ok(true);
        }

        let held_topic = match participant.team_id {
            Some(team_id) => {
                self.repo
                    .topic_held_by_team(participant.assignment_id, team_id)
                    .await?
            }
            None => None,
        };

        Ok(team_can_submit_work(topic_count, held_topic))
    }
}
