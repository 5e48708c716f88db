//! Participant ownership check shared by both actions

use crate::domain::entities::{Participant, Team};
use crate::domain::repository::{ParticipantRepository, TeamRepository};
use crate::error::{SubmissionError, SubmissionResult};
use kernel::id::{ParticipantId, UserId};

/// Load the participant and its team, failing unless `user_id` owns it
pub(crate) async fn load_owned_team<R>(
    repo: &R,
    participant_id: ParticipantId,
    user_id: UserId,
) -> SubmissionResult<(Participant, Team)>
where
    R: ParticipantRepository + TeamRepository,
{
    let participant = repo
        .find_participant(participant_id)
        .await?
        .ok_or(SubmissionError::ParticipantNotFound(participant_id))?;

    if !participant.is_owned_by(user_id) {
        return Err(SubmissionError::NotParticipantOwner {
            user_id,
            participant_id,
        });
    }

    let team_id = participant
        .team_id
        .ok_or(SubmissionError::NoTeam(participant_id))?;
    let team = repo
        .find_team(team_id)
        .await?
        .ok_or(SubmissionError::TeamNotFound(team_id))?;

    Ok((participant, team))
}
