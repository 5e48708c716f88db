//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::{AssignmentId, ParticipantId, SubmissionRecordId, TeamId, TopicId, UserId};

use crate::domain::entities::{
    Assignment, Participant, ReviewerContact, SubmissionRecord, Team, User,
};
use crate::error::SubmissionResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    async fn find_user(&self, user_id: UserId) -> SubmissionResult<Option<User>>;
}

/// Participant repository trait
#[trait_variant::make(ParticipantRepository: Send)]
pub trait LocalParticipantRepository {
    async fn find_participant(
        &self,
        participant_id: ParticipantId,
    ) -> SubmissionResult<Option<Participant>>;
}

/// Team repository trait
#[trait_variant::make(TeamRepository: Send)]
pub trait LocalTeamRepository {
    async fn find_team(&self, team_id: TeamId) -> SubmissionResult<Option<Team>>;
}

/// Assignment and sign-up topic lookups
#[trait_variant::make(AssignmentRepository: Send)]
pub trait LocalAssignmentRepository {
    /// Assignment with all of its due dates
    async fn find_assignment(
        &self,
        assignment_id: AssignmentId,
    ) -> SubmissionResult<Option<Assignment>>;

    async fn count_topics(&self, assignment_id: AssignmentId) -> SubmissionResult<i64>;

    /// Topic the team holds on the assignment; wait-listed sign-ups do not count
    async fn topic_held_by_team(
        &self,
        assignment_id: AssignmentId,
        team_id: TeamId,
    ) -> SubmissionResult<Option<TopicId>>;
}

/// Hyperlink list changes, each committed together with its audit row
///
/// Both operations work on the list as currently stored, not on a copy the
/// caller loaded earlier. When the change no longer applies they write
/// nothing and return `None`.
#[trait_variant::make(HyperlinkUnitOfWork: Send)]
pub trait LocalHyperlinkUnitOfWork {
    /// Append `record.content` to the team's list and insert `record`
    ///
    /// `None` if the stored list already holds the link.
    async fn append_hyperlink(
        &self,
        record: &SubmissionRecord,
    ) -> SubmissionResult<Option<SubmissionRecordId>>;

    /// Remove the stored entry at `index` and insert `record`
    ///
    /// `None` if the entry at `index` is missing or no longer reads
    /// `record.content`.
    async fn remove_hyperlink(
        &self,
        index: usize,
        record: &SubmissionRecord,
    ) -> SubmissionResult<Option<SubmissionRecordId>>;
}

/// Review response mappings
#[trait_variant::make(ReviewMappingRepository: Send)]
pub trait LocalReviewMappingRepository {
    /// Reviewers assigned to the team's work on the assignment
    async fn reviewers_for_team(
        &self,
        assignment_id: AssignmentId,
        team_id: TeamId,
    ) -> SubmissionResult<Vec<ReviewerContact>>;
}

/// Every repository the submission actions touch
pub trait SubmissionStore:
    UserRepository
    + ParticipantRepository
    + TeamRepository
    + AssignmentRepository
    + HyperlinkUnitOfWork
    + ReviewMappingRepository
    + Send
    + Sync
    + 'static
{
}

impl<T> SubmissionStore for T where
    T: UserRepository
        + ParticipantRepository
        + TeamRepository
        + AssignmentRepository
        + HyperlinkUnitOfWork
        + ReviewMappingRepository
        + Send
        + Sync
        + 'static
{
}
