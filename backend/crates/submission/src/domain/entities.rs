//! Domain Entities

use chrono::{DateTime, Utc};
use kernel::id::{AssignmentId, ParticipantId, TeamId, TopicId, UserId};

use crate::domain::value_objects::{DeadlineRight, Hyperlinks, Role, SubmissionOperation};

/// Signed-in user
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// A user's enrollment in one assignment
#[derive(Debug, Clone)]
pub struct Participant {
    pub id: ParticipantId,
    pub user_id: UserId,
    /// Parent assignment
    pub assignment_id: AssignmentId,
    pub team_id: Option<TeamId>,
    /// Name of the owning user; recorded on audit rows
    pub name: String,
}

impl Participant {
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

/// Group of participants submitting jointly
#[derive(Debug, Clone)]
pub struct Team {
    pub id: TeamId,
    pub assignment_id: AssignmentId,
    pub name: String,
    pub hyperlinks: Hyperlinks,
}

impl Team {
    /// Append a hyperlink; `false` if the team already has it
    pub fn submit_hyperlink(&mut self, link: impl Into<String>) -> bool {
        self.hyperlinks.push(link.into())
    }

    /// The hyperlink a page selected by position
    ///
    /// `None` when there is no entry at `index` or it no longer reads
    /// `expected`.
    pub fn selected_hyperlink(&self, index: usize, expected: Option<&str>) -> Option<&str> {
        self.hyperlinks.matching(index, expected)
    }

    /// Remove the hyperlink at `index`
    ///
    /// When `expected` is given it must equal the entry currently at
    /// `index`; the index came from a page rendered earlier and the list may
    /// have changed since.
    pub fn remove_hyperlink_at(&mut self, index: usize, expected: Option<&str>) -> Option<String> {
        self.hyperlinks.remove_matching(index, expected)
    }
}

/// A deadline of an assignment, optionally specific to one topic
#[derive(Debug, Clone)]
pub struct DueDate {
    pub due_at: DateTime<Utc>,
    /// `Some` for staggered, per-topic deadlines
    pub topic_id: Option<TopicId>,
    pub submission_right: DeadlineRight,
}

#[derive(Debug, Clone)]
pub struct Assignment {
    pub id: AssignmentId,
    pub name: String,
    pub staggered_deadline: bool,
    pub due_dates: Vec<DueDate>,
}

impl Assignment {
    /// Earliest due date at or after `now` that governs `topic_id`
    ///
    /// With staggered deadlines, the topic's own due dates take precedence;
    /// assignment-wide due dates are the fallback.
    pub fn next_due_date(&self, topic_id: Option<TopicId>, now: DateTime<Utc>) -> Option<&DueDate> {
        let upcoming = |scope: Option<TopicId>| {
            self.due_dates
                .iter()
                .filter(move |due| due.topic_id == scope && due.due_at >= now)
                .min_by_key(|due| due.due_at)
        };

        let topic_specific = match (self.staggered_deadline, topic_id) {
            (true, Some(topic)) => upcoming(Some(topic)),
            _ => None,
        };

        topic_specific.or_else(|| upcoming(None))
    }

    /// Whether a team holding `topic_id` may still change its submission
    pub fn submission_allowed(&self, topic_id: Option<TopicId>, now: DateTime<Utc>) -> bool {
        self.next_due_date(topic_id, now)
            .is_some_and(|due| due.submission_right.permits())
    }
}

/// Append-only audit entry for a submission change
#[derive(Debug, Clone)]
pub struct SubmissionRecord {
    pub team_id: TeamId,
    pub content: String,
    /// Name of the acting participant's user
    pub user_name: String,
    pub assignment_id: AssignmentId,
    pub operation: SubmissionOperation,
    pub created_at: DateTime<Utc>,
}

impl SubmissionRecord {
    pub fn new(
        team_id: TeamId,
        content: impl Into<String>,
        user_name: impl Into<String>,
        assignment_id: AssignmentId,
        operation: SubmissionOperation,
    ) -> Self {
        Self {
            team_id,
            content: content.into(),
            user_name: user_name.into(),
            assignment_id,
            operation,
            created_at: Utc::now(),
        }
    }
}

/// Where a review notice is sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewerContact {
    pub name: String,
    pub email: String,
}

/// "Submission updated" notice for one reviewer
#[derive(Debug, Clone)]
pub struct ReviewNotice {
    pub reviewer: ReviewerContact,
    pub assignment_name: String,
    pub team_name: String,
}

impl ReviewNotice {
    pub fn subject(&self) -> &'static str {
        "Link to review"
    }

    pub fn body(&self) -> String {
        format!(
            "Hi {},\n\nTeam {} has updated its submission for assignment '{}'. \
             Please take another look before you finish your review.",
            self.reviewer.name, self.team_name, self.assignment_name
        )
    }
}
