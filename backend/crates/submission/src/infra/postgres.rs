//! PostgreSQL Repository Implementations

use crate::domain::entities::{
    Assignment, DueDate, Participant, ReviewerContact, SubmissionRecord, Team, User,
};
use crate::domain::repository::{
    AssignmentRepository, HyperlinkUnitOfWork, ParticipantRepository, ReviewMappingRepository,
    TeamRepository, UserRepository,
};
use crate::domain::value_objects::{DeadlineRight, Hyperlinks, Role};
use crate::error::{SubmissionError, SubmissionResult};
use chrono::{DateTime, Utc};
use kernel::id::{
    AssignmentId, ParticipantId, SubmissionRecordId, TeamId, TopicId, UserId,
};
use sqlx::{PgConnection, PgPool};

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct PgSubmissionRepository {
    pool: PgPool,
}

impl PgSubmissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PgSubmissionRepository {
    async fn find_user(&self, user_id: UserId) -> SubmissionResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, email, role_id FROM users WHERE id = $1",
        )
        .bind(user_id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }
}

impl ParticipantRepository for PgSubmissionRepository {
    async fn find_participant(
        &self,
        participant_id: ParticipantId,
    ) -> SubmissionResult<Option<Participant>> {
        let row = sqlx::query_as::<_, ParticipantRow>(
            r#"
            SELECT p.id, p.user_id, p.parent_id, p.team_id, u.name
            FROM participants p
            JOIN users u ON u.id = p.user_id
            WHERE p.id = $1
            "#,
        )
        .bind(participant_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ParticipantRow::into_participant))
    }
}

impl TeamRepository for PgSubmissionRepository {
    async fn find_team(&self, team_id: TeamId) -> SubmissionResult<Option<Team>> {
        let row = sqlx::query_as::<_, TeamRow>(
            "SELECT id, parent_id, name, submitted_hyperlinks FROM teams WHERE id = $1",
        )
        .bind(team_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(TeamRow::into_team))
    }
}

impl AssignmentRepository for PgSubmissionRepository {
    async fn find_assignment(
        &self,
        assignment_id: AssignmentId,
    ) -> SubmissionResult<Option<Assignment>> {
        let Some(row) = sqlx::query_as::<_, AssignmentRow>(
            "SELECT id, name, staggered_deadline FROM assignments WHERE id = $1",
        )
        .bind(assignment_id.value())
        .fetch_optional(&self.pool)
        .await?
        else {
            return Ok(None);
        };

        let due_dates = sqlx::query_as::<_, DueDateRow>(
            r#"
            SELECT due_at, topic_id, submission_allowed_id
            FROM due_dates
            WHERE assignment_id = $1
            ORDER BY due_at
            "#,
        )
        .bind(assignment_id.value())
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(DueDateRow::into_due_date)
        .collect::<SubmissionResult<Vec<_>>>()?;

        Ok(Some(Assignment {
            id: AssignmentId::new(row.id),
            name: row.name,
            staggered_deadline: row.staggered_deadline,
            due_dates,
        }))
    }

    async fn count_topics(&self, assignment_id: AssignmentId) -> SubmissionResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM sign_up_topics WHERE assignment_id = $1",
        )
        .bind(assignment_id.value())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn topic_held_by_team(
        &self,
        assignment_id: AssignmentId,
        team_id: TeamId,
    ) -> SubmissionResult<Option<TopicId>> {
        let topic_id = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT t.id
            FROM signed_up_teams s
            JOIN sign_up_topics t ON t.id = s.topic_id
            WHERE t.assignment_id = $1 AND s.team_id = $2 AND NOT s.is_waitlisted
            ORDER BY s.id
            LIMIT 1
            "#,
        )
        .bind(assignment_id.value())
        .bind(team_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(topic_id.map(TopicId::new))
    }
}

impl HyperlinkUnitOfWork for PgSubmissionRepository {
    async fn append_hyperlink(
        &self,
        record: &SubmissionRecord,
    ) -> SubmissionResult<Option<SubmissionRecordId>> {
        let mut transaction = self.pool.begin().await?;

        let mut team = lock_team(&mut transaction, record.team_id).await?;
        if !team.submit_hyperlink(record.content.as_str()) {
            return Ok(None);
        }
        store_hyperlinks(&mut transaction, &team).await?;
        let record_id = insert_submission_record(&mut transaction, record).await?;

        transaction.commit().await?;
        Ok(Some(record_id))
    }

    async fn remove_hyperlink(
        &self,
        index: usize,
        record: &SubmissionRecord,
    ) -> SubmissionResult<Option<SubmissionRecordId>> {
        let mut transaction = self.pool.begin().await?;

        let mut team = lock_team(&mut transaction, record.team_id).await?;
        if team
            .remove_hyperlink_at(index, Some(record.content.as_str()))
            .is_none()
        {
            return Ok(None);
        }
        store_hyperlinks(&mut transaction, &team).await?;
        let record_id = insert_submission_record(&mut transaction, record).await?;

        transaction.commit().await?;
        Ok(Some(record_id))
    }
}

/// Load the team and hold its row lock until the transaction ends
async fn lock_team(conn: &mut PgConnection, team_id: TeamId) -> SubmissionResult<Team> {
    sqlx::query_as::<_, TeamRow>(
        "SELECT id, parent_id, name, submitted_hyperlinks FROM teams WHERE id = $1 FOR UPDATE",
    )
    .bind(team_id.value())
    .fetch_optional(&mut *conn)
    .await?
    .map(TeamRow::into_team)
    .ok_or(SubmissionError::TeamNotFound(team_id))
}

async fn store_hyperlinks(conn: &mut PgConnection, team: &Team) -> SubmissionResult<()> {
    sqlx::query("UPDATE teams SET submitted_hyperlinks = $2 WHERE id = $1")
        .bind(team.id.value())
        .bind(team.hyperlinks.as_slice())
        .execute(&mut *conn)
        .await?;

    tracing::debug!(
        team_id = %team.id,
        hyperlinks = team.hyperlinks.len(),
        "Team hyperlinks updated"
    );

    Ok(())
}

async fn insert_submission_record(
    conn: &mut PgConnection,
    record: &SubmissionRecord,
) -> SubmissionResult<SubmissionRecordId> {
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO submission_records (
            team_id,
            content,
            user_name,
            assignment_id,
            operation,
            created_at
        ) VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id
        "#,
    )
    .bind(record.team_id.value())
    .bind(&record.content)
    .bind(&record.user_name)
    .bind(record.assignment_id.value())
    .bind(record.operation.label())
    .bind(record.created_at)
    .fetch_one(&mut *conn)
    .await?;

    Ok(SubmissionRecordId::new(id))
}

impl ReviewMappingRepository for PgSubmissionRepository {
    async fn reviewers_for_team(
        &self,
        assignment_id: AssignmentId,
        team_id: TeamId,
    ) -> SubmissionResult<Vec<ReviewerContact>> {
        let rows = sqlx::query_as::<_, (String, String)>(
            r#"
            SELECT DISTINCT u.name, u.email
            FROM review_response_maps m
            JOIN participants p ON p.id = m.reviewer_id
            JOIN users u ON u.id = p.user_id
            WHERE m.reviewed_object_id = $1 AND m.reviewee_id = $2
            "#,
        )
        .bind(assignment_id.value())
        .bind(team_id.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(name, email)| ReviewerContact { name, email })
            .collect())
    }
}

// Row types for sqlx

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    role_id: i16,
}

impl UserRow {
    fn into_user(self) -> SubmissionResult<User> {
        let role = Role::from_id(self.role_id).ok_or_else(|| {
            SubmissionError::Internal(format!("unknown role id {} for user {}", self.role_id, self.id))
        })?;
        Ok(User {
            id: UserId::new(self.id),
            name: self.name,
            email: self.email,
            role,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ParticipantRow {
    id: i64,
    user_id: i64,
    parent_id: i64,
    team_id: Option<i64>,
    name: String,
}

impl ParticipantRow {
    fn into_participant(self) -> Participant {
        Participant {
            id: ParticipantId::new(self.id),
            user_id: UserId::new(self.user_id),
            assignment_id: AssignmentId::new(self.parent_id),
            team_id: self.team_id.map(TeamId::new),
            name: self.name,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TeamRow {
    id: i64,
    parent_id: i64,
    name: String,
    submitted_hyperlinks: Vec<String>,
}

impl TeamRow {
    fn into_team(self) -> Team {
        Team {
            id: TeamId::new(self.id),
            assignment_id: AssignmentId::new(self.parent_id),
            name: self.name,
            hyperlinks: Hyperlinks::from_stored(self.submitted_hyperlinks),
        }
    }
}

#[derive(sqlx::FromRow)]
struct AssignmentRow {
    id: i64,
    name: String,
    staggered_deadline: bool,
}

#[derive(sqlx::FromRow)]
struct DueDateRow {
    due_at: DateTime<Utc>,
    topic_id: Option<i64>,
    submission_allowed_id: i16,
}

impl DueDateRow {
    fn into_due_date(self) -> SubmissionResult<DueDate> {
        let submission_right = DeadlineRight::from_id(self.submission_allowed_id).ok_or_else(|| {
            SubmissionError::Internal(format!(
                "unknown submission right {}",
                self.submission_allowed_id
            ))
        })?;
        Ok(DueDate {
            due_at: self.due_at,
            topic_id: self.topic_id.map(TopicId::new),
            submission_right,
        })
    }
}
