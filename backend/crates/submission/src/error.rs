//! Submission Error Types
//!
//! Failures that abort a submitted-hyperlink request. Recoverable outcomes
//! (duplicate link, invalid link, stale selection) are not errors; they end
//! in a flash message and a redirect.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::id::{AssignmentId, ParticipantId, TeamId, UserId};
use thiserror::Error;

pub type SubmissionResult<T> = Result<T, SubmissionError>;

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Participant {0} not found")]
    ParticipantNotFound(ParticipantId),

    #[error("Participant {0} has no team")]
    NoTeam(ParticipantId),

    #[error("Team {0} not found")]
    TeamNotFound(TeamId),

    #[error("Assignment {0} not found")]
    AssignmentNotFound(AssignmentId),

    /// Caller is signed in but does not own the participant
    #[error("User {user_id} does not own participant {participant_id}")]
    NotParticipantOwner {
        user_id: UserId,
        participant_id: ParticipantId,
    },

    #[error("Missing participant id")]
    MissingParticipantId,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SubmissionError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SubmissionError::ParticipantNotFound(_)
            | SubmissionError::NoTeam(_)
            | SubmissionError::TeamNotFound(_)
            | SubmissionError::AssignmentNotFound(_) => ErrorKind::NotFound,
            SubmissionError::NotParticipantOwner { .. } => ErrorKind::Forbidden,
            SubmissionError::MissingParticipantId => ErrorKind::BadRequest,
            SubmissionError::Database(_) | SubmissionError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    fn log(&self) {
        match self {
            SubmissionError::Database(e) => {
                tracing::error!(error = %e, "Submission database error");
            }
            SubmissionError::Internal(msg) => {
                tracing::error!(message = %msg, "Submission internal error");
            }
            SubmissionError::NotParticipantOwner {
                user_id,
                participant_id,
            } => {
                tracing::warn!(
                    user_id = %user_id,
                    participant_id = %participant_id,
                    "Participant ownership check failed"
                );
            }
            _ => {
                tracing::debug!(error = %self, "Submission error");
            }
        }
    }
}

impl From<SubmissionError> for AppError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::Database(e) => e.into(),
            other @ SubmissionError::MissingParticipantId => {
                AppError::new(other.kind(), other.to_string())
                    .with_action("Submit the form from the assignment page")
            }
            other @ (SubmissionError::ParticipantNotFound(_)
            | SubmissionError::NoTeam(_)
            | SubmissionError::TeamNotFound(_)
            | SubmissionError::AssignmentNotFound(_)) => {
                AppError::new(other.kind(), other.to_string())
                    .with_action("Reload the assignment page and try again")
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl IntoResponse for SubmissionError {
    fn into_response(self) -> Response {
        self.log();
        match self {
            // Aborted without side effects or explanation
            SubmissionError::NotParticipantOwner { .. } => {
                (StatusCode::FORBIDDEN, ()).into_response()
            }
            other => AppError::from(other).into_response(),
        }
    }
}
