//! Submitted Hyperlink Backend Module
//!
//! Lets a participant add a hyperlink to their team's submission or remove
//! one, records every change in the submission audit trail, and notifies the
//! team's reviewers.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, authorization and validation rules, repository traits
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL, mail API and link probe implementations
//! - `presentation/` - Form handlers and router
//!
//! ## Request flow
//! - The session cookie is verified and the user loaded; no session means denied
//! - The role gate runs before any participant data is touched
//! - Callers that do not own the participant get an empty `403`
//! - A list change and its audit row are committed together, against the
//!   stored list rather than the copy loaded for the checks
//! - Outcomes end in a `302` with a one-shot flash cookie

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use application::config::SubmissionConfig;
pub use error::{SubmissionError, SubmissionResult};
pub use infra::link_probe::HttpLinkChecker;
pub use infra::mailer::{MailApiConfig, ReviewerMailer};
pub use infra::postgres::PgSubmissionRepository;
pub use presentation::router::{submission_router, submission_router_generic};
