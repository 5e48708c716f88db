//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Participant, Team, Assignment, SubmissionRecord)
//! - Domain value objects (Role, Hyperlinks, Flash)
//! - Domain services (authorization gate, hyperlink validation)
//! - Repository and gateway traits (interfaces)

pub mod entities;
pub mod gateway;
pub mod repository;
pub mod services;
pub mod value_objects;
