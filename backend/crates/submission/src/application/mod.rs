//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.
//! Contains use case implementations.

pub mod authorize;
pub mod config;
pub mod current_user;
pub mod outcome;
mod ownership;
pub mod remove_hyperlink;
pub mod submit_hyperlink;
