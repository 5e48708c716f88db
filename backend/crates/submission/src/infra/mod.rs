//! Infrastructure Layer - Database and outbound HTTP implementations

pub mod link_probe;
pub mod mailer;
pub mod postgres;
