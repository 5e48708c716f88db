//! Presentation Layer - HTTP handlers and routing

pub mod dto;
pub mod flash;
pub mod handlers;
pub mod router;
