//! Shared Kernel
//!
//! Vocabulary shared by every crate in the workspace:
//! - The unified [`error::app_error::AppError`] and its HTTP classification
//! - Typed integer IDs for the course-management records
//!
//! Only things whose meaning is identical across crates live here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
