//! Typed Record IDs
//!
//! Course records use integer primary keys. [`Id`] tags the key with the
//! record it belongs to so a team id cannot be passed where a participant
//! id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// Integer primary key tagged with a marker type
///
/// ```
/// use kernel::id::{Id, markers};
/// type TeamId = Id<markers::Team>;
/// let id = TeamId::new(12);
/// assert_eq!(id.value(), 12);
/// ```
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<T> {
    value: i64,
    #[serde(skip)]
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub const fn new(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    pub const fn value(&self) -> i64 {
        self.value
    }
}

// Manual impls: derives would require the marker types to implement them.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<i64> for Id<T> {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl<T> From<Id<T>> for i64 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

/// Marker types for record IDs
pub mod markers {
    pub struct User;
    pub struct Participant;
    pub struct Team;
    pub struct Assignment;
    pub struct Topic;
    pub struct SubmissionRecord;
}

pub type UserId = Id<markers::User>;
pub type ParticipantId = Id<markers::Participant>;
pub type TeamId = Id<markers::Team>;
pub type AssignmentId = Id<markers::Assignment>;
pub type TopicId = Id<markers::Topic>;
pub type SubmissionRecordId = Id<markers::SubmissionRecord>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrips_through_i64() {
        let id = TeamId::new(42);
        let raw: i64 = id.into();
        assert_eq!(raw, 42);
        assert_eq!(TeamId::from(raw), id);
    }

    #[test]
    fn test_id_serializes_as_plain_integer() {
        let id = ParticipantId::new(7);
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
        let back: ParticipantId = serde_json::from_str("7").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_display() {
        assert_eq!(UserId::new(21).to_string(), "21");
        assert_eq!(format!("{:?}", AssignmentId::new(3)), "Id(3)");
    }
}
