//! Domain Value Objects
//!
//! Immutable value types for the submitted-hyperlink domain.

use serde::Serialize;
use std::fmt;

/// Role of a signed-in user
///
/// Ordered by privilege; every role except `UnregisteredUser` carries at
/// least student privileges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i16)]
pub enum Role {
    Student = 1,
    TeachingAssistant = 2,
    Instructor = 3,
    Administrator = 4,
    SuperAdministrator = 5,
    UnregisteredUser = 6,
}

impl Role {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    pub fn from_id(id: i16) -> Option<Self> {
        use Role::*;
        match id {
            1 => Some(Student),
            2 => Some(TeachingAssistant),
            3 => Some(Instructor),
            4 => Some(Administrator),
            5 => Some(SuperAdministrator),
            6 => Some(UnregisteredUser),
            _ => None,
        }
    }

    /// Human-readable name, as shown in authorization messages
    #[inline]
    pub const fn name(&self) -> &'static str {
        use Role::*;
        match self {
            Student => "Student",
            TeachingAssistant => "Teaching Assistant",
            Instructor => "Instructor",
            Administrator => "Administrator",
            SuperAdministrator => "Super-Administrator",
            UnregisteredUser => "Unregistered user",
        }
    }

    #[inline]
    pub const fn has_student_privileges(&self) -> bool {
        !matches!(self, Role::UnregisteredUser)
    }

    #[inline]
    pub const fn is_admin_or_higher(&self) -> bool {
        matches!(self, Role::Administrator | Role::SuperAdministrator)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Actions exposed by the submitted-hyperlink controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerAction {
    SubmitHyperlink,
    RemoveHyperlink,
}

impl ControllerAction {
    pub const CONTROLLER_NAME: &'static str = "submitted_hyperlink";

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ControllerAction::SubmitHyperlink => "submit_hyperlink",
            ControllerAction::RemoveHyperlink => "remove_hyperlink",
        }
    }
}

impl fmt::Display for ControllerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operation label stored on audit records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOperation {
    SubmitHyperlink,
    RemoveHyperlink,
}

impl SubmissionOperation {
    #[inline]
    pub const fn label(&self) -> &'static str {
        match self {
            SubmissionOperation::SubmitHyperlink => "Submit Hyperlink",
            SubmissionOperation::RemoveHyperlink => "Remove Hyperlink",
        }
    }
}

impl fmt::Display for SubmissionOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a due date permits for submissions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i16)]
pub enum DeadlineRight {
    No = 1,
    Late = 2,
    Ok = 3,
}

impl DeadlineRight {
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            1 => Some(DeadlineRight::No),
            2 => Some(DeadlineRight::Late),
            3 => Some(DeadlineRight::Ok),
            _ => None,
        }
    }

    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn permits(&self) -> bool {
        matches!(self, DeadlineRight::Ok | DeadlineRight::Late)
    }
}

/// The two pages an action can send the participant back to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectTarget {
    Edit,
    View,
}

impl RedirectTarget {
    #[inline]
    pub const fn action(&self) -> &'static str {
        match self {
            RedirectTarget::Edit => "edit",
            RedirectTarget::View => "view",
        }
    }
}

/// One-shot message shown on the next page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "lowercase")]
pub enum Flash {
    Success(String),
    Error(String),
}

impl Flash {
    pub fn message(&self) -> &str {
        match self {
            Flash::Success(message) | Flash::Error(message) => message,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Flash::Error(_))
    }
}

/// Ordered list of a team's submitted hyperlinks
///
/// Order is insertion order. `push` refuses a link the list already holds,
/// but a stored list is loaded exactly as stored: rows written elsewhere may
/// repeat an entry, and pages address entries by their stored position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hyperlinks(Vec<String>);

impl Hyperlinks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a stored list as-is, repeated entries included
    pub fn from_stored(links: Vec<String>) -> Self {
        Self(links)
    }

    pub fn contains(&self, link: &str) -> bool {
        self.0.iter().any(|existing| existing == link)
    }

    /// Append; returns `false` and leaves the list untouched on a duplicate
    pub fn push(&mut self, link: String) -> bool {
        if self.contains(&link) {
            return false;
        }
        self.0.push(link);
        true
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn remove_at(&mut self, index: usize) -> Option<String> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }

    /// Entry at `index`, provided it reads `expected` when one is given
    pub fn matching(&self, index: usize, expected: Option<&str>) -> Option<&str> {
        let current = self.get(index)?;
        expected
            .is_none_or(|expected| expected == current)
            .then_some(current)
    }

    /// Remove the entry at `index` only if it still reads `expected`
    pub fn remove_matching(&mut self, index: usize, expected: Option<&str>) -> Option<String> {
        self.matching(index, expected)?;
        self.remove_at(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_id() {
        for role in [
            Role::Student,
            Role::TeachingAssistant,
            Role::Instructor,
            Role::Administrator,
            Role::SuperAdministrator,
            Role::UnregisteredUser,
        ] {
            assert_eq!(Role::from_id(role.id()), Some(role));
        }
        assert_eq!(Role::from_id(0), None);
        assert_eq!(Role::from_id(7), None);
    }

    #[test]
    fn test_role_privileges() {
        assert!(Role::Student.has_student_privileges());
        assert!(Role::Instructor.has_student_privileges());
        assert!(!Role::UnregisteredUser.has_student_privileges());

        assert!(!Role::Student.is_admin_or_higher());
        assert!(!Role::Instructor.is_admin_or_higher());
        assert!(Role::Administrator.is_admin_or_higher());
        assert!(Role::SuperAdministrator.is_admin_or_higher());
    }

    #[test]
    fn test_operation_labels() {
        assert_eq!(SubmissionOperation::SubmitHyperlink.label(), "Submit Hyperlink");
        assert_eq!(SubmissionOperation::RemoveHyperlink.label(), "Remove Hyperlink");
        assert_eq!(
            SubmissionOperation::SubmitHyperlink.to_string(),
            "Submit Hyperlink"
        );
    }

    #[test]
    fn test_deadline_right_permits() {
        assert!(!DeadlineRight::No.permits());
        assert!(DeadlineRight::Late.permits());
        assert!(DeadlineRight::Ok.permits());
        assert_eq!(DeadlineRight::from_id(4), None);
    }

    #[test]
    fn test_flash_serialization() {
        let json = serde_json::to_string(&Flash::Error("boom".into())).unwrap();
        assert_eq!(json, r#"{"kind":"error","message":"boom"}"#);

        let json = serde_json::to_string(&Flash::Success("ok".into())).unwrap();
        assert_eq!(json, r#"{"kind":"success","message":"ok"}"#);
    }

    #[test]
    fn test_hyperlinks_reject_duplicates_and_keep_order() {
        let mut links = Hyperlinks::new();
        assert!(links.push("https://a.example".into()));
        assert!(links.push("https://b.example".into()));
        assert!(!links.push("https://a.example".into()));

        assert_eq!(links.len(), 2);
        assert_eq!(links.get(0), Some("https://a.example"));
        assert_eq!(links.get(1), Some("https://b.example"));
    }

    #[test]
    fn test_hyperlinks_remove_at() {
        let mut links = Hyperlinks::from_stored(vec!["a.example".to_string(), "b.example".to_string()]);
        assert_eq!(links.remove_at(5), None);
        assert_eq!(links.remove_at(0), Some("a.example".to_string()));
        assert_eq!(links.as_slice(), ["b.example".to_string()]);
    }

    #[test]
    fn test_stored_list_keeps_repeated_entries() {
        let mut links = Hyperlinks::from_stored(vec![
            "x.example".to_string(),
            "x.example".to_string(),
            "y.example".to_string(),
        ]);
        assert_eq!(links.len(), 3);
        assert_eq!(links.get(1), Some("x.example"));

        assert_eq!(links.remove_matching(2, Some("x.example")), None);
        assert_eq!(links.remove_matching(1, None), Some("x.example".to_string()));
        assert_eq!(
            links.as_slice(),
            ["x.example".to_string(), "y.example".to_string()]
        );

        assert!(!links.push("y.example".to_string()));
    }
}
