//! Domain Services
//!
//! Pure rules for who may act on a submission and what counts as a
//! submittable hyperlink.

use kernel::id::TopicId;
use thiserror::Error;
use url::{Host, Url};

use crate::domain::value_objects::{ControllerAction, Role};

/// Authorization gate for the submitted-hyperlink actions
///
/// `role` is `None` when the request carries no valid session.
/// `team_can_submit` only matters for [`ControllerAction::SubmitHyperlink`].
pub fn action_allowed(role: Option<Role>, action: ControllerAction, team_can_submit: bool) -> bool {
    match role {
        Some(role) if role.is_admin_or_higher() => true,
        Some(role) if role.has_student_privileges() => match action {
            ControllerAction::SubmitHyperlink => team_can_submit,
            ControllerAction::RemoveHyperlink => true,
        },
        _ => false,
    }
}

/// Flash text for a request the gate turned away
pub fn denial_message(role: Option<Role>, action: ControllerAction) -> String {
    let role = role.unwrap_or(Role::UnregisteredUser);
    format!(
        "A {} is not allowed to {} this/these {}",
        role.name(),
        action.as_str(),
        ControllerAction::CONTROLLER_NAME
    )
}

/// A team may submit when the assignment has no topics, or when it holds
/// one (wait-listed teams do not).
pub fn team_can_submit_work(topic_count: i64, held_topic: Option<TopicId>) -> bool {
    topic_count == 0 || held_topic.is_some()
}

/// Why a submission is not a usable hyperlink
///
/// The `Display` text is the reason shown to the participant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidHyperlink {
    #[error("The hyperlink cannot be empty!")]
    Empty,

    #[error("{0}")]
    Malformed(String),

    #[error("unsupported scheme '{0}', only http and https links are accepted")]
    UnsupportedScheme(String),

    #[error("'{0}' is not a valid host name")]
    InvalidHost(String),

    #[error("the link could not be reached: {0}")]
    Unreachable(String),
}

/// A submission that passed [`validate_hyperlink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedHyperlink {
    /// Trimmed text as entered; this is what the team stores
    pub entry: String,
    /// Parsed form, with `http://` assumed when no scheme was given
    pub url: Url,
}

/// Validate a raw submission string
pub fn validate_hyperlink(raw: &str) -> Result<ValidatedHyperlink, InvalidHyperlink> {
    let entry = raw.trim();
    if entry.is_empty() {
        return Err(InvalidHyperlink::Empty);
    }

    let candidate = if entry.contains("://") {
        entry.to_string()
    } else {
        format!("http://{entry}")
    };

    let url = Url::parse(&candidate).map_err(|e| InvalidHyperlink::Malformed(e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(InvalidHyperlink::UnsupportedScheme(url.scheme().to_string()));
    }

    match url.host() {
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => {}
        Some(Host::Domain(domain)) if is_plausible_domain(domain) => {}
        Some(Host::Domain(domain)) => {
            return Err(InvalidHyperlink::InvalidHost(domain.to_string()));
        }
        None => return Err(InvalidHyperlink::Malformed("missing host".to_string())),
    }

    Ok(ValidatedHyperlink {
        entry: entry.to_string(),
        url,
    })
}

fn is_plausible_domain(domain: &str) -> bool {
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    domain == "localhost" || (domain.contains('.') && domain.split('.').all(|label| !label.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ROLES: [Role; 6] = [
        Role::Student,
        Role::TeachingAssistant,
        Role::Instructor,
        Role::Administrator,
        Role::SuperAdministrator,
        Role::UnregisteredUser,
    ];

    #[test]
    fn test_admins_always_allowed() {
        for role in [Role::Administrator, Role::SuperAdministrator] {
            assert!(action_allowed(Some(role), ControllerAction::SubmitHyperlink, false));
            assert!(action_allowed(Some(role), ControllerAction::RemoveHyperlink, false));
        }
    }

    #[test]
    fn test_student_submit_depends_on_team() {
        for role in [Role::Student, Role::TeachingAssistant, Role::Instructor] {
            assert!(action_allowed(Some(role), ControllerAction::SubmitHyperlink, true));
            assert!(!action_allowed(Some(role), ControllerAction::SubmitHyperlink, false));
            assert!(action_allowed(Some(role), ControllerAction::RemoveHyperlink, false));
        }
    }

    #[test]
    fn test_unregistered_and_anonymous_denied() {
        for action in [ControllerAction::SubmitHyperlink, ControllerAction::RemoveHyperlink] {
            assert!(!action_allowed(Some(Role::UnregisteredUser), action, true));
            assert!(!action_allowed(None, action, true));
        }
        // sanity: every role is covered by one of the branches
        assert_eq!(
            ALL_ROLES
                .iter()
                .filter(|r| action_allowed(Some(**r), ControllerAction::RemoveHyperlink, false))
                .count(),
            5
        );
    }

    #[test]
    fn test_denial_message() {
        assert_eq!(
            denial_message(Some(Role::Student), ControllerAction::SubmitHyperlink),
            "A Student is not allowed to submit_hyperlink this/these submitted_hyperlink"
        );
        assert_eq!(
            denial_message(None, ControllerAction::RemoveHyperlink),
            "A Unregistered user is not allowed to remove_hyperlink this/these submitted_hyperlink"
        );
    }

    #[test]
    fn test_team_can_submit_work() {
        assert!(team_can_submit_work(0, None));
        assert!(team_can_submit_work(3, Some(TopicId::new(2))));
        assert!(!team_can_submit_work(3, None));
    }

    #[test]
    fn test_validate_keeps_trimmed_entry() {
        let link = validate_hyperlink("  https://github.com/org/repo  ").unwrap();
        assert_eq!(link.entry, "https://github.com/org/repo");
        assert_eq!(link.url.host_str(), Some("github.com"));
    }

    #[test]
    fn test_validate_assumes_http() {
        let link = validate_hyperlink("www.example.com/page").unwrap();
        assert_eq!(link.entry, "www.example.com/page");
        assert_eq!(link.url.as_str(), "http://www.example.com/page");

        assert!(validate_hyperlink("localhost:3000").is_ok());
        assert!(validate_hyperlink("10.0.0.1/wiki").is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        assert_eq!(validate_hyperlink("   "), Err(InvalidHyperlink::Empty));
        assert_eq!(
            validate_hyperlink("abc123"),
            Err(InvalidHyperlink::InvalidHost("abc123".to_string()))
        );
        assert_eq!(
            validate_hyperlink("ftp://files.example.com"),
            Err(InvalidHyperlink::UnsupportedScheme("ftp".to_string()))
        );
        assert!(matches!(
            validate_hyperlink("http://exa mple.com"),
            Err(InvalidHyperlink::Malformed(_))
        ));
    }

    #[test]
    fn test_empty_reason_text() {
        assert_eq!(
            InvalidHyperlink::Empty.to_string(),
            "The hyperlink cannot be empty!"
        );
    }
}
