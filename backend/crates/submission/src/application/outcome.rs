//! Result of a submitted-hyperlink action that reached the team

use crate::domain::value_objects::{Flash, RedirectTarget};
use kernel::id::ParticipantId;

/// Flash to show and page to send the participant to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub participant_id: ParticipantId,
    pub flash: Flash,
    pub redirect: RedirectTarget,
}

impl ActionOutcome {
    pub fn edit(participant_id: ParticipantId, flash: Flash) -> Self {
        Self {
            participant_id,
            flash,
            redirect: RedirectTarget::Edit,
        }
    }
}
