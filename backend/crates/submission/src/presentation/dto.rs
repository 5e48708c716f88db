//! Form DTOs
//!
//! Both actions are plain HTML form posts. The remove form nests the
//! participant id as `hyperlinks[participant_id]`.

use kernel::id::ParticipantId;
use serde::Deserialize;

/// Form for POST /submitted_hyperlink/submit_hyperlink
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitHyperlinkForm {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, rename = "hyperlinks[participant_id]")]
    pub nested_participant_id: Option<i64>,
    #[serde(default)]
    pub submission: String,
}

impl SubmitHyperlinkForm {
    pub fn participant_id(&self) -> Option<ParticipantId> {
        self.id.or(self.nested_participant_id).map(ParticipantId::new)
    }
}

/// Form for POST /submitted_hyperlink/remove_hyperlink
#[derive(Debug, Clone, Deserialize)]
pub struct RemoveHyperlinkForm {
    #[serde(default, rename = "hyperlinks[participant_id]")]
    pub nested_participant_id: Option<i64>,
    #[serde(default)]
    pub id: Option<i64>,
    /// Index of the checked link, as rendered
    #[serde(default)]
    pub chk_links: Option<String>,
    /// Link text rendered at `chk_links`
    #[serde(default)]
    pub hyperlink: Option<String>,
}

impl RemoveHyperlinkForm {
    pub fn participant_id(&self) -> Option<ParticipantId> {
        self.nested_participant_id.or(self.id).map(ParticipantId::new)
    }

    pub fn index(&self) -> Option<usize> {
        self.chk_links.as_deref()?.trim().parse().ok()
    }

    pub fn expected_hyperlink(&self) -> Option<String> {
        self.hyperlink
            .as_deref()
            .map(str::trim)
            .filter(|link| !link.is_empty())
            .map(str::to_string)
    }
}
