use serde::{Deserialize, Serialize};

use crate::tasks::DEFAULT_USER;

fn default_user() -> String {
    DEFAULT_USER.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    #[serde(rename = "_id")]
    pub id: String,
    pub date: String,
    pub title: String,
    pub description: String,
    #[serde(default = "default_user")]
    pub user: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub date: String,
    pub user: String,
    pub title: String,
    pub description: String,
}

impl NoteDraft {
    pub fn is_complete(&self) -> bool {
        !self.date.trim().is_empty()
            && !self.title.trim().is_empty()
            && !self.description.trim().is_empty()
    }
}

#[derive(Deserialize)]
pub(crate) struct NoteEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub note: Option<Note>,
    #[serde(default)]
    pub message: Option<String>,
}
