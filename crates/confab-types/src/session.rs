//! Session and session-metadata types.
//!
//! A `Session` is the unit persisted by the remote store; a
//! `SessionMetadata` is the lightweight index record used for listings.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::message::ChatHistoryItem;

/// Title carried by a session that has not been named yet.
pub const NEW_SESSION_TITLE: &str = "New Session";

/// A persisted conversation: id, title, workspace scope and full history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub session_id: String,
    pub title: String,
    #[serde(default)]
    pub workspace_directory: String,
    #[serde(default)]
    pub history: Vec<ChatHistoryItem>,
}

impl Session {
    /// A fresh, untitled, empty session with a newly minted id.
    pub fn new_untitled() -> Self {
        Self {
            session_id: Uuid::now_v7().to_string(),
            title: NEW_SESSION_TITLE.to_string(),
            workspace_directory: String::new(),
            history: Vec::new(),
        }
    }

    /// The index entry describing this session. An empty workspace is left unset.
    pub fn metadata(&self) -> SessionMetadata {
        SessionMetadata {
            session_id: self.session_id.clone(),
            title: self.title.clone(),
            workspace_directory: Some(self.workspace_directory.clone()).filter(|w| !w.is_empty()),
        }
    }
}

/// Listing entry summarising a session without its history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMetadata {
    pub session_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_directory: Option<String>,
}
