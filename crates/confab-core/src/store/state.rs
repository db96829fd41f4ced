//! Session state and the pure actions that mutate it.

use confab_types::config::ChatSettings;
use confab_types::message::ChatHistoryItem;
use confab_types::session::{Session, SessionMetadata};

/// The active session plus the index of every known session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub id: String,
    pub title: String,
    pub workspace_directory: String,
    pub history: Vec<ChatHistoryItem>,
    pub all_session_metadata: Vec<SessionMetadata>,
    /// True until the first successful metadata refresh.
    pub is_session_metadata_loading: bool,
    pub settings: ChatSettings,
}

impl SessionState {
    /// The active session as a persistable value.
    pub fn current_session(&self) -> Session {
        Session {
            session_id: self.id.clone(),
            title: self.title.clone(),
            workspace_directory: self.workspace_directory.clone(),
            history: self.history.clone(),
        }
    }

    /// Stored title of a session in the metadata index, if listed.
    pub fn stored_title(&self, session_id: &str) -> Option<&str> {
        self.all_session_metadata
            .iter()
            .find(|m| m.session_id == session_id)
            .map(|m| m.title.as_str())
    }

    fn activate(&mut self, session: Session) {
        self.id = session.session_id;
        self.title = session.title;
        self.workspace_directory = session.workspace_directory;
        self.history = session.history;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        let session = Session::new_untitled();
        Self {
            id: session.session_id,
            title: session.title,
            workspace_directory: session.workspace_directory,
            history: session.history,
            all_session_metadata: Vec::new(),
            is_session_metadata_loading: true,
            settings: ChatSettings::default(),
        }
    }
}

/// Every mutation the store accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    /// Replace the active session; `None` starts a fresh untitled one.
    NewSession(Option<Session>),
    /// Patch the title (and workspace, when given) of a listed session.
    UpdateSessionMetadata(SessionMetadata),
    DeleteSessionMetadata(String),
    SetAllSessionMetadata(Vec<SessionMetadata>),
    SetIsSessionMetadataLoading(bool),
    SetChatSettings(ChatSettings),
    AddHistoryItem(ChatHistoryItem),
}

/// Apply one action to the state.
pub fn reduce(state: &mut SessionState, action: SessionAction) {
    match action {
        SessionAction::NewSession(session) => {
            state.activate(session.unwrap_or_else(Session::new_untitled));
        }
        SessionAction::UpdateSessionMetadata(update) => {
            if let Some(entry) = state
                .all_session_metadata
                .iter_mut()
                .find(|m| m.session_id == update.session_id)
            {
                entry.title = update.title.clone();
                if update.workspace_directory.is_some() {
                    entry.workspace_directory = update.workspace_directory.clone();
                }
            }
            if update.session_id == state.id && !update.title.is_empty() {
                state.title = update.title;
            }
        }
        SessionAction::DeleteSessionMetadata(session_id) => {
            state
                .all_session_metadata
                .retain(|m| m.session_id != session_id);
        }
        SessionAction::SetAllSessionMetadata(metadata) => {
            state.all_session_metadata = metadata;
        }
        SessionAction::SetIsSessionMetadataLoading(loading) => {
            state.is_session_metadata_loading = loading;
        }
        SessionAction::SetChatSettings(settings) => {
            state.settings = settings;
        }
        SessionAction::AddHistoryItem(item) => {
            state.history.push(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confab_types::message::MessageRole;
    use confab_types::session::NEW_SESSION_TITLE;

    fn meta(id: &str, title: &str) -> SessionMetadata {
        SessionMetadata {
            session_id: id.to_string(),
            title: title.to_string(),
            workspace_directory: None,
        }
    }

    #[test]
    fn test_default_state_is_untitled_and_loading() {
        let state = SessionState::default();
        assert_eq!(state.title, NEW_SESSION_TITLE);
        assert!(state.history.is_empty());
        assert!(state.is_session_metadata_loading);
        assert!(!state.id.is_empty());
    }

    #[test]
    fn test_new_session_none_mints_fresh_id() {
        let mut state = SessionState::default();
        state.title = "Old".to_string();
        state.history.push(ChatHistoryItem::new(MessageRole::User, "hi"));
        let old_id = state.id.clone();

        reduce(&mut state, SessionAction::NewSession(None));

        assert_ne!(state.id, old_id);
        assert_eq!(state.title, NEW_SESSION_TITLE);
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_new_session_some_replaces_everything() {
        let mut state = SessionState::default();
        let session = Session {
            session_id: "s1".to_string(),
            title: "Loaded".to_string(),
            workspace_directory: "/w".to_string(),
            history: vec![ChatHistoryItem::new(MessageRole::User, "hi")],
        };

        reduce(&mut state, SessionAction::NewSession(Some(session.clone())));

        assert_eq!(state.current_session(), session);
    }

    #[test]
    fn test_update_metadata_patches_without_inserting() {
        let mut state = SessionState::default();
        state.all_session_metadata = vec![meta("a", "A"), meta("b", "B")];

        reduce(
            &mut state,
            SessionAction::UpdateSessionMetadata(SessionMetadata {
                session_id: "b".to_string(),
                title: "Renamed".to_string(),
                workspace_directory: Some("/w".to_string()),
            }),
        );
        reduce(
            &mut state,
            SessionAction::UpdateSessionMetadata(meta("zzz", "Ghost")),
        );

        assert_eq!(state.all_session_metadata.len(), 2);
        assert_eq!(state.all_session_metadata[1].title, "Renamed");
        assert_eq!(
            state.all_session_metadata[1].workspace_directory.as_deref(),
            Some("/w")
        );
    }

    #[test]
    fn test_update_metadata_renames_active_session() {
        let mut state = SessionState::default();
        let id = state.id.clone();
        reduce(
            &mut state,
            SessionAction::UpdateSessionMetadata(meta(&id, "Named")),
        );
        assert_eq!(state.title, "Named");
    }

    #[test]
    fn test_delete_and_replace_metadata() {
        let mut state = SessionState::default();
        state.all_session_metadata = vec![meta("a", "A"), meta("b", "B")];

        reduce(&mut state, SessionAction::DeleteSessionMetadata("a".to_string()));
        assert_eq!(state.all_session_metadata, vec![meta("b", "B")]);

        reduce(
            &mut state,
            SessionAction::SetAllSessionMetadata(vec![meta("c", "C")]),
        );
        assert_eq!(state.all_session_metadata, vec![meta("c", "C")]);
        assert_eq!(state.stored_title("c"), Some("C"));
        assert_eq!(state.stored_title("b"), None);
    }
}
