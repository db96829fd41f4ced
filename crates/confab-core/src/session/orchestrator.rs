//! SessionOrchestrator: creation, persistence, loading and deletion of chat
//! sessions against the remote store.
//!
//! Every operation reads the [`SessionStore`] and mutates it only by
//! dispatching actions. Local mutations that the UI should see immediately
//! (metadata patches, removals) are applied before the remote call confirms
//! them. Remote failures propagate to the caller except where a lookup is
//! explicitly best-effort (workspace directory, title description,
//! background metadata refresh).

use std::sync::Arc;

use confab_types::error::SessionError;
use confab_types::message::ChatHistoryItem;
use confab_types::protocol::{ListSessionsRequest, SessionIdRequest};
use confab_types::session::{Session, SessionMetadata};
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn, Instrument};

use crate::messenger::endpoint::{
    call, GetWorkspaceDirs, HistoryDelete, HistoryList, HistoryLoad, HistorySave,
};
use crate::messenger::Messenger;
use crate::store::{SessionAction, SessionStore};
use crate::title::describe::{describe_title, first_assistant_text};
use crate::title::resolver::usable;
use crate::title::{resolve_title, TitleContext};

use super::locks::SessionLocks;

/// How `save_current_session` behaves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveOptions {
    /// Switch to a fresh session once the current one has been captured.
    pub open_new_session: bool,
    /// Allow asking the describer for a title.
    pub generate_title: bool,
}

/// Coordinates session operations between the store and the messenger.
///
/// Cloning is cheap and yields a handle to the same orchestrator.
pub struct SessionOrchestrator<M: Messenger> {
    messenger: Arc<M>,
    store: SessionStore,
    locks: SessionLocks,
    background: TaskTracker,
    /// Serializes `wait_for_background` callers around close/reopen.
    background_wait: Arc<tokio::sync::Mutex<()>>,
}

impl<M: Messenger> Clone for SessionOrchestrator<M> {
    fn clone(&self) -> Self {
        Self {
            messenger: Arc::clone(&self.messenger),
            store: self.store.clone(),
            locks: self.locks.clone(),
            background: self.background.clone(),
            background_wait: Arc::clone(&self.background_wait),
        }
    }
}

fn workspace_scope(workspace_directory: &str) -> Option<String> {
    (!workspace_directory.is_empty()).then(|| workspace_directory.to_string())
}

impl<M: Messenger + 'static> SessionOrchestrator<M> {
    pub fn new(messenger: M, store: SessionStore) -> Self {
        Self {
            messenger: Arc::new(messenger),
            store,
            locks: SessionLocks::new(),
            background: TaskTracker::new(),
            background_wait: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn messenger(&self) -> &M {
        &self.messenger
    }

    /// Wait until every background task spawned so far has finished.
    ///
    /// Safe to call from several tasks at once; callers take turns.
    pub async fn wait_for_background(&self) {
        let _turn = self.background_wait.lock().await;
        self.background.close();
        self.background.wait().await;
        self.background.reopen();
    }

    // --- Metadata ---

    /// Replace the metadata index with the remote listing.
    ///
    /// The listing replaces the index wholesale; entries the remote no
    /// longer reports disappear. Returns the new listing.
    #[tracing::instrument(
        name = "session.refresh_metadata",
        skip_all,
        fields(limit = ?request.limit, offset = ?request.offset, workspace = ?request.workspace_directory)
    )]
    pub async fn refresh_session_metadata(
        &self,
        request: ListSessionsRequest,
    ) -> Result<Vec<SessionMetadata>, SessionError> {
        let metadata = call::<HistoryList>(&*self.messenger, &request).await?;

        self.store
            .dispatch(SessionAction::SetIsSessionMetadataLoading(false));
        self.store
            .dispatch(SessionAction::SetAllSessionMetadata(metadata.clone()));

        debug!(count = metadata.len(), "Session metadata refreshed");
        Ok(metadata)
    }

    /// Refresh the metadata index without waiting for it.
    ///
    /// Failures are logged and never reach the caller.
    fn spawn_metadata_refresh(&self, request: ListSessionsRequest) {
        let this = self.clone();
        self.background.spawn(
            async move {
                if let Err(err) = this.refresh_session_metadata(request).await {
                    warn!(error = %err, "Background session metadata refresh failed");
                }
            }
            .in_current_span(),
        );
    }

    // --- Lifecycle ---

    /// Delete a session locally and remotely.
    ///
    /// The metadata entry is removed before the remote call. When the
    /// session is the active one, a replacement is activated first so the
    /// active slot never points at a session about to vanish. A failed
    /// remote delete is returned but the local removal is kept.
    #[tracing::instrument(name = "session.delete", skip(self))]
    pub async fn delete_session(&self, session_id: &str) -> Result<(), SessionError> {
        let _lock = self.locks.acquire(session_id).await;

        self.store
            .dispatch(SessionAction::DeleteSessionMetadata(session_id.to_string()));

        if self.store.read(|state| state.id == session_id) {
            if let Err(err) = self.load_last_session_excluding(false, Some(session_id)).await {
                warn!(error = %err, "Failed to load a replacement session, starting a new one");
                self.store.dispatch(SessionAction::NewSession(None));
            }
        }

        let request = SessionIdRequest {
            id: session_id.to_string(),
        };
        call::<HistoryDelete>(&*self.messenger, &request).await?;
        info!("Session deleted");

        self.spawn_metadata_refresh(ListSessionsRequest::default());
        Ok(())
    }

    /// Persist a full session and wait for the metadata index to catch up.
    #[tracing::instrument(
        name = "session.update",
        skip_all,
        fields(session_id = %session.session_id, title = %session.title, messages = session.history.len())
    )]
    pub async fn update_session(&self, session: Session) -> Result<(), SessionError> {
        let workspace_directory = workspace_scope(&session.workspace_directory);
        {
            let _lock = self.locks.acquire(&session.session_id).await;
            self.store
                .dispatch(SessionAction::UpdateSessionMetadata(session.metadata()));
            call::<HistorySave>(&*self.messenger, &session).await?;
        }
        info!("Session saved");

        self.refresh_session_metadata(ListSessionsRequest {
            workspace_directory,
            ..Default::default()
        })
        .await?;
        Ok(())
    }

    /// Replace the active session with `session_id` fetched from the store.
    ///
    /// With `save_current_session`, the active session is saved first and a
    /// failure there aborts the load.
    #[tracing::instrument(name = "session.load", skip(self))]
    pub async fn load_session(
        &self,
        session_id: &str,
        save_current_session: bool,
    ) -> Result<(), SessionError> {
        if save_current_session {
            self.save_current_session(SaveOptions {
                open_new_session: false,
                generate_title: true,
            })
            .await?;
        }

        let session = self.fetch_session(session_id).await?;
        self.store.dispatch(SessionAction::NewSession(Some(session)));
        debug!("Session loaded");
        Ok(())
    }

    /// Activate the most recent session of the current workspace, or a new
    /// empty one when the workspace has none.
    #[tracing::instrument(name = "session.load_last", skip(self))]
    pub async fn load_last_session(&self, save_current_session: bool) -> Result<(), SessionError> {
        self.load_last_session_excluding(save_current_session, None)
            .await
    }

    async fn load_last_session_excluding(
        &self,
        save_current_session: bool,
        exclude: Option<&str>,
    ) -> Result<(), SessionError> {
        let workspace_directory = self.current_workspace_directory().await;

        if save_current_session {
            self.save_current_session(SaveOptions {
                open_new_session: false,
                generate_title: true,
            })
            .await?;
        }

        // The excluded session may still be listed first, so look one further.
        let request = ListSessionsRequest {
            offset: None,
            limit: Some(if exclude.is_some() { 2 } else { 1 }),
            workspace_directory,
        };
        let recent = call::<HistoryList>(&*self.messenger, &request).await?;
        let last = recent
            .into_iter()
            .find(|meta| Some(meta.session_id.as_str()) != exclude);

        match last {
            Some(meta) => {
                let session = self.fetch_session(&meta.session_id).await?;
                debug!(session_id = %session.session_id, "Activating last session");
                self.store.dispatch(SessionAction::NewSession(Some(session)));
            }
            None => {
                debug!("No previous session in workspace, starting a new one");
                self.store.dispatch(SessionAction::NewSession(None));
            }
        }
        Ok(())
    }

    /// Persist the active session, naming it first if it is still untitled.
    ///
    /// Does nothing when the active history is empty. With
    /// `open_new_session`, the user is moved to a fresh session while the
    /// captured one is persisted.
    #[tracing::instrument(
        name = "session.save_current",
        skip_all,
        fields(open_new_session = options.open_new_session, generate_title = options.generate_title)
    )]
    pub async fn save_current_session(&self, options: SaveOptions) -> Result<(), SessionError> {
        let state = self.store.snapshot();
        if state.history.is_empty() {
            debug!(session_id = %state.id, "Nothing to save, history is empty");
            return Ok(());
        }

        let workspace_directory = self
            .current_workspace_directory()
            .await
            .unwrap_or_default();

        if options.open_new_session {
            self.store.dispatch(SessionAction::NewSession(None));
        }

        let described = if options.generate_title
            && !usable(&state.title)
            && state.settings.can_describe()
        {
            self.describe(&state.history).await
        } else {
            None
        };

        let title = resolve_title(&TitleContext {
            current_title: &state.title,
            described: described.as_deref(),
            first_message: state.history.first().map(|item| &item.message),
            stored_title: state.stored_title(&state.id),
        });

        let session = Session {
            session_id: state.id,
            title,
            workspace_directory,
            history: state.history,
        };
        self.update_session(session).await
    }

    // --- Conveniences ---

    /// Save the active session (if it has anything in it) and switch to a
    /// fresh one.
    #[tracing::instrument(name = "session.start_new", skip(self))]
    pub async fn start_new_session(&self) -> Result<(), SessionError> {
        if self.store.read(|state| state.history.is_empty()) {
            self.store.dispatch(SessionAction::NewSession(None));
            return Ok(());
        }
        self.save_current_session(SaveOptions {
            open_new_session: true,
            generate_title: true,
        })
        .await
    }

    /// Give a session a new title and persist it.
    ///
    /// An active session that has never been saved (empty history) is only
    /// renamed locally.
    #[tracing::instrument(name = "session.rename", skip(self))]
    pub async fn rename_session(&self, session_id: &str, title: &str) -> Result<(), SessionError> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(SessionError::InvalidTitle(title.to_string()));
        }

        let active = self
            .store
            .read(|state| (state.id == session_id).then(|| state.current_session()));

        let mut session = match active {
            Some(session) if session.history.is_empty() => {
                self.store
                    .dispatch(SessionAction::UpdateSessionMetadata(SessionMetadata {
                        session_id: session_id.to_string(),
                        title: trimmed.to_string(),
                        workspace_directory: None,
                    }));
                return Ok(());
            }
            Some(session) => session,
            None => self.fetch_session(session_id).await?,
        };

        session.title = trimmed.to_string();
        self.update_session(session).await
    }

    // --- Helpers ---

    async fn fetch_session(&self, session_id: &str) -> Result<Session, SessionError> {
        let request = SessionIdRequest {
            id: session_id.to_string(),
        };
        Ok(call::<HistoryLoad>(&*self.messenger, &request).await?)
    }

    /// First workspace directory of the host, if it can be determined.
    async fn current_workspace_directory(&self) -> Option<String> {
        match call::<GetWorkspaceDirs>(&*self.messenger, &()).await {
            Ok(dirs) => dirs.into_iter().next(),
            Err(err) => {
                warn!(error = %err, "Failed to resolve workspace directory");
                None
            }
        }
    }

    async fn describe(&self, history: &[ChatHistoryItem]) -> Option<String> {
        let text = first_assistant_text(history)?;
        match describe_title(&*self.messenger, &text).await {
            Ok(title) => title,
            Err(err) => {
                warn!(error = %err, "Title generation failed, falling back to derived title");
                None
            }
        }
    }
}
