//! Typed endpoints on top of the untyped [`Messenger`] port.
//!
//! Each endpoint names its wire operation and the request/response types
//! that travel inside the tagged envelope; [`call`] does the (de)serialization.

use confab_types::error::MessengerError;
use confab_types::protocol::{DescribeRequest, DescribeResponse, ListSessionsRequest, SessionIdRequest};
use confab_types::session::{Session, SessionMetadata};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::port::Messenger;

/// A named remote operation with its request and response shapes.
pub trait Endpoint {
    const NAME: &'static str;

    /// Whether a success answer must carry content.
    const REQUIRES_CONTENT: bool = true;

    type Request: Serialize + Sync;
    type Response: DeserializeOwned;
}

/// `history/load`: fetch a full session by id.
pub struct HistoryLoad;

impl Endpoint for HistoryLoad {
    const NAME: &'static str = "history/load";
    type Request = SessionIdRequest;
    type Response = Session;
}

/// `history/list`: ordered metadata, most recent first.
pub struct HistoryList;

impl Endpoint for HistoryList {
    const NAME: &'static str = "history/list";
    type Request = ListSessionsRequest;
    type Response = Vec<SessionMetadata>;
}

/// `history/delete`: remove a session.
pub struct HistoryDelete;

impl Endpoint for HistoryDelete {
    const NAME: &'static str = "history/delete";
    const REQUIRES_CONTENT: bool = false;
    type Request = SessionIdRequest;
    type Response = ();
}

/// `history/save`: persist a full session.
pub struct HistorySave;

impl Endpoint for HistorySave {
    const NAME: &'static str = "history/save";
    const REQUIRES_CONTENT: bool = false;
    type Request = Session;
    type Response = ();
}

/// `getWorkspaceDirs`: directories open in the host environment.
pub struct GetWorkspaceDirs;

impl Endpoint for GetWorkspaceDirs {
    const NAME: &'static str = "getWorkspaceDirs";
    type Request = ();
    type Response = Vec<String>;
}

/// `chatDescriber/describe`: ask a model to name a conversation.
pub struct ChatDescriberDescribe;

impl Endpoint for ChatDescriberDescribe {
    const NAME: &'static str = "chatDescriber/describe";
    const REQUIRES_CONTENT: bool = false;
    type Request = DescribeRequest;
    type Response = Option<DescribeResponse>;
}

/// Send a typed request and decode the answer.
///
/// An `error` status becomes [`MessengerError::Remote`]; a missing payload
/// on an endpoint that needs one becomes [`MessengerError::MissingContent`].
pub async fn call<E: Endpoint>(
    messenger: &impl Messenger,
    request: &E::Request,
) -> Result<E::Response, MessengerError> {
    let payload = serde_json::to_value(request).map_err(|e| MessengerError::Encode {
        endpoint: E::NAME.to_string(),
        message: e.to_string(),
    })?;

    let content = messenger
        .request(E::NAME, payload)
        .await?
        .into_content(E::NAME)?;

    if E::REQUIRES_CONTENT && content == Value::Null {
        return Err(MessengerError::MissingContent {
            endpoint: E::NAME.to_string(),
        });
    }

    serde_json::from_value(content).map_err(|e| MessengerError::Decode {
        endpoint: E::NAME.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use confab_types::protocol::MessageResult;
    use serde_json::json;
    use std::future::Future;
    use std::sync::Mutex;

    /// Answers every request with a fixed envelope and remembers what it saw.
    struct FixedMessenger {
        answer: Result<MessageResult, MessengerError>,
        seen: Mutex<Vec<(String, Value)>>,
    }

    impl FixedMessenger {
        fn new(answer: Result<MessageResult, MessengerError>) -> Self {
            Self {
                answer,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl Messenger for FixedMessenger {
        fn request(
            &self,
            endpoint: &str,
            payload: Value,
        ) -> impl Future<Output = Result<MessageResult, MessengerError>> + Send {
            self.seen
                .lock()
                .unwrap()
                .push((endpoint.to_string(), payload));
            let answer = self.answer.clone();
            async move { answer }
        }
    }

    #[tokio::test]
    async fn test_list_decodes_metadata() {
        let messenger = FixedMessenger::new(Ok(MessageResult::success(json!([
            {"sessionId": "a", "title": "First"},
            {"sessionId": "b", "title": "Second", "workspaceDirectory": "/w"}
        ]))));
        let request = ListSessionsRequest {
            limit: Some(2),
            ..Default::default()
        };
        let metadata = call::<HistoryList>(&messenger, &request).await.unwrap();
        assert_eq!(metadata.len(), 2);
        assert_eq!(metadata[1].workspace_directory.as_deref(), Some("/w"));

        let seen = messenger.seen.lock().unwrap();
        assert_eq!(seen[0], ("history/list".to_string(), json!({"limit": 2})));
    }

    #[tokio::test]
    async fn test_error_status_becomes_remote_error() {
        let messenger = FixedMessenger::new(Ok(MessageResult::error("locked")));
        let err = call::<HistoryDelete>(&messenger, &SessionIdRequest { id: "a".to_string() })
            .await
            .unwrap_err();
        assert_eq!(
            err,
            MessengerError::Remote {
                endpoint: "history/delete".to_string(),
                message: "locked".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_empty_success_is_fine_for_save() {
        let messenger = FixedMessenger::new(Ok(MessageResult::empty()));
        call::<HistorySave>(&messenger, &Session::new_untitled())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_empty_success_is_missing_content_for_load() {
        let messenger = FixedMessenger::new(Ok(MessageResult::empty()));
        let err = call::<HistoryLoad>(&messenger, &SessionIdRequest { id: "a".to_string() })
            .await
            .unwrap_err();
        assert!(matches!(err, MessengerError::MissingContent { .. }));
    }

    #[tokio::test]
    async fn test_malformed_content_is_decode_error() {
        let messenger = FixedMessenger::new(Ok(MessageResult::success(json!("not a list"))));
        let err = call::<GetWorkspaceDirs>(&messenger, &()).await.unwrap_err();
        assert!(matches!(err, MessengerError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let messenger = FixedMessenger::new(Err(MessengerError::Transport("gone".to_string())));
        let err = call::<HistoryList>(&messenger, &ListSessionsRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err, MessengerError::Transport("gone".to_string()));
    }

    #[tokio::test]
    async fn test_describe_accepts_absent_content() {
        let messenger = FixedMessenger::new(Ok(MessageResult::empty()));
        let described = call::<ChatDescriberDescribe>(
            &messenger,
            &DescribeRequest {
                text: "hello".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(described, None);
    }
}
