//! Wire types for the messenger bridge.
//!
//! Every answer is wrapped in a tagged envelope:
//! `{"status": "success", "content": ...}` or `{"status": "error", "error": "..."}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::MessengerError;

/// Tagged result returned by the messenger for every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum MessageResult {
    Success {
        #[serde(default)]
        content: Option<Value>,
    },
    Error {
        error: String,
    },
}

impl MessageResult {
    pub fn success(content: Value) -> Self {
        MessageResult::Success {
            content: Some(content),
        }
    }

    /// A success answer without payload.
    pub fn empty() -> Self {
        MessageResult::Success { content: None }
    }

    pub fn error(message: impl Into<String>) -> Self {
        MessageResult::Error {
            error: message.into(),
        }
    }

    /// Unwrap the envelope, turning an `error` status into [`MessengerError::Remote`].
    ///
    /// Absent content is reported as `Value::Null`.
    pub fn into_content(self, endpoint: &str) -> Result<Value, MessengerError> {
        match self {
            MessageResult::Success { content } => Ok(content.unwrap_or(Value::Null)),
            MessageResult::Error { error } => Err(MessengerError::Remote {
                endpoint: endpoint.to_string(),
                message: error,
            }),
        }
    }
}

/// Payload of `history/list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSessionsRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_directory: Option<String>,
}

/// Payload of `history/load` and `history/delete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdRequest {
    pub id: String,
}

/// Payload of `chatDescriber/describe`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescribeRequest {
    pub text: String,
}

/// Answer of `chatDescriber/describe`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescribeResponse {
    #[serde(default)]
    pub title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_success_parse() {
        let result: MessageResult =
            serde_json::from_value(json!({"status": "success", "content": [1, 2]})).unwrap();
        assert_eq!(result.into_content("history/list").unwrap(), json!([1, 2]));
    }

    #[test]
    fn test_envelope_success_without_content() {
        let result: MessageResult = serde_json::from_value(json!({"status": "success"})).unwrap();
        assert_eq!(result, MessageResult::empty());
        assert_eq!(result.into_content("history/save").unwrap(), Value::Null);
    }

    #[test]
    fn test_envelope_error_becomes_remote_error() {
        let result: MessageResult =
            serde_json::from_value(json!({"status": "error", "error": "no such session"})).unwrap();
        let err = result.into_content("history/load").unwrap_err();
        assert_eq!(
            err,
            MessengerError::Remote {
                endpoint: "history/load".to_string(),
                message: "no such session".to_string(),
            }
        );
    }

    #[test]
    fn test_list_request_omits_unset_fields() {
        let req = ListSessionsRequest {
            limit: Some(1),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&req).unwrap(), json!({"limit": 1}));
    }

    #[test]
    fn test_describe_response_absent_title() {
        let resp: DescribeResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(resp.title, None);
    }
}
