//! Remote title generation through the chat describer.

use confab_types::error::MessengerError;
use confab_types::message::{render_chat_message, ChatHistoryItem, MessageRole};
use confab_types::protocol::DescribeRequest;

use crate::messenger::endpoint::{call, ChatDescriberDescribe};
use crate::messenger::Messenger;

/// Rendered text of the first assistant message that has any.
pub fn first_assistant_text(history: &[ChatHistoryItem]) -> Option<String> {
    history
        .iter()
        .filter(|item| item.message.role == MessageRole::Assistant)
        .map(|item| render_chat_message(&item.message))
        .find(|text| !text.trim().is_empty())
}

/// Ask the describer to name a conversation from `text`.
///
/// The answer is trimmed of whitespace and surrounding quotes; blank
/// answers come back as `None`.
#[tracing::instrument(name = "session.describe_title", skip(messenger, text), fields(text_len = text.len()))]
pub async fn describe_title(
    messenger: &impl Messenger,
    text: &str,
) -> Result<Option<String>, MessengerError> {
    let request = DescribeRequest {
        text: text.to_string(),
    };
    let response = call::<ChatDescriberDescribe>(messenger, &request).await?;

    let title = response
        .and_then(|r| r.title)
        .map(|t| {
            t.trim()
                .trim_matches('"')
                .trim_matches('\'')
                .trim()
                .to_string()
        })
        .filter(|t| !t.is_empty());

    Ok(title)
}
