//! Messenger trait definition.
//!
//! Uses RPITIT (Rust 2024 edition) for `request`. Implementations live
//! outside this crate: an IDE bridge, a websocket client, a test double.

use confab_types::error::MessengerError;
use confab_types::protocol::MessageResult;
use serde_json::Value;

/// Async request/response capability keyed by endpoint name.
///
/// `Ok(MessageResult::Error { .. })` is a negative answer from the remote
/// side; `Err(_)` means the bridge itself failed to deliver or answer.
pub trait Messenger: Send + Sync {
    fn request(
        &self,
        endpoint: &str,
        payload: Value,
    ) -> impl std::future::Future<Output = Result<MessageResult, MessengerError>> + Send;
}
