//! BoxMessenger -- object-safe dynamic dispatch wrapper for [`Messenger`].
//!
//! 1. `MessengerDyn` is an object-safe mirror of `Messenger` with boxed futures
//! 2. Every `T: Messenger` gets `MessengerDyn` through a blanket impl
//! 3. `BoxMessenger` wraps `Box<dyn MessengerDyn>` and is itself a `Messenger`

use std::future::Future;
use std::pin::Pin;

use confab_types::error::MessengerError;
use confab_types::protocol::MessageResult;
use serde_json::Value;

use super::port::Messenger;

/// Object-safe version of [`Messenger`].
pub trait MessengerDyn: Send + Sync {
    fn request_boxed<'a>(
        &'a self,
        endpoint: &'a str,
        payload: Value,
    ) -> Pin<Box<dyn Future<Output = Result<MessageResult, MessengerError>> + Send + 'a>>;
}

impl<T: Messenger> MessengerDyn for T {
    fn request_boxed<'a>(
        &'a self,
        endpoint: &'a str,
        payload: Value,
    ) -> Pin<Box<dyn Future<Output = Result<MessageResult, MessengerError>> + Send + 'a>> {
        Box::pin(self.request(endpoint, payload))
    }
}

/// Type-erased messenger for choosing a bridge at runtime.
pub struct BoxMessenger {
    inner: Box<dyn MessengerDyn + Send + Sync>,
}

impl BoxMessenger {
    pub fn new<T: Messenger + 'static>(messenger: T) -> Self {
        Self {
            inner: Box::new(messenger),
        }
    }
}

impl Messenger for BoxMessenger {
    fn request(
        &self,
        endpoint: &str,
        payload: Value,
    ) -> impl Future<Output = Result<MessageResult, MessengerError>> + Send {
        async move { self.inner.request_boxed(endpoint, payload).await }
    }
}

impl std::fmt::Debug for BoxMessenger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxMessenger").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct EchoMessenger;

    impl Messenger for EchoMessenger {
        fn request(
            &self,
            endpoint: &str,
            payload: Value,
        ) -> impl Future<Output = Result<MessageResult, MessengerError>> + Send {
            let endpoint = endpoint.to_string();
            async move { Ok(MessageResult::success(json!({ "endpoint": endpoint, "payload": payload }))) }
        }
    }

    #[tokio::test]
    async fn test_boxed_messenger_delegates() {
        let messenger = BoxMessenger::new(EchoMessenger);
        let result = messenger.request("history/list", json!({"limit": 1})).await.unwrap();
        assert_eq!(
            result,
            MessageResult::success(json!({"endpoint": "history/list", "payload": {"limit": 1}}))
        );
    }
}
