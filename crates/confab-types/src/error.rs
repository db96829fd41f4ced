use thiserror::Error;

/// Errors raised while talking to the remote store through the messenger bridge.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessengerError {
    /// The remote side answered with an `error` status.
    #[error("{endpoint} failed: {message}")]
    Remote { endpoint: String, message: String },

    /// The bridge itself failed before an answer was produced.
    #[error("transport error: {0}")]
    Transport(String),

    #[error("{endpoint} returned no content")]
    MissingContent { endpoint: String },

    #[error("failed to encode {endpoint} request: {message}")]
    Encode { endpoint: String, message: String },

    #[error("failed to decode {endpoint} response: {message}")]
    Decode { endpoint: String, message: String },
}

/// Errors surfaced at the boundary of a session orchestrator operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Messenger(#[from] MessengerError),

    #[error("invalid session title: {0:?}")]
    InvalidTitle(String),
}
