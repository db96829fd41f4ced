//! Messenger port: the async request/response bridge to the remote store.

pub mod box_messenger;
pub mod endpoint;
pub mod port;

pub use box_messenger::BoxMessenger;
pub use endpoint::{call, Endpoint};
pub use port::Messenger;
