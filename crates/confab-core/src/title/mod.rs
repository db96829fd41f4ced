//! Session title derivation.
//!
//! Titles come from, in order: the remote describer, the first message,
//! the title already stored for the session, and finally the placeholder.

pub mod describe;
pub mod deriver;
pub mod resolver;

pub use describe::describe_title;
pub use deriver::{chat_title_from_message, MAX_TITLE_LENGTH};
pub use resolver::{resolve_title, TitleContext};
