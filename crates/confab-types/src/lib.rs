//! Shared domain types for Confab.
//!
//! This crate contains the types exchanged between the session orchestrator
//! and its collaborators: sessions, metadata index entries, chat history
//! items, the tagged messenger envelope, and their error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, thiserror.

pub mod config;
pub mod error;
pub mod message;
pub mod protocol;
pub mod session;
