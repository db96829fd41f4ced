//! Session lifecycle coordination for Confab.
//!
//! This crate defines the messenger "port" through which the remote session
//! store is reached, the synchronous session store the UI reads from, the
//! title derivation rules, and the `SessionOrchestrator` tying them together.
//! It depends only on `confab-types` -- never on a transport or storage crate.

pub mod messenger;
pub mod session;
pub mod store;
pub mod title;
