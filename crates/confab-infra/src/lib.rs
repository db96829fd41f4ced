//! Infrastructure layer for Confab.
//!
//! Reads on-disk configuration and applies it to the session store defined
//! in `confab-core`.

pub mod config;
