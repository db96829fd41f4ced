//! Session lifecycle orchestration.

pub mod locks;
pub mod orchestrator;

pub use locks::{SessionLockGuard, SessionLocks};
pub use orchestrator::{SaveOptions, SessionOrchestrator};
