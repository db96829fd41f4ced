//! Per-session advisory locks.
//!
//! Operations that write a given session remotely (update, delete) take the
//! lock for its id, so two of them on the same id never interleave.
//! Different ids never contend. Entries are dropped once nobody holds them.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Debug, Clone, Default)]
pub struct SessionLocks {
    inner: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `session_id`.
    pub async fn acquire(&self, session_id: &str) -> SessionLockGuard {
        // Clone the mutex out so no DashMap guard is held across the await.
        let mutex = Arc::clone(self.inner.entry(session_id.to_string()).or_default().value());
        let guard = mutex.lock_owned().await;
        SessionLockGuard {
            session_id: session_id.to_string(),
            locks: Arc::clone(&self.inner),
            guard: Some(guard),
        }
    }

    /// Number of ids currently locked or waited on.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// Held lock for one session id. Released on drop.
#[derive(Debug)]
pub struct SessionLockGuard {
    session_id: String,
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl SessionLockGuard {
    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

impl Drop for SessionLockGuard {
    fn drop(&mut self) {
        self.guard.take();
        self.locks
            .remove_if(&self.session_id, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_id_is_exclusive() {
        let locks = SessionLocks::new();
        let first = locks.acquire("a").await;

        let contender = locks.clone();
        let waiter = tokio::spawn(async move {
            let guard = contender.acquire("a").await;
            guard.session_id().to_string()
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        drop(first);
        assert_eq!(waiter.await.unwrap(), "a");
    }

    #[tokio::test]
    async fn test_different_ids_do_not_contend() {
        let locks = SessionLocks::new();
        let _a = locks.acquire("a").await;
        let b = tokio::time::timeout(Duration::from_millis(100), locks.acquire("b")).await;
        assert!(b.is_ok());
        assert_eq!(locks.len(), 2);
    }

    #[tokio::test]
    async fn test_released_entries_are_pruned() {
        let locks = SessionLocks::new();
        {
            let _guard = locks.acquire("a").await;
            assert_eq!(locks.len(), 1);
        }
        assert!(locks.is_empty());
    }
}
