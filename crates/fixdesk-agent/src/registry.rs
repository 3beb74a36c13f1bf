// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Concurrency-safe map from user identity to session.
//!
//! Each session lives behind its own async mutex, so events for one user
//! serialize while events for different users run fully in parallel. There
//! is deliberately no lock over the whole map: `DashMap` shards access and
//! the per-key mutex is the only contention point.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use fixdesk_core::types::UserId;

use crate::session::Session;

/// Lazily populated registry of per-user sessions.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: DashMap<UserId, Arc<Mutex<Session>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the session handle for a user, creating it on first use.
    ///
    /// Callers hold the returned mutex for the whole event-handling cycle;
    /// tokio's mutex queues waiters fairly, so same-user events are handled
    /// in arrival order.
    pub fn session(&self, user_id: &UserId) -> Arc<Mutex<Session>> {
        self.sessions
            .entry(user_id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(Session::new(user_id.clone()))))
            .clone()
    }

    /// Number of sessions created so far.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sessions_are_created_lazily_and_reused() {
        let registry = SessionRegistry::new();
        assert!(registry.is_empty());

        let a1 = registry.session(&UserId("a".into()));
        let a2 = registry.session(&UserId("a".into()));
        let b = registry.session(&UserId("b".into()));
        assert_eq!(registry.len(), 2);

        // Same user gets the same session instance.
        assert!(Arc::ptr_eq(&a1, &a2));
        assert!(!Arc::ptr_eq(&a1, &b));
    }

    #[tokio::test]
    async fn per_user_lock_serializes_access() {
        let registry = Arc::new(SessionRegistry::new());
        let handle = registry.session(&UserId("a".into()));

        let guard = handle.lock().await;
        // A second lock attempt on the same user must not succeed while the
        // first guard is held.
        let second = handle.try_lock();
        assert!(second.is_err());
        drop(guard);
        assert!(handle.try_lock().is_ok());
    }
}
