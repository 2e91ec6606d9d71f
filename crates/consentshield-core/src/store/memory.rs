use std::collections::HashMap;
use std::sync::RwLock;

use super::{CompletedSession, SessionEntry, SessionStore, StoreError, StoreResult};

/// In-memory session store for tests, demos and single-process use.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    sessions: HashMap<String, SessionEntry>,
    /// hash -> session_id
    by_hash: HashMap<String, String>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> StoreResult<usize> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(inner.sessions.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl SessionStore for InMemorySessionStore {
    fn put(&self, entry: SessionEntry) -> StoreResult<()> {
        let mut inner = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        if inner.sessions.contains_key(&entry.session_id) {
            return Err(StoreError::AlreadyExists {
                session_id: entry.session_id,
            });
        }
        tracing::debug!(session_id = %entry.session_id, "session stored");
        inner.sessions.insert(entry.session_id.clone(), entry);
        Ok(())
    }

    fn get(&self, session_id: &str) -> StoreResult<Option<SessionEntry>> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(inner.sessions.get(session_id).cloned())
    }

    fn complete(&self, session_id: &str, outcome: CompletedSession) -> StoreResult<()> {
        let mut inner = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        let entry = inner
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| StoreError::NotFound {
                session_id: session_id.to_string(),
            })?;
        if entry.completed.is_some() {
            tracing::warn!(session_id, "rejected second completion");
            return Err(StoreError::AlreadyCompleted {
                session_id: session_id.to_string(),
            });
        }
        let hash = outcome.proof().hash().to_string();
        entry.completed = Some(outcome);
        inner.by_hash.insert(hash, session_id.to_string());
        tracing::debug!(session_id, "session completed");
        Ok(())
    }

    fn find_by_hash(&self, hash: &str) -> StoreResult<Option<CompletedSession>> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(inner
            .by_hash
            .get(hash)
            .and_then(|id| inner.sessions.get(id))
            .and_then(|entry| entry.completed.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::certificate::Certificate;
    use crate::config::ConsentConfig;
    use crate::proof::build_proof;
    use crate::types::SessionData;
    use chrono::Utc;
    use std::sync::Arc;
    use std::thread;

    fn outcome(session_id: &str) -> CompletedSession {
        let data = SessionData {
            session_id: Some(session_id.into()),
            phrase: Some("I consent of my own free will".into()),
            timestamp: Some("2026-01-28T10:00:00.000Z".into()),
            trust_score: Some(90),
            ..Default::default()
        };
        let proof = build_proof(&data, &ConsentConfig::default()).unwrap();
        CompletedSession::new(Certificate::from_proof(proof, Utc::now(), 365))
    }

    fn pending(id: &str) -> SessionEntry {
        SessionEntry::pending(id, "I consent of my own free will", "2026-01-28T10:00:00.000Z")
    }

    #[test]
    fn test_put_get() {
        let store = InMemorySessionStore::new();
        assert!(store.is_empty().unwrap());
        store.put(pending("CS-1")).unwrap();
        let got = store.get("CS-1").unwrap().unwrap();
        assert!(!got.is_completed());
        assert!(store.get("CS-2").unwrap().is_none());
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_poisoned_lock_is_reported() {
        let store = Arc::new(InMemorySessionStore::new());
        let poisoner = Arc::clone(&store);
        let result = thread::spawn(move || {
            let _guard = poisoner.inner.write().unwrap();
            panic!("poison the session lock");
        })
        .join();
        assert!(result.is_err());

        assert!(matches!(store.len(), Err(StoreError::Poisoned)));
        assert!(matches!(store.is_empty(), Err(StoreError::Poisoned)));
        assert!(matches!(store.get("CS-1"), Err(StoreError::Poisoned)));
    }

    #[test]
    fn test_put_duplicate_rejected() {
        let store = InMemorySessionStore::new();
        store.put(pending("CS-1")).unwrap();
        let err = store.put(pending("CS-1")).unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists { .. }));
    }

    #[test]
    fn test_complete_unknown_session() {
        let store = InMemorySessionStore::new();
        let err = store.complete("CS-9", outcome("CS-9")).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_complete_then_find_by_hash() {
        let store = InMemorySessionStore::new();
        store.put(pending("CS-1")).unwrap();
        let done = outcome("CS-1");
        let hash = done.proof().hash().to_string();
        store.complete("CS-1", done).unwrap();

        let found = store.find_by_hash(&hash).unwrap().unwrap();
        assert_eq!(found.proof().session_id(), "CS-1");
        assert!(store.find_by_hash("deadbeef").unwrap().is_none());
    }

    #[test]
    fn test_second_completion_rejected() {
        let store = InMemorySessionStore::new();
        store.put(pending("CS-1")).unwrap();
        store.complete("CS-1", outcome("CS-1")).unwrap();
        let err = store.complete("CS-1", outcome("CS-1")).unwrap_err();
        assert!(err.is_already_completed());
    }

    #[test]
    fn test_concurrent_completion_has_one_winner() {
        let store = Arc::new(InMemorySessionStore::new());
        store.put(pending("CS-1")).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.complete("CS-1", outcome("CS-1")).is_ok())
            })
            .collect();
        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(wins, 1);
    }
}
