//! Session storage.
//!
//! A session moves through exactly two states:
//!
//! ```text
//! pending (put) --complete--> completed (proof + certificate attached)
//! ```
//!
//! `complete` is a compare-and-set: of two racing submissions for the same
//! session, exactly one wins and the other gets `AlreadyCompleted`.

pub mod error;
pub mod memory;

use serde::{Deserialize, Serialize};

use crate::certificate::Certificate;
use crate::proof::ProofRecord;

pub use error::{StoreError, StoreResult};
pub use memory::InMemorySessionStore;

/// Outcome attached to a session once signals were submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedSession {
    pub certificate: Certificate,
}

impl CompletedSession {
    pub fn new(certificate: Certificate) -> Self {
        Self { certificate }
    }

    pub fn proof(&self) -> &ProofRecord {
        self.certificate.proof()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEntry {
    pub session_id: String,
    pub phrase: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<CompletedSession>,
}

impl SessionEntry {
    pub fn pending(
        session_id: impl Into<String>,
        phrase: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            phrase: phrase.into(),
            timestamp: timestamp.into(),
            completed: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed.is_some()
    }
}

/// Storage for consent sessions. Implementations must be safe to share
/// between threads.
pub trait SessionStore: Send + Sync {
    /// Insert a new pending session. Fails if the id is taken.
    fn put(&self, entry: SessionEntry) -> StoreResult<()>;

    fn get(&self, session_id: &str) -> StoreResult<Option<SessionEntry>>;

    /// Attach the outcome to a pending session.
    fn complete(&self, session_id: &str, outcome: CompletedSession) -> StoreResult<()>;

    /// Look up a completed session by its proof hash.
    fn find_by_hash(&self, hash: &str) -> StoreResult<Option<CompletedSession>>;
}
