//! Session lifecycle: start, submit signals, fetch certificate, verify hash.
//!
//! [`ConsentService`] is the transport-neutral facade over the proof builder
//! and a [`SessionStore`]. It holds validated, read-only configuration; the
//! store is the only mutable state.

use std::io;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use rand::seq::SliceRandom;
use serde::Serialize;
use thiserror::Error;

use crate::certificate::{
    stage_artifact, ArtifactKind, Certificate, CertificateJson, TemplateError,
};
use crate::config::ConsentConfig;
use crate::crypto::session_id::{generate_session_id, is_well_formed};
use crate::error::{ConfigError, ValidationError};
use crate::proof::build_proof;
use crate::store::{CompletedSession, SessionEntry, SessionStore, StoreError};
use crate::types::{SessionData, SessionSignals, Status, TrustScore};

/// Statements a user is asked to read aloud.
pub const CONSENT_PHRASES: [&str; 5] = [
    "I freely give my consent without coercion",
    "I agree to this voluntarily and without pressure",
    "I consent of my own free will",
    "I am not being forced or threatened into this decision",
    "I make this choice independently and willingly",
];

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("session not found: {0}")]
    SessionNotFound(String),

    #[error("session already completed: {0}")]
    AlreadyCompleted(String),

    #[error("session not yet completed: {0}")]
    NotCompleted(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("session store error: {0}")]
    Store(StoreError),

    #[error("certificate template error: {0}")]
    Template(#[from] TemplateError),

    #[error("failed to write certificate: {0}")]
    Io(#[from] io::Error),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { session_id } => Self::SessionNotFound(session_id),
            StoreError::AlreadyCompleted { session_id } => Self::AlreadyCompleted(session_id),
            other => Self::Store(other),
        }
    }
}

impl ServiceError {
    /// Suggested exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::SessionNotFound(_) => 4,
            Self::AlreadyCompleted(_) | Self::NotCompleted(_) | Self::Validation(_) => 3,
            Self::Store(e) => e.exit_code(),
            Self::Template(_) | Self::Io(_) => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionStart {
    pub session_id: String,
    pub phrase: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitReceipt {
    pub trust_score: TrustScore,
    pub status: Status,
    pub hash: String,
    pub status_message: String,
    pub certificate: CertificateJson,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedCertificate {
    pub html: String,
    pub json: CertificateJson,
}

/// Result of a verify-by-hash lookup. Never exposes raw liveness signals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum HashLookup {
    Known {
        session_id: String,
        status: Status,
        trust_score: TrustScore,
        timestamp: String,
    },
    Unknown,
}

impl HashLookup {
    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known { .. })
    }
}

pub struct ConsentService<S: SessionStore> {
    config: ConsentConfig,
    store: S,
    certificate_dir: Option<PathBuf>,
}

impl<S: SessionStore> ConsentService<S> {
    /// Refuses to construct with invalid configuration.
    pub fn new(config: ConsentConfig, store: S) -> Result<Self, ConfigError> {
        config.validate()?;
        tracing::info!(
            hash_version = %config.hash.version,
            verified = config.thresholds.verified,
            suspicious = config.thresholds.suspicious,
            "consent service ready"
        );
        Ok(Self {
            config,
            store,
            certificate_dir: None,
        })
    }

    /// Persist an HTML certificate for every completed session under `dir`.
    pub fn with_certificate_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.certificate_dir = Some(dir.into());
        self
    }

    pub fn config(&self) -> &ConsentConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn certificate_dir(&self) -> Option<&Path> {
        self.certificate_dir.as_deref()
    }

    pub fn start_session(&self) -> Result<SessionStart, ServiceError> {
        let now = Utc::now();
        let session_id = generate_session_id(now);
        let phrase = CONSENT_PHRASES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(CONSENT_PHRASES[0]);
        let timestamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);

        self.store
            .put(SessionEntry::pending(&session_id, phrase, &timestamp))?;
        tracing::info!(session_id = %session_id, "session started");

        Ok(SessionStart {
            session_id,
            phrase: phrase.to_string(),
            timestamp,
        })
    }

    pub fn submit_signals(
        &self,
        session_id: &str,
        signals: &SessionSignals,
    ) -> Result<SubmitReceipt, ServiceError> {
        let entry = self.lookup(session_id)?;
        if entry.is_completed() {
            return Err(ServiceError::AlreadyCompleted(session_id.to_string()));
        }

        let data = SessionData {
            session_id: Some(entry.session_id.clone()),
            phrase: Some(entry.phrase.clone()),
            timestamp: Some(entry.timestamp.clone()),
            ..SessionData::default()
        }
        .with_signals(signals);

        let proof = build_proof(&data, &self.config).inspect_err(|e| {
            tracing::warn!(session_id, error = %e, "submission rejected");
        })?;
        let certificate =
            Certificate::from_proof(proof, Utc::now(), self.config.certificate.validity_days);
        let json = certificate.to_json();
        // Staged before the compare-and-set: an unusable certificate dir
        // fails the submission while the session is still pending.
        let staged = match &self.certificate_dir {
            Some(dir) => Some(stage_artifact(
                dir,
                ArtifactKind::Certificate,
                session_id,
                &certificate.render_html()?,
            )?),
            None => None,
        };

        self.store
            .complete(session_id, CompletedSession::new(certificate))?;

        // The session is completed now; a failed rename only costs the file,
        // which `certificate` can render again.
        let certificate_path = staged.and_then(|artifact| {
            artifact
                .commit()
                .inspect_err(|e| {
                    tracing::warn!(session_id, error = %e, "certificate file not persisted");
                })
                .ok()
        });

        tracing::info!(
            session_id,
            trust_score = %json.trust_score,
            status = %json.status,
            "session completed"
        );

        Ok(SubmitReceipt {
            trust_score: json.trust_score,
            status: json.status,
            hash: json.hash.clone(),
            status_message: json.status_message.clone(),
            certificate: json,
            certificate_path,
        })
    }

    /// Ids that could never have been issued are not looked up.
    fn lookup(&self, session_id: &str) -> Result<SessionEntry, ServiceError> {
        if !is_well_formed(session_id) {
            tracing::debug!(session_id, "malformed session id");
            return Err(ServiceError::SessionNotFound(session_id.to_string()));
        }
        self.store
            .get(session_id)?
            .ok_or_else(|| ServiceError::SessionNotFound(session_id.to_string()))
    }

    fn completed(&self, session_id: &str) -> Result<CompletedSession, ServiceError> {
        self.lookup(session_id)?
            .completed
            .ok_or_else(|| ServiceError::NotCompleted(session_id.to_string()))
    }

    pub fn certificate(&self, session_id: &str) -> Result<RenderedCertificate, ServiceError> {
        let done = self.completed(session_id)?;
        Ok(RenderedCertificate {
            html: done.certificate.render_html()?,
            json: done.certificate.to_json(),
        })
    }

    pub fn evidence(&self, session_id: &str) -> Result<String, ServiceError> {
        Ok(self.completed(session_id)?.certificate.render_evidence()?)
    }

    pub fn verify_by_hash(&self, hash: &str) -> Result<HashLookup, ServiceError> {
        let hash = hash.trim().to_ascii_lowercase();
        let lookup = match self.store.find_by_hash(&hash)? {
            Some(done) => {
                let proof = done.proof();
                HashLookup::Known {
                    session_id: proof.session_id().to_string(),
                    status: proof.status(),
                    trust_score: proof.trust_score(),
                    timestamp: proof.timestamp().to_string(),
                }
            }
            None => HashLookup::Unknown,
        };
        tracing::debug!(known = lookup.is_known(), "hash lookup");
        Ok(lookup)
    }
}
