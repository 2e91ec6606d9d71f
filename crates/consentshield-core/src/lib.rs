pub mod certificate;
pub mod config;
pub mod crypto;
pub mod error;
pub mod proof;
pub mod service;
pub mod status;
pub mod store;
pub mod trust;
pub mod types;

// Convenience re-exports
pub use certificate::{ArtifactKind, Certificate, CertificateJson, Template, TemplateError};
pub use config::{CertificateSettings, ConsentConfig, ScoringConfig, StatusMessages, Thresholds};
pub use crypto::canonical::{
    compute_hash, truncate_hash, truncate_hash_default, verify_hash, HashField, HashFields,
    HashSchema,
};
pub use error::{ConfigError, FieldViolation, IntegrityError, ValidationError};
pub use proof::{
    build_proof, build_proof_at, build_proof_from_value, parse_timestamp, validate_session_data,
    ProofRecord, ValidationReport,
};
pub use service::{
    ConsentService, HashLookup, RenderedCertificate, ServiceError, SessionStart, SubmitReceipt,
    CONSENT_PHRASES,
};
pub use status::{classify, classify_with_reason, Classification, StatusReason};
pub use store::{CompletedSession, InMemorySessionStore, SessionEntry, SessionStore, StoreError};
pub use trust::{score, score_breakdown, ScoreAdjustment, ScoreBreakdown};
pub use types::{Emotion, SessionData, SessionSignals, Status, TrustScore};
