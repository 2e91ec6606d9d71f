//! Scoring, classification and hashing configuration.
//!
//! Every threshold and penalty is configuration rather than a hard-coded
//! invariant. Config files must spell out every section: a missing hash
//! schema silently replaced by a default would break verification of proofs
//! issued under a different schema.
//!
//! # Example
//!
//! ```yaml
//! thresholds: { verified: 70, suspicious: 50 }
//! scoring:
//!   min_blinks: 2
//!   max_blinks: 5
//!   blink_penalty: 20
//!   panic_emotions: [fear, angry, disgust]
//!   panic_penalty: 30
//!   min_duration_seconds: 3
//!   max_duration_seconds: 30
//!   timeout_penalty: 15
//! hash: { version: v1, fields: [session_id, phrase, timestamp, trust_score], separator: "|" }
//! certificate:
//!   issuer: ConsentShield Verification System
//!   schema_version: 1.0.0
//!   validity_days: 365
//! status_messages:
//!   verified: Consent verified successfully. All liveness checks passed.
//!   suspicious: Consent verification requires manual review. Some anomalies detected.
//!   blocked: Consent verification failed. Potential coercion or manipulation detected.
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::crypto::canonical::HashSchema;
use crate::error::ConfigError;
use crate::types::{Emotion, Status, MAX_TRUST_SCORE};

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConsentConfig {
    pub thresholds: Thresholds,
    pub scoring: ScoringConfig,
    pub hash: HashSchema,
    pub certificate: CertificateSettings,
    pub status_messages: StatusMessages,
}

impl Default for ConsentConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            scoring: ScoringConfig::default(),
            hash: HashSchema::v1(),
            certificate: CertificateSettings::default(),
            status_messages: StatusMessages::default(),
        }
    }
}

impl ConsentConfig {
    /// Load and validate configuration from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.validate()?;
        self.scoring.validate()?;
        self.hash.validate()?;
        self.certificate.validate()?;
        self.status_messages.validate()
    }
}

/// Score bands. Both bounds are inclusive lower edges: a score exactly at a
/// threshold passes that band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Thresholds {
    pub verified: u8,
    pub suspicious: u8,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            verified: 70,
            suspicious: 50,
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.verified > MAX_TRUST_SCORE {
            return Err(ConfigError::invalid(
                "thresholds.verified",
                format!("must be in [0, 100], got {}", self.verified),
            ));
        }
        if self.suspicious > self.verified {
            return Err(ConfigError::invalid(
                "thresholds.suspicious",
                format!(
                    "must not exceed thresholds.verified ({}), got {}",
                    self.verified, self.suspicious
                ),
            ));
        }
        Ok(())
    }
}

/// Trust scoring rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    pub min_blinks: u32,
    pub max_blinks: u32,
    pub blink_penalty: u32,
    pub panic_emotions: Vec<Emotion>,
    pub panic_penalty: u32,
    pub min_duration_seconds: f64,
    pub max_duration_seconds: f64,
    pub timeout_penalty: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_blinks: 2,
            max_blinks: 5,
            blink_penalty: 20,
            panic_emotions: vec![Emotion::Fear, Emotion::Angry, Emotion::Disgust],
            panic_penalty: 30,
            min_duration_seconds: 3.0,
            max_duration_seconds: 30.0,
            timeout_penalty: 15,
        }
    }
}

impl ScoringConfig {
    /// Whether `label` names a panic emotion. Absent and unrecognized labels
    /// never panic.
    pub fn is_panic_label(&self, label: Option<&str>) -> bool {
        label
            .and_then(Emotion::parse)
            .is_some_and(|e| self.is_panic(e))
    }

    pub fn is_panic(&self, emotion: Emotion) -> bool {
        self.panic_emotions.contains(&emotion)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_blinks > self.max_blinks {
            return Err(ConfigError::invalid(
                "scoring.min_blinks",
                format!(
                    "must not exceed scoring.max_blinks ({}), got {}",
                    self.max_blinks, self.min_blinks
                ),
            ));
        }
        for (field, penalty) in [
            ("scoring.blink_penalty", self.blink_penalty),
            ("scoring.panic_penalty", self.panic_penalty),
            ("scoring.timeout_penalty", self.timeout_penalty),
        ] {
            if penalty > u32::from(MAX_TRUST_SCORE) {
                return Err(ConfigError::invalid(
                    field,
                    format!("must be in [0, 100], got {}", penalty),
                ));
            }
        }
        if !self.min_duration_seconds.is_finite() || self.min_duration_seconds < 0.0 {
            return Err(ConfigError::invalid(
                "scoring.min_duration_seconds",
                format!("must be a non-negative number, got {}", self.min_duration_seconds),
            ));
        }
        if !self.max_duration_seconds.is_finite()
            || self.max_duration_seconds < self.min_duration_seconds
        {
            return Err(ConfigError::invalid(
                "scoring.max_duration_seconds",
                format!(
                    "must be a number >= scoring.min_duration_seconds ({}), got {}",
                    self.min_duration_seconds, self.max_duration_seconds
                ),
            ));
        }
        let unique: HashSet<_> = self.panic_emotions.iter().collect();
        if unique.len() != self.panic_emotions.len() {
            return Err(ConfigError::invalid(
                "scoring.panic_emotions",
                "must not contain duplicates",
            ));
        }
        Ok(())
    }
}

/// Certificate issuer metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CertificateSettings {
    pub issuer: String,
    pub schema_version: String,
    pub validity_days: u32,
}

impl Default for CertificateSettings {
    fn default() -> Self {
        Self {
            issuer: "ConsentShield Verification System".into(),
            schema_version: "1.0.0".into(),
            validity_days: 365,
        }
    }
}

impl CertificateSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.issuer.trim().is_empty() {
            return Err(ConfigError::invalid("certificate.issuer", "must not be empty"));
        }
        if self.schema_version.trim().is_empty() {
            return Err(ConfigError::invalid(
                "certificate.schema_version",
                "must not be empty",
            ));
        }
        Ok(())
    }
}

/// Fixed human-readable rationale per status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatusMessages {
    pub verified: String,
    pub suspicious: String,
    pub blocked: String,
}

impl Default for StatusMessages {
    fn default() -> Self {
        Self {
            verified: "Consent verified successfully. All liveness checks passed.".into(),
            suspicious: "Consent verification requires manual review. Some anomalies detected."
                .into(),
            blocked: "Consent verification failed. Potential coercion or manipulation detected."
                .into(),
        }
    }
}

impl StatusMessages {
    pub fn message(&self, status: Status) -> &str {
        match status {
            Status::Verified => &self.verified,
            Status::Suspicious => &self.suspicious,
            Status::Blocked => &self.blocked,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, msg) in [
            ("status_messages.verified", &self.verified),
            ("status_messages.suspicious", &self.suspicious),
            ("status_messages.blocked", &self.blocked),
        ] {
            if msg.trim().is_empty() {
                return Err(ConfigError::invalid(field, "must not be empty"));
            }
        }
        Ok(())
    }
}
