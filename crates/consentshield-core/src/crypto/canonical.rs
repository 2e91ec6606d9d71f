//! Canonical field-order hashing for proof-of-consent records.
//!
//! ```text
//! hash = lowercase_hex( SHA256( value[f0] + SEP + value[f1] + SEP + ... ) )
//! ```
//!
//! # Invariants
//!
//! 1. Field order and separator come from an explicit, versioned
//!    [`HashSchema`]. Changing either breaks verification of every proof
//!    issued under the old schema, so a change means a new `version`.
//!    `validate` refuses a config that reuses a built-in version name with a
//!    different layout.
//! 2. An absent value serializes to the empty string. A missing field and an
//!    empty-string field therefore hash identically. This is relied upon by
//!    issued proofs and must not be "fixed".
//! 3. Hashing is a pure function of the record and the schema.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::ConfigError;

/// Default field separator.
pub const DEFAULT_SEPARATOR: char = '|';

/// Default number of leading/trailing characters kept by [`truncate_hash`].
pub const DEFAULT_TRUNCATE_LEN: usize = 8;

/// A field that can participate in the canonical hash input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashField {
    SessionId,
    Phrase,
    Timestamp,
    TrustScore,
    BlinkCount,
    EmotionLabel,
    DurationSeconds,
    FaceDetected,
}

impl HashField {
    pub fn as_str(&self) -> &'static str {
        match self {
            HashField::SessionId => "session_id",
            HashField::Phrase => "phrase",
            HashField::Timestamp => "timestamp",
            HashField::TrustScore => "trust_score",
            HashField::BlinkCount => "blink_count",
            HashField::EmotionLabel => "emotion_label",
            HashField::DurationSeconds => "duration_seconds",
            HashField::FaceDetected => "face_detected",
        }
    }
}

impl fmt::Display for HashField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything whose fields can be fed to the canonical hasher.
///
/// Return `None` for absent values; they hash as the empty string.
pub trait HashFields {
    fn field_value(&self, field: HashField) -> Option<String>;
}

/// Versioned field order + separator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HashSchema {
    pub version: String,
    pub fields: Vec<HashField>,
    pub separator: char,
}

impl Default for HashSchema {
    fn default() -> Self {
        Self::v1()
    }
}

impl HashSchema {
    /// The four-field schema used for proofs: stable regardless of which
    /// optional telemetry a session carried.
    pub fn v1() -> Self {
        Self {
            version: "v1".into(),
            fields: vec![
                HashField::SessionId,
                HashField::Phrase,
                HashField::Timestamp,
                HashField::TrustScore,
            ],
            separator: DEFAULT_SEPARATOR,
        }
    }

    /// Eight-field schema binding the echoed liveness telemetry as well.
    pub fn extended_v1() -> Self {
        Self {
            version: "extended-v1".into(),
            fields: vec![
                HashField::SessionId,
                HashField::Phrase,
                HashField::Timestamp,
                HashField::TrustScore,
                HashField::BlinkCount,
                HashField::EmotionLabel,
                HashField::DurationSeconds,
                HashField::FaceDetected,
            ],
            separator: DEFAULT_SEPARATOR,
        }
    }

    /// Look up a built-in schema by version.
    pub fn builtin(version: &str) -> Option<Self> {
        match version {
            "v1" => Some(Self::v1()),
            "extended-v1" => Some(Self::extended_v1()),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version.trim().is_empty() {
            return Err(ConfigError::invalid("hash.version", "must not be empty"));
        }
        if self.fields.is_empty() {
            return Err(ConfigError::invalid(
                "hash.fields",
                "must list at least one field",
            ));
        }
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field) {
                return Err(ConfigError::invalid(
                    "hash.fields",
                    format!("duplicate field: {}", field),
                ));
            }
        }
        if self.separator.is_alphanumeric() || self.separator.is_whitespace() {
            return Err(ConfigError::invalid(
                "hash.separator",
                format!(
                    "must be a punctuation character, got {:?}",
                    self.separator
                ),
            ));
        }
        if let Some(builtin) = Self::builtin(&self.version) {
            if builtin.fields != self.fields || builtin.separator != self.separator {
                return Err(ConfigError::invalid(
                    "hash.version",
                    format!(
                        "'{}' is a built-in schema and cannot be redefined; choose a new version for a different field order or separator",
                        self.version
                    ),
                ));
            }
        }
        Ok(())
    }

    /// The exact string that gets digested.
    pub fn canonical_input<R: HashFields + ?Sized>(&self, record: &R) -> String {
        let mut buf = [0u8; 4];
        let sep: &str = self.separator.encode_utf8(&mut buf);
        self.fields
            .iter()
            .map(|f| record.field_value(*f).unwrap_or_default())
            .collect::<Vec<_>>()
            .join(sep)
    }
}

/// Compute the lower-case hex SHA-256 over the schema's fields.
pub fn compute_hash<R: HashFields + ?Sized>(record: &R, schema: &HashSchema) -> String {
    let input = schema.canonical_input(record);
    hex::encode(Sha256::digest(input.as_bytes()))
}

/// Recompute the hash and compare it with `expected`.
///
/// Mismatch is a `false`, never an error. The comparison inspects every byte
/// regardless of where the first difference is.
pub fn verify_hash<R: HashFields + ?Sized>(
    record: &R,
    schema: &HashSchema,
    expected: &str,
) -> bool {
    let computed = compute_hash(record, schema);
    constant_time_eq(computed.as_bytes(), expected.as_bytes())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Shorten a hash for display: `first(n) + "..." + last(n)`.
///
/// Returns the input unchanged when it is no longer than `2n` characters.
pub fn truncate_hash(hash: &str, n: usize) -> String {
    let len = hash.chars().count();
    if len <= n.saturating_mul(2) {
        return hash.to_string();
    }
    let head: String = hash.chars().take(n).collect();
    let tail: String = hash.chars().skip(len - n).collect();
    format!("{}...{}", head, tail)
}

/// [`truncate_hash`] with the default length of 8.
pub fn truncate_hash_default(hash: &str) -> String {
    truncate_hash(hash, DEFAULT_TRUNCATE_LEN)
}
