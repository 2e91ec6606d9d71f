//! Proof-of-consent construction.
//!
//! `build_proof` validates session data (collecting every violation), fills a
//! missing timestamp, derives the panic flag, resolves the trust score,
//! classifies, hashes the configured field subset and returns an immutable
//! [`ProofRecord`].
//!
//! # Security Invariants
//!
//! 1. No partial proof is ever returned: validation fails atomically.
//! 2. `ProofRecord` has no mutators. Any change to a hashed field would
//!    invalidate `hash`.
//! 3. The panic flag comes from the emotion label alone, independent of
//!    whether the scorer already penalized it.
//! 4. The verdict fields (`status`, `status_reason`, `status_message`,
//!    `panic_detected`) are outside the hash. `check_integrity` re-derives
//!    them, so a record read from disk is trusted only after it passes.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ConsentConfig;
use crate::crypto::canonical::{compute_hash, verify_hash, HashField, HashFields, HashSchema};
use crate::error::{FieldViolation, IntegrityError, ValidationError};
use crate::status::{classify_with_reason, StatusReason};
use crate::trust;
use crate::types::{SessionData, SessionSignals, Status, TrustScore};

/// The durable, auditable proof that an evaluation happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofRecord {
    session_id: String,
    phrase: String,
    timestamp: String,
    trust_score: TrustScore,
    status: Status,
    status_message: String,
    status_reason: StatusReason,
    hash: String,
    hash_version: String,
    panic_detected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    blink_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    emotion_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    duration_seconds: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    face_detected: Option<bool>,
    issuer: String,
    schema_version: String,
}

impl ProofRecord {
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn trust_score(&self) -> TrustScore {
        self.trust_score
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn status_reason(&self) -> StatusReason {
        self.status_reason
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Version of the [`HashSchema`] that produced `hash`.
    pub fn hash_version(&self) -> &str {
        &self.hash_version
    }

    pub fn panic_detected(&self) -> bool {
        self.panic_detected
    }

    pub fn blink_count(&self) -> Option<u32> {
        self.blink_count
    }

    pub fn emotion_label(&self) -> Option<&str> {
        self.emotion_label.as_deref()
    }

    pub fn duration_seconds(&self) -> Option<f64> {
        self.duration_seconds
    }

    pub fn face_detected(&self) -> Option<bool> {
        self.face_detected
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn schema_version(&self) -> &str {
        &self.schema_version
    }

    /// Recompute the hash under `schema` and compare with the stored one.
    ///
    /// Only the schema's fields are covered. Use [`check_integrity`] before
    /// trusting `status` or `panic_detected`.
    ///
    /// [`check_integrity`]: ProofRecord::check_integrity
    pub fn verify(&self, schema: &HashSchema) -> bool {
        verify_hash(self, schema, &self.hash)
    }

    /// Hash check plus [`check_consistency`](ProofRecord::check_consistency).
    pub fn check_integrity(
        &self,
        schema: &HashSchema,
        config: &ConsentConfig,
    ) -> Result<(), IntegrityError> {
        if !self.verify(schema) {
            return Err(IntegrityError::HashMismatch {
                version: schema.version.clone(),
            });
        }
        self.check_consistency(config)
    }

    /// Re-derive the unhashed verdict fields and compare them with the
    /// recorded ones: panic flag from the emotion label, status and reason
    /// from score and panic flag, message from status.
    pub fn check_consistency(&self, config: &ConsentConfig) -> Result<(), IntegrityError> {
        let expected_panic = config.scoring.is_panic_label(self.emotion_label.as_deref());
        if self.panic_detected != expected_panic {
            return Err(IntegrityError::PanicFlag {
                recorded: self.panic_detected,
                expected: expected_panic,
            });
        }

        let expected =
            classify_with_reason(self.trust_score, self.panic_detected, &config.thresholds);
        if expected.status != self.status || expected.reason != self.status_reason {
            return Err(IntegrityError::Status {
                recorded: self.status,
                recorded_reason: self.status_reason,
                expected: expected.status,
                expected_reason: expected.reason,
            });
        }

        if config.status_messages.message(self.status) != self.status_message {
            return Err(IntegrityError::StatusMessage {
                status: self.status,
            });
        }
        Ok(())
    }
}

impl HashFields for ProofRecord {
    fn field_value(&self, field: HashField) -> Option<String> {
        match field {
            HashField::SessionId => Some(self.session_id.clone()),
            HashField::Phrase => Some(self.phrase.clone()),
            HashField::Timestamp => Some(self.timestamp.clone()),
            HashField::TrustScore => Some(self.trust_score.to_string()),
            HashField::BlinkCount => self.blink_count.map(|b| b.to_string()),
            HashField::EmotionLabel => self.emotion_label.clone(),
            HashField::DurationSeconds => self.duration_seconds.map(|d| d.to_string()),
            HashField::FaceDetected => self.face_detected.map(|f| f.to_string()),
        }
    }
}

impl HashFields for SessionData {
    fn field_value(&self, field: HashField) -> Option<String> {
        match field {
            HashField::SessionId => self.session_id.clone(),
            HashField::Phrase => self.phrase.clone(),
            HashField::Timestamp => self.timestamp.clone(),
            HashField::TrustScore => self.trust_score.map(|s| s.to_string()),
            HashField::BlinkCount => self.blink_count.map(|b| b.to_string()),
            HashField::EmotionLabel => self.emotion_label.clone(),
            HashField::DurationSeconds => self.duration_seconds.map(|d| d.to_string()),
            HashField::FaceDetected => self.face_detected.map(|f| f.to_string()),
        }
    }
}

/// Outcome of [`validate_session_data`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<FieldViolation>,
}

impl ValidationReport {
    fn from_violations(errors: Vec<FieldViolation>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.valid {
            Ok(())
        } else {
            Err(ValidationError::new(self.errors))
        }
    }
}

enum ScoreSource {
    Supplied(TrustScore),
    Derived(SessionSignals),
}

struct Validated<'a> {
    session_id: &'a str,
    phrase: &'a str,
    timestamp: Option<&'a str>,
    blink_count: Option<u32>,
    score: ScoreSource,
}

/// Parse an ISO-8601 date-time. RFC 3339 is tried first, then forms with a
/// compact offset (`+0100`), then a local date-time with no offset, which is
/// read as UTC.
pub fn parse_timestamp(ts: &str) -> Option<DateTime<Utc>> {
    const LOCAL: &str = "%Y-%m-%dT%H:%M:%S%.f";
    const COMPACT_OFFSET: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(ts, COMPACT_OFFSET) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(ts, LOCAL)
        .ok()
        .map(|naive| naive.and_utc())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

fn validate(data: &SessionData) -> Result<Validated<'_>, Vec<FieldViolation>> {
    let mut errors = Vec::new();

    let session_id = non_blank(data.session_id.as_deref());
    if session_id.is_none() {
        errors.push(FieldViolation::missing("session_id"));
    }

    let phrase = non_blank(data.phrase.as_deref());
    if phrase.is_none() {
        errors.push(FieldViolation::missing("phrase"));
    }

    // Absent or blank timestamps are filled at build time.
    let timestamp = non_blank(data.timestamp.as_deref());
    if let Some(ts) = timestamp {
        if parse_timestamp(ts).is_none() {
            errors.push(FieldViolation::new(
                "timestamp",
                format!("timestamp must be an ISO-8601 date-time, got '{}'", ts),
            ));
        }
    }

    let blink_count = match data.blink_count {
        None => None,
        Some(n) if n < 0 => {
            errors.push(FieldViolation::new(
                "blink_count",
                "blink_count must be a non-negative number",
            ));
            None
        }
        // Anything past u32::MAX is far above any blink ceiling and scores 0.
        Some(n) => Some(u32::try_from(n).unwrap_or(u32::MAX)),
    };

    let duration = match data.duration_seconds {
        Some(d) if !d.is_finite() || d < 0.0 => {
            errors.push(FieldViolation::new(
                "duration_seconds",
                "duration_seconds must be a non-negative number",
            ));
            None
        }
        other => other,
    };

    let score = match data.trust_score {
        Some(raw) => match TrustScore::new(raw) {
            Some(s) => Some(ScoreSource::Supplied(s)),
            None => {
                errors.push(FieldViolation::new(
                    "trust_score",
                    "trust_score must be between 0 and 100",
                ));
                None
            }
        },
        None => match (blink_count, duration) {
            (Some(blinks), Some(duration_seconds)) => {
                Some(ScoreSource::Derived(SessionSignals {
                    blink_count: blinks,
                    emotion_label: data.emotion_label.clone(),
                    duration_seconds,
                    face_detected: data.face_detected.unwrap_or(true),
                }))
            }
            _ => {
                // Only report the score as missing when the raw signals are
                // absent, not when they were present but invalid.
                if data.blink_count.is_none() || data.duration_seconds.is_none() {
                    errors.push(FieldViolation::new(
                        "trust_score",
                        "Missing required field: trust_score (or blink_count and duration_seconds to derive it)",
                    ));
                }
                None
            }
        },
    };

    match (session_id, phrase, score) {
        (Some(session_id), Some(phrase), Some(score)) if errors.is_empty() => Ok(Validated {
            session_id,
            phrase,
            timestamp,
            blink_count,
            score,
        }),
        _ => Err(errors),
    }
}

/// Check session data without building anything.
pub fn validate_session_data(data: &SessionData) -> ValidationReport {
    match validate(data) {
        Ok(_) => ValidationReport::from_violations(Vec::new()),
        Err(errors) => ValidationReport::from_violations(errors),
    }
}

/// Build a proof stamped with the current time when no timestamp is given.
pub fn build_proof(data: &SessionData, config: &ConsentConfig) -> Result<ProofRecord, ValidationError> {
    build_proof_at(data, config, Utc::now())
}

/// Build a proof, using `now` for a missing timestamp.
pub fn build_proof_at(
    data: &SessionData,
    config: &ConsentConfig,
    now: DateTime<Utc>,
) -> Result<ProofRecord, ValidationError> {
    let validated = validate(data).map_err(ValidationError::new)?;

    let timestamp = match validated.timestamp {
        Some(ts) => ts.to_string(),
        None => now.to_rfc3339_opts(SecondsFormat::Millis, true),
    };

    let panic_detected = config
        .scoring
        .is_panic_label(data.emotion_label.as_deref());

    let (trust_score, face_detected) = match &validated.score {
        ScoreSource::Supplied(score) => (*score, data.face_detected),
        ScoreSource::Derived(signals) => (
            trust::score(signals, &config.scoring),
            Some(signals.face_detected),
        ),
    };

    let classification = classify_with_reason(trust_score, panic_detected, &config.thresholds);

    let mut record = ProofRecord {
        session_id: validated.session_id.to_string(),
        phrase: validated.phrase.to_string(),
        timestamp,
        trust_score,
        status: classification.status,
        status_message: config
            .status_messages
            .message(classification.status)
            .to_string(),
        status_reason: classification.reason,
        hash: String::new(),
        hash_version: config.hash.version.clone(),
        panic_detected,
        blink_count: validated.blink_count,
        emotion_label: data.emotion_label.clone(),
        duration_seconds: data.duration_seconds,
        face_detected,
        issuer: config.certificate.issuer.clone(),
        schema_version: config.certificate.schema_version.clone(),
    };
    record.hash = compute_hash(&record, &config.hash);

    tracing::debug!(
        session_id = %record.session_id,
        trust_score = %record.trust_score,
        status = %record.status,
        reason = %record.status_reason,
        "built proof of consent"
    );

    Ok(record)
}

/// Build a proof from raw JSON. JSON type errors and validation errors are
/// reported together.
pub fn build_proof_from_value(
    value: &Value,
    config: &ConsentConfig,
) -> Result<ProofRecord, ValidationError> {
    let (data, mut violations) = SessionData::from_json_value(value);
    if !violations.is_empty() {
        if let Err(errors) = validate(&data) {
            for error in errors {
                if !violations.iter().any(|v| v.field == error.field) {
                    violations.push(error);
                }
            }
        }
        return Err(ValidationError::new(violations));
    }
    build_proof(&data, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn base() -> SessionData {
        SessionData {
            session_id: Some("CS-1700000000000-0011223344556677".into()),
            phrase: Some("I consent of my own free will".into()),
            timestamp: Some("2026-01-28T10:00:00.000Z".into()),
            ..Default::default()
        }
    }

    fn with_signals(blinks: i64, emotion: &str, duration: f64, face: bool) -> SessionData {
        SessionData {
            blink_count: Some(blinks),
            emotion_label: Some(emotion.into()),
            duration_seconds: Some(duration),
            face_detected: Some(face),
            ..base()
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 45).unwrap()
    }

    #[test]
    fn test_scenario_verified() {
        let proof = build_proof(&with_signals(3, "happy", 8.0, true), &ConsentConfig::default())
            .unwrap();
        assert_eq!(proof.trust_score().value(), 100);
        assert_eq!(proof.status(), Status::Verified);
        assert_eq!(proof.status_reason(), StatusReason::MeetsVerifiedThreshold);
        assert!(!proof.panic_detected());
    }

    #[test]
    fn test_scenario_blocked_by_blinks_and_panic() {
        let proof =
            build_proof(&with_signals(7, "fear", 6.0, true), &ConsentConfig::default()).unwrap();
        assert_eq!(proof.trust_score().value(), 0);
        assert_eq!(proof.status(), Status::Blocked);
        assert!(proof.panic_detected());
        assert_eq!(proof.status_reason(), StatusReason::PanicOverride);
    }

    #[test]
    fn test_scenario_low_blinks_still_verified() {
        let proof = build_proof(&with_signals(1, "neutral", 5.0, true), &ConsentConfig::default())
            .unwrap();
        assert_eq!(proof.trust_score().value(), 80);
        assert_eq!(proof.status(), Status::Verified);
    }

    #[test]
    fn test_golden_hash_over_four_fields() {
        let data = SessionData {
            trust_score: Some(100),
            ..base()
        };
        let proof = build_proof(&data, &ConsentConfig::default()).unwrap();
        assert_eq!(
            proof.hash(),
            "10cf347af06d434c39040af784c60fa6fbe9594eed85e478c9da0ff2a9793fa5"
        );
        assert_eq!(proof.hash_version(), "v1");
    }

    #[test]
    fn test_supplied_score_is_used_over_signals() {
        let data = SessionData {
            trust_score: Some(55),
            ..with_signals(3, "happy", 8.0, true)
        };
        let proof = build_proof(&data, &ConsentConfig::default()).unwrap();
        assert_eq!(proof.trust_score().value(), 55);
        assert_eq!(proof.status(), Status::Suspicious);
    }

    #[test]
    fn test_panic_overrides_perfect_supplied_score() {
        let data = SessionData {
            trust_score: Some(100),
            emotion_label: Some("Disgust".into()),
            ..base()
        };
        let proof = build_proof(&data, &ConsentConfig::default()).unwrap();
        assert_eq!(proof.status(), Status::Blocked);
        assert_eq!(proof.status_reason(), StatusReason::PanicOverride);
        assert!(proof.status_message().contains("coercion"));
    }

    #[test]
    fn test_missing_trust_score_is_named() {
        let report = validate_session_data(&base());
        assert!(!report.valid);
        assert!(report.errors.iter().any(|e| e.field == "trust_score"));
    }

    #[test]
    fn test_all_violations_are_collected() {
        let data = SessionData {
            trust_score: Some(150),
            blink_count: Some(-1),
            duration_seconds: Some(-3.0),
            timestamp: Some("yesterday".into()),
            ..Default::default()
        };
        let err = build_proof(&data, &ConsentConfig::default()).unwrap_err();
        let fields: Vec<&str> = err.violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "session_id",
                "phrase",
                "timestamp",
                "blink_count",
                "duration_seconds",
                "trust_score"
            ]
        );
    }

    #[test]
    fn test_invalid_signal_does_not_also_report_missing_score() {
        let data = SessionData {
            blink_count: Some(-2),
            duration_seconds: Some(5.0),
            ..base()
        };
        let report = validate_session_data(&data);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].field, "blink_count");
    }

    #[test]
    fn test_huge_blink_count_scores_zero() {
        let data = SessionData {
            blink_count: Some(5_000_000_000),
            emotion_label: Some("happy".into()),
            duration_seconds: Some(8.0),
            ..base()
        };
        assert!(validate_session_data(&data).valid);
        let proof = build_proof(&data, &ConsentConfig::default()).unwrap();
        assert_eq!(proof.trust_score(), TrustScore::MIN);
        assert_eq!(proof.status(), Status::Blocked);
        assert_eq!(proof.blink_count(), Some(u32::MAX));
    }

    #[test]
    fn test_missing_timestamp_is_filled() {
        let data = SessionData {
            timestamp: None,
            trust_score: Some(90),
            ..base()
        };
        let proof = build_proof_at(&data, &ConsentConfig::default(), now()).unwrap();
        assert_eq!(proof.timestamp(), "2026-03-01T12:30:45.000Z");
        assert!(proof.verify(&HashSchema::v1()));
    }

    #[test]
    fn test_blank_timestamp_is_filled() {
        let data = SessionData {
            timestamp: Some("   ".into()),
            trust_score: Some(90),
            ..base()
        };
        let proof = build_proof_at(&data, &ConsentConfig::default(), now()).unwrap();
        assert_eq!(proof.timestamp(), "2026-03-01T12:30:45.000Z");
    }

    #[test]
    fn test_iso_timestamps_without_offset_are_accepted() {
        for ts in [
            "2026-01-28T10:00:00",
            "2026-01-28T10:00:00.250",
            "2026-01-28T11:00:00+0100",
            "2026-01-28T10:00:00.000Z",
        ] {
            let data = SessionData {
                timestamp: Some(ts.into()),
                trust_score: Some(90),
                ..base()
            };
            let report = validate_session_data(&data);
            assert!(report.valid, "{ts}: {:?}", report.errors);
            let proof = build_proof(&data, &ConsentConfig::default()).unwrap();
            // Hashed verbatim, never normalized.
            assert_eq!(proof.timestamp(), ts);
        }
        assert_eq!(
            parse_timestamp("2026-01-28T10:00:00"),
            parse_timestamp("2026-01-28T11:00:00+0100")
        );
        assert!(parse_timestamp("2026-01-28").is_none());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_input_is_not_mutated() {
        let data = SessionData {
            timestamp: None,
            trust_score: Some(90),
            ..base()
        };
        let before = data.clone();
        build_proof(&data, &ConsentConfig::default()).unwrap();
        assert_eq!(data, before);
    }

    #[test]
    fn test_derived_score_defaults_face_detected() {
        let data = SessionData {
            blink_count: Some(3),
            duration_seconds: Some(8.0),
            ..base()
        };
        let proof = build_proof(&data, &ConsentConfig::default()).unwrap();
        assert_eq!(proof.trust_score().value(), 100);
        assert_eq!(proof.face_detected(), Some(true));
        assert_eq!(proof.emotion_label(), None);
    }

    #[test]
    fn test_echoed_metadata() {
        let proof = build_proof(&with_signals(4, "Surprise", 12.5, true), &ConsentConfig::default())
            .unwrap();
        assert_eq!(proof.blink_count(), Some(4));
        assert_eq!(proof.emotion_label(), Some("Surprise"));
        assert_eq!(proof.duration_seconds(), Some(12.5));
        assert_eq!(proof.issuer(), "ConsentShield Verification System");
        assert_eq!(proof.schema_version(), "1.0.0");
    }

    #[test]
    fn test_extended_schema_binds_telemetry() {
        let config = ConsentConfig {
            hash: HashSchema::extended_v1(),
            ..ConsentConfig::default()
        };
        let proof = build_proof(&with_signals(3, "happy", 8.0, true), &config).unwrap();
        assert_eq!(proof.hash_version(), "extended-v1");
        assert!(proof.verify(&HashSchema::extended_v1()));
        assert!(!proof.verify(&HashSchema::v1()));
    }

    #[test]
    fn test_proof_json_roundtrip_still_verifies() {
        let proof = build_proof(&with_signals(3, "happy", 8.0, true), &ConsentConfig::default())
            .unwrap();
        let json = serde_json::to_string(&proof).unwrap();
        let back: ProofRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, proof);
        assert!(back.verify(&HashSchema::v1()));
    }

    #[test]
    fn test_tampered_json_fails_verification() {
        let proof = build_proof(&with_signals(3, "happy", 8.0, true), &ConsentConfig::default())
            .unwrap();
        let mut json = serde_json::to_value(&proof).unwrap();
        json["trust_score"] = json!(99);
        let tampered: ProofRecord = serde_json::from_value(json).unwrap();
        assert!(!tampered.verify(&HashSchema::v1()));
    }

    fn forge(proof: &ProofRecord, field: &str, value: serde_json::Value) -> ProofRecord {
        let mut json = serde_json::to_value(proof).unwrap();
        json[field] = value;
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_built_proof_passes_integrity_check() {
        let config = ConsentConfig::default();
        for data in [
            with_signals(3, "happy", 8.0, true),
            with_signals(7, "fear", 6.0, true),
            with_signals(1, "neutral", 5.0, true),
        ] {
            let proof = build_proof(&data, &config).unwrap();
            assert_eq!(proof.check_integrity(&HashSchema::v1(), &config), Ok(()));
        }
    }

    #[test]
    fn test_forged_status_is_detected() {
        let config = ConsentConfig::default();
        let data = SessionData {
            trust_score: Some(0),
            ..base()
        };
        let proof = build_proof(&data, &config).unwrap();
        assert_eq!(proof.status(), Status::Blocked);

        let forged = forge(&proof, "status", json!("VERIFIED"));
        let forged = forge(
            &forged,
            "status_message",
            json!(config.status_messages.message(Status::Verified)),
        );
        // The v1 hash does not bind the verdict.
        assert!(forged.verify(&HashSchema::v1()));
        assert!(matches!(
            forged.check_integrity(&HashSchema::v1(), &config),
            Err(IntegrityError::Status {
                recorded: Status::Verified,
                expected: Status::Blocked,
                ..
            })
        ));
    }

    #[test]
    fn test_forged_panic_flag_and_message_are_detected() {
        let config = ConsentConfig::default();
        let proof = build_proof(&with_signals(7, "fear", 6.0, true), &config).unwrap();

        let cleared = forge(&proof, "panic_detected", json!(false));
        assert_eq!(
            cleared.check_consistency(&config),
            Err(IntegrityError::PanicFlag {
                recorded: false,
                expected: true
            })
        );

        let reworded = forge(&proof, "status_message", json!("All good"));
        assert_eq!(
            reworded.check_consistency(&config),
            Err(IntegrityError::StatusMessage {
                status: Status::Blocked
            })
        );
    }

    #[test]
    fn test_integrity_reports_hash_mismatch_first() {
        let config = ConsentConfig::default();
        let proof = build_proof(&with_signals(3, "happy", 8.0, true), &config).unwrap();
        let tampered = forge(&proof, "trust_score", json!(99));
        assert!(matches!(
            tampered.check_integrity(&HashSchema::v1(), &config),
            Err(IntegrityError::HashMismatch { .. })
        ));
    }

    #[test]
    fn test_from_value_merges_type_and_rule_violations() {
        let err = build_proof_from_value(
            &json!({"session_id": "CS-1", "trust_score": "high"}),
            &ConsentConfig::default(),
        )
        .unwrap_err();
        let fields: Vec<&str> = err.violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["trust_score", "phrase"]);
    }

    #[test]
    fn test_from_value_builds_with_aliases() {
        let proof = build_proof_from_value(
            &json!({
                "session_id": "CS-1",
                "phrase": "I consent of my own free will",
                "timestamp": "2026-01-28T10:00:00.000Z",
                "blink_count": 3,
                "emotion_score": "happy",
                "duration": 8,
                "face_detected": true
            }),
            &ConsentConfig::default(),
        )
        .unwrap();
        assert_eq!(proof.trust_score().value(), 100);
        assert_eq!(proof.duration_seconds(), Some(8.0));
    }
}
