//! Human-readable certificates for proof-of-consent records.
//!
//! A [`Certificate`] wraps an immutable [`ProofRecord`] with generation and
//! expiry times. It renders to HTML through a parsed [`Template`] and to the
//! API view [`CertificateJson`].

pub mod template;
pub mod templates;
pub mod writer;

use chrono::{DateTime, Days, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::crypto::canonical::truncate_hash_default;
use crate::proof::{parse_timestamp, ProofRecord};
use crate::types::{Status, TrustScore};

pub use template::{escape_html, Placeholder, Template, TemplateError, TemplateValues};
pub use writer::{
    artifact_file_name, read_artifact, stage_artifact, write_certificate, ArtifactKind,
    StagedArtifact,
};

const MISSING: &str = "No";

/// CSS class used by the built-in templates for a status.
pub fn status_class(status: Status) -> &'static str {
    match status {
        Status::Verified => "verified",
        Status::Suspicious => "suspicious",
        Status::Blocked => "blocked",
    }
}

pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Verified => "✅",
        Status::Suspicious => "⚠️",
        Status::Blocked => "❌",
    }
}

/// `January 28, 2026, 10:00:00 UTC`. Unparseable input is shown as-is.
pub fn display_timestamp(timestamp: &str) -> String {
    match parse_timestamp(timestamp) {
        Some(dt) => dt.format("%B %-d, %Y, %H:%M:%S UTC").to_string(),
        None => timestamp.to_string(),
    }
}

fn display_minutes(dt: &DateTime<Utc>) -> String {
    dt.format("%B %-d, %Y, %H:%M UTC").to_string()
}

/// Liveness metadata as reported in the JSON view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationDetails {
    pub blink_count: Option<u32>,
    pub emotion_score: Option<String>,
    pub duration: Option<f64>,
    pub face_detected: Option<bool>,
    pub panic_detected: bool,
}

/// JSON view of a certificate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificateJson {
    pub certificate_id: String,
    pub hash: String,
    pub hash_preview: String,
    pub trust_score: TrustScore,
    pub status: Status,
    pub status_message: String,
    pub timestamp: String,
    pub verification_details: VerificationDetails,
    pub issuer: String,
    pub version: String,
    pub generated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    proof: ProofRecord,
    generated_at: DateTime<Utc>,
    valid_until: Option<DateTime<Utc>>,
}

impl Certificate {
    /// `valid_until` is the proof timestamp plus `validity_days`, or `None`
    /// when the timestamp does not parse.
    pub fn from_proof(proof: ProofRecord, generated_at: DateTime<Utc>, validity_days: u32) -> Self {
        let valid_until = parse_timestamp(proof.timestamp())
            .and_then(|dt| dt.checked_add_days(Days::new(u64::from(validity_days))));
        Self {
            proof,
            generated_at,
            valid_until,
        }
    }

    pub fn proof(&self) -> &ProofRecord {
        &self.proof
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn valid_until(&self) -> Option<DateTime<Utc>> {
        self.valid_until
    }

    pub fn to_json(&self) -> CertificateJson {
        let p = &self.proof;
        CertificateJson {
            certificate_id: p.session_id().to_string(),
            hash: p.hash().to_string(),
            hash_preview: truncate_hash_default(p.hash()),
            trust_score: p.trust_score(),
            status: p.status(),
            status_message: p.status_message().to_string(),
            timestamp: p.timestamp().to_string(),
            verification_details: VerificationDetails {
                blink_count: p.blink_count(),
                emotion_score: p.emotion_label().map(str::to_string),
                duration: p.duration_seconds(),
                face_detected: p.face_detected(),
                panic_detected: p.panic_detected(),
            },
            issuer: p.issuer().to_string(),
            version: p.schema_version().to_string(),
            generated_at: self
                .generated_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            valid_until: self
                .valid_until
                .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }

    pub fn render(&self, template: &Template) -> String {
        template.render(self)
    }

    /// Render the full certificate page.
    pub fn render_html(&self) -> Result<String, TemplateError> {
        Ok(self.render(&Template::parse(templates::CERTIFICATE_HTML)?))
    }

    /// Render the minimal evidence page.
    pub fn render_evidence(&self) -> Result<String, TemplateError> {
        Ok(self.render(&Template::parse(templates::EVIDENCE_HTML)?))
    }
}

impl TemplateValues for Certificate {
    fn value(&self, placeholder: Placeholder) -> String {
        let p = &self.proof;
        match placeholder {
            Placeholder::SessionId => p.session_id().to_string(),
            Placeholder::Phrase => p.phrase().to_string(),
            Placeholder::Hash => p.hash().to_string(),
            Placeholder::HashPreview => truncate_hash_default(p.hash()),
            Placeholder::TrustScore => p.trust_score().to_string(),
            Placeholder::Status => p.status().to_string(),
            Placeholder::StatusClass => status_class(p.status()).to_string(),
            Placeholder::StatusIcon => status_icon(p.status()).to_string(),
            Placeholder::StatusMessage => p.status_message().to_string(),
            Placeholder::Timestamp => display_timestamp(p.timestamp()),
            Placeholder::GenerationTime => display_minutes(&self.generated_at),
            Placeholder::ValidUntil => self
                .valid_until
                .map_or_else(|| MISSING.to_string(), |dt| display_minutes(&dt)),
            Placeholder::BlinkCount => p
                .blink_count()
                .map_or_else(|| MISSING.to_string(), |b| b.to_string()),
            Placeholder::EmotionScore => p.emotion_label().unwrap_or(MISSING).to_string(),
            Placeholder::Duration => p
                .duration_seconds()
                .map_or_else(|| MISSING.to_string(), |d| d.to_string()),
            Placeholder::FaceDetected => match p.face_detected() {
                Some(true) => "Yes ✓".to_string(),
                _ => "No ✗".to_string(),
            },
            Placeholder::PanicDetected => {
                if p.panic_detected() {
                    "Yes ⚠️".to_string()
                } else {
                    "No ✓".to_string()
                }
            }
            Placeholder::Issuer => p.issuer().to_string(),
            Placeholder::Version => p.schema_version().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConsentConfig;
    use crate::proof::build_proof;
    use crate::types::SessionData;
    use chrono::TimeZone;

    fn proof(score: Option<i64>, emotion: Option<&str>) -> ProofRecord {
        let data = SessionData {
            session_id: Some("CS-1700000000000-0011223344556677".into()),
            phrase: Some("I consent of my own free will".into()),
            timestamp: Some("2026-01-28T10:00:00.000Z".into()),
            trust_score: score,
            emotion_label: emotion.map(str::to_string),
            ..Default::default()
        };
        build_proof(&data, &ConsentConfig::default()).unwrap()
    }

    fn generated() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 28, 10, 5, 0).unwrap()
    }

    #[test]
    fn test_display_timestamp() {
        assert_eq!(
            display_timestamp("2026-01-28T10:00:00.000Z"),
            "January 28, 2026, 10:00:00 UTC"
        );
        assert_eq!(
            display_timestamp("2026-01-28T12:00:00+02:00"),
            "January 28, 2026, 10:00:00 UTC"
        );
        assert_eq!(
            display_timestamp("2026-01-28T10:00:00"),
            "January 28, 2026, 10:00:00 UTC"
        );
        assert_eq!(display_timestamp("not a date"), "not a date");
    }

    #[test]
    fn test_valid_until_adds_days() {
        let cert = Certificate::from_proof(proof(Some(100), None), generated(), 365);
        assert_eq!(
            cert.valid_until(),
            Some(Utc.with_ymd_and_hms(2027, 1, 28, 10, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_json_view() {
        let cert = Certificate::from_proof(proof(Some(100), None), generated(), 365);
        let json = cert.to_json();
        assert_eq!(json.certificate_id, "CS-1700000000000-0011223344556677");
        assert_eq!(json.hash_preview, "10cf347a...a9793fa5");
        assert_eq!(json.status, Status::Verified);
        assert_eq!(json.generated_at, "2026-01-28T10:05:00.000Z");
        assert_eq!(json.valid_until.as_deref(), Some("2027-01-28T10:00:00.000Z"));
        assert_eq!(json.version, "1.0.0");
        assert!(!json.verification_details.panic_detected);
    }

    #[test]
    fn test_certificate_html_has_no_placeholders_left() {
        let cert = Certificate::from_proof(proof(Some(100), None), generated(), 365);
        let html = cert.render_html().unwrap();
        assert!(!html.contains("{{"));
        assert!(html.contains("10cf347af06d434c39040af784c60fa6fbe9594eed85e478c9da0ff2a9793fa5"));
        assert!(html.contains("class=\"status verified\""));
        assert!(html.contains("January 28, 2026, 10:00:00 UTC"));
        assert!(html.contains("ConsentShield Verification System"));
    }

    #[test]
    fn test_missing_metadata_renders_no() {
        let cert = Certificate::from_proof(proof(Some(100), None), generated(), 365);
        assert_eq!(cert.value(Placeholder::BlinkCount), "No");
        assert_eq!(cert.value(Placeholder::EmotionScore), "No");
        assert_eq!(cert.value(Placeholder::Duration), "No");
        assert_eq!(cert.value(Placeholder::FaceDetected), "No ✗");
    }

    #[test]
    fn test_blocked_styling() {
        let cert = Certificate::from_proof(proof(Some(100), Some("fear")), generated(), 365);
        assert_eq!(cert.value(Placeholder::StatusClass), "blocked");
        assert_eq!(cert.value(Placeholder::StatusIcon), "❌");
        assert_eq!(cert.value(Placeholder::PanicDetected), "Yes ⚠️");
        let html = cert.render_html().unwrap();
        assert!(html.contains("BLOCKED"));
    }

    #[test]
    fn test_evidence_page_lists_phrase() {
        let cert = Certificate::from_proof(proof(Some(80), None), generated(), 365);
        let html = cert.render_evidence().unwrap();
        assert!(html.contains("I consent of my own free will"));
        assert!(html.contains("11c6a7a1fdd9fd21bf2161b667d637ce3cdc9d48954dc3756ffa7b8f6575d005"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_builtin_templates_parse() {
        assert!(Template::parse(templates::CERTIFICATE_HTML).is_ok());
        assert!(Template::parse(templates::EVIDENCE_HTML).is_ok());
    }
}
