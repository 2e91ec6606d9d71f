//! Consent session types.
//!
//! Signals arrive from an external liveness detector; this crate only
//! consumes them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::FieldViolation;

/// Upper bound of the trust score range.
pub const MAX_TRUST_SCORE: u8 = 100;

/// Integer trust score in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct TrustScore(u8);

impl TrustScore {
    pub const MIN: TrustScore = TrustScore(0);
    pub const MAX: TrustScore = TrustScore(MAX_TRUST_SCORE);

    /// Returns `None` when `value` is outside `[0, 100]`.
    pub fn new(value: i64) -> Option<Self> {
        if (0..=i64::from(MAX_TRUST_SCORE)).contains(&value) {
            Some(Self(value as u8))
        } else {
            None
        }
    }

    /// Clamp an arbitrary running total into range.
    pub fn saturating(value: i64) -> Self {
        Self(value.clamp(0, i64::from(MAX_TRUST_SCORE)) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for TrustScore {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(i64::from(value))
            .ok_or_else(|| format!("trust score {} outside [0, {}]", value, MAX_TRUST_SCORE))
    }
}

impl From<TrustScore> for u8 {
    fn from(score: TrustScore) -> Self {
        score.0
    }
}

impl fmt::Display for TrustScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Terminal classification of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Verified,
    Suspicious,
    Blocked,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Verified => "VERIFIED",
            Status::Suspicious => "SUSPICIOUS",
            Status::Blocked => "BLOCKED",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Emotion labels the detector can emit. Matching is case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Neutral,
    Sad,
    Surprise,
    Fear,
    #[serde(alias = "anger")]
    Angry,
    Disgust,
}

impl Emotion {
    pub const ALL: [Emotion; 7] = [
        Emotion::Happy,
        Emotion::Neutral,
        Emotion::Sad,
        Emotion::Surprise,
        Emotion::Fear,
        Emotion::Angry,
        Emotion::Disgust,
    ];

    /// Parse a detector label. Unknown labels yield `None` and are treated as
    /// neutral by callers.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "happy" => Some(Emotion::Happy),
            "neutral" => Some(Emotion::Neutral),
            "sad" => Some(Emotion::Sad),
            "surprise" => Some(Emotion::Surprise),
            "fear" => Some(Emotion::Fear),
            "angry" | "anger" => Some(Emotion::Angry),
            "disgust" => Some(Emotion::Disgust),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Neutral => "neutral",
            Emotion::Sad => "sad",
            Emotion::Surprise => "surprise",
            Emotion::Fear => "fear",
            Emotion::Angry => "angry",
            Emotion::Disgust => "disgust",
        }
    }
}

impl FromStr for Emotion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown emotion label: {}", s))
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_face_detected() -> bool {
    true
}

/// Already-computed liveness signals for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSignals {
    pub blink_count: u32,
    #[serde(default, alias = "emotion", skip_serializing_if = "Option::is_none")]
    pub emotion_label: Option<String>,
    #[serde(alias = "duration")]
    pub duration_seconds: f64,
    #[serde(default = "default_face_detected")]
    pub face_detected: bool,
}

impl SessionSignals {
    pub fn new(
        blink_count: u32,
        emotion_label: Option<&str>,
        duration_seconds: f64,
        face_detected: bool,
    ) -> Self {
        Self {
            blink_count,
            emotion_label: emotion_label.map(str::to_string),
            duration_seconds,
            face_detected,
        }
    }

    pub fn emotion(&self) -> Option<Emotion> {
        self.emotion_label.as_deref().and_then(Emotion::parse)
    }
}

/// Loosely-typed request handed to the proof builder.
///
/// Numeric fields are signed so that out-of-range input survives parsing and
/// can be reported by validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phrase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trust_score: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blink_count: Option<i64>,
    #[serde(
        default,
        alias = "emotion",
        alias = "emotion_score",
        skip_serializing_if = "Option::is_none"
    )]
    pub emotion_label: Option<String>,
    #[serde(
        default,
        alias = "duration",
        alias = "duration_sec",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration_seconds: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face_detected: Option<bool>,
}

impl SessionData {
    /// Start from session context and attach raw signals.
    pub fn with_signals(mut self, signals: &SessionSignals) -> Self {
        self.blink_count = Some(i64::from(signals.blink_count));
        self.emotion_label = signals.emotion_label.clone();
        self.duration_seconds = Some(signals.duration_seconds);
        self.face_detected = Some(signals.face_detected);
        self
    }

    /// Extract fields from an arbitrary JSON object, reporting every field
    /// whose JSON type is wrong instead of failing on the first one.
    ///
    /// A non-string emotion is not an error: it is dropped and the session is
    /// treated as not panicking.
    pub fn from_json_value(value: &Value) -> (Self, Vec<FieldViolation>) {
        let mut violations = Vec::new();
        let Some(obj) = value.as_object() else {
            violations.push(FieldViolation::new(
                "session",
                "session data must be a JSON object",
            ));
            return (Self::default(), violations);
        };

        let mut string_field = |name: &'static str| -> Option<String> {
            match lookup(obj, &[name]) {
                None => None,
                Some(Value::String(s)) => Some(s.clone()),
                Some(_) => {
                    violations.push(FieldViolation::new(name, format!("{} must be a string", name)));
                    None
                }
            }
        };

        let session_id = string_field("session_id");
        let phrase = string_field("phrase");
        let timestamp = string_field("timestamp");

        let mut integer_field = |name: &'static str| -> Option<i64> {
            match lookup(obj, &[name]) {
                None => None,
                Some(v) => match integer_value(v) {
                    Some(n) => Some(n),
                    None => {
                        violations
                            .push(FieldViolation::new(name, format!("{} must be an integer", name)));
                        None
                    }
                },
            }
        };

        let trust_score = integer_field("trust_score");
        let blink_count = integer_field("blink_count");

        let emotion_label = lookup(obj, &["emotion_label", "emotion", "emotion_score"])
            .and_then(Value::as_str)
            .map(str::to_string);

        let duration_seconds = match lookup(obj, &["duration_seconds", "duration", "duration_sec"]) {
            None => None,
            Some(v) => match v.as_f64() {
                Some(d) => Some(d),
                None => {
                    violations.push(FieldViolation::new(
                        "duration_seconds",
                        "duration_seconds must be a number",
                    ));
                    None
                }
            },
        };

        let face_detected = match lookup(obj, &["face_detected"]) {
            None => None,
            Some(Value::Bool(b)) => Some(*b),
            Some(_) => {
                violations.push(FieldViolation::new(
                    "face_detected",
                    "face_detected must be a boolean",
                ));
                None
            }
        };

        (
            Self {
                session_id,
                phrase,
                timestamp,
                trust_score,
                blink_count,
                emotion_label,
                duration_seconds,
                face_detected,
            },
            violations,
        )
    }
}

/// First non-null value among `names`; later names are aliases.
fn lookup<'a>(obj: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .filter_map(|name| obj.get(*name))
        .find(|v| !v.is_null())
}

/// Integers, or floats with no fractional part.
fn integer_value(v: &Value) -> Option<i64> {
    if let Some(n) = v.as_i64() {
        return Some(n);
    }
    match v.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15 => Some(f as i64),
        _ => None,
    }
}
