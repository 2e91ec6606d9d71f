//! Trust scoring.
//!
//! Maps liveness signals to a score in `[0, 100]`. Rules run in a fixed
//! order because two of them are automatic fails that discard everything
//! before them:
//!
//! 1. start at 100
//! 2. no face detected → 0
//! 3. fewer blinks than `min_blinks` → `-blink_penalty`
//! 4. more blinks than `max_blinks` → 0
//! 5. panic emotion → `-panic_penalty`
//! 6. duration outside `[min, max]` → `-timeout_penalty`
//! 7. clamp to `[0, 100]`
//!
//! Unknown emotion labels count as neutral.

use serde::Serialize;

use crate::config::ScoringConfig;
use crate::types::{Emotion, SessionSignals, TrustScore, MAX_TRUST_SCORE};

/// One rule that fired while scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ScoreAdjustment {
    /// Automatic fail.
    NoFace,
    TooFewBlinks { blinks: u32, penalty: u32 },
    /// Automatic fail.
    TooManyBlinks { blinks: u32 },
    PanicEmotion { emotion: Emotion, penalty: u32 },
    DurationOutOfWindow { penalty: u32 },
}

impl ScoreAdjustment {
    pub fn is_automatic_fail(&self) -> bool {
        matches!(self, Self::NoFace | Self::TooManyBlinks { .. })
    }

    pub fn describe(&self) -> String {
        match self {
            Self::NoFace => "no face detected (automatic fail)".to_string(),
            Self::TooFewBlinks { blinks, penalty } => {
                format!("too few blinks ({}): -{}", blinks, penalty)
            }
            Self::TooManyBlinks { blinks } => {
                format!("too many blinks ({}) (automatic fail)", blinks)
            }
            Self::PanicEmotion { emotion, penalty } => {
                format!("panic emotion '{}': -{}", emotion, penalty)
            }
            Self::DurationOutOfWindow { penalty } => {
                format!("duration outside allowed window: -{}", penalty)
            }
        }
    }
}

/// Score plus the rules that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub score: TrustScore,
    pub adjustments: Vec<ScoreAdjustment>,
}

impl ScoreBreakdown {
    fn automatic_fail(mut adjustments: Vec<ScoreAdjustment>, rule: ScoreAdjustment) -> Self {
        adjustments.push(rule);
        Self {
            score: TrustScore::MIN,
            adjustments,
        }
    }
}

/// Compute the trust score for a set of signals.
pub fn score(signals: &SessionSignals, config: &ScoringConfig) -> TrustScore {
    score_breakdown(signals, config).score
}

/// Compute the trust score and report which rules fired.
pub fn score_breakdown(signals: &SessionSignals, config: &ScoringConfig) -> ScoreBreakdown {
    let mut running = i64::from(MAX_TRUST_SCORE);
    let mut adjustments = Vec::new();

    if !signals.face_detected {
        return ScoreBreakdown::automatic_fail(adjustments, ScoreAdjustment::NoFace);
    }

    if signals.blink_count < config.min_blinks {
        running -= i64::from(config.blink_penalty);
        adjustments.push(ScoreAdjustment::TooFewBlinks {
            blinks: signals.blink_count,
            penalty: config.blink_penalty,
        });
    }

    if signals.blink_count > config.max_blinks {
        return ScoreBreakdown::automatic_fail(
            adjustments,
            ScoreAdjustment::TooManyBlinks {
                blinks: signals.blink_count,
            },
        );
    }

    if let Some(emotion) = signals.emotion().filter(|e| config.is_panic(*e)) {
        running -= i64::from(config.panic_penalty);
        adjustments.push(ScoreAdjustment::PanicEmotion {
            emotion,
            penalty: config.panic_penalty,
        });
    }

    // NaN falls outside the window.
    let window = config.min_duration_seconds..=config.max_duration_seconds;
    if !window.contains(&signals.duration_seconds) {
        running -= i64::from(config.timeout_penalty);
        adjustments.push(ScoreAdjustment::DurationOutOfWindow {
            penalty: config.timeout_penalty,
        });
    }

    ScoreBreakdown {
        score: TrustScore::saturating(running),
        adjustments,
    }
}
