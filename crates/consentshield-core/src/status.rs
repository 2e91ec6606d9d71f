//! Status classification.
//!
//! Panic overrides the score entirely; otherwise the score falls into a
//! half-open band whose lower edge belongs to the band.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::Thresholds;
use crate::types::{Status, TrustScore};

/// Why a session received its status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusReason {
    PanicOverride,
    MeetsVerifiedThreshold,
    MeetsSuspiciousThreshold,
    BelowThresholds,
}

impl StatusReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusReason::PanicOverride => "panic override",
            StatusReason::MeetsVerifiedThreshold => "score meets verified threshold",
            StatusReason::MeetsSuspiciousThreshold => "score meets suspicious threshold",
            StatusReason::BelowThresholds => "score below thresholds",
        }
    }
}

impl fmt::Display for StatusReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub status: Status,
    pub reason: StatusReason,
}

pub fn classify(score: TrustScore, panic_detected: bool, thresholds: &Thresholds) -> Status {
    classify_with_reason(score, panic_detected, thresholds).status
}

pub fn classify_with_reason(
    score: TrustScore,
    panic_detected: bool,
    thresholds: &Thresholds,
) -> Classification {
    let (status, reason) = if panic_detected {
        (Status::Blocked, StatusReason::PanicOverride)
    } else if score.value() >= thresholds.verified {
        (Status::Verified, StatusReason::MeetsVerifiedThreshold)
    } else if score.value() >= thresholds.suspicious {
        (Status::Suspicious, StatusReason::MeetsSuspiciousThreshold)
    } else {
        (Status::Blocked, StatusReason::BelowThresholds)
    };
    Classification { status, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: i64) -> TrustScore {
        TrustScore::new(v).unwrap()
    }

    #[test]
    fn test_panic_blocks_every_score() {
        let t = Thresholds::default();
        for v in 0..=100 {
            let c = classify_with_reason(s(v), true, &t);
            assert_eq!(c.status, Status::Blocked, "score {v}");
            assert_eq!(c.reason, StatusReason::PanicOverride);
        }
    }

    #[test]
    fn test_default_bands() {
        let t = Thresholds::default();
        for v in 0..=100 {
            let expected = if v >= 70 {
                Status::Verified
            } else if v >= 50 {
                Status::Suspicious
            } else {
                Status::Blocked
            };
            assert_eq!(classify(s(v), false, &t), expected, "score {v}");
        }
    }

    #[test]
    fn test_boundaries_belong_to_higher_band() {
        let t = Thresholds::default();
        assert_eq!(classify(s(70), false, &t), Status::Verified);
        assert_eq!(classify(s(69), false, &t), Status::Suspicious);
        assert_eq!(classify(s(50), false, &t), Status::Suspicious);
        assert_eq!(classify(s(49), false, &t), Status::Blocked);
    }

    #[test]
    fn test_low_score_reason_is_distinct_from_panic() {
        let t = Thresholds::default();
        let low = classify_with_reason(s(10), false, &t);
        assert_eq!(low.status, Status::Blocked);
        assert_eq!(low.reason, StatusReason::BelowThresholds);
    }

    #[test]
    fn test_custom_thresholds() {
        let t = Thresholds {
            verified: 90,
            suspicious: 90,
        };
        assert_eq!(classify(s(90), false, &t), Status::Verified);
        assert_eq!(classify(s(89), false, &t), Status::Blocked);
    }
}
