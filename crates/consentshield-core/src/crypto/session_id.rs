//! Session identifiers.
//!
//! # Format
//!
//! `CS-{unix_millis}-{16 lower-hex chars}`: a millisecond timestamp plus
//! 64 random bits.

use chrono::{DateTime, Utc};
use rand::RngCore;

pub const SESSION_ID_PREFIX: &str = "CS";

/// Generate a fresh session id stamped with `now`.
pub fn generate_session_id(now: DateTime<Utc>) -> String {
    let mut bytes = [0u8; 8];
    rand::thread_rng().fill_bytes(&mut bytes);
    format!(
        "{}-{}-{}",
        SESSION_ID_PREFIX,
        now.timestamp_millis(),
        hex::encode(bytes)
    )
}

/// Shape check: `ConsentService` treats ids that fail it as unknown
/// without consulting the store.
pub fn is_well_formed(session_id: &str) -> bool {
    let mut parts = session_id.splitn(3, '-');
    let (Some(prefix), Some(millis), Some(random)) = (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    prefix == SESSION_ID_PREFIX
        && !millis.is_empty()
        && millis.bytes().all(|b| b.is_ascii_digit())
        && random.len() == 16
        && random
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_generate_session_id_format() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let id = generate_session_id(now);
        assert!(id.starts_with("CS-1700000000123-"), "got {id}");
        assert_eq!(id.len(), "CS-1700000000123-".len() + 16);
        assert!(is_well_formed(&id));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let now = Utc::now();
        let a = generate_session_id(now);
        let b = generate_session_id(now);
        assert_ne!(a, b);
    }

    #[test]
    fn test_is_well_formed_rejects_garbage() {
        assert!(!is_well_formed(""));
        assert!(!is_well_formed("CS-123"));
        assert!(!is_well_formed("XX-1700000000123-0011223344556677"));
        assert!(!is_well_formed("CS-17x0-0011223344556677"));
        assert!(!is_well_formed("CS-1700000000123-00112233445566ZZ"));
        assert!(is_well_formed("CS-1700000000000-0011223344556677"));
    }
}
