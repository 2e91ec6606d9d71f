//! Exit codes for the `consentshield` binary. Part of the public contract:
//! scripts branch on them.

pub const SUCCESS: i32 = 0;
pub const VERIFY_MISMATCH: i32 = 1; // Recomputed hash differs from the recorded one
pub const CONFIG_ERROR: i32 = 2; // Bad config, unreadable input, or internal failure
pub const VALIDATION_FAILED: i32 = 3; // Session data violated one or more rules
pub const NOT_FOUND: i32 = 4; // Unknown session or hash
