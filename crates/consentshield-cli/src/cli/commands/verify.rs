use crate::cli::args::{OutputFormat, VerifyArgs};
use crate::exit_codes::{SUCCESS, VERIFY_MISMATCH};
use anyhow::Result;
use consentshield_core::{compute_hash, truncate_hash_default, verify_hash};
use serde::Serialize;
use std::path::Path;

use super::{load_config, missing_input, read_proof, schema_for};

#[derive(Serialize)]
struct VerifyReport<'a> {
    valid: bool,
    session_id: &'a str,
    hash_version: &'a str,
    expected: &'a str,
    computed: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    inconsistency: Option<String>,
}

pub fn run(args: VerifyArgs, config_path: Option<&Path>) -> Result<i32> {
    if let Some(code) = missing_input(&args.proof, "proof") {
        return Ok(code);
    }
    let config = load_config(config_path)?;
    let proof = read_proof(&args.proof)?;
    let schema = schema_for(&proof, &config)?;

    let expected = args.hash.as_deref().map(str::trim).unwrap_or(proof.hash());
    let hash_ok = verify_hash(&proof, &schema, expected);
    // The hash leaves status, reason, message and panic flag unbound.
    let inconsistency = proof.check_consistency(&config).err().map(|e| e.to_string());
    let valid = hash_ok && inconsistency.is_none();
    let report = VerifyReport {
        valid,
        session_id: proof.session_id(),
        hash_version: proof.hash_version(),
        expected,
        computed: compute_hash(&proof, &schema),
        inconsistency,
    };

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text if valid => {
            println!(
                "OK: {} hash matches ({}, schema {})",
                report.session_id,
                truncate_hash_default(expected),
                report.hash_version
            );
        }
        OutputFormat::Text => {
            println!("MISMATCH: {}", report.session_id);
            if !hash_ok {
                println!("  expected: {}", report.expected);
                println!("  computed: {}", report.computed);
            }
            if let Some(problem) = &report.inconsistency {
                println!("  {problem}");
            }
        }
    }
    Ok(if valid { SUCCESS } else { VERIFY_MISMATCH })
}
