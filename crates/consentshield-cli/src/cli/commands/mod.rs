use anyhow::{Context, Result};
use consentshield_core::{ArtifactKind, ConsentConfig, HashSchema, ProofRecord};
use std::fs;
use std::path::Path;

use super::args::*;
use crate::exit_codes::NOT_FOUND;

pub mod certificate;
pub mod classify;
pub mod config;
pub mod demo;
pub mod proof;
pub mod score;
pub mod verify;

pub fn dispatch(cli: Cli) -> Result<i32> {
    let config_path = cli.config.as_deref();
    match cli.cmd {
        Command::Score(args) => score::run(args, config_path),
        Command::Classify(args) => classify::run(args, config_path),
        Command::Proof(args) => proof::run(args, config_path),
        Command::Verify(args) => verify::run(args, config_path),
        Command::Certificate(args) => {
            certificate::run(args, ArtifactKind::Certificate, config_path)
        }
        Command::Evidence(args) => certificate::run(args, ArtifactKind::Evidence, config_path),
        Command::Demo(args) => demo::run(args, config_path),
        Command::Config(args) => config::run(args, config_path),
    }
}

/// Built-in defaults unless a file is given. An invalid file is fatal.
pub(crate) fn load_config(path: Option<&Path>) -> Result<ConsentConfig> {
    match path {
        Some(p) => ConsentConfig::from_file(p)
            .with_context(|| format!("failed to load config {}", p.display())),
        None => Ok(ConsentConfig::default()),
    }
}

/// A missing input file exits with `NOT_FOUND` instead of a generic error.
pub(crate) fn missing_input(path: &Path, what: &str) -> Option<i32> {
    if path.exists() {
        return None;
    }
    eprintln!("error: {what} not found: {}", path.display());
    Some(NOT_FOUND)
}

pub(crate) fn read_proof(path: &Path) -> Result<ProofRecord> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read proof {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid proof record {}", path.display()))
}

/// The schema a proof was hashed under: the configured one when its version
/// matches, otherwise a built-in schema of that version. A validated config
/// cannot redefine a built-in version, so both agree.
pub(crate) fn schema_for(proof: &ProofRecord, config: &ConsentConfig) -> Result<HashSchema> {
    if config.hash.version == proof.hash_version() {
        return Ok(config.hash.clone());
    }
    HashSchema::builtin(proof.hash_version()).with_context(|| {
        format!(
            "unknown hash schema version '{}' (not built in and not configured)",
            proof.hash_version()
        )
    })
}
