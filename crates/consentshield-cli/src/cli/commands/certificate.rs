use crate::cli::args::RenderArgs;
use crate::exit_codes::{SUCCESS, VERIFY_MISMATCH};
use anyhow::{Context, Result};
use chrono::Utc;
use consentshield_core::certificate::write_certificate;
use consentshield_core::{ArtifactKind, Certificate};
use std::path::Path;

use super::{load_config, missing_input, read_proof, schema_for};

/// Render and persist a certificate or evidence page. Proofs that fail the
/// integrity check are refused.
pub fn run(args: RenderArgs, kind: ArtifactKind, config_path: Option<&Path>) -> Result<i32> {
    if let Some(code) = missing_input(&args.proof, "proof") {
        return Ok(code);
    }
    let config = load_config(config_path)?;
    let proof = read_proof(&args.proof)?;
    let schema = schema_for(&proof, &config)?;
    if let Err(e) = proof.check_integrity(&schema, &config) {
        eprintln!("refusing to render {}: {e}", proof.session_id());
        return Ok(VERIFY_MISMATCH);
    }

    let cert = Certificate::from_proof(proof, Utc::now(), config.certificate.validity_days);
    let html = match kind {
        ArtifactKind::Certificate => cert.render_html()?,
        ArtifactKind::Evidence => cert.render_evidence()?,
    };
    let path = write_certificate(&args.out_dir, kind, cert.proof().session_id(), &html)
        .with_context(|| format!("failed to write {} into {}", kind.prefix(), args.out_dir.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&cert.to_json())?);
    } else {
        println!("{}", path.display());
    }
    Ok(SUCCESS)
}
