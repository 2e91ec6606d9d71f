use crate::cli::args::ProofArgs;
use crate::exit_codes::{SUCCESS, VALIDATION_FAILED};
use anyhow::{Context, Result};
use consentshield_core::{build_proof_from_value, truncate_hash_default};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use super::{load_config, missing_input};

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read session data from stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(input).with_context(|| format!("failed to read session data {}", input))
    }
}

pub fn run(args: ProofArgs, config_path: Option<&Path>) -> Result<i32> {
    if args.input != "-" {
        if let Some(code) = missing_input(Path::new(&args.input), "session data") {
            return Ok(code);
        }
    }
    let config = load_config(config_path)?;
    let raw = read_input(&args.input)?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).context("session data is not valid JSON")?;

    let proof = match build_proof_from_value(&value, &config) {
        Ok(proof) => proof,
        Err(err) => {
            eprintln!("validation failed:");
            for v in &err.violations {
                eprintln!("  - {}: {}", v.field, v.message);
            }
            return Ok(VALIDATION_FAILED);
        }
    };

    let json = serde_json::to_string_pretty(&proof)?;
    match args.output {
        Some(path) => {
            fs::write(&path, format!("{json}\n"))
                .with_context(|| format!("failed to write proof {}", path.display()))?;
            eprintln!(
                "{} {} -> {}",
                proof.status(),
                truncate_hash_default(proof.hash()),
                path.display()
            );
        }
        None => println!("{json}"),
    }
    Ok(SUCCESS)
}
