use crate::cli::args::{ClassifyArgs, OutputFormat};
use crate::exit_codes::SUCCESS;
use anyhow::{Context, Result};
use consentshield_core::{classify_with_reason, Classification, TrustScore};
use serde::Serialize;
use std::path::Path;

use super::load_config;

#[derive(Serialize)]
struct ClassifyOutput<'a> {
    #[serde(flatten)]
    classification: Classification,
    message: &'a str,
}

pub fn run(args: ClassifyArgs, config_path: Option<&Path>) -> Result<i32> {
    let config = load_config(config_path)?;
    let score = TrustScore::new(i64::from(args.score)).context("score must be in [0, 100]")?;
    let classification = classify_with_reason(score, args.panic, &config.thresholds);
    let message = config.status_messages.message(classification.status);

    match args.format {
        OutputFormat::Json => {
            let out = ClassifyOutput {
                classification,
                message,
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            println!("status: {}", classification.status);
            println!("reason: {}", classification.reason);
            println!("message: {}", message);
        }
    }
    Ok(SUCCESS)
}
