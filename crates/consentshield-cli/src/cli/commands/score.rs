use crate::cli::args::{OutputFormat, ScoreArgs};
use crate::exit_codes::SUCCESS;
use anyhow::Result;
use consentshield_core::{score_breakdown, SessionSignals};
use std::path::Path;

use super::load_config;

pub fn run(args: ScoreArgs, config_path: Option<&Path>) -> Result<i32> {
    let config = load_config(config_path)?;
    let signals = SessionSignals::new(
        args.blinks,
        args.emotion.as_deref(),
        args.duration,
        !args.no_face,
    );
    let breakdown = score_breakdown(&signals, &config.scoring);

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&breakdown)?),
        OutputFormat::Text => {
            println!("trust_score: {}", breakdown.score);
            if breakdown.adjustments.is_empty() {
                println!("  (no penalties)");
            }
            for adjustment in &breakdown.adjustments {
                println!("  - {}", adjustment.describe());
            }
        }
    }
    Ok(SUCCESS)
}
