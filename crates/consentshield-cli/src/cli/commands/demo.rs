use crate::cli::args::DemoArgs;
use crate::exit_codes::{SUCCESS, VERIFY_MISMATCH};
use anyhow::Result;
use consentshield_core::{
    truncate_hash_default, ConsentService, InMemorySessionStore, SessionSignals, SessionStore,
};
use std::path::Path;

use super::load_config;

pub fn run(args: DemoArgs, config_path: Option<&Path>) -> Result<i32> {
    let config = load_config(config_path)?;
    let schema = config.hash.clone();
    let mut service = ConsentService::new(config, InMemorySessionStore::new())?;
    if let Some(dir) = args.out_dir {
        service = service.with_certificate_dir(dir);
    }

    let scenarios = [
        (
            "A",
            "genuine consent",
            SessionSignals::new(3, Some("happy"), 8.0, true),
        ),
        (
            "B",
            "coerced, excessive blinking and fear",
            SessionSignals::new(7, Some("fear"), 6.0, true),
        ),
        (
            "C",
            "too few blinks",
            SessionSignals::new(1, Some("neutral"), 5.0, true),
        ),
    ];

    let mut all_intact = true;
    for (label, description, signals) in scenarios {
        let start = service.start_session()?;
        let receipt = service.submit_signals(&start.session_id, &signals)?;
        let known = service.verify_by_hash(&receipt.hash)?.is_known();
        let intact = service
            .store()
            .get(&start.session_id)?
            .and_then(|entry| entry.completed)
            .is_some_and(|done| {
                done.proof()
                    .check_integrity(&schema, service.config())
                    .is_ok()
            });
        all_intact &= intact && known;

        println!("Scenario {label} ({description})");
        println!("  session:  {}", start.session_id);
        println!("  phrase:   \"{}\"", start.phrase);
        println!(
            "  result:   {} (trust score {})",
            receipt.status, receipt.trust_score
        );
        println!("  hash:     {}", truncate_hash_default(&receipt.hash));
        println!("  verified: {}", if intact && known { "yes" } else { "NO" });
        if let Some(path) = &receipt.certificate_path {
            println!("  file:     {}", path.display());
        }
        println!();
    }

    Ok(if all_intact { SUCCESS } else { VERIFY_MISMATCH })
}
