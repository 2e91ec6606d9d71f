use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod common;
pub mod proof;
pub use common::*;
pub use proof::*;

#[derive(Parser)]
#[command(
    name = "consentshield",
    version,
    about = "Liveness-based consent verification: trust scoring, tamper-evident proofs, and certificates"
)]
pub struct Cli {
    /// Configuration file (YAML). Built-in defaults when omitted.
    #[arg(long, global = true, env = "CONSENTSHIELD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Score liveness signals and list the rules that fired
    Score(ScoreArgs),
    /// Classify a trust score into VERIFIED / SUSPICIOUS / BLOCKED
    Classify(ClassifyArgs),
    /// Build a proof-of-consent record from session data (JSON)
    Proof(ProofArgs),
    /// Recompute a proof's hash and compare it with the recorded one
    Verify(VerifyArgs),
    /// Render the full HTML certificate for a proof
    Certificate(RenderArgs),
    /// Render the minimal evidence page for a proof
    Evidence(RenderArgs),
    /// Run the reference scenarios end to end
    Demo(DemoArgs),
    /// Inspect or validate configuration
    Config(ConfigArgs),
}
