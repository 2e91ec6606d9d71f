use clap::Args;
use std::path::PathBuf;

use super::OutputFormat;

#[derive(Args, Debug, Clone)]
pub struct ProofArgs {
    /// Session data as a JSON object, or "-" for stdin
    #[arg(long, short = 'i', default_value = "-")]
    pub input: String,

    /// Write the proof here instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct VerifyArgs {
    /// Proof record (JSON) produced by `consentshield proof`
    #[arg(long)]
    pub proof: PathBuf,

    /// Compare against this hash instead of the one recorded in the proof
    #[arg(long)]
    pub hash: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Proof record (JSON) produced by `consentshield proof`
    #[arg(long)]
    pub proof: PathBuf,

    /// Directory for the rendered HTML file
    #[arg(long)]
    pub out_dir: PathBuf,

    /// Print the certificate JSON view to stdout
    #[arg(long)]
    pub json: bool,
}
