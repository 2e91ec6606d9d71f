use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    /// Blinks observed during the session
    #[arg(long)]
    pub blinks: u32,

    /// Dominant emotion label (unknown labels count as neutral)
    #[arg(long)]
    pub emotion: Option<String>,

    /// Session duration in seconds
    #[arg(long)]
    pub duration: f64,

    /// No face was detected
    #[arg(long)]
    pub no_face: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args, Debug, Clone)]
pub struct ClassifyArgs {
    /// Trust score (0-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub score: u8,

    /// A panic emotion was detected
    #[arg(long)]
    pub panic: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args, Debug, Clone)]
pub struct DemoArgs {
    /// Also write certificates for each scenario into this directory
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub cmd: ConfigCmd,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCmd {
    /// Print the effective configuration as YAML
    Show,
    /// Load and validate the configuration
    Check,
}
