use std::path::PathBuf;

use clap::Parser;

/// Iris: multimodal chat with Gemini from the terminal.
#[derive(Parser, Debug)]
#[command(name = "iris", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log directive override (e.g. debug, iris=trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Model name override (e.g. gemini-2.5-pro).
    #[arg(short, long)]
    pub model: Option<String>,

    /// Print the effective config as JSON and exit.
    #[arg(long)]
    pub print_config: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
