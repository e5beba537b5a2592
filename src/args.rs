use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "decilens",
    about = "Read-only analytics dashboard over an organizational decision graph"
)]
pub struct Args {
    /// Optional TOML configuration file; environment variables override it.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Bind address override, e.g. 0.0.0.0:8000.
    #[arg(short, long)]
    pub bind: Option<String>,
}
