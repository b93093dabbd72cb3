use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "opsdeck")]
#[command(about = "Read-only aggregation server for the opsdeck dashboard", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config; a missing file falls back to defaults.
    #[arg(long, default_value = "/etc/opsdeck/config.toml")]
    pub config: PathBuf,

    /// Listen address, overriding config and environment.
    #[arg(long)]
    pub bind: Option<String>,

    /// Store directory, overriding config and environment.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    pub log_level: String,
}
