use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[clap(version, subcommand_required = false, arg_required_else_help = false)]
#[command(name = "egx", bin_name = "egx", version)]
pub struct Cli {
    /// Root of the prices API, e.g. http://localhost:8000
    #[arg(long, env = "EGX_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Symbol loaded when the page opens
    #[arg(long, env = "EGX_SYMBOL", global = true)]
    pub symbol: Option<String>,

    /// Where logs are appended, defaults to ~/.egx/egx.log
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Fetch one symbol and print the first rows as JSON
    #[command(alias = "p")]
    Prices { symbol: Option<String> },

    /// Check that the backend is reachable
    Ping,
}
