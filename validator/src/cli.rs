use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "validator",
    about = "Validates exported data files against the locked schema registry"
)]
pub struct Cli {
    /// Root directory of the export to scan
    pub root: PathBuf,

    /// Exit with a non-zero status when any error-severity issue is found.
    /// Without this flag the exit code is 0 regardless of findings (the
    /// console summary and report files are the signal).
    #[arg(long)]
    pub strict: bool,

    /// Promote CSV/Parquet pairing gaps from warnings to errors
    #[arg(long)]
    pub pairing_errors: bool,

    /// Path to a JSON schema registry overriding the built-in deployment set
    #[arg(long)]
    pub registry: Option<PathBuf>,

    /// Maximum number of issues echoed to the console
    #[arg(long, default_value_t = 20)]
    pub max_issues: usize,
}
