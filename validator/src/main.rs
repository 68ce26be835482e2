mod cli;
mod columnar;
mod compare;
mod inspect;
mod registry;
mod report;
mod scanner;

use clap::Parser;
use env_logger::Env;

fn main() {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let cli = cli::Cli::parse();

    let registry = match &cli.registry {
        Some(path) => match registry::load(path) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Failed to load schema registry: {}", e);
                std::process::exit(2);
            }
        },
        None => registry::builtin(),
    };

    let options = scanner::ScanOptions {
        pairing_errors: cli.pairing_errors,
    };
    // No columnar reader is wired in by default; Parquet files are counted
    // and paired but their schemas are skipped.
    let outcome = scanner::scan(&cli.root, &registry, None, &options);

    if let Some(manifest) = &outcome.manifest {
        if let Err(e) = report::write_artifacts(&cli.root, manifest, &outcome.report) {
            eprintln!("Failed to write scan artifacts: {}", e);
            std::process::exit(2);
        }
    }

    report::print_summary(&outcome.report, cli.max_issues);

    if outcome.manifest.is_none() {
        // Missing root: nothing was scanned.
        std::process::exit(2);
    }
    if cli.strict && outcome.report.error_count > 0 {
        std::process::exit(1);
    }
}
