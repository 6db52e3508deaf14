//! erlscan: print the tokens of an Erlang source file.
//!
//! Drives the incremental scanner the way a preprocessor would, optionally
//! feeding the file in small chunks to exercise resumption.

mod commands;
mod options;

use std::sync::Once;

use erl_scan::ScanError;

use options::{CliOptions, FEATURES_ENV};

/// Failures reported on stderr with a non-zero exit code.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("cannot find file '{path}'")]
    NotFound { path: String },
    #[error("permission denied reading '{path}'")]
    PermissionDenied { path: String },
    #[error("'{path}' contains invalid UTF-8 data")]
    InvalidUtf8 { path: String },
    #[error("error reading '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{path}:{error}")]
    Scan { path: String, error: ScanError },
    #[error("{count} form(s) in '{path}' failed to scan")]
    Forms { path: String, count: usize },
}

static TRACING_INIT: Once = Once::new();

/// Install a subscriber when `RUST_LOG` is set.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = args[1].as_str();
    let result = match command {
        "tokens" | "forms" => run(command, &args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => Err(CliError::Usage(format!("unknown command '{other}'"))),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        if matches!(err, CliError::Usage(_)) {
            eprintln!();
            print_usage();
        }
        std::process::exit(1);
    }
}

fn run(command: &str, args: &[String]) -> Result<(), CliError> {
    let Some((path, flags)) = args.split_first() else {
        return Err(CliError::Usage(format!("missing file path for '{command}'")));
    };
    let mut options = CliOptions::parse(flags)?;
    if let Ok(value) = std::env::var(FEATURES_ENV) {
        options.add_env_features(&value);
    }
    tracing::debug!(?options, command, path = %path, "running");

    if command == "forms" {
        commands::forms(path, &options)
    } else {
        commands::tokens(path, &options)
    }
}

fn print_usage() {
    eprintln!("Usage: erlscan <command> <file> [options]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  tokens    Print every token, stopping at the first error");
    eprintln!("  forms     Print tokens form by form, continuing after errors");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --columns          Track columns as well as lines");
    eprintln!("  --text             Show each token's source text");
    eprintln!("  --ssa-checks       Recognize %ssa% check comments");
    eprintln!("  --feature=<word>   Reserve a feature keyword (repeatable)");
    eprintln!("  --chunk=<n>        Feed the file in n-byte chunks");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  {FEATURES_ENV}   Comma-separated feature keywords");
    eprintln!("  RUST_LOG           Enable tracing output");
}
