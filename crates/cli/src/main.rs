// nvtable CLI - merge NV identifier tables from canonical and vendor sources

mod exit_codes;
mod merge;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};

use exit_codes::{EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "nvtable")]
#[command(about = "Merge a canonical NV identifier table with vendor header redefinitions")]
#[command(long_version = long_version())]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    /// Log progress to stderr (-v info, -vv debug). RUST_LOG overrides.
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge all sources named in a config and print the resulting table
    #[command(after_help = "\
Examples:
  nvtable run hisi.merge.toml
  nvtable run hisi.merge.toml --output nvid.merged.c
  nvtable run hisi.merge.toml --json --output nvid.merged.c
  nvtable run hisi.merge.toml --dump-stages 2> stages.jsonl")]
    Run {
        /// Path to the .merge.toml config file
        config: PathBuf,

        /// Write the table here instead of [output].file or stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Print the merge summary as JSON to stdout
        #[arg(long)]
        json: bool,

        /// Print every intermediate table as JSON lines to stderr
        #[arg(long)]
        dump_stages: bool,
    },

    /// Validate a merge config and check that every source exists
    #[command(after_help = "\
Examples:
  nvtable validate hisi.merge.toml")]
    Validate {
        /// Path to the .merge.toml config file
        config: PathBuf,
    },
}

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nengine:  nvtable-recon ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   debug",
            "\ntarget:  ", env!("TARGET"),
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nengine:  nvtable-recon ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   release",
            "\ntarget:  ", env!("TARGET"),
        )
    }
}

/// Filter used when RUST_LOG is unset.
fn default_log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

fn setup_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_filter(verbose)));

    // Also installs the `log` bridge, so engine log records show up here
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let result = match cli.command {
        None => {
            // No subcommand = show usage
            eprintln!("Usage: nvtable <command> [options]");
            eprintln!("       nvtable --help for more information");
            Err(CliError::args(""))
        }
        Some(Commands::Run { config, output, json, dump_stages }) => {
            merge::cmd_run(config, output, json, dump_stages)
        }
        Some(Commands::Validate { config }) => merge::cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }
}
