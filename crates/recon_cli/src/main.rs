//! recon: rebuild and cross-check compiler output from Truffle artifacts.
//!
//! Provides `recon check`, which reconstructs the compiler output, verifies
//! that all artifacts come from one compilation run and prints a
//! per-contract summary, and `recon emit`, which writes the reconstructed
//! standard-JSON input and output to disk.

#![warn(missing_docs)]

mod check;
mod emit;
mod logging;
mod settings;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// recon: artifact reconstruction and consistency checking.
#[derive(Parser, Debug)]
#[command(name = "recon", version, about = "Rebuild compiler output from build artifacts")]
pub struct Cli {
    /// Print errors only.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log every artifact read and fold decision.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// When to color log output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a `recon.toml` file or the directory containing one.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// What to do with the artifacts.
    #[command(subcommand)]
    pub command: Command,
}

/// `recon` subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Reconstruct, check consistency and summarize every contract.
    Check(CheckArgs),
    /// Reconstruct and write the compiler input/output JSON files.
    Emit(EmitArgs),
}

/// Artifact and source location flags shared by all commands.
#[derive(Args, Debug, Default)]
pub struct InputArgs {
    /// Directory of artifact files (overrides `artifacts.dir`).
    #[arg(long)]
    pub artifacts: Option<PathBuf>,

    /// Directory of Solidity sources (overrides `sources.dir`).
    #[arg(long)]
    pub sources: Option<PathBuf>,

    /// Number of reader threads (overrides `artifacts.jobs`).
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Fail if artifacts for the same file carry different source text.
    #[arg(long)]
    pub strict_sources: bool,
}

/// Arguments for the `recon check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Input locations.
    #[command(flatten)]
    pub input: InputArgs,

    /// Output format for the summary.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for the `recon emit` subcommand.
#[derive(Parser, Debug)]
pub struct EmitArgs {
    /// Input locations.
    #[command(flatten)]
    pub input: InputArgs,

    /// Directory to write `input.json` and `output.json` into.
    #[arg(short, long, default_value = "build/solc")]
    pub out: PathBuf,
}

/// `--color` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Color when stderr is a terminal and `NO_COLOR` is unset.
    Auto,
    /// Always color.
    Always,
    /// Never color.
    Never,
}

/// How `recon check` prints its summary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// One line per contract on stdout.
    Text,
    /// A JSON object keyed by contract name.
    Json,
}

/// Flags shared by every subcommand, resolved once in `main`.
pub struct GlobalArgs {
    /// `--quiet` was given.
    pub quiet: bool,
    /// `--verbose` was given.
    pub verbose: bool,
    /// Resolved `--color` choice.
    pub color: bool,
    /// `--config`, if given.
    pub config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color: match cli.color {
            ColorChoice::Auto => logging::stderr_is_terminal(),
            other => other == ColorChoice::Always,
        },
        config: cli.config,
    };

    logging::init_logging(&global);

    let outcome = match &cli.command {
        Command::Check(args) => check::run(args, &global),
        Command::Emit(args) => emit::run(args, &global),
    };

    let code = outcome.unwrap_or_else(|e| {
        eprintln!("error: {e}");
        1
    });
    process::exit(code);
}
