// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod commands;
mod enrich;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use datacat_core::{CoreError, CoreErrorCode, ExitCode};
use datacat_store::{RecordStore, Tree};
use std::path::PathBuf;
use std::process::ExitCode as ProcessExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "datacat")]
#[command(about = "Open data catalog registry operations CLI")]
struct Cli {
    /// Working tree holding entities/, scheduled/, and software/.
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[arg(long, global = true, default_value_t = false)]
    quiet: bool,
    #[arg(long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ValidateDir {
    Entities,
    Scheduled,
    Software,
}

#[derive(Clone, Copy, ValueEnum)]
enum DetectMode {
    Entries,
    Scheduled,
}

impl DetectMode {
    fn tree(self) -> Tree {
        match self {
            Self::Entries => Tree::Entities,
            Self::Scheduled => Tree::Scheduled,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the schema validator over one record directory.
    Validate {
        #[arg(long, value_enum)]
        directory: ValidateDir,
    },
    /// Create one record from a portal URL.
    Build {
        #[arg(long)]
        url: String,
        #[arg(long)]
        software: String,
        #[arg(long)]
        country: Option<String>,
        #[arg(long, default_value_t = false)]
        scheduled: bool,
    },
    /// Compile entities/ into distributable artifacts.
    Compile {
        #[arg(long, default_value = "dist")]
        out: PathBuf,
    },
    /// Re-run API detection for every record of one software family.
    Detect {
        software: String,
        #[arg(long, value_enum, default_value_t = DetectMode::Entries)]
        mode: DetectMode,
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Quality rules and fixers.
    Quality {
        #[command(subcommand)]
        command: QualityCommand,
    },
    /// Recompute trust scores across both trees.
    TrustScore {
        #[arg(long, default_value_t = false)]
        dry_run: bool,
        /// Newline-separated ids holding a re3data trust seal.
        #[arg(long)]
        seals: Option<PathBuf>,
    },
    /// Description enrichment; no-op without PERPLEXITY_API_KEY.
    Enrich {
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
}

#[derive(Subcommand)]
enum QualityCommand {
    Report {
        #[arg(long)]
        rule: Option<String>,
    },
    Fix {
        #[arg(long)]
        rule: Option<String>,
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
}

/// A failed command: message for the operator plus the process exit code.
pub(crate) struct CliFailure {
    pub exit: ExitCode,
    pub message: String,
}

impl CliFailure {
    pub fn new(exit: ExitCode, message: impl Into<String>) -> Self {
        Self {
            exit,
            message: message.into(),
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(ExitCode::Usage, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ExitCode::Internal, message)
    }

    /// Tag a failure with its error-taxonomy code; the exit code follows.
    pub fn coded(code: CoreErrorCode, err: impl std::fmt::Display) -> Self {
        CoreError::new(code, err.to_string()).into()
    }
}

impl From<CoreError> for CliFailure {
    fn from(err: CoreError) -> Self {
        let exit = match err.code {
            CoreErrorCode::Configuration => ExitCode::Usage,
            CoreErrorCode::CorruptInput | CoreErrorCode::SchemaViolation => ExitCode::Validation,
            CoreErrorCode::Io => ExitCode::DependencyFailure,
            CoreErrorCode::InvariantBroken | CoreErrorCode::Internal => ExitCode::Internal,
        };
        Self::new(exit, err.to_string())
    }
}

pub(crate) struct Context {
    pub store: RecordStore,
    pub root: PathBuf,
    pub json: bool,
    pub quiet: bool,
}

impl Context {
    pub fn say(&self, line: &str) {
        if !self.quiet {
            println!("{line}");
        }
    }
}

fn init_tracing(quiet: bool, verbose: u8) {
    let default = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ProcessExitCode {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);
    match run(cli) {
        Ok(()) => ProcessExitCode::from(ExitCode::Success as u8),
        Err(failure) => {
            eprintln!("{}", failure.message);
            ProcessExitCode::from(failure.exit as u8)
        }
    }
}

fn run(cli: Cli) -> Result<(), CliFailure> {
    let ctx = Context {
        store: RecordStore::new(&cli.root),
        root: cli.root,
        json: cli.json,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Validate { directory } => match directory {
            ValidateDir::Entities => commands::validate_tree(&ctx, Tree::Entities),
            ValidateDir::Scheduled => commands::validate_tree(&ctx, Tree::Scheduled),
            ValidateDir::Software => commands::validate_software(&ctx),
        },
        Commands::Build {
            url,
            software,
            country,
            scheduled,
        } => commands::build(&ctx, &url, &software, country, scheduled),
        Commands::Compile { out } => commands::compile(&ctx, &out),
        Commands::Detect {
            software,
            mode,
            dry_run,
        } => commands::detect(&ctx, &software, mode.tree(), dry_run),
        Commands::Quality { command } => match command {
            QualityCommand::Report { rule } => {
                commands::quality_report(&ctx, rule.as_deref())
            }
            QualityCommand::Fix { rule, dry_run } => {
                commands::quality_fix(&ctx, rule.as_deref(), dry_run)
            }
        },
        Commands::TrustScore { dry_run, seals } => {
            commands::trust_score(&ctx, dry_run, seals.as_deref())
        }
        Commands::Enrich { dry_run } => enrich::run(&ctx, dry_run),
    }
}

#[cfg(test)]
mod tests {
    use super::CliFailure;
    use datacat_core::{CoreError, CoreErrorCode, ExitCode};

    #[test]
    fn taxonomy_codes_map_to_exit_codes() {
        let io = CliFailure::from(CoreError::new(CoreErrorCode::Io, "disk full"));
        assert_eq!(io.exit, ExitCode::DependencyFailure);
        assert_eq!(io.message, "io_error: disk full");

        let config = CliFailure::coded(CoreErrorCode::Configuration, "bad flag");
        assert_eq!(config.exit, ExitCode::Usage);

        let broken = CliFailure::coded(CoreErrorCode::InvariantBroken, "fixer bug");
        assert_eq!(broken.exit, ExitCode::Internal);
    }
}
