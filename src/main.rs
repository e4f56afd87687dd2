use std::path::{Path, PathBuf};
use std::process;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use smartcommit::changelog::ChangelogStore;
use smartcommit::cli::{Mode, Workflow, WorkflowArgs};
use smartcommit::config;
use smartcommit::domain::BumpKind;
use smartcommit::git::Git2Repository;
use smartcommit::ui::{ConsoleReporter, Reporter};
use smartcommit::version::VersionCalculator;
use smartcommit::SmartCommitError;

/// Exit code for SIGINT (128 + signal number 2)
const EXIT_INTERRUPTED: i32 = 130;
const EXIT_FAILURE: i32 = 1;

#[derive(clap::Parser)]
#[command(
    name = "smartcommit",
    about = "Classify staged changes, commit with a conventional message, keep CHANGELOG.md and release tags in step",
    after_help = "Examples:\n  smartcommit                      Auto-detect mode\n  smartcommit --dry-run            Preview actions\n  smartcommit \"Add feature X\"      Custom commit message\n  smartcommit --force-release      Force release creation\n  smartcommit --version=2.0.0      Force specific version"
)]
struct Args {
    #[arg(help = "Custom commit message")]
    message: Option<String>,

    #[arg(long, value_enum, help = "Force specific mode")]
    mode: Option<Mode>,

    #[arg(long, help = "Force commit mode, ignore [Unreleased] entries")]
    force_commit: bool,

    #[arg(long, help = "Force release mode, ignore staged changes")]
    force_release: bool,

    #[arg(long = "version", help = "Force specific version for release")]
    release_version: Option<String>,

    #[arg(long = "type", value_enum, help = "Force version bump type")]
    bump_type: Option<BumpKind>,

    #[arg(long, help = "Preview actions without executing")]
    dry_run: bool,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, help = "Changelog file to maintain (overrides configuration)")]
    changelog: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity (-v, -vv)")]
    verbose: u8,
}

impl Args {
    fn workflow_args(&self) -> WorkflowArgs {
        WorkflowArgs {
            message: self.message.clone(),
            mode: self.mode,
            force_commit: self.force_commit,
            force_release: self.force_release,
            version: self.release_version.clone(),
            bump: self.bump_type,
            dry_run: self.dry_run,
        }
    }
}

/// Diagnostics go to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("smartcommit={}", level)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let reporter = ConsoleReporter::new();

    if let Err(e) = ctrlc::set_handler(|| {
        ConsoleReporter::new().warning("Operation cancelled by user");
        process::exit(EXIT_INTERRUPTED);
    }) {
        tracing::debug!(error = %e, "could not install interrupt handler");
    }

    let code = match run(&args, &reporter) {
        Ok(()) => 0,
        Err(e) => {
            match e.downcast_ref::<SmartCommitError>() {
                Some(SmartCommitError::Precondition(msg)) => reporter.warning(msg),
                Some(other) => reporter.error(&other.to_string()),
                None => reporter.error(&format!("Unexpected error: {:#}", e)),
            }
            EXIT_FAILURE
        }
    };

    process::exit(code);
}

fn run(args: &Args, reporter: &dyn Reporter) -> Result<()> {
    let repo = Git2Repository::open(".")?;

    let config = config::load_config(args.config.as_deref())?;

    let changelog_path = args
        .changelog
        .clone()
        .unwrap_or_else(|| config.changelog.path.clone());
    let changelog = ChangelogStore::new(changelog_path);

    let root = Path::new(".");
    let versions = VersionCalculator::for_project(root, &repo, &config.release.tag_prefix);

    let workflow = Workflow::new(&repo, changelog, versions, reporter).with_config(&config)?;

    workflow.run(&args.workflow_args())?;
    Ok(())
}
