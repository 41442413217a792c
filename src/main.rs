//! easy-commits - CLI entry point.

use anyhow::{Context, Result};
use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use easy_commits::commit::{CommitOptions, CommitSession};
use easy_commits::config::{config_path, run_setup};
use easy_commits::console::TerminalConsole;
use easy_commits::git::GitCli;

/// Generate commit messages from your pending changes.
#[derive(Parser, Debug)]
#[command(name = "easy-commits")]
#[command(about = "Easy Commits - AI-powered git commit message generator")]
#[command(version)]
#[command(arg_required_else_help = true)]
#[command(after_help = "Examples:
  easy-commits config
  easy-commits commit
  easy-commits commit --context \"Fixed the login bug\"")]
struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Configure AI provider and API key
    Config,

    /// Generate and create a commit with an AI-generated message
    Commit {
        /// Extra context about the change, passed to the AI
        #[arg(long, num_args = 0..=1)]
        context: Option<String>,

        /// Show the generated message without committing
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => std::process::exit(report_parse_error(&e)),
    };
    init_tracing(cli.verbose);

    match cli.command {
        Command::Config => configure(),
        Command::Commit { context, dry_run } => commit(CommitOptions { context, dry_run }).await,
    }
}

/// Print whatever clap rejected and return the exit code to use.
///
/// A bare invocation shows help and succeeds. An unknown command is named
/// and followed by the full help text.
fn report_parse_error(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            print_help();
            0
        }
        ErrorKind::InvalidSubcommand => {
            match err.get(ContextKind::InvalidSubcommand) {
                Some(ContextValue::String(name)) => eprintln!("Unknown command: {name}"),
                _ => eprintln!("Unknown command"),
            }
            println!();
            print_help();
            2
        }
        _ => {
            let _ = err.print();
            err.exit_code()
        }
    }
}

fn print_help() {
    if let Err(e) = Cli::command().print_help() {
        eprintln!("Failed to print help: {e}");
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn configure() -> Result<()> {
    let config = run_setup(&TerminalConsole).context("Configuration failed")?;
    let path = config.save().context("Failed to save configuration")?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}

async fn commit(options: CommitOptions) -> Result<()> {
    let path = config_path().context("Failed to locate config file")?;
    let session = CommitSession::new(GitCli::new(), TerminalConsole, path);

    if let Err(e) = session.run(&options).await {
        if e.needs_setup() {
            eprintln!("Run 'easy-commits config' to set up your AI provider");
        }
        return Err(e.into());
    }

    Ok(())
}
