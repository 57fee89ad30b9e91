mod checks;
mod commands;
mod core;
mod release;
mod ui;
mod utils;

#[cfg(test)]
mod testing;

use checks::PushPolicy;
use clap::{Parser, Subcommand};
use core::context::ReleaseContext;
use core::error::{RailError, RailResult, print_error};
use tracing_subscriber::EnvFilter;

/// Validate, build and publish versioned product releases
#[derive(Parser)]
#[command(name = "shiprail")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Print debug logs to stderr
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  // ============================================================================
  // Release
  // ============================================================================
  /// Validate, build and publish the release named by the version file
  Release {
    /// Push unpushed commits without asking
    #[arg(long)]
    push_unpushed: bool,
    /// Never push unpushed commits (abort instead of asking)
    #[arg(long, conflicts_with = "push_unpushed")]
    no_push_unpushed: bool,
    /// Number of targets to build concurrently
    #[arg(short, long, default_value_t = 1)]
    jobs: usize,
    /// Output the release outcome as JSON
    #[arg(long)]
    json: bool,
  },

  /// Run the release stages that change nothing (version, changelog, preflight)
  Check {
    /// Output results in JSON format
    #[arg(long)]
    json: bool,
  },

  // ============================================================================
  // Inspection & Setup
  // ============================================================================
  /// Print the changelog section for a version
  Changelog {
    /// Version to look up (defaults to the version file)
    #[arg(id = "changelog_version", value_name = "VERSION")]
    version: Option<String>,
    /// Convert reStructuredText literals to markdown
    #[arg(long)]
    markdown: bool,
  },

  /// Preview the release notes for the current version
  Notes,

  /// Write a default shiprail.toml
  Init {
    /// Overwrite an existing configuration
    #[arg(long)]
    force: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn init_tracing(verbose: bool) {
  let default = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::new(default);

  // stdout is reserved for command output (and JSON)
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(true)
    .with_writer(std::io::stderr)
    .init();
}

fn push_policy(push_unpushed: bool, no_push_unpushed: bool) -> PushPolicy {
  match (push_unpushed, no_push_unpushed) {
    (true, _) => PushPolicy::Always,
    (_, true) => PushPolicy::Never,
    _ => PushPolicy::Ask,
  }
}

fn main() {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let cwd = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => handle_error(RailError::from(e).context("Failed to get current directory")),
  };

  // init runs before any configuration exists
  if let Commands::Init { force } = cli.command {
    if let Err(e) = commands::run_init(&cwd, force) {
      handle_error(e);
    }
    return;
  }

  let ctx = match ReleaseContext::build(&cwd) {
    Ok(ctx) => ctx,
    Err(e) => handle_error(e),
  };
  tracing::debug!(root = %ctx.root.display(), product = %ctx.product, "release context ready");

  if let Err(e) = dispatch(&ctx, cli.command) {
    handle_error(e);
  }
}

fn dispatch(ctx: &ReleaseContext, command: Commands) -> RailResult<()> {
  match command {
    Commands::Release {
      push_unpushed,
      no_push_unpushed,
      jobs,
      json,
    } => commands::run_release(ctx, push_policy(push_unpushed, no_push_unpushed), jobs, json),
    Commands::Check { json } => commands::run_check(ctx, json),
    Commands::Changelog { version, markdown } => commands::run_changelog(ctx, version, markdown),
    Commands::Notes => commands::run_notes(ctx),
    Commands::Init { force } => commands::run_init(&ctx.root, force),
  }
}

/// Print the error and exit with its category's code
fn handle_error(err: RailError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
