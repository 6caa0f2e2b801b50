//! # Command Line Interface
//!
//! Defines the CLI structure and command handlers for the osfetch tool:
//! configuration bootstrap, credential management, remote listings, and
//! the fetch operation itself.

mod creds;
mod fetch;
mod init;
mod ls;
mod target;

use anyhow::Result;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser, Subcommand};
use osfetch_core::output::ColorMode;

/// Top-level CLI command for the osfetch tool
#[derive(Parser)]
#[command(name = "osfetch")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "Fetch study data from an OSF project node")]
#[command(
  long_about = "Osfetch pulls files from a folder inside an OSF project node down to local disk.\n\n\
        Credentials are read from ~/.netrc (machine osf.io); which node and folder to\n\
        fetch comes from osf.toml or from command-line flags. Downloads run strictly\n\
        in sequence, and files that already exist locally are skipped unless\n\
        --overwrite is given."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())  // Make usage line stand out
    .literal(AnsiColor::BrightGreen.on_default().bold())  // Command names, flags bold
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Subcommands for the osfetch tool
#[derive(Subcommand)]
pub enum Commands {
  /// Credential management
  #[command(long_about = "Manage the OSF credentials used for fetching.\n\n\
            This command group helps you check and set up the credentials stored\n\
            in your .netrc file, which is kept outside the repository and out of\n\
            version control.")]
  #[command(arg_required_else_help = true)]
  Creds(creds::CredsArgs),

  /// Download files from the configured node and folder
  #[command(long_about = "Download the files of an OSF storage folder to local disk.\n\n\
            The node, provider, folder, and destination come from osf.toml and can be\n\
            overridden with flags. Positional arguments restrict the fetch to files\n\
            with those names. Existing local files are skipped by default; pass\n\
            --overwrite to replace them.")]
  #[command(alias = "f")]
  Fetch(fetch::FetchArgs),

  /// Initialize osfetch configuration
  #[command(long_about = "Initializes the osfetch configuration for your environment.\n\n\
            This creates the configuration directories and writes a commented osf.toml\n\
            template for you to fill in with the project node to fetch from. No\n\
            credentials are required for this operation.")]
  Init,

  /// List the files of the configured node and folder
  #[command(long_about = "List the contents of an OSF storage folder without downloading.\n\n\
            Prints the materialized path of every entry in the resolved folder,\n\
            along with its kind and size.")]
  Ls(ls::LsArgs),
}

pub fn handle_cli(cli: Cli) -> Result<()> {
  // Set global color override based on --colors argument
  match cli.colors {
    ColorMode::Always | ColorMode::Yes => owo_colors::set_override(true),
    ColorMode::Never | ColorMode::No => owo_colors::set_override(false),
    ColorMode::Auto => {
      // Let owo_colors use its default auto-detection
      // Don't call set_override, allowing it to detect terminal automatically
    }
  }

  match cli.command {
    Commands::Creds(creds) => creds::handle_creds_command(creds),
    Commands::Fetch(fetch) => fetch::handle_fetch_command(fetch),
    Commands::Init => init::handle_init_command(),
    Commands::Ls(ls) => ls::handle_ls_command(ls),
  }
}
