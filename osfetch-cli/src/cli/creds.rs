//! # Credentials Command
//!
//! Derive-based implementation of the credentials command for managing
//! the OSF entry in the user's `.netrc` file.

use std::io::{self, Write};

use anyhow::Result;
use clap::{Args, Subcommand};
use osfetch_core::creds::OSF_MACHINE;
use osfetch_core::creds::netrc::{get_netrc_path, write_netrc_entry};
use osfetch_core::output::{format_command, format_path, print_error, print_info, print_success, print_warning};
use osfetch_osf::auth::check_osf_credentials;
use osfetch_osf::create_osf_client;

use crate::clients::home_dir;

/// Command for credential management
#[derive(Args)]
pub struct CredsArgs {
  /// The subcommand to execute
  #[command(subcommand)]
  pub subcommand: CredsSubcommands,
}

/// Subcommands for the creds command
#[derive(Subcommand)]
pub enum CredsSubcommands {
  /// Check if credentials are properly configured
  #[command(
    long_about = "Checks if OSF credentials are properly configured.\n\n\
                      This command verifies that your .netrc file contains an entry for\n\
                      machine 'osf.io' and that the file permissions keep it private.\n\
                      It performs no network traffic."
  )]
  Check,

  /// Set up credentials interactively
  #[command(long_about = "Interactive wizard to set up OSF credentials.\n\n\
                      This command prompts for your OSF login and personal access token,\n\
                      verifies them against the API, and creates or updates the osf.io\n\
                      entry in your .netrc file.")]
  Setup,
}

/// Handle the creds command
pub(crate) fn handle_creds_command(creds: CredsArgs) -> Result<()> {
  match creds.subcommand {
    CredsSubcommands::Check => handle_check_command(),
    CredsSubcommands::Setup => handle_setup_command(),
  }
}

/// Handle the check command
///
/// This function checks if the .netrc file exists, verifies its
/// permissions, and checks for the OSF entry. It also prints an example
/// .netrc format for user reference.
fn handle_check_command() -> Result<()> {
  let home = home_dir()?;
  let netrc_path = get_netrc_path(&home);

  // Check if .netrc file exists
  if !netrc_path.exists() {
    print_error("No .netrc file found.");
    println!(
      "Create a .netrc file at {} with your credentials.",
      format_path(&netrc_path.display().to_string())
    );
    return Ok(());
  }

  // Check file permissions
  #[cfg(unix)]
  {
    use std::os::unix::fs::PermissionsExt;

    let metadata = std::fs::metadata(&netrc_path)?;
    let mode = metadata.permissions().mode();

    if mode & 0o077 != 0 {
      print_warning("Your .netrc file has insecure permissions.");
      println!(
        "For security, change permissions to 600: {}",
        format_command(&format!("chmod 600 {}", netrc_path.display()))
      );
    } else {
      print_success(".netrc file has secure permissions.");
    }
  }

  // Check OSF credentials
  match check_osf_credentials(&home) {
    Ok(true) => print_success("OSF credentials found."),
    Ok(false) => {
      print_warning("No OSF credentials found.");
      println!("Add credentials for machine '{OSF_MACHINE}' to your .netrc file.");
    }
    Err(e) => print_error(&format!("Error checking OSF credentials: {e}")),
  }

  // Print .netrc format example
  print_info("Example .netrc format:");
  println!("```");
  println!("machine {OSF_MACHINE}");
  println!("  login your-email@example.com");
  println!("  password your-personal-access-token");
  println!("```");

  Ok(())
}

/// Handle the setup command
fn handle_setup_command() -> Result<()> {
  print_info("Welcome to the osfetch credential setup wizard!");
  println!("This wizard will configure the OSF credentials used for fetching.");
  println!();

  println!("• Credentials will be stored in ~/.netrc");
  println!("• File permissions will be automatically set to 600 for security");
  println!("• Create a personal access token at https://osf.io/settings/tokens");
  println!();

  let home = home_dir()?;
  let netrc_path = get_netrc_path(&home);

  // Check if .netrc exists and warn about overwriting
  if netrc_path.exists() {
    print_warning("A .netrc file already exists.");
    print!("Do you want to add/update the osf.io entry? (y/n): ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    if !input.trim().to_lowercase().starts_with('y') {
      print_info("Setup cancelled.");
      return Ok(());
    }
  }

  print!("OSF login (email address): ");
  io::stdout().flush()?;
  let mut username = String::new();
  io::stdin().read_line(&mut username)?;
  let username = username.trim();

  print!("OSF personal access token: ");
  io::stdout().flush()?;
  let mut token = String::new();
  io::stdin().read_line(&mut token)?;
  let token = token.trim();

  if username.is_empty() || token.is_empty() {
    print_error("Both login and token are required.");
    return Ok(());
  }

  // Verify the credentials before storing them
  print_info("Verifying credentials against the OSF API...");
  let rt = tokio::runtime::Runtime::new()?;
  let client = create_osf_client(username, token);
  match rt.block_on(client.test_connection()) {
    Ok(()) => print_success("Credentials verified."),
    Err(e) => {
      print_error(&format!("Verification failed: {e}"));
      print_warning("Storing the credentials anyway; re-run 'osfetch creds setup' to fix them.");
    }
  }

  write_netrc_entry(&netrc_path, OSF_MACHINE, username, token)?;
  print_success(&format!(
    "Stored credentials for machine '{OSF_MACHINE}' in {}",
    format_path(&netrc_path.display().to_string())
  ));

  Ok(())
}
