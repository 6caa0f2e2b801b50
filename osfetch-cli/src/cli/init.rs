//! # Init Command
//!
//! Creates the configuration directories and writes the `osf.toml`
//! template for the user to fill in.

use anyhow::Result;
use osfetch_core::config::get_config_dirs;
use osfetch_core::output::{format_command, format_path, print_info, print_success};

/// Handle the init command
pub(crate) fn handle_init_command() -> Result<()> {
  let config_dirs = get_config_dirs()?;
  config_dirs.init()?;

  let config_path = config_dirs.fetch_config_path();
  if config_dirs.write_config_template()? {
    print_success(&format!(
      "Wrote configuration template to {}",
      format_path(&config_path.display().to_string())
    ));
    print_info("Fill in the `node` field with your OSF project identifier.");
  } else {
    print_info(&format!(
      "Configuration already exists at {}",
      format_path(&config_path.display().to_string())
    ));
  }

  println!(
    "Next, run {} to configure your OSF credentials.",
    format_command("osfetch creds setup")
  );

  Ok(())
}
