//! # Ls Command
//!
//! Lists the contents of the configured OSF storage folder without
//! downloading anything, mirroring what a fetch would resolve.

use anyhow::Result;
use clap::Args;
use osfetch_core::output::{format_size, print_info};
use osfetch_osf::OsfClient;

use crate::cli::target::{TargetArgs, load_config, resolve_target};
use crate::clients::create_runtime_and_client;

/// Command for listing remote files
#[derive(Args)]
pub struct LsArgs {
  #[command(flatten)]
  pub target: TargetArgs,
}

/// Handle the ls command
pub(crate) fn handle_ls_command(args: LsArgs) -> Result<()> {
  let config = load_config()?;
  let target = resolve_target(&args.target, config.as_ref())?;

  let (rt, client) = create_runtime_and_client()?;
  rt.block_on(run_ls(&client, &target.node, &target.provider, &target.folder))
}

async fn run_ls(client: &OsfClient, node: &str, provider: &str, folder: &str) -> Result<()> {
  let entities = client.resolve_folder(node, provider, folder).await?;

  if entities.is_empty() {
    print_info(&format!("Folder '{folder}' on node '{node}' is empty."));
    return Ok(());
  }

  for entity in &entities {
    let size = match entity.attributes.size {
      Some(bytes) if entity.is_file() => format_size(bytes),
      _ => "-".to_string(),
    };
    let modified = entity
      .attributes
      .date_modified
      .map(|d| d.format("%Y-%m-%d").to_string())
      .unwrap_or_else(|| "-".to_string());

    println!("{size:>10}  {modified}  {}", entity.attributes.materialized_path);
  }

  Ok(())
}
