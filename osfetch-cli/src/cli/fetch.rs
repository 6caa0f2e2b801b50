//! # Fetch Command
//!
//! Downloads the files of the configured OSF storage folder to local
//! disk: authenticate, resolve the folder, then copy each file in
//! sequence, honoring the existing-file policy.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use osfetch_core::config::ExistingFilePolicy;
use osfetch_core::output::{format_id, format_path, format_size, print_info, print_success, print_warning};
use osfetch_osf::{DownloadOutcome, FetchError, FileEntity, OsfClient};

use crate::cli::target::{ResolvedTarget, TargetArgs, load_config, resolve_target};
use crate::clients::create_runtime_and_client;

/// Command for downloading remote files
#[derive(Args)]
pub struct FetchArgs {
  #[command(flatten)]
  pub target: TargetArgs,

  /// Destination directory for downloaded files (overrides osf.toml)
  #[arg(long)]
  pub dest: Option<PathBuf>,

  /// Overwrite local files that already exist instead of skipping them
  #[arg(long)]
  pub overwrite: bool,

  /// Only fetch files with these names; all files when omitted
  #[arg(value_name = "NAME")]
  pub names: Vec<String>,
}

/// Handle the fetch command
pub(crate) fn handle_fetch_command(args: FetchArgs) -> Result<()> {
  let config = load_config()?;
  let target = resolve_target(&args.target, config.as_ref())?;

  let dest = args
    .dest
    .clone()
    .or_else(|| config.as_ref().map(|c| c.dest.clone()))
    .unwrap_or_else(|| PathBuf::from("data"));

  let policy = resolve_policy(args.overwrite, config.as_ref().map(|c| c.on_existing));

  let (rt, client) = create_runtime_and_client()?;
  rt.block_on(run_fetch(&client, &target, &dest, policy, &args.names))
}

/// The `--overwrite` flag wins; otherwise the configured policy applies.
fn resolve_policy(overwrite_flag: bool, configured: Option<ExistingFilePolicy>) -> ExistingFilePolicy {
  if overwrite_flag {
    ExistingFilePolicy::Overwrite
  } else {
    configured.unwrap_or_default()
  }
}

/// Restrict the folder contents to the requested file names, erroring on
/// names that do not exist remotely. An empty request selects everything.
fn select_files(files: Vec<FileEntity>, names: &[String]) -> Result<Vec<FileEntity>, FetchError> {
  if names.is_empty() {
    return Ok(files);
  }

  let mut selected = Vec::new();
  for name in names {
    match files.iter().find(|e| &e.attributes.name == name) {
      Some(entity) => selected.push(entity.clone()),
      None => {
        return Err(FetchError::NotFound(format!(
          "file '{name}' not found in the remote folder"
        )));
      }
    }
  }

  Ok(selected)
}

async fn run_fetch(
  client: &OsfClient,
  target: &ResolvedTarget,
  dest: &Path,
  policy: ExistingFilePolicy,
  names: &[String],
) -> Result<()> {
  // Establish the authenticated session before resolving anything, so
  // rejected credentials never leave a local file behind
  client.test_connection().await?;

  let node_entity = client.get_node(&target.node).await?;
  print_info(&format!(
    "Fetching '{}' from '{}' ({})",
    target.folder,
    node_entity.attributes.title,
    format_id(&node_entity.id)
  ));

  let entities = client.resolve_folder(&target.node, &target.provider, &target.folder).await?;
  let files: Vec<FileEntity> = entities.into_iter().filter(|e| e.is_file()).collect();
  let selected = select_files(files, names)?;

  if selected.is_empty() {
    print_warning("No files to fetch.");
    return Ok(());
  }

  let pb = ProgressBar::new(selected.len() as u64);
  pb.set_style(ProgressStyle::with_template("{bar:40.green} {pos}/{len} {msg}")?.progress_chars("=> "));

  let mut downloaded: u64 = 0;
  let mut skipped: u64 = 0;
  let mut bytes: u64 = 0;

  for entity in &selected {
    pb.set_message(entity.attributes.name.clone());

    match client.download_file(entity, dest, policy).await? {
      DownloadOutcome::Downloaded(_, written) => {
        downloaded += 1;
        bytes += written;
      }
      DownloadOutcome::Skipped(_) => skipped += 1,
    }

    pb.inc(1);
  }

  pb.finish_and_clear();

  print_success(&format!(
    "Downloaded {downloaded} file(s) ({}) to {}, skipped {skipped} existing.",
    format_size(bytes),
    format_path(&dest.display().to_string())
  ));

  Ok(())
}
