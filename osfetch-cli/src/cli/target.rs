//! # Target Resolution
//!
//! Merges command-line flags with the `osf.toml` configuration into the
//! node/provider/folder triple the remote operations act on. Flags win
//! over the configuration file.

use clap::Args;
use osfetch_core::config::{FetchConfig, get_config_dirs};
use osfetch_osf::FetchError;
use osfetch_osf::consts::DEFAULT_PROVIDER;

/// Flags selecting which remote folder to operate on
#[derive(Args, Debug, Default)]
pub struct TargetArgs {
  /// OSF project node identifier (overrides osf.toml)
  #[arg(long)]
  pub node: Option<String>,

  /// Storage provider within the node (overrides osf.toml)
  #[arg(long)]
  pub provider: Option<String>,

  /// Materialized folder path, e.g. /Stimuli/ (overrides osf.toml)
  #[arg(long)]
  pub folder: Option<String>,
}

/// A fully resolved remote target
#[derive(Debug, PartialEq, Eq)]
pub struct ResolvedTarget {
  pub node: String,
  pub provider: String,
  pub folder: String,
}

/// Load the fetch configuration, mapping failures into the configuration
/// error category.
pub fn load_config() -> Result<Option<FetchConfig>, FetchError> {
  let config_dirs = get_config_dirs().map_err(|e| FetchError::Config(e.to_string()))?;
  config_dirs
    .load_fetch_config()
    .map_err(|e| FetchError::Config(e.to_string()))
}

/// Resolve the remote target from flags and configuration.
///
/// The node is required; everything else falls back to defaults matching
/// the public OSF storage layout.
pub fn resolve_target(args: &TargetArgs, config: Option<&FetchConfig>) -> Result<ResolvedTarget, FetchError> {
  let node = args
    .node
    .clone()
    .or_else(|| config.map(|c| c.node.clone()))
    .ok_or_else(|| {
      FetchError::Config(
        "No project node configured. Pass --node or set `node` in osf.toml (run 'osfetch init').".to_string(),
      )
    })?;

  let provider = args
    .provider
    .clone()
    .or_else(|| config.map(|c| c.provider.clone()))
    .unwrap_or_else(|| DEFAULT_PROVIDER.to_string());

  let folder = args
    .folder
    .clone()
    .or_else(|| config.map(|c| c.folder.clone()))
    .unwrap_or_else(|| "/".to_string());

  Ok(ResolvedTarget { node, provider, folder })
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use osfetch_core::config::ExistingFilePolicy;

  use super::*;

  fn test_config() -> FetchConfig {
    FetchConfig {
      node: "zdtk7".to_string(),
      provider: "osfstorage".to_string(),
      folder: "/Stimuli/".to_string(),
      dest: PathBuf::from("stimuli"),
      on_existing: ExistingFilePolicy::Skip,
    }
  }

  #[test]
  fn test_resolve_target_from_config() {
    let args = TargetArgs::default();
    let target = resolve_target(&args, Some(&test_config())).unwrap();

    assert_eq!(
      target,
      ResolvedTarget {
        node: "zdtk7".to_string(),
        provider: "osfstorage".to_string(),
        folder: "/Stimuli/".to_string(),
      }
    );
  }

  #[test]
  fn test_resolve_target_flags_override_config() {
    let args = TargetArgs {
      node: Some("abc12".to_string()),
      provider: None,
      folder: Some("/Recordings/".to_string()),
    };
    let target = resolve_target(&args, Some(&test_config())).unwrap();

    assert_eq!(target.node, "abc12");
    assert_eq!(target.provider, "osfstorage");
    assert_eq!(target.folder, "/Recordings/");
  }

  #[test]
  fn test_resolve_target_defaults_without_config() {
    let args = TargetArgs {
      node: Some("abc12".to_string()),
      provider: None,
      folder: None,
    };
    let target = resolve_target(&args, None).unwrap();

    assert_eq!(target.provider, "osfstorage");
    assert_eq!(target.folder, "/");
  }

  #[test]
  fn test_resolve_target_requires_node() {
    let args = TargetArgs::default();
    let result = resolve_target(&args, None);

    match result {
      Err(FetchError::Config(msg)) => assert!(msg.contains("--node")),
      other => panic!("expected Config error, got {other:?}"),
    }
  }
}
