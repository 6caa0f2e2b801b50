//! # Configuration Management
//!
//! Handles application configuration and directory management for the
//! osfetch tool, including XDG base directory support and the `osf.toml`
//! fetch configuration describing which project node and folder to pull.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Template written by `osfetch init` for the user to copy and fill in.
pub const CONFIG_TEMPLATE: &str = r#"# osfetch configuration
#
# `node` is the five-character OSF project identifier, visible in the
# project URL (https://osf.io/<node>/). Credentials are NOT stored here;
# they live in ~/.netrc under machine osf.io.

# OSF project node to fetch from (required)
node = ""

# Storage provider within the node
provider = "osfstorage"

# Materialized folder path to fetch, e.g. "/Stimuli/"
folder = "/"

# Local destination directory for downloaded files
dest = "data"

# What to do when a local file already exists: "skip" or "overwrite"
on_existing = "skip"
"#;

/// Policy applied when a download target already exists on disk.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExistingFilePolicy {
  /// Leave the existing file untouched and do not contact the server.
  #[default]
  Skip,
  /// Replace the existing file with the remote content.
  Overwrite,
}

/// Fetch configuration loaded from `osf.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
  /// OSF project node identifier (e.g. `zdtk7`).
  pub node: String,

  /// Storage provider within the node.
  #[serde(default = "default_provider")]
  pub provider: String,

  /// Materialized folder path to fetch.
  #[serde(default = "default_folder")]
  pub folder: String,

  /// Local destination directory.
  #[serde(default = "default_dest")]
  pub dest: PathBuf,

  /// Policy for files that already exist locally.
  #[serde(default)]
  pub on_existing: ExistingFilePolicy,
}

fn default_provider() -> String {
  "osfstorage".to_string()
}

fn default_folder() -> String {
  "/".to_string()
}

fn default_dest() -> PathBuf {
  PathBuf::from("data")
}

/// Represents the configuration directories for the osfetch application
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub config_dir: PathBuf,
  pub data_dir: PathBuf,
  pub cache_dir: Option<PathBuf>,
}

impl ConfigDirs {
  /// Create a new ConfigDirs instance
  pub fn new() -> Result<Self> {
    let proj_dirs = ProjectDirs::from("fr", "coml", "osfetch").context("Failed to determine project directories")?;

    let config_dir = proj_dirs.config_dir().to_path_buf();
    let data_dir = proj_dirs.data_dir().to_path_buf();
    let cache_dir = Some(proj_dirs.cache_dir().to_path_buf());

    Ok(Self {
      config_dir,
      data_dir,
      cache_dir,
    })
  }

  /// Get the config directory
  pub fn config_dir(&self) -> &PathBuf {
    &self.config_dir
  }

  /// Get the data directory
  pub fn data_dir(&self) -> &PathBuf {
    &self.data_dir
  }

  /// Get the cache directory
  pub fn cache_dir(&self) -> Option<&PathBuf> {
    self.cache_dir.as_ref()
  }

  /// Initialize the configuration directories
  pub fn init(&self) -> Result<()> {
    fs::create_dir_all(&self.config_dir).context("Failed to create config directory")?;
    fs::create_dir_all(&self.data_dir).context("Failed to create data directory")?;
    if let Some(cache_dir) = &self.cache_dir {
      fs::create_dir_all(cache_dir).context("Failed to create cache directory")?;
    }

    Ok(())
  }

  /// Get the path to the fetch configuration file
  pub fn fetch_config_path(&self) -> PathBuf {
    self.config_dir.join("osf.toml")
  }

  /// Load the fetch configuration, or `None` when the file does not exist
  pub fn load_fetch_config(&self) -> Result<Option<FetchConfig>> {
    load_fetch_config_from(&self.fetch_config_path())
  }

  /// Save the fetch configuration to file
  pub fn save_fetch_config(&self, config: &FetchConfig) -> Result<()> {
    let config_path = self.fetch_config_path();

    // Ensure config directory exists
    if let Some(parent) = config_path.parent() {
      fs::create_dir_all(parent).with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }

    let content = toml::to_string_pretty(config).context("Failed to serialize fetch config to TOML")?;

    fs::write(&config_path, content)
      .with_context(|| format!("Failed to write fetch config to {}", config_path.display()))?;

    Ok(())
  }

  /// Write the commented configuration template, unless a config already
  /// exists. Returns `true` when the template was written.
  pub fn write_config_template(&self) -> Result<bool> {
    let config_path = self.fetch_config_path();
    if config_path.exists() {
      return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
      fs::create_dir_all(parent).with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }

    fs::write(&config_path, CONFIG_TEMPLATE)
      .with_context(|| format!("Failed to write config template to {}", config_path.display()))?;

    Ok(true)
  }
}

/// Load a fetch configuration from an explicit path.
pub fn load_fetch_config_from(path: &Path) -> Result<Option<FetchConfig>> {
  if !path.exists() {
    return Ok(None);
  }

  let content =
    fs::read_to_string(path).with_context(|| format!("Failed to read fetch config from {}", path.display()))?;

  let config: FetchConfig =
    toml::from_str(&content).with_context(|| format!("Failed to parse fetch config from {}", path.display()))?;

  if config.node.is_empty() {
    anyhow::bail!("Fetch config {} has an empty `node` field", path.display());
  }

  Ok(Some(config))
}

/// Get the configuration directories
pub fn get_config_dirs() -> Result<ConfigDirs> {
  ConfigDirs::new()
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_load_fetch_config_full() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("osf.toml");
    fs::write(
      &path,
      r#"node = "zdtk7"
provider = "osfstorage"
folder = "/Stimuli/"
dest = "stimuli"
on_existing = "overwrite"
"#,
    )
    .unwrap();

    let config = load_fetch_config_from(&path).unwrap().unwrap();
    assert_eq!(config.node, "zdtk7");
    assert_eq!(config.provider, "osfstorage");
    assert_eq!(config.folder, "/Stimuli/");
    assert_eq!(config.dest, PathBuf::from("stimuli"));
    assert_eq!(config.on_existing, ExistingFilePolicy::Overwrite);
  }

  #[test]
  fn test_load_fetch_config_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("osf.toml");
    fs::write(&path, "node = \"zdtk7\"\n").unwrap();

    let config = load_fetch_config_from(&path).unwrap().unwrap();
    assert_eq!(config.provider, "osfstorage");
    assert_eq!(config.folder, "/");
    assert_eq!(config.dest, PathBuf::from("data"));
    assert_eq!(config.on_existing, ExistingFilePolicy::Skip);
  }

  #[test]
  fn test_load_fetch_config_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("osf.toml");

    let config = load_fetch_config_from(&path).unwrap();
    assert!(config.is_none());
  }

  #[test]
  fn test_load_fetch_config_malformed() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("osf.toml");
    fs::write(&path, "node = [not toml").unwrap();

    let result = load_fetch_config_from(&path);
    assert!(result.is_err());
  }

  #[test]
  fn test_load_fetch_config_empty_node() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("osf.toml");
    fs::write(&path, "node = \"\"\n").unwrap();

    let result = load_fetch_config_from(&path);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("empty `node`"));
  }

  #[test]
  fn test_config_template_parses() {
    // The shipped template must stay loadable once `node` is filled in
    let filled = CONFIG_TEMPLATE.replace("node = \"\"", "node = \"zdtk7\"");
    let config: FetchConfig = toml::from_str(&filled).unwrap();
    assert_eq!(config.node, "zdtk7");
    assert_eq!(config.on_existing, ExistingFilePolicy::Skip);
  }

  #[test]
  fn test_fetch_config_roundtrip() {
    let config = FetchConfig {
      node: "zdtk7".to_string(),
      provider: "osfstorage".to_string(),
      folder: "/Stimuli/".to_string(),
      dest: PathBuf::from("stimuli"),
      on_existing: ExistingFilePolicy::Skip,
    };

    let serialized = toml::to_string_pretty(&config).unwrap();
    let parsed: FetchConfig = toml::from_str(&serialized).unwrap();
    assert_eq!(parsed.node, config.node);
    assert_eq!(parsed.folder, config.folder);
    assert_eq!(parsed.on_existing, config.on_existing);
  }
}
