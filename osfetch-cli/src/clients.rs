//! # Client Creation
//!
//! Centralized client creation for the OSF API. This module resolves the
//! user's home directory, discovers credentials, and hands back a tokio
//! runtime together with an authenticated client for the command handlers.

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::BaseDirs;
use osfetch_osf::OsfClient;
use osfetch_osf::auth::create_osf_runtime_and_client;
use tokio::runtime::Runtime;

/// Resolve the current user's home directory
pub fn home_dir() -> Result<PathBuf> {
  let base_dirs = BaseDirs::new().context("Could not determine base directories")?;
  Ok(base_dirs.home_dir().to_path_buf())
}

/// Creates a tokio runtime and an authenticated OSF client using
/// credentials from `.netrc`
pub fn create_runtime_and_client() -> Result<(Runtime, OsfClient)> {
  let home = home_dir()?;
  let (rt, client) = create_osf_runtime_and_client(&home)?;
  Ok((rt, client))
}
