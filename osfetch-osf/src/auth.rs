//! Authentication helpers for the OSF client.
//!
//! This module provides convenience functions for loading credentials from
//! the user's `.netrc` and creating ready-to-use OSF clients. Credential
//! discovery happens entirely locally; no network traffic is performed
//! until the returned client is actually used.

use std::path::Path;

use osfetch_core::creds::netrc::{get_netrc_path, parse_netrc_file};
use osfetch_core::creds::{Credentials, OSF_MACHINE};
use tokio::runtime::Runtime;
use url::Url;

use crate::client::{OsfClient, create_osf_client};
use crate::consts::ENV_OSF_API_URL;
use crate::error::{FetchError, Result};

/// Check if OSF credentials are available for the current user.
pub fn check_osf_credentials(home: &Path) -> Result<bool> {
  let netrc_path = get_netrc_path(home);
  if !netrc_path.exists() {
    return Ok(false);
  }

  let creds = parse_netrc_file(&netrc_path, OSF_MACHINE).map_err(|e| FetchError::Config(e.to_string()))?;
  Ok(creds.is_some())
}

/// Load OSF credentials from `.netrc`.
pub fn get_osf_credentials(home: &Path) -> Result<Credentials> {
  let netrc_path = get_netrc_path(home);
  if !netrc_path.exists() {
    return Err(FetchError::Config(format!(
      "No .netrc file found at {}. Create one with an entry for machine '{OSF_MACHINE}'.",
      netrc_path.display()
    )));
  }

  match parse_netrc_file(&netrc_path, OSF_MACHINE).map_err(|e| FetchError::Config(e.to_string()))? {
    Some(creds) => Ok(creds),
    None => Err(FetchError::Config(format!(
      "OSF credentials not found in .netrc file. Please add credentials for machine '{OSF_MACHINE}'."
    ))),
  }
}

/// Base URL for the API, honoring the `OSF_API_URL` override.
pub fn api_base_url() -> Result<Option<String>> {
  match std::env::var(ENV_OSF_API_URL) {
    Ok(raw) => {
      let parsed = Url::parse(&raw).map_err(|e| FetchError::Config(format!("Invalid {ENV_OSF_API_URL} '{raw}': {e}")))?;
      Ok(Some(parsed.to_string()))
    }
    Err(_) => Ok(None),
  }
}

/// Creates an authenticated OSF client using credentials from `.netrc`.
pub fn create_osf_client_from_netrc(home: &Path) -> Result<OsfClient> {
  let credentials = get_osf_credentials(home)?;

  let client = match api_base_url()? {
    Some(base_url) => OsfClient::with_base_url(
      &base_url,
      crate::models::OsfAuth {
        username: credentials.username,
        token: credentials.password,
      },
    ),
    None => create_osf_client(&credentials.username, &credentials.password),
  };

  Ok(client)
}

/// Creates a tokio runtime and an authenticated OSF client.
pub fn create_osf_runtime_and_client(home: &Path) -> Result<(Runtime, OsfClient)> {
  let rt = Runtime::new()?;
  let client = create_osf_client_from_netrc(home)?;
  Ok((rt, client))
}

#[cfg(test)]
mod tests {
  use osfetch_test_utils::NetrcGuard;

  use super::*;

  #[test]
  fn test_get_osf_credentials() {
    let content = r#"machine osf.io
  login researcher@example.com
  password osf-token
"#;
    let guard = NetrcGuard::new(content);

    let creds = get_osf_credentials(guard.home_dir()).unwrap();
    assert_eq!(creds.username, "researcher@example.com");
    assert_eq!(creds.password, "osf-token");
  }

  #[test]
  fn test_get_osf_credentials_missing_entry() {
    let guard = NetrcGuard::new("machine github.com login u password p\n");

    let error = get_osf_credentials(guard.home_dir()).unwrap_err();
    assert!(matches!(error, FetchError::Config(_)));
    assert!(error.to_string().contains("osf.io"));
  }

  #[test]
  fn test_get_osf_credentials_missing_file() {
    let guard = NetrcGuard::new("");
    let missing_home = guard.home_dir().join("nowhere");

    let error = get_osf_credentials(&missing_home).unwrap_err();
    assert!(matches!(error, FetchError::Config(_)));
    assert!(error.to_string().contains("No .netrc file"));
  }

  #[test]
  fn test_check_osf_credentials() {
    let content = r#"machine osf.io
  login researcher@example.com
  password osf-token
"#;

    let guard = NetrcGuard::new(content);
    assert!(check_osf_credentials(guard.home_dir()).unwrap());
  }

  #[test]
  fn test_check_osf_credentials_with_empty_netrc() {
    let guard = NetrcGuard::new("");

    assert!(!check_osf_credentials(guard.home_dir()).unwrap());
  }

  #[test]
  fn test_create_client_from_netrc() {
    let content = r#"machine osf.io
  login researcher@example.com
  password osf-token
"#;
    let guard = NetrcGuard::new(content);

    let client = create_osf_client_from_netrc(guard.home_dir()).unwrap();
    assert_eq!(client.base_url(), "https://api.osf.io");
  }
}
