//! # OSF HTTP Client
//!
//! HTTP client implementation for OSF API interactions, handling basic
//! authentication, request building, and the connection check used before
//! any fetch operation.

use reqwest::{Client, RequestBuilder, StatusCode};

use crate::consts::{DEFAULT_API_URL, USER_AGENT};
use crate::error::{FetchError, Result};
use crate::models::OsfAuth;

/// Represents an OSF API client
pub struct OsfClient {
  pub(crate) client: Client,
  pub(crate) base_url: String,
  pub(crate) auth: OsfAuth,
}

impl OsfClient {
  /// Create a new OSF client against the public API
  pub fn new(auth: OsfAuth) -> Self {
    Self::with_base_url(DEFAULT_API_URL, auth)
  }

  /// Create a new OSF client against a specific API deployment
  pub fn with_base_url(base_url: &str, auth: OsfAuth) -> Self {
    let client = Client::new();
    Self {
      client,
      base_url: base_url.trim_end_matches('/').to_string(),
      auth,
    }
  }

  /// The API base URL this client talks to
  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Build an authenticated GET request for the given URL
  pub(crate) fn get(&self, url: &str) -> RequestBuilder {
    self
      .client
      .get(url)
      .header("Accept", "application/vnd.api+json")
      .header("User-Agent", USER_AGENT)
      .basic_auth(&self.auth.username, Some(&self.auth.token))
  }

  /// Test the OSF connection by fetching the current user.
  ///
  /// An unreachable service and rejected credentials both surface as
  /// [`FetchError::Auth`]: either way no authenticated session exists.
  pub async fn test_connection(&self) -> Result<()> {
    let url = format!("{}/v2/users/me/", self.base_url);

    let response = self
      .get(&url)
      .send()
      .await
      .map_err(|e| FetchError::Auth(format!("Failed to connect to OSF: {e}")))?;

    match response.status() {
      status if status.is_success() => Ok(()),
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(FetchError::Auth(
        "OSF rejected the credentials. Please check your .netrc entry for osf.io.".to_string(),
      )),
      status => Err(FetchError::Transfer(format!(
        "Unexpected error: HTTP {status} - {}",
        response.text().await.unwrap_or_default()
      ))),
    }
  }
}

/// Create an OSF client from credentials
pub fn create_osf_client(username: &str, token: &str) -> OsfClient {
  let auth = OsfAuth {
    username: username.to_string(),
    token: token.to_string(),
  };

  OsfClient::new(auth)
}
