//! # OSF Node Endpoints
//!
//! Endpoint implementations for project nodes: fetching node metadata and
//! locating the storage root of a provider within a node.

use reqwest::StatusCode;
use tracing::debug;

use crate::client::OsfClient;
use crate::error::{FetchError, Result};
use crate::models::{NodeDocument, NodeEntity};

impl OsfClient {
  /// Get a project node by its five-character identifier
  pub async fn get_node(&self, node: &str) -> Result<NodeEntity> {
    let url = format!("{}/v2/nodes/{node}/", self.base_url);
    debug!("fetching node metadata from {url}");

    let response = self
      .get(&url)
      .send()
      .await
      .map_err(|e| FetchError::Transfer(format!("Failed to fetch node '{node}': {e}")))?;

    match response.status() {
      StatusCode::OK => {
        let document = response
          .json::<NodeDocument>()
          .await
          .map_err(|e| FetchError::Transfer(format!("Failed to parse node '{node}': {e}")))?;
        Ok(document.data)
      }
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(FetchError::Auth(
        "Authentication failed. Please check your OSF credentials.".to_string(),
      )),
      StatusCode::NOT_FOUND | StatusCode::GONE => Err(FetchError::NotFound(format!("node '{node}' does not exist"))),
      status => Err(FetchError::Transfer(format!(
        "Unexpected error: HTTP {status} - {}",
        response.text().await.unwrap_or_default()
      ))),
    }
  }

  /// Listing URL of a storage provider's root folder within a node
  pub fn storage_root_url(&self, node: &str, provider: &str) -> String {
    format!("{}/v2/nodes/{node}/files/{provider}/", self.base_url)
  }
}

#[cfg(test)]
mod tests {
  use wiremock::matchers::{basic_auth, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use crate::client::OsfClient;
  use crate::error::FetchError;
  use crate::models::OsfAuth;

  fn test_client(base_url: &str) -> OsfClient {
    let auth = OsfAuth {
      username: "test_user".to_string(),
      token: "test_token".to_string(),
    };
    OsfClient::with_base_url(base_url, auth)
  }

  #[tokio::test]
  async fn test_get_node() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri());

    Mock::given(method("GET"))
      .and(path("/v2/nodes/zdtk7/"))
      .and(basic_auth("test_user", "test_token"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
          "data": {
              "id": "zdtk7",
              "type": "nodes",
              "attributes": {
                  "title": "Infant vowel discrimination stimuli",
                  "public": false
              }
          }
      })))
      .mount(&mock_server)
      .await;

    let node = client.get_node("zdtk7").await?;
    assert_eq!(node.id, "zdtk7");
    assert_eq!(node.attributes.title, "Infant vowel discrimination stimuli");

    Ok(())
  }

  #[tokio::test]
  async fn test_get_node_not_found() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri());

    Mock::given(method("GET"))
      .and(path("/v2/nodes/nope1/"))
      .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
          "errors": [{ "detail": "Not found." }]
      })))
      .mount(&mock_server)
      .await;

    let result = client.get_node("nope1").await;
    assert!(matches!(result, Err(FetchError::NotFound(_))));

    Ok(())
  }

  #[tokio::test]
  async fn test_get_node_unauthorized() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri());

    Mock::given(method("GET"))
      .and(path("/v2/nodes/zdtk7/"))
      .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
          "errors": [{ "detail": "Authentication credentials were not provided." }]
      })))
      .mount(&mock_server)
      .await;

    let result = client.get_node("zdtk7").await;
    assert!(matches!(result, Err(FetchError::Auth(_))));

    Ok(())
  }

  #[test]
  fn test_storage_root_url() {
    let client = test_client("https://api.test.osf.io");
    assert_eq!(
      client.storage_root_url("zdtk7", "osfstorage"),
      "https://api.test.osf.io/v2/nodes/zdtk7/files/osfstorage/"
    );
  }
}
