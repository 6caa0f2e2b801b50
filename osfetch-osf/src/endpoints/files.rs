//! # OSF File Endpoints
//!
//! Endpoint implementations for stored files: paginated folder listings,
//! materialized-path resolution, and file download to local disk.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use osfetch_core::config::ExistingFilePolicy;
use reqwest::StatusCode;
use tracing::{debug, trace};

use crate::client::OsfClient;
use crate::error::{FetchError, Result};
use crate::models::{FileEntity, OsfList};

/// Result of a single file download
#[derive(Debug, PartialEq, Eq)]
pub enum DownloadOutcome {
  /// The file was written to the given path with the given size in bytes
  Downloaded(PathBuf, u64),
  /// The file already existed locally and the policy left it untouched
  Skipped(PathBuf),
}

impl OsfClient {
  /// List every entity of a folder, following JSON:API pagination until
  /// the listing is exhausted.
  pub async fn list_folder(&self, url: &str) -> Result<Vec<FileEntity>> {
    let mut entities = Vec::new();
    let mut next = Some(url.to_string());

    while let Some(page_url) = next {
      debug!("listing {page_url}");

      let response = self
        .get(&page_url)
        .send()
        .await
        .map_err(|e| FetchError::Transfer(format!("Failed to fetch listing: {e}")))?;

      let page = match response.status() {
        StatusCode::OK => response
          .json::<OsfList>()
          .await
          .map_err(|e| FetchError::Transfer(format!("Failed to parse listing: {e}")))?,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
          return Err(FetchError::Auth(
            "Authentication failed. Please check your OSF credentials.".to_string(),
          ));
        }
        StatusCode::NOT_FOUND | StatusCode::GONE => {
          return Err(FetchError::NotFound(format!("no listing at {page_url}")));
        }
        status => {
          return Err(FetchError::Transfer(format!(
            "Unexpected error: HTTP {status} - {}",
            response.text().await.unwrap_or_default()
          )));
        }
      };

      trace!("page returned {} entities", page.data.len());
      entities.extend(page.data);
      next = page.links.next;
    }

    Ok(entities)
  }

  /// Resolve a materialized folder path within a node's storage provider
  /// and return the entities it contains.
  ///
  /// The path is walked one segment at a time from the provider root, the
  /// way the folder hierarchy is exposed by the API; `/` resolves to the
  /// root listing itself.
  pub async fn resolve_folder(&self, node: &str, provider: &str, folder: &str) -> Result<Vec<FileEntity>> {
    let mut url = self.storage_root_url(node, provider);

    for segment in folder.split('/').filter(|s| !s.is_empty()) {
      let entries = self.list_folder(&url).await?;

      let dir = entries
        .iter()
        .find(|e| !e.is_file() && e.attributes.name == segment)
        .ok_or_else(|| FetchError::NotFound(format!("folder '{segment}' not found in '{folder}' on node '{node}'")))?;

      url = dir
        .listing_url()
        .ok_or_else(|| FetchError::Transfer(format!("folder '{segment}' has no listing link")))?
        .to_string();
    }

    self.list_folder(&url).await
  }

  /// Download a file entity into the destination directory.
  ///
  /// With [`ExistingFilePolicy::Skip`] an existing local file short-circuits
  /// before any network traffic. A response body shorter or longer than the
  /// advertised `Content-Length` is treated as a failed transfer and the
  /// partial file is removed.
  pub async fn download_file(
    &self,
    entity: &FileEntity,
    dest: &Path,
    policy: ExistingFilePolicy,
  ) -> Result<DownloadOutcome> {
    let name = &entity.attributes.name;
    // The name comes from the server; it must stay a plain file name so
    // the target cannot land outside the destination directory
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
      return Err(FetchError::Transfer(format!("refusing unsafe remote file name '{name}'")));
    }
    let target = dest.join(name);

    if target.exists() && policy == ExistingFilePolicy::Skip {
      debug!("skipping existing file {}", target.display());
      return Ok(DownloadOutcome::Skipped(target));
    }

    let url = entity
      .download_url()
      .ok_or_else(|| FetchError::Transfer(format!("file '{name}' has no download link")))?;
    debug!("downloading {name} from {url}");

    let mut response = self
      .get(url)
      .send()
      .await
      .map_err(|e| FetchError::Transfer(format!("Failed to request '{name}': {e}")))?;

    match response.status() {
      status if status.is_success() => {}
      StatusCode::NOT_FOUND | StatusCode::GONE => {
        return Err(FetchError::NotFound(format!("file '{name}' does not exist remotely")));
      }
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
        return Err(FetchError::Auth(
          "Authentication failed. Please check your OSF credentials.".to_string(),
        ));
      }
      status => {
        return Err(FetchError::Transfer(format!(
          "Unexpected error: HTTP {status} while downloading '{name}'"
        )));
      }
    }

    let expected = response.content_length();

    fs::create_dir_all(dest)?;
    let mut file = fs::File::create(&target)?;
    let mut written: u64 = 0;

    loop {
      match response.chunk().await {
        Ok(Some(chunk)) => {
          file.write_all(&chunk)?;
          written += chunk.len() as u64;
        }
        Ok(None) => break,
        Err(e) => {
          drop(file);
          let _ = fs::remove_file(&target);
          return Err(FetchError::Transfer(format!("Remote read failed for '{name}': {e}")));
        }
      }
    }

    file.flush()?;
    drop(file);

    if let Some(expected) = expected
      && expected != written
    {
      let _ = fs::remove_file(&target);
      return Err(FetchError::Transfer(format!(
        "Truncated download for '{name}': expected {expected} bytes, got {written}"
      )));
    }

    Ok(DownloadOutcome::Downloaded(target, written))
  }
}
