//! Error taxonomy for the fetch workflow.
//!
//! Every failure surfaced by the client maps to one of a small set of
//! categories so the CLI can report precisely whether the problem is local
//! configuration, rejected credentials, a missing remote target, or a
//! failed transfer.

use thiserror::Error;

/// Result alias used throughout the OSF client.
pub type Result<T, E = FetchError> = std::result::Result<T, E>;

/// Errors produced while fetching data from OSF.
#[derive(Debug, Error)]
pub enum FetchError {
  /// Missing or malformed local configuration, including absent `.netrc`
  /// credentials. Raised before any network traffic happens.
  #[error("configuration error: {0}")]
  Config(String),

  /// The service rejected the credentials, or could not be reached while
  /// establishing the authenticated session.
  #[error("authentication failed: {0}")]
  Auth(String),

  /// The requested node, folder, or file does not exist remotely.
  #[error("not found: {0}")]
  NotFound(String),

  /// Remote read failure: unexpected status, unparsable response, or a
  /// truncated download body.
  #[error("transfer failed: {0}")]
  Transfer(String),

  /// Local filesystem failure while writing downloaded content.
  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),
}
