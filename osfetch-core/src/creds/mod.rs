//! # Credential Management
//!
//! Retrieval and storage of the OSF credentials used to authenticate
//! against the API. Credentials live exclusively in the user's `.netrc`
//! file, outside the repository and excluded from version control; they
//! are read at process start and held only in memory.

pub mod netrc;

/// Machine entry looked up in `.netrc` for OSF credentials.
pub const OSF_MACHINE: &str = "osf.io";

/// Represents credentials for a service
#[derive(Debug, Clone)]
pub struct Credentials {
  pub username: String,
  pub password: String,
}
