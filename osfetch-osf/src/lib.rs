//! # OSF API Client
//!
//! Provides OSF v2 API integration for resolving project storage folders
//! and downloading their files, with credential discovery from `.netrc`
//! and a typed error taxonomy shared with the CLI.

pub mod auth;
pub mod client;
pub mod consts;
pub mod endpoints;
pub mod error;
pub mod models;

// Re-export the client
pub use client::{OsfClient, create_osf_client};
// Re-export error types
pub use error::{FetchError, Result};
// Re-export models
pub use models::{EntityKind, FileAttributes, FileEntity, NodeEntity, OsfAuth, OsfList};
// Re-export endpoint types
pub use endpoints::files::DownloadOutcome;
