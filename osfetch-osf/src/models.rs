//! Serde models for the JSON:API documents served by the OSF v2 API.
//!
//! Only the attributes the fetch workflow actually consumes are mapped;
//! the API returns far more metadata than listed here.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Represents OSF authentication credentials
#[derive(Clone)]
pub struct OsfAuth {
  pub username: String,
  pub token: String,
}

/// A paginated JSON:API listing of file entities
#[derive(Debug, Deserialize)]
pub struct OsfList {
  pub data: Vec<FileEntity>,
  #[serde(default)]
  pub links: PageLinks,
}

/// Top-level pagination links of a listing
#[derive(Debug, Default, Deserialize)]
pub struct PageLinks {
  pub next: Option<String>,
}

/// A single `files` entity: either a stored file or a folder
#[derive(Debug, Clone, Deserialize)]
pub struct FileEntity {
  pub id: String,
  pub attributes: FileAttributes,
  #[serde(default)]
  pub links: EntityLinks,
  #[serde(default)]
  pub relationships: Option<Relationships>,
}

impl FileEntity {
  /// Whether this entity is a downloadable file (as opposed to a folder)
  pub fn is_file(&self) -> bool {
    self.attributes.kind == EntityKind::File
  }

  /// Download URL for file entities
  pub fn download_url(&self) -> Option<&str> {
    self.links.download.as_deref()
  }

  /// Listing URL for folder entities (the related `files` collection)
  pub fn listing_url(&self) -> Option<&str> {
    self
      .relationships
      .as_ref()
      .and_then(|r| r.files.as_ref())
      .map(|f| f.links.related.href.as_str())
  }
}

/// Attributes of a `files` entity
#[derive(Debug, Clone, Deserialize)]
pub struct FileAttributes {
  pub kind: EntityKind,
  pub name: String,
  /// Waterbutler id path, e.g. `/5b6ee57c9ad5a1001767a5b9/`
  pub path: String,
  /// Human-readable path within the provider, e.g. `/Stimuli/bap.wav`
  pub materialized_path: String,
  pub size: Option<u64>,
  pub date_modified: Option<DateTime<Utc>>,
}

/// Kind discriminator for `files` entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
  File,
  Folder,
}

/// Links attached to a `files` entity
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntityLinks {
  pub download: Option<String>,
}

/// Relationships attached to a `files` entity
#[derive(Debug, Clone, Deserialize)]
pub struct Relationships {
  pub files: Option<RelatedFiles>,
}

/// The related `files` collection of a folder
#[derive(Debug, Clone, Deserialize)]
pub struct RelatedFiles {
  pub links: RelatedLinks,
}

/// Link container for a relationship
#[derive(Debug, Clone, Deserialize)]
pub struct RelatedLinks {
  pub related: RelatedHref,
}

/// An `href` wrapper in a relationship link
#[derive(Debug, Clone, Deserialize)]
pub struct RelatedHref {
  pub href: String,
}

/// A single-entity JSON:API document, as returned for a node
#[derive(Debug, Deserialize)]
pub struct NodeDocument {
  pub data: NodeEntity,
}

/// An OSF project node
#[derive(Debug, Deserialize)]
pub struct NodeEntity {
  pub id: String,
  pub attributes: NodeAttributes,
}

/// Attributes of a project node
#[derive(Debug, Deserialize)]
pub struct NodeAttributes {
  pub title: String,
  #[serde(default)]
  pub public: bool,
}
