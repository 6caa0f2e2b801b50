//! Constants for the OSF API client
//!
//! This module defines the default API location, the environment variable
//! used to point the client at a different deployment (or a test server),
//! and other static strings shared by the endpoint implementations.

/// Default base URL of the OSF API
pub const DEFAULT_API_URL: &str = "https://api.osf.io";

/// Environment variable overriding the API base URL
pub const ENV_OSF_API_URL: &str = "OSF_API_URL";

/// User-Agent header sent with every request
pub const USER_AGENT: &str = "osfetch-cli";

/// Default storage provider within a node
pub const DEFAULT_PROVIDER: &str = "osfstorage";
