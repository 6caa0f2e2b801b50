//! # Osfetch Core Library
//!
//! Core library for the osfetch workspace providing configuration
//! structures, credential discovery, and output utilities shared between
//! the OSF API client and the command-line tool.

pub mod config;
pub mod creds;
pub mod output;

// Re-export main types for the other workspace crates
pub use config::{ConfigDirs, ExistingFilePolicy, FetchConfig, get_config_dirs};
pub use creds::Credentials;
pub use output::{ColorMode, print_error, print_info, print_success, print_warning};
