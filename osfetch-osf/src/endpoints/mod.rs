//! # OSF API Endpoints
//!
//! Endpoint implementations on [`OsfClient`](crate::client::OsfClient),
//! split by resource: project nodes and stored files.

pub mod files;
pub mod nodes;
