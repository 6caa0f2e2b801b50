//! Test utilities shared across the osfetch workspace
//!
//! This crate provides common testing infrastructure, currently HOME
//! directory isolation with a seeded `.netrc` file ([`NetrcGuard`]).
//!
//! The clippy dead_code lint is disabled for this crate because test
//! utilities may not be used by all tests, and the compiler cannot detect
//! usage across crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod netrc;

// Re-export commonly used items
pub use netrc::NetrcGuard;
