//! # Osfetch CLI Library
//!
//! Library modules for the osfetch command-line tool, providing the
//! command definitions and the client plumbing shared by the handlers.

pub mod cli;
pub mod clients;
