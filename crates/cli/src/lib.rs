//! `docscan` command-line library crate.
//!
//! Exposes argument parsing, configuration and command implementations so
//! integration tests and the binary entrypoint can both reach them.

pub mod args;
pub mod commands;
pub mod config;
