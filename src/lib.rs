//! Inspect the release targets of a Foundries.io factory.
//!
//! A factory builds each release version once per hardware platform. The
//! `show` command gathers every OSTree target of a version, checks that the
//! platforms were built from the same source commits, and prints tags, CI and
//! source links, per-platform OSTree hashes, and bundled app versions. Given
//! an app name it prints that app's files and compose configuration instead.
//!
//! # Modules
//!
//! - [`api`] - Targets API trait, HTTP client, and wire types
//! - [`cli`] - Command-line argument definitions
//! - [`config`] - Factory and API configuration
//! - [`error`] - Error types for fatal conditions
//! - [`inspect`] - Cross-platform target inspection
//! - [`render`] - Text output of inspection results
//! - [`show`] - The `show` command
//! - [`table`] - Aligned text tables

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod inspect;
pub mod render;
pub mod show;
pub mod table;
