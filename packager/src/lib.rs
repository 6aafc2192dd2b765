//! Prebuilt native addon packager.
//!
//! This crate packages compiled addon binaries (`mbgl.node`) into one
//! `.tar.gz` archive per Node ABI directory, named so that installers can
//! pick the right binary for a host at install time. It is used by the
//! `package-binaries` CLI binary and can be driven programmatically from
//! tests or release tooling.
//!
//! # Modules
//!
//! - [`archiver`] - Archive creation and listing (system `tar` or in-process)
//! - [`cli`] - Command-line argument definitions
//! - [`command`] - External command execution abstraction
//! - [`discovery`] - ABI directory discovery under the binary output root
//! - [`error`] - Semantic error types for packaging failures
//! - [`host`] - Platform and architecture tag normalization
//! - [`metadata`] - Package manifest (`name`, `version`) loading
//! - [`naming`] - Tarball naming policy and package name sanitization
//! - [`packager`] - Packaging run orchestration

pub mod archiver;
pub mod cli;
pub mod command;
pub mod discovery;
pub mod error;
pub mod host;
pub mod metadata;
pub mod naming;
pub mod packager;

#[cfg(test)]
pub(crate) mod test_utils;
