//! Error types for the addon packager.
//!
//! Every variant is fatal for a packaging run. The CLI reports the message
//! on stderr and exits with status 1; archives written before the failure
//! are left in place.

use crate::archiver::ArchiverError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while packaging addon binaries.
#[derive(Debug, Error)]
pub enum PackagerError {
    /// The binary output root (normally `./lib`) does not exist.
    #[error("lib directory not found: {}", .path.display())]
    MissingOutputDirectory {
        /// Path that was expected to hold the ABI directories.
        path: PathBuf,
    },

    /// The output root holds no `node-v<ABI>` directory containing the binary.
    #[error("no ABI directories with {binary_name} found in {}", .root.display())]
    NoAbiDirectoriesFound {
        /// The scanned output root.
        root: PathBuf,
        /// The binary filename each ABI directory must contain.
        binary_name: String,
    },

    /// The archiver failed to create a tarball.
    #[error("failed to create tarball {name}: {source}")]
    ArchiveCreationFailed {
        /// Filename of the tarball being created.
        name: String,
        /// The underlying archiver failure.
        #[source]
        source: ArchiverError,
    },

    /// The archiver created a tarball but could not list its contents.
    #[error("failed to list tarball {name}: {source}")]
    ArchiveListingFailed {
        /// Filename of the tarball being listed.
        name: String,
        /// The underlying archiver failure.
        #[source]
        source: ArchiverError,
    },

    /// The package manifest could not be read.
    #[error("failed to read manifest {}: {source}", .path.display())]
    ManifestRead {
        /// Path of the manifest file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The package manifest is not valid JSON or lacks `name`/`version`.
    #[error("invalid manifest {}: {source}", .path.display())]
    ManifestParse {
        /// Path of the manifest file.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The directory receiving the tarballs could not be created.
    #[error("cannot create output directory {}: {source}", .path.display())]
    OutputDirectory {
        /// The requested output directory.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An I/O operation failed (scanning the output root, writing progress).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using [`PackagerError`].
pub type Result<T> = std::result::Result<T, PackagerError>;
