//! Package manifest loading.
//!
//! Only the `name` and `version` fields of `package.json` matter for
//! packaging; every other field is ignored.

use crate::error::{PackagerError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// The default manifest path, relative to the working directory.
pub const DEFAULT_MANIFEST: &str = "package.json";

/// Package identity read from the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PackageMetadata {
    /// Package name, possibly scoped (`@scope/pkg`).
    pub name: String,
    /// Package version, without a leading `v`.
    pub version: String,
}

impl PackageMetadata {
    /// Parse metadata from manifest JSON.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] when the input is not a JSON object
    /// with string `name` and `version` fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use addon_packager::metadata::PackageMetadata;
    ///
    /// let meta = PackageMetadata::parse(r#"{"name": "@scope/pkg", "version": "1.2.3"}"#)
    ///     .expect("valid manifest");
    /// assert_eq!(meta.name, "@scope/pkg");
    /// assert_eq!(meta.version, "1.2.3");
    /// ```
    pub fn parse(contents: &str) -> serde_json::Result<Self> {
        serde_json::from_str(contents)
    }

    /// Read and parse the manifest at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::ManifestRead`] if the file cannot be read and
    /// [`PackagerError::ManifestParse`] if its contents are invalid.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| PackagerError::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents).map_err(|source| PackagerError::ManifestParse {
            path: path.to_path_buf(),
            source,
        })
    }
}
