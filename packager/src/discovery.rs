//! ABI directory discovery.
//!
//! The addon build leaves one directory per Node ABI under the binary output
//! root (`lib/node-v115/mbgl.node`, `lib/node-v127/mbgl.node`, ...). Only
//! immediate children are scanned; order follows the directory listing and
//! is not sorted.

use crate::error::{PackagerError, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name prefix identifying an ABI directory.
pub const ABI_DIR_PREFIX: &str = "node-v";

/// The default binary output root.
pub const DEFAULT_LIB_DIR: &str = "./lib";

/// The default addon binary filename.
pub const DEFAULT_BINARY_NAME: &str = "mbgl.node";

/// A directory holding the addon binary built for one ABI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbiDirectory {
    dir_name: String,
    abi: String,
    path: PathBuf,
    binary_name: String,
}

impl AbiDirectory {
    /// Return the directory name, e.g. `node-v115`.
    #[must_use]
    pub fn dir_name(&self) -> &str {
        &self.dir_name
    }

    /// Return the ABI extracted from the directory name, e.g. `115`.
    #[must_use]
    pub fn abi(&self) -> &str {
        &self.abi
    }

    /// Return the directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the binary filename inside the directory.
    #[must_use]
    pub fn binary_name(&self) -> &str {
        &self.binary_name
    }

    /// Return the full path of the binary.
    #[must_use]
    pub fn binary_path(&self) -> PathBuf {
        self.path.join(&self.binary_name)
    }
}

/// Find the ABI directories under `root` that contain `binary_name`.
///
/// # Errors
///
/// Returns [`PackagerError::MissingOutputDirectory`] if `root` is not a
/// directory, [`PackagerError::NoAbiDirectoriesFound`] if no child
/// qualifies, and [`PackagerError::Io`] if the listing fails.
pub fn discover_abi_directories(root: &Path, binary_name: &str) -> Result<Vec<AbiDirectory>> {
    if !root.is_dir() {
        return Err(PackagerError::MissingOutputDirectory {
            path: root.to_path_buf(),
        });
    }

    let mut found = Vec::new();
    for entry in fs::read_dir(root)? {
        if let Some(abi_dir) = classify(&entry?.path(), binary_name) {
            found.push(abi_dir);
        }
    }

    if found.is_empty() {
        return Err(PackagerError::NoAbiDirectoriesFound {
            root: root.to_path_buf(),
            binary_name: binary_name.to_owned(),
        });
    }
    Ok(found)
}

/// Decide whether a child of the output root is an ABI directory.
fn classify(path: &Path, binary_name: &str) -> Option<AbiDirectory> {
    let Some(dir_name) = path.file_name().and_then(|name| name.to_str()) else {
        debug!("skipping {}: name is not valid UTF-8", path.display());
        return None;
    };
    let Some(abi) = dir_name.strip_prefix(ABI_DIR_PREFIX) else {
        debug!("skipping {dir_name}: no {ABI_DIR_PREFIX} prefix");
        return None;
    };
    if !path.is_dir() {
        debug!("skipping {dir_name}: not a directory");
        return None;
    }
    if !path.join(binary_name).is_file() {
        debug!("skipping {dir_name}: {binary_name} not found");
        return None;
    }

    Some(AbiDirectory {
        dir_name: dir_name.to_owned(),
        abi: abi.to_owned(),
        path: path.to_path_buf(),
        binary_name: binary_name.to_owned(),
    })
}
