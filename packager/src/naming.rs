//! Tarball naming policy for prebuilt addon archives.
//!
//! Installers locate a binary by reconstructing its archive name, so the
//! format is fixed:
//! `<clean_name>-v<version>-node-v<abi>-<platform>-<arch>.tar.gz`.

use crate::discovery::ABI_DIR_PREFIX;
use crate::host::{ArchTag, PlatformTag};
use std::fmt;

/// The fixed file extension for addon archives.
pub const TARBALL_EXTENSION: &str = ".tar.gz";

/// Make a package name safe for use in a filename.
///
/// Every `@` and `/` becomes `-`, so scoped names keep their shape.
///
/// # Examples
///
/// ```
/// use addon_packager::naming::sanitize_package_name;
///
/// assert_eq!(sanitize_package_name("@scope/pkg"), "-scope-pkg");
/// ```
#[must_use]
pub fn sanitize_package_name(name: &str) -> String {
    name.replace(['@', '/'], "-")
}

/// A fully-qualified tarball name.
///
/// # Examples
///
/// ```
/// use addon_packager::host::{ArchTag, PlatformTag};
/// use addon_packager::naming::TarballName;
///
/// let name = TarballName::new("-scope-pkg", "1.2.3", "115", PlatformTag::Linux, ArchTag::X64);
/// assert_eq!(
///     name.to_string(),
///     "-scope-pkg-v1.2.3-node-v115-linux-x64.tar.gz"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TarballName {
    clean_name: String,
    version: String,
    abi: String,
    platform: PlatformTag,
    arch: ArchTag,
}

impl TarballName {
    /// Create a tarball name from an already sanitized package name and
    /// normalized tags.
    #[must_use]
    pub fn new(
        clean_name: impl Into<String>,
        version: impl Into<String>,
        abi: impl Into<String>,
        platform: PlatformTag,
        arch: ArchTag,
    ) -> Self {
        Self {
            clean_name: clean_name.into(),
            version: version.into(),
            abi: abi.into(),
            platform,
            arch,
        }
    }

    /// Return the ABI component.
    #[must_use]
    pub fn abi(&self) -> &str {
        &self.abi
    }

    /// Return the platform component.
    #[must_use]
    pub const fn platform(&self) -> &PlatformTag {
        &self.platform
    }

    /// Return the architecture component.
    #[must_use]
    pub const fn arch(&self) -> &ArchTag {
        &self.arch
    }

    /// Return the filename as a string without consuming the value.
    #[must_use]
    pub fn filename(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TarballName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-v{}-{ABI_DIR_PREFIX}{}-{}-{}{TARBALL_EXTENSION}",
            self.clean_name, self.version, self.abi, self.platform, self.arch
        )
    }
}

/// Format a tarball filename from its components.
///
/// Shorthand for [`TarballName::new`] followed by [`TarballName::filename`].
#[must_use]
pub fn build_tarball_name(
    clean_name: &str,
    version: &str,
    abi: &str,
    platform: &PlatformTag,
    arch: &ArchTag,
) -> String {
    TarballName::new(clean_name, version, abi, platform.clone(), arch.clone()).filename()
}
