//! Platform and architecture tags for tarball names.
//!
//! Installers select a prebuilt binary by the platform and architecture
//! identifiers reported by the Node runtime (`process.platform`,
//! `process.arch`). Tags are normalized to that fixed vocabulary; anything
//! else is logged as a warning and passed through unchanged so packaging
//! never fails on an unfamiliar host.

use log::warn;
use std::fmt;

/// A normalized operating system tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlatformTag {
    /// Linux.
    Linux,
    /// macOS.
    Darwin,
    /// Windows.
    Win32,
    /// An unrecognized identifier, kept verbatim.
    Other(String),
}

impl PlatformTag {
    /// Return the tag as it appears in tarball names.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Linux => "linux",
            Self::Darwin => "darwin",
            Self::Win32 => "win32",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for PlatformTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized CPU architecture tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArchTag {
    /// 64-bit x86.
    X64,
    /// 64-bit ARM.
    Arm64,
    /// 32-bit x86.
    Ia32,
    /// 32-bit ARM.
    Arm,
    /// IBM Z.
    S390x,
    /// 64-bit PowerPC.
    Ppc64,
    /// An unrecognized identifier, kept verbatim.
    Other(String),
}

impl ArchTag {
    /// Return the tag as it appears in tarball names.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::X64 => "x64",
            Self::Arm64 => "arm64",
            Self::Ia32 => "ia32",
            Self::Arm => "arm",
            Self::S390x => "s390x",
            Self::Ppc64 => "ppc64",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for ArchTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a raw platform identifier onto a [`PlatformTag`].
///
/// Unknown identifiers are logged at `warn` level and returned unchanged.
///
/// # Examples
///
/// ```
/// use addon_packager::host::{PlatformTag, normalize_platform};
///
/// assert_eq!(normalize_platform("darwin"), PlatformTag::Darwin);
/// assert_eq!(normalize_platform("freebsd").as_str(), "freebsd");
/// ```
#[must_use]
pub fn normalize_platform(raw: &str) -> PlatformTag {
    match raw {
        "linux" => PlatformTag::Linux,
        "darwin" => PlatformTag::Darwin,
        "win32" => PlatformTag::Win32,
        other => {
            warn!("Unknown platform: {other}, using as-is");
            PlatformTag::Other(other.to_owned())
        }
    }
}

/// Map a raw architecture identifier onto an [`ArchTag`].
///
/// Unknown identifiers are logged at `warn` level and returned unchanged.
///
/// # Examples
///
/// ```
/// use addon_packager::host::{ArchTag, normalize_arch};
///
/// assert_eq!(normalize_arch("arm64"), ArchTag::Arm64);
/// assert_eq!(normalize_arch("riscv64").as_str(), "riscv64");
/// ```
#[must_use]
pub fn normalize_arch(raw: &str) -> ArchTag {
    match raw {
        "x64" => ArchTag::X64,
        "arm64" => ArchTag::Arm64,
        "ia32" => ArchTag::Ia32,
        "arm" => ArchTag::Arm,
        "s390x" => ArchTag::S390x,
        "ppc64" => ArchTag::Ppc64,
        other => {
            warn!("Unknown architecture: {other}, using as-is");
            ArchTag::Other(other.to_owned())
        }
    }
}

/// Raw platform and architecture identifiers reported by the host.
///
/// Identifiers use the Node runtime's vocabulary. They are not yet
/// normalized; pass them through [`normalize_platform`] and
/// [`normalize_arch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostIdentifiers {
    /// Raw platform identifier, e.g. `linux` or `darwin`.
    pub platform: String,
    /// Raw architecture identifier, e.g. `x64` or `arm64`.
    pub arch: String,
}

impl HostIdentifiers {
    /// Detect the identifiers of the machine running this process.
    #[must_use]
    pub fn detect() -> Self {
        Self::from_rust_consts(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Translate Rust's `std::env::consts` names into host identifiers.
    ///
    /// # Examples
    ///
    /// ```
    /// use addon_packager::host::HostIdentifiers;
    ///
    /// let host = HostIdentifiers::from_rust_consts("macos", "aarch64");
    /// assert_eq!(host.platform, "darwin");
    /// assert_eq!(host.arch, "arm64");
    /// ```
    #[must_use]
    pub fn from_rust_consts(os: &str, arch: &str) -> Self {
        Self {
            platform: platform_identifier(os).to_owned(),
            arch: arch_identifier(arch).to_owned(),
        }
    }
}

fn platform_identifier(os: &str) -> &str {
    match os {
        "macos" => "darwin",
        "windows" => "win32",
        "solaris" | "illumos" => "sunos",
        other => other,
    }
}

fn arch_identifier(arch: &str) -> &str {
    match arch {
        "x86_64" => "x64",
        "aarch64" => "arm64",
        "x86" => "ia32",
        "powerpc" => "ppc",
        "powerpc64" => "ppc64",
        "loongarch64" => "loong64",
        other => other,
    }
}
