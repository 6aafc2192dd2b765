//! CLI argument definitions for the addon packager.
//!
//! This module defines the command-line interface using clap. It is separated
//! from the main entrypoint to keep the binary small and focused on
//! orchestration.

use crate::archiver::ArchiverKind;
use crate::discovery::{DEFAULT_BINARY_NAME, DEFAULT_LIB_DIR};
use crate::host::HostIdentifiers;
use crate::metadata::DEFAULT_MANIFEST;
use crate::packager::PackagerConfig;
use clap::{ArgAction, Parser};
use log::LevelFilter;
use std::path::PathBuf;

/// Package prebuilt addon binaries into per-ABI `.tar.gz` archives.
#[derive(Parser, Debug, Clone)]
#[command(name = "package-binaries")]
#[command(version, about)]
#[command(long_about = concat!(
    "Package prebuilt addon binaries into per-ABI .tar.gz archives.\n\n",
    "Every directory named node-v<ABI> under the lib directory that contains ",
    "the addon binary becomes one archive named ",
    "<name>-v<version>-node-v<ABI>-<platform>-<arch>.tar.gz, holding only the ",
    "binary at its root. Name and version come from the package manifest; ",
    "platform and architecture default to the host.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Package every ABI build for the host:\n",
    "    $ package-binaries\n\n",
    "  Package a cross-compiled build without a system tar:\n",
    "    $ package-binaries --platform linux --arch arm64 --archiver native\n",
))]
pub struct Cli {
    /// Manifest providing the package name and version.
    #[arg(long, value_name = "FILE", default_value = DEFAULT_MANIFEST)]
    pub manifest: PathBuf,

    /// Directory containing the per-ABI (node-vNNN) build directories.
    #[arg(long, value_name = "DIR", default_value = DEFAULT_LIB_DIR)]
    pub lib_dir: PathBuf,

    /// Directory receiving the archives.
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Addon binary filename expected in each ABI directory.
    #[arg(long, value_name = "NAME", default_value = DEFAULT_BINARY_NAME)]
    pub binary_name: String,

    /// Platform identifier to tag archives with [default: host].
    #[arg(long, value_name = "ID")]
    pub platform: Option<String>,

    /// Architecture identifier to tag archives with [default: host].
    #[arg(long, value_name = "ID")]
    pub arch: Option<String>,

    /// Archiver used to create and list archives.
    #[arg(long, value_enum, default_value_t = ArchiverKind::Tar)]
    pub archiver: ArchiverKind,

    /// Increase log verbosity (repeat for more detail).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Build the packaging configuration, filling host identifiers that
    /// were not given on the command line.
    #[must_use]
    pub fn config(&self) -> PackagerConfig {
        self.config_for_host(HostIdentifiers::detect())
    }

    /// Build the packaging configuration against explicit host identifiers.
    #[must_use]
    pub fn config_for_host(&self, detected: HostIdentifiers) -> PackagerConfig {
        let host = HostIdentifiers {
            platform: self.platform.clone().unwrap_or(detected.platform),
            arch: self.arch.clone().unwrap_or(detected.arch),
        };
        PackagerConfig {
            manifest_path: self.manifest.clone(),
            lib_dir: self.lib_dir.clone(),
            output_dir: self.output_dir.clone(),
            binary_name: self.binary_name.clone(),
            host,
        }
    }

    /// Log level selected by `--verbose` and `--quiet`.
    #[must_use]
    pub const fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
