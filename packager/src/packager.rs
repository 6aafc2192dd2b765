//! Packaging run orchestration.
//!
//! A run normalizes the host tags, reads the manifest, discovers the ABI
//! directories and creates one tarball per directory, strictly in sequence.
//! The first failure ends the run; tarballs already written stay on disk.

use crate::archiver::Archiver;
use crate::discovery::{
    AbiDirectory, DEFAULT_BINARY_NAME, DEFAULT_LIB_DIR, discover_abi_directories,
};
use crate::error::{PackagerError, Result};
use crate::host::{ArchTag, HostIdentifiers, PlatformTag, normalize_arch, normalize_platform};
use crate::metadata::{DEFAULT_MANIFEST, PackageMetadata};
use crate::naming::{TarballName, sanitize_package_name};
use log::info;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Inputs for a packaging run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagerConfig {
    /// Manifest providing the package `name` and `version`.
    pub manifest_path: PathBuf,
    /// Binary output root holding the `node-v<ABI>` directories.
    pub lib_dir: PathBuf,
    /// Directory receiving the tarballs.
    pub output_dir: PathBuf,
    /// Addon binary filename expected in each ABI directory.
    pub binary_name: String,
    /// Raw platform and architecture identifiers to tag tarballs with.
    pub host: HostIdentifiers,
}

impl Default for PackagerConfig {
    fn default() -> Self {
        Self {
            manifest_path: PathBuf::from(DEFAULT_MANIFEST),
            lib_dir: PathBuf::from(DEFAULT_LIB_DIR),
            output_dir: PathBuf::from("."),
            binary_name: DEFAULT_BINARY_NAME.to_owned(),
            host: HostIdentifiers::detect(),
        }
    }
}

/// A tarball written during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagedTarball {
    /// The tarball's name.
    pub name: TarballName,
    /// Where the tarball was written.
    pub path: PathBuf,
    /// Entry paths listed from the tarball after creation.
    pub entries: Vec<String>,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageReport {
    /// Created tarballs, in creation order.
    pub tarballs: Vec<PackagedTarball>,
}

impl PackageReport {
    /// Return the filenames of the created tarballs.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.tarballs.iter().map(|t| t.name.filename()).collect()
    }
}

/// Tag and version values shared by every tarball in a run.
struct RunContext {
    clean_name: String,
    version: String,
    platform: PlatformTag,
    arch: ArchTag,
}

/// Packages addon binaries using the configured archiver.
pub struct Packager {
    config: PackagerConfig,
    archiver: Box<dyn Archiver>,
}

impl Packager {
    /// Create a packager for `config`.
    #[must_use]
    pub fn new(config: PackagerConfig, archiver: Box<dyn Archiver>) -> Self {
        Self { config, archiver }
    }

    /// Create one tarball per discovered ABI directory.
    ///
    /// Progress text for the operator is written to `out`.
    ///
    /// # Errors
    ///
    /// Returns the first failure: an unreadable manifest, a missing output
    /// root, no ABI directories, or an archiver failure. Tarballs created
    /// before the failure are not removed.
    pub fn run(&self, out: &mut dyn Write) -> Result<PackageReport> {
        let platform = normalize_platform(&self.config.host.platform);
        let arch = normalize_arch(&self.config.host.arch);
        let metadata = PackageMetadata::load(&self.config.manifest_path)?;

        writeln!(
            out,
            "Creating tarballs for platform: {platform}, arch: {arch}, version: {}",
            metadata.version
        )?;

        let abi_dirs = discover_abi_directories(&self.config.lib_dir, &self.config.binary_name)?;
        let dir_names: Vec<&str> = abi_dirs.iter().map(AbiDirectory::dir_name).collect();
        writeln!(out, "Found ABI directories: {}", dir_names.join(", "))?;

        fs::create_dir_all(&self.config.output_dir).map_err(|source| {
            PackagerError::OutputDirectory {
                path: self.config.output_dir.clone(),
                source,
            }
        })?;

        let context = RunContext {
            clean_name: sanitize_package_name(&metadata.name),
            version: metadata.version,
            platform,
            arch,
        };

        let mut report = PackageReport::default();
        for abi_dir in &abi_dirs {
            let name = TarballName::new(
                context.clean_name.as_str(),
                context.version.as_str(),
                abi_dir.abi(),
                context.platform.clone(),
                context.arch.clone(),
            );
            let tarball = self.create_tarball(abi_dir, name, out)?;
            report.tarballs.push(tarball);
        }

        writeln!(
            out,
            "\nSuccessfully created {} tarballs:",
            report.tarballs.len()
        )?;
        for tarball in &report.tarballs {
            writeln!(out, "  {}", tarball.name)?;
        }
        Ok(report)
    }

    /// Archive the binary in `abi_dir` as `name`, then list the result.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::ArchiveCreationFailed`] or
    /// [`PackagerError::ArchiveListingFailed`] when the archiver fails, and
    /// [`PackagerError::Io`] when progress cannot be written.
    pub fn create_tarball(
        &self,
        abi_dir: &AbiDirectory,
        name: TarballName,
        out: &mut dyn Write,
    ) -> Result<PackagedTarball> {
        let filename = name.filename();
        let path = self.config.output_dir.join(&filename);

        writeln!(out, "Creating tarball: {filename}")?;
        writeln!(
            out,
            "  Platform: {}, Arch: {}, ABI: {}",
            name.platform(),
            name.arch(),
            name.abi()
        )?;
        writeln!(out, "  Binary: {}", abi_dir.binary_path().display())?;

        self.archiver
            .create(&path, abi_dir.path(), abi_dir.binary_name())
            .map_err(|source| PackagerError::ArchiveCreationFailed {
                name: filename.clone(),
                source,
            })?;

        writeln!(out, "  Tarball contents:")?;
        let entries = self.archiver.list(&path).map_err(|source| {
            PackagerError::ArchiveListingFailed {
                name: filename,
                source,
            }
        })?;
        for entry in &entries {
            writeln!(out, "    {entry}")?;
        }

        info!("created {}", path.display());
        Ok(PackagedTarball {
            name,
            path,
            entries,
        })
    }
}
