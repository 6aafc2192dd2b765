//! Archive creation and listing.
//!
//! Each tarball holds a single file stored at the archive root, not under
//! the ABI directory it was found in. [`TarCommandArchiver`] delegates to
//! the system `tar` (`tar -czf <archive> -C <dir> <file>`);
//! [`NativeArchiver`] builds the same archive in-process with the `tar` and
//! `flate2` crates.

use crate::command::{CommandExecutor, SystemCommandExecutor};
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use log::debug;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};
use thiserror::Error;

/// Program name of the system archiving tool.
const TAR: &str = "tar";

/// Errors arising from archive creation or listing.
#[derive(Debug, Error)]
pub enum ArchiverError {
    /// An I/O operation failed (spawning `tar`, reading or writing files).
    #[error("archive I/O error: {0}")]
    Io(#[from] io::Error),

    /// The archiving tool ran but reported failure.
    #[error("`{command}` exited with {status}: {stderr}")]
    CommandFailed {
        /// The command line that failed.
        command: String,
        /// Exit status reported by the tool.
        status: ExitStatus,
        /// Trimmed standard error of the tool.
        stderr: String,
    },

    /// A path cannot be passed to the archiving tool as UTF-8.
    #[error("path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),
}

/// Trait for creating and inspecting addon tarballs, enabling test mocking.
#[cfg_attr(test, mockall::automock)]
pub trait Archiver {
    /// Compress `source_dir/file_name` into a gzip tarball at
    /// `archive_path`, storing it at the archive root as `file_name`.
    ///
    /// # Errors
    ///
    /// Returns an [`ArchiverError`] when the archive cannot be written.
    fn create(
        &self,
        archive_path: &Path,
        source_dir: &Path,
        file_name: &str,
    ) -> Result<(), ArchiverError>;

    /// List the entry paths stored in the tarball at `archive_path`.
    ///
    /// # Errors
    ///
    /// Returns an [`ArchiverError`] when the archive cannot be read.
    fn list(&self, archive_path: &Path) -> Result<Vec<String>, ArchiverError>;
}

/// Archiver that shells out to the system `tar`.
#[derive(Debug, Clone, Default)]
pub struct TarCommandArchiver<E = SystemCommandExecutor> {
    executor: E,
}

impl TarCommandArchiver {
    /// Create an archiver running `tar` on the host.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: CommandExecutor> TarCommandArchiver<E> {
    /// Create an archiver running `tar` through `executor`.
    #[must_use]
    pub const fn with_executor(executor: E) -> Self {
        Self { executor }
    }

    fn invoke(&self, args: &[&str]) -> Result<Output, ArchiverError> {
        let command = format!("{TAR} {}", args.join(" "));
        debug!("running {command}");
        let output = self.executor.run(TAR, args)?;
        if output.status.success() {
            return Ok(output);
        }
        Err(ArchiverError::CommandFailed {
            command,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
        })
    }
}

impl<E: CommandExecutor> Archiver for TarCommandArchiver<E> {
    fn create(
        &self,
        archive_path: &Path,
        source_dir: &Path,
        file_name: &str,
    ) -> Result<(), ArchiverError> {
        let archive = utf8(archive_path)?;
        let dir = utf8(source_dir)?;
        self.invoke(&["-czf", archive, "-C", dir, file_name])?;
        Ok(())
    }

    fn list(&self, archive_path: &Path) -> Result<Vec<String>, ArchiverError> {
        let output = self.invoke(&["-tzf", utf8(archive_path)?])?;
        Ok(parse_listing(&output.stdout))
    }
}

fn utf8(path: &Path) -> Result<&str, ArchiverError> {
    path.to_str()
        .ok_or_else(|| ArchiverError::NonUtf8Path(path.to_path_buf()))
}

/// Split `tar -t` output into entry names, one per non-blank line.
fn parse_listing(stdout: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Archiver using the `tar` and `flate2` crates, with no external tool.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeArchiver;

impl Archiver for NativeArchiver {
    fn create(
        &self,
        archive_path: &Path,
        source_dir: &Path,
        file_name: &str,
    ) -> Result<(), ArchiverError> {
        let output = File::create(archive_path)?;
        let encoder = GzEncoder::new(output, Compression::default());
        let mut builder = tar::Builder::new(encoder);
        builder.append_path_with_name(source_dir.join(file_name), file_name)?;
        builder.into_inner()?.finish()?;
        Ok(())
    }

    fn list(&self, archive_path: &Path) -> Result<Vec<String>, ArchiverError> {
        let file = File::open(archive_path)?;
        let mut archive = tar::Archive::new(GzDecoder::new(file));
        let mut names = Vec::new();
        for entry in archive.entries()? {
            let entry = entry?;
            names.push(entry.path()?.to_string_lossy().into_owned());
        }
        Ok(names)
    }
}

/// Selects the [`Archiver`] implementation for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ArchiverKind {
    /// Shell out to the system `tar`.
    #[default]
    Tar,
    /// Build archives in-process.
    Native,
}

impl ArchiverKind {
    /// Instantiate the selected archiver.
    #[must_use]
    pub fn build(self) -> Box<dyn Archiver> {
        match self {
            Self::Tar => Box::new(TarCommandArchiver::new()),
            Self::Native => Box::new(NativeArchiver),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ScriptedTar, tar_failed, tar_succeeded};
    use rstest::{fixture, rstest};
    use std::fs;
    use std::io::Read;
    use tempfile::TempDir;

    #[fixture]
    fn temp_dir() -> TempDir {
        TempDir::new().expect("temp dir creation succeeds")
    }

    /// Write a fake addon binary into `dir/node-v115` and return that directory.
    fn abi_dir_with_binary(dir: &Path) -> PathBuf {
        let abi_dir = dir.join("node-v115");
        fs::create_dir_all(&abi_dir).expect("mkdir");
        fs::write(abi_dir.join("mbgl.node"), b"fake addon").expect("write binary");
        abi_dir
    }

    #[test]
    fn tar_create_reroots_binary_with_dash_c() {
        let archive = "pkg-v1.0.0-node-v115-linux-x64.tar.gz";
        let script = ScriptedTar::new().then(
            &["-czf", archive, "-C", "./lib/node-v115", "mbgl.node"],
            Ok(tar_succeeded("")),
        );
        let archiver = TarCommandArchiver::with_executor(script);

        archiver
            .create(
                Path::new(archive),
                Path::new("./lib/node-v115"),
                "mbgl.node",
            )
            .expect("create succeeds");
        archiver.executor.assert_finished();
    }

    #[test]
    fn tar_create_reports_tool_failure() {
        let script = ScriptedTar::new().then(
            &["-czf", "out.tar.gz", "-C", "lib/node-v115", "mbgl.node"],
            Ok(tar_failed("tar: mbgl.node: Cannot stat\n")),
        );
        let archiver = TarCommandArchiver::with_executor(script);

        let err = archiver
            .create(
                Path::new("out.tar.gz"),
                Path::new("lib/node-v115"),
                "mbgl.node",
            )
            .expect_err("tar failure propagates");
        match err {
            ArchiverError::CommandFailed {
                command, stderr, ..
            } => {
                assert_eq!(command, "tar -czf out.tar.gz -C lib/node-v115 mbgl.node");
                assert_eq!(stderr, "tar: mbgl.node: Cannot stat");
            }
            other => panic!("expected CommandFailed, got {other:?}"),
        }
    }

    #[test]
    fn tar_create_reports_spawn_failure() {
        let script = ScriptedTar::new().then(
            &["-czf", "out.tar.gz", "-C", "lib", "mbgl.node"],
            Err(io::Error::new(io::ErrorKind::NotFound, "tar not found")),
        );
        let archiver = TarCommandArchiver::with_executor(script);

        let err = archiver
            .create(Path::new("out.tar.gz"), Path::new("lib"), "mbgl.node")
            .expect_err("spawn failure propagates");
        assert!(matches!(err, ArchiverError::Io(_)));
    }

    #[test]
    fn tar_list_returns_entries() {
        let script = ScriptedTar::new().then(
            &["-tzf", "out.tar.gz"],
            Ok(tar_succeeded("mbgl.node\n\n")),
        );
        let archiver = TarCommandArchiver::with_executor(script);

        let entries = archiver
            .list(Path::new("out.tar.gz"))
            .expect("list succeeds");
        assert_eq!(entries, ["mbgl.node"]);
    }

    #[cfg(unix)]
    #[test]
    fn tar_rejects_non_utf8_paths_without_running() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let archiver = TarCommandArchiver::with_executor(ScriptedTar::new());
        let archive = Path::new(OsStr::from_bytes(b"out-\xff.tar.gz"));

        let err = archiver
            .create(archive, Path::new("lib/node-v115"), "mbgl.node")
            .expect_err("non-UTF-8 archive path");
        match err {
            ArchiverError::NonUtf8Path(path) => assert_eq!(path, archive),
            other => panic!("expected NonUtf8Path, got {other:?}"),
        }

        let err = archiver.list(archive).expect_err("non-UTF-8 path");
        assert!(matches!(err, ArchiverError::NonUtf8Path(_)));
        archiver.executor.assert_finished();
    }

    #[rstest]
    fn native_archive_stores_binary_at_root(temp_dir: TempDir) {
        let source_dir = abi_dir_with_binary(temp_dir.path());
        let archive_path = temp_dir.path().join("out.tar.gz");

        NativeArchiver
            .create(&archive_path, &source_dir, "mbgl.node")
            .expect("create succeeds");

        let entries = NativeArchiver.list(&archive_path).expect("list succeeds");
        assert_eq!(entries, ["mbgl.node"]);
    }

    #[rstest]
    fn native_archive_preserves_contents(temp_dir: TempDir) {
        let source_dir = abi_dir_with_binary(temp_dir.path());
        let archive_path = temp_dir.path().join("out.tar.gz");
        NativeArchiver
            .create(&archive_path, &source_dir, "mbgl.node")
            .expect("create succeeds");

        let file = File::open(&archive_path).expect("open archive");
        let mut archive = tar::Archive::new(GzDecoder::new(file));
        let mut entry = archive
            .entries()
            .expect("entries")
            .next()
            .expect("one entry")
            .expect("valid entry");
        let mut contents = Vec::new();
        entry.read_to_end(&mut contents).expect("read entry");
        assert_eq!(contents, b"fake addon");
    }

    #[rstest]
    fn native_archive_fails_for_missing_binary(temp_dir: TempDir) {
        let archive_path = temp_dir.path().join("out.tar.gz");
        let err = NativeArchiver
            .create(&archive_path, temp_dir.path(), "mbgl.node")
            .expect_err("missing binary");
        assert!(matches!(err, ArchiverError::Io(_)));
    }

    #[rstest]
    fn native_list_fails_for_missing_archive(temp_dir: TempDir) {
        let err = NativeArchiver
            .list(&temp_dir.path().join("absent.tar.gz"))
            .expect_err("missing archive");
        assert!(matches!(err, ArchiverError::Io(_)));
    }

    #[test]
    fn default_kind_is_system_tar() {
        assert_eq!(ArchiverKind::default(), ArchiverKind::Tar);
    }
}
