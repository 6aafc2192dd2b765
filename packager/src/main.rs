//! Addon packager CLI entrypoint.
//!
//! Thin wrapper around [`addon_packager::packager::Packager`] invoked by the
//! release workflow after the addon has been built for every Node ABI.
//! Progress goes to stdout, logs and the final error (if any) to stderr.

use addon_packager::cli::Cli;
use addon_packager::error::Result;
use addon_packager::packager::{PackageReport, Packager};
use clap::Parser;
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .format_timestamp(None)
        .parse_default_env()
        .init();

    let mut stdout = std::io::stdout().lock();
    if let Err(err) = run(&cli, &mut stdout) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli, out: &mut dyn Write) -> Result<PackageReport> {
    let packager = Packager::new(cli.config(), cli.archiver.build());
    packager.run(out)
}
