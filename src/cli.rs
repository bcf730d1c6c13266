//! CLI definitions using clap derive API

use clap::Parser;
use std::path::PathBuf;

use crate::config;

/// sqlvendor - bmnsqlite3 third-party tree updater
#[derive(Parser, Debug)]
#[command(
    name = "sqlvendor",
    author,
    version,
    about = "Rebuild the vendored CPython sqlite3 trees and the SQLite amalgamation",
    long_about = "For each supported CPython release series, sqlvendor resolves the newest \
                  upstream release tag, checks it out and produces a renamed, self-contained \
                  vendored copy of the _sqlite extension module and its test suite. It also \
                  downloads the pinned SQLite amalgamation. Every run is a full, destructive \
                  rebuild of the output directories."
)]
pub struct Cli {
    /// Working root for the upstream checkout and all output directories
    #[arg(long, short = 'w', default_value = config::DEFAULT_WORK_DIR)]
    pub work_dir: PathBuf,

    /// Suppress per-file progress lines (the summary table still prints)
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["sqlvendor"]).unwrap();
        assert_eq!(cli.work_dir, PathBuf::from("3rdparty"));
        assert!(!cli.quiet);
    }

    #[test]
    fn test_cli_work_dir_override() {
        let cli = Cli::try_parse_from(["sqlvendor", "-w", "/tmp/vendor"]).unwrap();
        assert_eq!(cli.work_dir, PathBuf::from("/tmp/vendor"));
    }

    #[test]
    fn test_cli_quiet_flag() {
        let cli = Cli::try_parse_from(["sqlvendor", "--quiet"]).unwrap();
        assert!(cli.quiet);
    }

    #[test]
    fn test_cli_rejects_unknown_flags() {
        assert!(Cli::try_parse_from(["sqlvendor", "--incremental"]).is_err());
    }
}
