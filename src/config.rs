//! Compiled-in pipeline configuration
//!
//! Everything the pipeline needs to know is pinned here: the upstream
//! repository, the release series to vendor for, the SQLite amalgamation
//! pin, and the identifier rewrite pair. There is deliberately no runtime
//! configuration file; bumping a pin is a code change.

use crate::fetch::SqliteRelease;
use crate::resolver::{ReleaseVersion, TargetVersion};

/// Upstream repository holding the module and test sources
pub const CPYTHON_GIT_URL: &str = "https://github.com/python/cpython.git";

/// Directory name of the upstream checkout, under the work dir
pub const CPYTHON_DIR_NAME: &str = "cpython";

/// Directory name of the shared amalgamation extraction, under the work dir
pub const SQLITE_DIR_NAME: &str = "sqlite";

/// Default work dir, matching the tree layout of the consuming package
pub const DEFAULT_WORK_DIR: &str = "3rdparty";

/// CPython release series a vendored tree is produced for
pub const TARGET_VERSIONS: [TargetVersion; 4] = [
    TargetVersion::new(3, 7),
    TargetVersion::new(3, 8),
    TargetVersion::new(3, 9),
    TargetVersion::new(3, 10),
];

/// Pinned SQLite amalgamation release, shared by all target series
pub const SQLITE_RELEASE: SqliteRelease = SqliteRelease {
    year: 2022,
    version: ReleaseVersion::new(3, 37, 2),
};

/// Identifier the upstream module refers to itself by
pub const ORIGINAL_IDENT: &str = "sqlite3";

/// Identifier of the renamed package the vendored copy must live under
pub const VENDORED_IDENT: &str = "bmnsqlite3";

/// Output directory name for one target series, e.g. `cpython-3.7`
pub fn version_dir_name(target: TargetVersion) -> String {
    format!("cpython-{target}")
}
