//! Vendored tree production
//!
//! Turns one checked-out CPython tree into one self-contained vendored
//! output directory: the `_sqlite` extension sources, the relocated test
//! suite with its support helpers, and a global identifier rewrite so the
//! copy refers to itself by the renamed package identifier.

use std::ffi::OsString;
use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::config;
use crate::echo::Echo;
use crate::error::{Result, VendorError};
use crate::fsops;

/// Upstream subtree holding the native extension sources
const MODULE_SUBTREE: &str = "Modules/_sqlite";

/// Upstream subtree holding the module's unit tests
const TEST_SUBTREE: &str = "Lib/sqlite3/test";

/// Upstream subtree holding the shared test-support helpers
const SUPPORT_SUBTREE: &str = "Lib/test/support";

/// How file names carry over during a subtree copy
#[derive(Clone, Copy)]
enum NameRule {
    Verbatim,
    /// Prepend `test_` to `*.py` base names that lack it; `__init__.py`
    /// passes through unchanged.
    TestPrefix,
}

/// Produces vendored output directories from an upstream checkout
pub struct TreeVendor<'a> {
    checkout: &'a Path,
    /// Root that echo lines are printed relative to
    work_root: &'a Path,
    echo: Echo,
}

impl<'a> TreeVendor<'a> {
    pub fn new(checkout: &'a Path, work_root: &'a Path, echo: Echo) -> Self {
        Self {
            checkout,
            work_root,
            echo,
        }
    }

    /// Build one vendored tree under `output`
    ///
    /// The output directory is destructively reset first, so the pass is
    /// idempotent with respect to whatever a previous run left there.
    pub fn vendor_into(&self, output: &Path) -> Result<()> {
        fsops::replace_tree(output)?;

        self.copy_subtree(
            &self.checkout.join(MODULE_SUBTREE),
            &output.join("_sqlite"),
            NameRule::Verbatim,
        )?;
        self.copy_subtree(
            &self.checkout.join(TEST_SUBTREE),
            &output.join("test"),
            NameRule::TestPrefix,
        )?;
        self.copy_subtree(
            &self.checkout.join(SUPPORT_SUBTREE),
            &output.join("test/test/support"),
            NameRule::Verbatim,
        )?;

        // Package marker so the relocated test tree resolves as importable
        let marker = output.join("test/test/__init__.py");
        fs::write(&marker, "").map_err(|e| VendorError::FileWriteFailed {
            path: marker.display().to_string(),
            reason: e.to_string(),
        })?;

        rewrite_identifiers(output, config::ORIGINAL_IDENT, config::VENDORED_IDENT)
    }

    fn copy_subtree(&self, src: &Path, dst: &Path, rule: NameRule) -> Result<()> {
        if !src.is_dir() {
            return Err(VendorError::SourceTreeMissing {
                path: src.display().to_string(),
            });
        }
        fs::create_dir_all(dst).map_err(|e| VendorError::FileWriteFailed {
            path: dst.display().to_string(),
            reason: e.to_string(),
        })?;

        for entry in fs::read_dir(src).map_err(|e| VendorError::FileReadFailed {
            path: src.display().to_string(),
            reason: e.to_string(),
        })? {
            let entry = entry?;
            let src_path = entry.path();

            if entry.file_type()?.is_dir() {
                self.copy_subtree(&src_path, &dst.join(entry.file_name()), rule)?;
                continue;
            }

            let dst_path = dst.join(vendored_name(entry.file_name(), rule));
            self.echo.copy(self.rel(&src_path), self.rel(&dst_path));
            fs::copy(&src_path, &dst_path).map_err(|e| VendorError::FileWriteFailed {
                path: dst_path.display().to_string(),
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }

    fn rel<'p>(&self, path: &'p Path) -> &'p Path {
        fsops::relative_to(path, self.work_root)
    }
}

/// Apply a [`NameRule`] to one file name
fn vendored_name(name: OsString, rule: NameRule) -> OsString {
    if !matches!(rule, NameRule::TestPrefix) {
        return name;
    }

    let text = name.to_string_lossy();
    let is_test_unit = text.ends_with(".py") && text != "__init__.py";
    if is_test_unit && !text.starts_with("test_") {
        OsString::from(format!("test_{text}"))
    } else {
        name
    }
}

/// Literal identifier rewrite over every UTF-8 file under `root`
///
/// This is a plain substring replace, with no regard for token boundaries:
/// that is the historical contract of the vendored tree, and changing it
/// would silently alter the output. Files that are not valid UTF-8 are
/// treated as binary and left untouched.
pub fn rewrite_identifiers(root: &Path, from: &str, to: &str) -> Result<()> {
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| VendorError::IoError {
            message: e.to_string(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let bytes = fs::read(path).map_err(|e| VendorError::FileReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let Ok(text) = String::from_utf8(bytes) else {
            continue;
        };
        if !text.contains(from) {
            continue;
        }

        fs::write(path, text.replace(from, to)).map_err(|e| VendorError::FileWriteFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
    }
    Ok(())
}
