//! SQLite amalgamation download and extraction
//!
//! One blocking GET fetches the pinned amalgamation zip fully into memory,
//! then every entry is re-extracted with the archive's single top-level
//! wrapper directory stripped. Entries that are absolute or not inside a
//! wrapper directory abort the run before anything is written for them.

use std::fs;
use std::io::Cursor;
use std::path::{Component, Path, PathBuf};

use zip::ZipArchive;

use crate::echo::Echo;
use crate::error::{Result, VendorError};
use crate::fsops;
use crate::resolver::ReleaseVersion;

/// The pinned amalgamation release: publication year plus full version
#[derive(Debug, Clone, Copy)]
pub struct SqliteRelease {
    pub year: u16,
    pub version: ReleaseVersion,
}

impl SqliteRelease {
    /// Download URL, e.g. `https://www.sqlite.org/2022/sqlite-amalgamation-3370200.zip`
    pub fn archive_url(&self) -> String {
        format!(
            "https://www.sqlite.org/{}/sqlite-amalgamation-{}{:02}{:02}00.zip",
            self.year, self.version.major, self.version.minor, self.version.patch
        )
    }
}

/// Download the amalgamation and extract it into `output`
///
/// `work_root` is only used to print echo lines relative to the work dir,
/// as the copy pass does.
pub fn fetch_amalgamation(
    release: &SqliteRelease,
    output: &Path,
    work_root: &Path,
    echo: Echo,
) -> Result<()> {
    fsops::replace_tree(output)?;

    let url = release.archive_url();
    echo.download(&url);
    let payload = download(&url)?;

    extract_archive(&payload, output, work_root, echo)
}

fn download(url: &str) -> Result<Vec<u8>> {
    let network_error = |e: reqwest::Error| VendorError::DownloadFailed {
        url: url.to_string(),
        reason: e.to_string(),
    };

    let response = reqwest::blocking::get(url)
        .map_err(network_error)?
        .error_for_status()
        .map_err(network_error)?;

    Ok(response.bytes().map_err(network_error)?.to_vec())
}

/// Extract a zip payload into `output`, stripping the top-level directory
///
/// Every non-directory entry must have a relative path with at least two
/// components; the first one (the wrapper directory) is discarded. Anything
/// else is treated as a malformed or adversarial archive.
pub fn extract_archive(payload: &[u8], output: &Path, work_root: &Path, echo: Echo) -> Result<()> {
    let mut archive = ZipArchive::new(Cursor::new(payload))?;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }

        let name = entry.name().to_string();
        let stripped = strip_wrapper_dir(&name)?;

        let dst = output.join(stripped);
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent).map_err(|e| VendorError::FileWriteFailed {
                path: parent.display().to_string(),
                reason: e.to_string(),
            })?;
        }

        echo.unzip(&name, fsops::relative_to(&dst, work_root));
        let mut file = fs::File::create(&dst).map_err(|e| VendorError::FileWriteFailed {
            path: dst.display().to_string(),
            reason: e.to_string(),
        })?;
        std::io::copy(&mut entry, &mut file).map_err(|e| VendorError::FileWriteFailed {
            path: dst.display().to_string(),
            reason: e.to_string(),
        })?;
    }

    Ok(())
}

/// Validate an entry path and drop its first component
///
/// `.` components are normalized away before the depth check, so `./a.txt`
/// is a single-segment entry and rejected rather than extracted to the
/// output root.
fn strip_wrapper_dir(name: &str) -> Result<PathBuf> {
    let path = Path::new(name);
    let layout_violation = || VendorError::ArchiveLayout {
        entry: name.to_string(),
    };

    if path.is_absolute() || name.starts_with('/') {
        return Err(layout_violation());
    }

    let segments: Vec<Component<'_>> = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    if segments.len() < 2 {
        return Err(layout_violation());
    }

    Ok(segments[1..].iter().collect())
}
