//! Error types for the vendoring pipeline
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for vendoring operations
#[derive(Error, Diagnostic, Debug)]
pub enum VendorError {
    // External tool errors
    #[error("'{tool}' executable not found")]
    #[diagnostic(
        code(sqlvendor::tool::missing),
        help("Install {tool} and make sure it is on your PATH")
    )]
    ToolMissing { tool: String },

    #[error("Command failed{}: {command}", exit_label(.code))]
    #[diagnostic(code(sqlvendor::tool::command_failed))]
    CommandFailed { command: String, code: Option<i32> },

    // Network errors
    #[error("Failed to download {url}: {reason}")]
    #[diagnostic(
        code(sqlvendor::fetch::download_failed),
        help("Check your network connection and that the release is still published")
    )]
    DownloadFailed { url: String, reason: String },

    // Archive errors
    #[error("Failed to read archive: {reason}")]
    #[diagnostic(code(sqlvendor::fetch::archive_read_failed))]
    ArchiveReadFailed { reason: String },

    #[error("Unexpected archive entry: {entry}")]
    #[diagnostic(
        code(sqlvendor::fetch::archive_layout),
        help("The amalgamation archive is expected to wrap all files in one top-level directory")
    )]
    ArchiveLayout { entry: String },

    // File system errors
    #[error("Failed to read file: {path}")]
    #[diagnostic(code(sqlvendor::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(sqlvendor::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Source tree is missing: {path}")]
    #[diagnostic(
        code(sqlvendor::fs::source_missing),
        help("The upstream checkout does not contain the expected subtree; the tag may predate it")
    )]
    SourceTreeMissing { path: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(sqlvendor::fs::io_error))]
    IoError { message: String },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" with exit code {code}"),
        None => String::from(" (terminated by signal)"),
    }
}

impl From<std::io::Error> for VendorError {
    fn from(err: std::io::Error) -> Self {
        VendorError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<zip::result::ZipError> for VendorError {
    fn from(err: zip::result::ZipError) -> Self {
        VendorError::ArchiveReadFailed {
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, VendorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_missing_display() {
        let err = VendorError::ToolMissing {
            tool: "git".to_string(),
        };
        assert_eq!(err.to_string(), "'git' executable not found");
    }

    #[test]
    fn test_command_failed_with_code() {
        let err = VendorError::CommandFailed {
            command: "git fetch --tags".to_string(),
            code: Some(128),
        };
        assert_eq!(
            err.to_string(),
            "Command failed with exit code 128: git fetch --tags"
        );
    }

    #[test]
    fn test_command_failed_by_signal() {
        let err = VendorError::CommandFailed {
            command: "git tag".to_string(),
            code: None,
        };
        assert!(err.to_string().contains("terminated by signal"));
    }

    #[test]
    fn test_archive_layout_display() {
        let err = VendorError::ArchiveLayout {
            entry: "a.txt".to_string(),
        };
        assert!(err.to_string().contains("Unexpected archive entry"));
        assert!(err.to_string().contains("a.txt"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: VendorError = io_err.into();
        assert!(matches!(err, VendorError::IoError { .. }));
    }
}
