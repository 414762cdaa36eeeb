//! Error types for the GoogleTest installer.
//!
//! This module defines semantic error variants for everything that can go
//! wrong between request validation and the end of the external-tool
//! pipeline. Validation errors are raised at construction time; pipeline
//! errors carry the step that failed and the offending command's status.

use crate::pipeline::PipelineStep;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur during request validation or installation.
#[derive(Debug, Error)]
pub enum InstallerError {
    /// A required argument was empty.
    #[error("{field} must not be empty")]
    InvalidArgument {
        /// Name of the offending argument.
        field: &'static str,
    },

    /// The installation prefix does not exist as a directory.
    #[error("installation prefix \"{path}\" does not exist")]
    PrefixNotFound {
        /// The prefix that was checked.
        path: Utf8PathBuf,
    },

    /// The marker header is already present under the prefix.
    #[error("GoogleTest is already installed under \"{path}\"")]
    AlreadyInstalled {
        /// The prefix containing the marker header.
        path: Utf8PathBuf,
    },

    /// A required environment variable is not set.
    #[error("environment variable \"{variable}\" is not set")]
    MissingEnvironment {
        /// Name of the missing variable.
        variable: &'static str,
    },

    /// The host operating system is not supported.
    #[error("platform \"{os}\" is not supported")]
    UnsupportedPlatform {
        /// The unrecognised operating system name.
        os: String,
    },

    /// An external pipeline command did not complete successfully.
    #[error("{step} step failed: {message}")]
    PipelineFailed {
        /// The pipeline step that failed.
        step: PipelineStep,
        /// The command's exit status, or the underlying failure description.
        message: String,
    },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using [`InstallerError`].
pub type Result<T> = std::result::Result<T, InstallerError>;
