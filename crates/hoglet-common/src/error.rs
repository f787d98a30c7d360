//! Unified error types for the hoglet workspace.
//!
//! The core crate defines its own `LaunchError` that wraps these common
//! variants where appropriate.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum HogletError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// An operating-system call failed.
    #[error("{call} failed: {message}")]
    Syscall {
        /// Name of the failing syscall or utility.
        call: &'static str,
        /// Errno or status text of the failure.
        message: String,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, HogletError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syscall_error_names_the_call() {
        let err = HogletError::Syscall {
            call: "unshare",
            message: "EPERM".into(),
        };
        assert_eq!(err.to_string(), "unshare failed: EPERM");
    }

    #[test]
    fn io_error_includes_path() {
        let err = HogletError::Io {
            path: PathBuf::from("/tmp/hoglet.log"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(err.to_string().contains("/tmp/hoglet.log"));
    }
}
