//! Error types for the launch path.

use hoglet_common::error::HogletError;
use thiserror::Error;

/// Errors surfaced by the launcher and the components it starts.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// `clone(2)` refused to create the namespace root.
    #[error("failed to create namespace root: {source}")]
    CreateFailed {
        /// Errno reported by the kernel.
        source: nix::Error,
    },

    /// A shared failure bubbled up from a lower layer (I/O, sockets,
    /// plain syscalls).
    #[error(transparent)]
    Common(#[from] HogletError),

    /// The host kernel cannot provide PID-namespace isolation.
    #[error("Linux required for PID-namespace isolation")]
    Unsupported,
}

/// Convenience alias for launch-path results.
pub type Result<T> = std::result::Result<T, LaunchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_failed_carries_the_errno_text() {
        let err = LaunchError::CreateFailed {
            source: nix::Error::EPERM,
        };
        let text = err.to_string();
        assert!(text.contains("namespace root"));
        assert!(text.contains("EPERM") || text.contains("not permitted"));
    }

    #[test]
    fn common_errors_pass_through_transparently() {
        let err = LaunchError::from(HogletError::Syscall {
            call: "setsid",
            message: "EPERM".into(),
        });
        assert_eq!(err.to_string(), "setsid failed: EPERM");
    }
}
