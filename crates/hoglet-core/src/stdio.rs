//! Standard-stream redirection helpers.
//!
//! Used from two contexts: the namespace bootstrap rebinds all three
//! streams as part of daemonizing, and the launcher rebinds its own
//! stdout/stderr after printing the namespace PID.

use std::fs::{File, OpenOptions};
use std::os::fd::AsRawFd;
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

use hoglet_common::error::{HogletError, Result};
use nix::unistd::dup2;

/// Rebinds standard input to `/dev/null`.
///
/// # Errors
///
/// Returns an error if the null device cannot be opened or `dup2(2)` fails.
pub fn redirect_stdin_to_null() -> Result<()> {
    let devnull = File::open("/dev/null").map_err(|e| HogletError::Io {
        path: "/dev/null".into(),
        source: e,
    })?;
    let _ = dup2(devnull.as_raw_fd(), libc::STDIN_FILENO).map_err(|e| HogletError::Syscall {
        call: "dup2",
        message: e.to_string(),
    })?;
    Ok(())
}

/// Opens (create-if-missing, truncate) a log file with the given mode bits.
///
/// # Errors
///
/// Returns an error if the file cannot be created or truncated.
pub fn open_log(path: &Path, mode: u32) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(mode)
        .open(path)
        .map_err(|e| HogletError::Io {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Rebinds standard output and standard error onto an open log file.
///
/// The file handle is dropped after duplication; fds 1 and 2 keep the
/// descriptions alive.
///
/// # Errors
///
/// Returns an error if `dup2(2)` fails.
pub fn bind_output(file: &File) -> Result<()> {
    let fd = file.as_raw_fd();
    for target in [libc::STDOUT_FILENO, libc::STDERR_FILENO] {
        let _ = dup2(fd, target).map_err(|e| HogletError::Syscall {
            call: "dup2",
            message: e.to_string(),
        })?;
    }
    Ok(())
}

/// Opens the log at `path` with `mode` and rebinds stdout/stderr to it.
///
/// # Errors
///
/// Returns an error if the open or either duplication fails.
pub fn redirect_output_to(path: &Path, mode: u32) -> Result<()> {
    let file = open_log(path, mode)?;
    bind_output(&file)?;
    tracing::debug!(path = %path.display(), "output streams rebound to log");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::os::unix::fs::PermissionsExt;

    use super::*;

    #[test]
    fn open_log_truncates_existing_content() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let path = dir.path().join("fixture.log");
        std::fs::write(&path, b"stale heartbeat lines").expect("seed write failed");

        let mut file = open_log(&path, 0o600).expect("open_log failed");
        file.write_all(b"0\n").expect("write failed");

        let content = std::fs::read_to_string(&path).expect("read failed");
        assert_eq!(content, "0\n");
    }

    #[test]
    fn open_log_applies_requested_mode() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let path = dir.path().join("fixture.log");

        let file = open_log(&path, 0o600).expect("open_log failed");
        let mode = file
            .metadata()
            .expect("metadata failed")
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn open_log_reports_the_failing_path() {
        let err = open_log(Path::new("/nonexistent-dir/fixture.log"), 0o600)
            .expect_err("open_log should fail");
        assert!(err.to_string().contains("/nonexistent-dir/fixture.log"));
    }
}
