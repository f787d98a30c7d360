//! Loopback TCP traffic harness.
//!
//! Forks two detached peers off the namespace root: a server that drains
//! one inbound connection and a client that sends a fixed heartbeat
//! payload once per second. Discovery is implicit — both peers get the
//! same [`Endpoint`](hoglet_common::types::Endpoint) and synchronize via
//! the client's bounded connect retry, not an explicit readiness signal.
//!
//! Neither peer is cancelable; their lifetime ends with the namespace
//! teardown.

pub mod client;
pub mod server;

use hoglet_common::error::{HogletError, Result};
use hoglet_common::types::Endpoint;

/// Forks the server peer, then the client peer, and returns immediately so
/// the namespace root's heartbeat loop is never blocked.
///
/// # Errors
///
/// Returns an error if either `fork(2)` fails. Failures inside a peer
/// after the fork are reported on the peer's stderr and end that peer
/// only.
#[cfg(target_os = "linux")]
pub fn spawn_peers(endpoint: Endpoint) -> Result<()> {
    server::spawn(endpoint)?;
    client::spawn(endpoint)?;
    Ok(())
}

/// Stub for non-Linux platforms.
///
/// # Errors
///
/// Always returns an error — the detached-peer model requires Linux.
#[cfg(not(target_os = "linux"))]
pub fn spawn_peers(_endpoint: Endpoint) -> Result<()> {
    Err(HogletError::Config {
        message: "Linux required for traffic peers".into(),
    })
}

/// Labels the calling peer process for test-harness inspection.
#[cfg(target_os = "linux")]
fn set_peer_name(name: &str) -> Result<()> {
    let tag = std::ffi::CString::new(name).map_err(|_| HogletError::Config {
        message: format!("invalid peer name: {name}"),
    })?;
    nix::sys::prctl::set_name(&tag).map_err(|e| HogletError::Syscall {
        call: "prctl",
        message: e.to_string(),
    })
}

/// Forks a detached peer and runs `body` in the child, converting its
/// outcome into the child's exit status. The parent returns right away.
#[cfg(target_os = "linux")]
fn fork_peer(label: &'static str, body: impl FnOnce() -> Result<()>) -> Result<()> {
    use nix::unistd::ForkResult;

    // SAFETY: the namespace root is single-threaded, and the child
    // immediately takes over with its own control flow, exiting via
    // _exit(2) without returning into parent frames.
    match unsafe { nix::unistd::fork() } {
        Ok(ForkResult::Parent { child }) => {
            tracing::debug!(peer = label, pid = child.as_raw(), "peer forked");
            Ok(())
        }
        Ok(ForkResult::Child) => {
            let code = match set_peer_name(label).and_then(|()| body()) {
                Ok(()) => 0,
                Err(err) => {
                    eprintln!("{label}: {err}");
                    1
                }
            };
            // SAFETY: _exit skips atexit handlers and buffered-stream
            // flushing shared with the parent, which is exactly what a
            // forked child must do.
            unsafe { libc::_exit(code) }
        }
        Err(errno) => Err(HogletError::Syscall {
            call: "fork",
            message: errno.to_string(),
        }),
    }
}
