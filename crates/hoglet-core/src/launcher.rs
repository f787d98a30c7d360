//! Creation of the namespace root.
//!
//! Allocates a dedicated child stack and `clone(2)`s the bootstrap entry
//! point into a fresh PID namespace, then waits out the traffic grace
//! window before reporting the child's PID.

use hoglet_common::types::{LaunchOptions, NamespacePid};

use crate::error::Result;

/// Creates the namespace root and returns its PID as seen from the parent
/// namespace.
///
/// The child runs [`crate::bootstrap::run`] as PID 1 of a new PID
/// namespace and never returns; its lifetime ends only with external
/// termination, which tears down every process in the namespace.
///
/// When traffic is enabled this blocks for the grace window before
/// returning, giving the server peer time to reach its listening state.
/// Best-effort only: the client peer's connect retry absorbs the
/// remaining race.
///
/// # Errors
///
/// Returns [`LaunchError::CreateFailed`](crate::error::LaunchError::CreateFailed)
/// if `clone(2)` fails. Creation failures are fatal and never retried.
#[cfg(target_os = "linux")]
pub fn launch(options: &LaunchOptions) -> Result<NamespacePid> {
    use hoglet_common::constants::{CHILD_STACK_SIZE, GRACE_WINDOW};
    use nix::sched::{CloneFlags, clone};
    use nix::sys::signal::Signal;

    use crate::bootstrap;
    use crate::error::LaunchError;

    // Sized for the bootstrap's locals plus the forks it performs for the
    // traffic peers.
    let mut stack = vec![0u8; CHILD_STACK_SIZE];
    let child_options = options.clone();

    // SAFETY: the callback touches only its own cloned options; clone is
    // called without CLONE_VM, so the child gets its own copy of the
    // address space and the parent may free the stack buffer afterwards.
    let pid = unsafe {
        clone(
            Box::new(move || bootstrap::run(&child_options)),
            &mut stack,
            CloneFlags::CLONE_NEWPID,
            Some(Signal::SIGCHLD as i32),
        )
    }
    .map_err(|source| LaunchError::CreateFailed { source })?;
    tracing::debug!(pid = pid.as_raw(), "namespace root created");

    if options.enable_traffic {
        std::thread::sleep(GRACE_WINDOW);
    }

    Ok(NamespacePid::new(pid.as_raw()))
}

/// Stub for non-Linux platforms.
///
/// # Errors
///
/// Always returns an error — PID-namespace isolation requires Linux.
#[cfg(not(target_os = "linux"))]
pub fn launch(_options: &LaunchOptions) -> Result<NamespacePid> {
    Err(crate::error::LaunchError::Unsupported)
}
