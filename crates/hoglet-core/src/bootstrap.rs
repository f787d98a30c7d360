//! Entry point of the namespace root (PID 1 of the new PID namespace).
//!
//! Detaches from the controlling terminal, rebinds standard streams,
//! optionally isolates a network namespace with loopback up and starts the
//! traffic peers, then settles into the heartbeat loop. The loop has no
//! exit condition; the process lives until the namespace is torn down from
//! outside.

use std::io::{self, Write};

use hoglet_common::constants::{BIN_NAME, BOOTSTRAP_LOG_MODE, HEARTBEAT_INTERVAL};
use hoglet_common::error::{HogletError, Result};
use hoglet_common::types::{Endpoint, LaunchOptions};

use crate::stdio;
use crate::traffic;

/// Runs the namespace root. Returns only on setup failure (non-zero exit
/// code for the clone callback); the success path is the infinite
/// heartbeat loop.
pub fn run(options: &LaunchOptions) -> isize {
    if let Err(err) = init(options) {
        eprintln!("{BIN_NAME}: bootstrap: {err}");
        return 1;
    }
    heartbeat_loop()
}

fn init(options: &LaunchOptions) -> Result<()> {
    let _ = nix::unistd::setsid().map_err(|e| HogletError::Syscall {
        call: "setsid",
        message: e.to_string(),
    })?;

    stdio::redirect_stdin_to_null()?;
    if let Some(path) = &options.log_file {
        stdio::redirect_output_to(path, BOOTSTRAP_LOG_MODE)?;
    }

    if options.enable_traffic {
        isolate_network()?;
        traffic::spawn_peers(Endpoint::default())?;
    }
    Ok(())
}

/// Moves the namespace root into a fresh network namespace and brings the
/// loopback interface administratively up.
#[cfg(target_os = "linux")]
fn isolate_network() -> Result<()> {
    use std::process::Command;

    use nix::sched::{CloneFlags, unshare};

    unshare(CloneFlags::CLONE_NEWNET).map_err(|e| HogletError::Syscall {
        call: "unshare",
        message: e.to_string(),
    })?;

    let status = Command::new("ip")
        .args(["link", "set", "up", "dev", "lo"])
        .status()
        .map_err(|e| HogletError::Io {
            path: "ip".into(),
            source: e,
        })?;
    if !status.success() {
        return Err(HogletError::Syscall {
            call: "ip link set up dev lo",
            message: status.to_string(),
        });
    }
    tracing::debug!("loopback up in fresh network namespace");
    Ok(())
}

/// Stub for non-Linux platforms.
#[cfg(not(target_os = "linux"))]
fn isolate_network() -> Result<()> {
    Err(HogletError::Config {
        message: "Linux required for network-namespace isolation".into(),
    })
}

/// Terminal state: one counter line per second, flushed, starting at 0.
fn heartbeat_loop() -> isize {
    let mut out = io::stdout();
    let mut counter: u64 = 0;
    loop {
        std::thread::sleep(HEARTBEAT_INTERVAL);
        if heartbeat_line(&mut out, counter).is_err() {
            // stdout is gone; nothing left to prove liveness to.
            return 1;
        }
        counter += 1;
    }
}

fn heartbeat_line(out: &mut impl Write, counter: u64) -> io::Result<()> {
    writeln!(out, "{counter}")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heartbeat_line_is_one_decimal_per_line() {
        let mut buf = Vec::new();
        for n in 0..3u64 {
            heartbeat_line(&mut buf, n).expect("write failed");
        }
        assert_eq!(buf, b"0\n1\n2\n");
    }
}
