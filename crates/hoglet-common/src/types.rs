//! Domain primitive types used across the hoglet workspace.

use std::fmt;
use std::net::Ipv4Addr;
use std::path::PathBuf;

use crate::constants::{DEFAULT_TRAFFIC_ADDR, DEFAULT_TRAFFIC_PORT};

/// Validated launch inputs, immutable once constructed by the CLI.
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    /// Log file both the launcher and the namespace root bind their output
    /// streams to. `None` leaves streams inherited.
    pub log_file: Option<PathBuf>,
    /// Whether to isolate a network namespace and run the traffic peers.
    pub enable_traffic: bool,
}

/// A loopback TCP address/port pair shared by the two traffic peers.
///
/// Passed explicitly to both peer constructors so tests can substitute a
/// randomized port instead of the well-known default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// IPv4 address the server binds and the client connects to.
    pub addr: Ipv4Addr,
    /// TCP port. Port 0 asks the OS for an ephemeral port (tests only).
    pub port: u16,
}

impl Endpoint {
    /// Creates an endpoint from an address and port.
    #[must_use]
    pub const fn new(addr: Ipv4Addr, port: u16) -> Self {
        Self { addr, port }
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        let [a, b, c, d] = DEFAULT_TRAFFIC_ADDR;
        Self::new(Ipv4Addr::new(a, b, c, d), DEFAULT_TRAFFIC_PORT)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.addr, self.port)
    }
}

/// Process identifier of the namespace root, as observed from the parent
/// namespace. Positive and stable for the root's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NamespacePid(i32);

impl NamespacePid {
    /// Wraps a raw PID value.
    #[must_use]
    pub const fn new(pid: i32) -> Self {
        Self(pid)
    }

    /// Returns the raw PID value.
    #[must_use]
    pub const fn as_raw(self) -> i32 {
        self.0
    }
}

impl fmt::Display for NamespacePid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoint_is_loopback_5000() {
        let ep = Endpoint::default();
        assert_eq!(ep.addr, Ipv4Addr::LOCALHOST);
        assert_eq!(ep.port, 5000);
        assert_eq!(ep.to_string(), "127.0.0.1:5000");
    }

    #[test]
    fn namespace_pid_displays_as_decimal() {
        assert_eq!(NamespacePid::new(4321).to_string(), "4321");
    }

    #[test]
    fn launch_options_default_is_inert() {
        let opts = LaunchOptions::default();
        assert!(opts.log_file.is_none());
        assert!(!opts.enable_traffic);
    }
}
