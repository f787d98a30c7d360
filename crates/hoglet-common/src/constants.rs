//! Fixture-wide constants.

use std::time::Duration;

/// Stack size for the cloned namespace-root child, in bytes.
///
/// 16 KiB is the documented minimum: enough for the bootstrap's locals plus
/// the nested forks it performs for the traffic peers.
pub const CHILD_STACK_SIZE: usize = 4 * 4096;

/// Grace window the launcher waits after clone when traffic is enabled,
/// giving the server peer time to reach its listening state. Best-effort
/// only; the client peer's connect retry covers the remaining race.
pub const GRACE_WINDOW: Duration = Duration::from_secs(3);

/// Interval between heartbeat counter lines and between client payloads.
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(1);

/// Loopback address both traffic peers use by default.
pub const DEFAULT_TRAFFIC_ADDR: [u8; 4] = [127, 0, 0, 1];

/// TCP port both traffic peers use by default.
pub const DEFAULT_TRAFFIC_PORT: u16 = 5000;

/// Payload the client peer sends once per interval: `"ping"` plus its NUL
/// terminator, 5 bytes on the wire.
pub const HEARTBEAT_PAYLOAD: &[u8] = b"ping\0";

/// Per-call receive buffer size in the server peer's drain loop.
pub const RECV_BUFFER_SIZE: usize = 1024;

/// Total connect attempts the client peer makes: one initial attempt plus
/// five retries, with no backoff between them.
pub const CONNECT_ATTEMPTS: u32 = 6;

/// Process name tag for the server peer.
pub const SERVER_PEER_NAME: &str = "hoglet-srv";

/// Process name tag for the client peer.
pub const CLIENT_PEER_NAME: &str = "hoglet-cli";

/// Mode bits for the log file when the namespace bootstrap creates it.
pub const BOOTSTRAP_LOG_MODE: u32 = 0o600;

/// Mode bits for the log file when the launcher reopens it.
pub const LAUNCHER_LOG_MODE: u32 = 0o666;

/// Binary name used in usage and error output.
pub const BIN_NAME: &str = "hoglet";
