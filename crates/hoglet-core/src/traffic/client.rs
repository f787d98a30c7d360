//! Client peer: connects to the fixture endpoint with bounded retry, then
//! sends a fixed heartbeat payload once per second, forever.

use hoglet_common::constants::CLIENT_PEER_NAME;
use hoglet_common::error::Result;
use hoglet_common::types::Endpoint;

/// Forks the client peer as a detached child of the namespace root.
///
/// # Errors
///
/// Returns an error if `fork(2)` fails. Connect exhaustion and send
/// errors occur in the child and are fatal to the peer only.
#[cfg(target_os = "linux")]
pub fn spawn(endpoint: Endpoint) -> Result<()> {
    super::fork_peer(CLIENT_PEER_NAME, move || match run(endpoint) {
        Ok(never) => match never {},
        Err(err) => Err(err),
    })
}

/// Stub for non-Linux platforms.
///
/// # Errors
///
/// Always returns an error — the detached-peer model requires Linux.
#[cfg(not(target_os = "linux"))]
pub fn spawn(_endpoint: Endpoint) -> Result<()> {
    Err(hoglet_common::error::HogletError::Config {
        message: "Linux required for traffic peers".into(),
    })
}

/// Connects, then sends the payload once per interval. No acks are read
/// and there is no reconnect: a dropped connection surfaces as a send
/// error and ends the peer.
#[cfg(target_os = "linux")]
fn run(endpoint: Endpoint) -> Result<std::convert::Infallible> {
    use hoglet_common::constants::{CONNECT_ATTEMPTS, HEARTBEAT_INTERVAL, HEARTBEAT_PAYLOAD};

    use crate::net;

    let conn = net::connect_with_retry(endpoint, CONNECT_ATTEMPTS)?;
    loop {
        std::thread::sleep(HEARTBEAT_INTERVAL);
        net::send_all(&conn, HEARTBEAT_PAYLOAD)?;
    }
}
