//! Server peer: binds the fixture endpoint, accepts exactly one
//! connection, and discards everything it receives.

use hoglet_common::constants::SERVER_PEER_NAME;
use hoglet_common::error::Result;
use hoglet_common::types::Endpoint;

use crate::net;

/// Forks the server peer as a detached child of the namespace root.
///
/// # Errors
///
/// Returns an error if `fork(2)` fails. Socket setup errors occur in the
/// child and are fatal to the peer only (stderr text, exit 1).
#[cfg(target_os = "linux")]
pub fn spawn(endpoint: Endpoint) -> Result<()> {
    super::fork_peer(SERVER_PEER_NAME, move || run(endpoint))
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

/// Listens, accepts one connection, and drains it until the client shuts
/// down. A clean client shutdown ends the peer with status 0.
#[cfg(target_os = "linux")]
fn run(endpoint: Endpoint) -> Result<()> {
    let listener = net::open_listener(endpoint)?;
    let conn = net::accept_one(&listener)?;
    let received = net::drain(&conn)?;
    tracing::debug!(received, "connection closed by client peer");
    Ok(())
}
