//! Endpoint-parameterised TCP socket helpers for the traffic peers.
//!
//! Both peers receive an explicit [`Endpoint`] instead of sharing a
//! hardcoded global, so tests can bind port 0 and read the assigned port
//! back with [`local_endpoint`].

use std::net::SocketAddrV4;
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};

use hoglet_common::error::{HogletError, Result};
use hoglet_common::types::Endpoint;
use nix::sys::socket::{
    self, AddressFamily, Backlog, MsgFlags, SockFlag, SockType, SockaddrIn, sockopt,
};

fn syscall_err(call: &'static str, errno: nix::Error) -> HogletError {
    HogletError::Syscall {
        call,
        message: errno.to_string(),
    }
}

fn sockaddr(endpoint: Endpoint) -> SockaddrIn {
    SockaddrIn::from(SocketAddrV4::new(endpoint.addr, endpoint.port))
}

fn stream_socket() -> Result<OwnedFd> {
    socket::socket(
        AddressFamily::Inet,
        SockType::Stream,
        SockFlag::empty(),
        None,
    )
    .map_err(|e| syscall_err("socket", e))
}

/// Opens a listening TCP socket on `endpoint` with address and port reuse
/// enabled, so repeated fast fixture runs do not fail on a lingering
/// socket from a previous instance.
///
/// # Errors
///
/// Returns an error if socket creation, option setting, bind, or listen
/// fails. Setup failures here are unrecoverable for the server peer.
pub fn open_listener(endpoint: Endpoint) -> Result<OwnedFd> {
    let fd = stream_socket()?;
    socket::setsockopt(&fd, sockopt::ReuseAddr, &true).map_err(|e| syscall_err("setsockopt", e))?;
    socket::setsockopt(&fd, sockopt::ReusePort, &true).map_err(|e| syscall_err("setsockopt", e))?;
    socket::bind(fd.as_raw_fd(), &sockaddr(endpoint)).map_err(|e| syscall_err("bind", e))?;
    // One client per fixture instance; no deeper queue needed.
    let backlog = Backlog::new(1).map_err(|e| syscall_err("listen", e))?;
    socket::listen(&fd, backlog).map_err(|e| syscall_err("listen", e))?;
    tracing::debug!(%endpoint, "listening");
    Ok(fd)
}

/// Returns the endpoint a listener is actually bound to. Relevant when the
/// requested port was 0 and the OS picked an ephemeral one.
///
/// # Errors
///
/// Returns an error if `getsockname(2)` fails.
pub fn local_endpoint(requested: Endpoint, listener: &OwnedFd) -> Result<Endpoint> {
    let addr: SockaddrIn = socket::getsockname(listener.as_raw_fd())
        .map_err(|e| syscall_err("getsockname", e))?;
    Ok(Endpoint::new(requested.addr, addr.port()))
}

/// Blocks until one inbound connection arrives and returns it.
///
/// # Errors
///
/// Returns an error if `accept(2)` fails.
pub fn accept_one(listener: &OwnedFd) -> Result<OwnedFd> {
    let conn = socket::accept(listener.as_raw_fd()).map_err(|e| syscall_err("accept", e))?;
    // SAFETY: accept(2) returned a fresh descriptor owned by nothing else.
    Ok(unsafe { OwnedFd::from_raw_fd(conn) })
}

/// Connects to `endpoint` with bounded retry and no backoff between
/// attempts. The socket is created fresh on every attempt; a descriptor
/// whose connect failed is never reused.
///
/// # Errors
///
/// Returns an error once all `attempts` have failed, carrying the last
/// errno observed.
pub fn connect_with_retry(endpoint: Endpoint, attempts: u32) -> Result<OwnedFd> {
    let addr = sockaddr(endpoint);
    let mut last_errno = nix::Error::ECONNREFUSED;
    for attempt in 1..=attempts {
        let fd = stream_socket()?;
        match socket::connect(fd.as_raw_fd(), &addr) {
            Ok(()) => {
                tracing::debug!(%endpoint, attempt, "connected");
                return Ok(fd);
            }
            Err(errno) => {
                tracing::debug!(%endpoint, attempt, %errno, "connect attempt failed");
                last_errno = errno;
            }
        }
    }
    Err(HogletError::Syscall {
        call: "connect",
        message: format!("{endpoint} unreachable after {attempts} attempts: {last_errno}"),
    })
}

/// Writes the whole buffer to the connection.
///
/// # Errors
///
/// Returns an error if `send(2)` fails mid-payload.
pub fn send_all(conn: &OwnedFd, payload: &[u8]) -> Result<()> {
    let mut sent = 0;
    while sent < payload.len() {
        sent += socket::send(conn.as_raw_fd(), &payload[sent..], MsgFlags::empty())
            .map_err(|e| syscall_err("send", e))?;
    }
    Ok(())
}

/// Receives and discards everything arriving on the connection, up to
/// [`RECV_BUFFER_SIZE`](hoglet_common::constants::RECV_BUFFER_SIZE) bytes
/// per call, until the peer shuts down.
///
/// A zero-length read is treated as peer shutdown and ends the loop;
/// returns the total number of bytes discarded.
///
/// # Errors
///
/// Returns an error if `recv(2)` fails.
pub fn drain(conn: &OwnedFd) -> Result<u64> {
    let mut buf = [0u8; hoglet_common::constants::RECV_BUFFER_SIZE];
    let mut total: u64 = 0;
    loop {
        let n = socket::recv(conn.as_raw_fd(), &mut buf, MsgFlags::empty())
            .map_err(|e| syscall_err("recv", e))?;
        if n == 0 {
            return Ok(total);
        }
        total += n as u64;
    }
}
