//! Loopback traffic-path tests.
//!
//! Exercise the socket helpers the peers are built on without PID or
//! network namespaces (those need root and are driven by external
//! harnesses). Ports are randomized by binding port 0 and reading the
//! assignment back.

use std::net::Ipv4Addr;
use std::thread;

use hoglet_common::constants::{CONNECT_ATTEMPTS, HEARTBEAT_PAYLOAD};
use hoglet_common::types::Endpoint;
use hoglet_core::net;

fn ephemeral_listener() -> (Endpoint, std::os::fd::OwnedFd) {
    let requested = Endpoint::new(Ipv4Addr::LOCALHOST, 0);
    let listener = net::open_listener(requested).expect("failed to open listener");
    let bound = net::local_endpoint(requested, &listener).expect("failed to read bound endpoint");
    assert_ne!(bound.port, 0, "OS should have assigned a real port");
    (bound, listener)
}

#[test]
fn server_drains_until_client_shutdown() {
    let (endpoint, listener) = ephemeral_listener();

    let sender = thread::spawn(move || {
        let conn =
            net::connect_with_retry(endpoint, CONNECT_ATTEMPTS).expect("client failed to connect");
        for _ in 0..3 {
            net::send_all(&conn, HEARTBEAT_PAYLOAD).expect("send failed");
        }
        // conn drops here: the server side sees a clean shutdown.
    });

    let conn = net::accept_one(&listener).expect("accept failed");
    let total = net::drain(&conn).expect("drain failed");
    sender.join().expect("sender thread panicked");

    assert_eq!(total, 3 * HEARTBEAT_PAYLOAD.len() as u64);
}

#[test]
fn heartbeat_payload_is_five_bytes_with_terminator() {
    assert_eq!(HEARTBEAT_PAYLOAD, b"ping\0");
    assert_eq!(HEARTBEAT_PAYLOAD.len(), 5);
}

#[test]
fn connect_retry_exhausts_against_closed_port() {
    // Grab an ephemeral port, then close the listener so nothing answers.
    let (endpoint, listener) = ephemeral_listener();
    drop(listener);

    let err = net::connect_with_retry(endpoint, CONNECT_ATTEMPTS)
        .expect_err("connect should exhaust its attempts");
    let text = err.to_string();
    assert!(text.contains("connect"), "unexpected error: {text}");
    assert!(
        text.contains(&CONNECT_ATTEMPTS.to_string()),
        "error should name the attempt budget: {text}"
    );
}

#[test]
fn rebinding_a_live_port_succeeds_with_reuse_flags() {
    // A relaunched fixture must not fail on "address in use" while a
    // previous instance's socket lingers.
    let (endpoint, first) = ephemeral_listener();
    let second = net::open_listener(endpoint).expect("rebind with reuse flags failed");
    drop(first);
    drop(second);
}
