//! # hoglet-core
//!
//! Low-level primitives for the hoglet test fixture:
//!
//! - **Launcher**: `clone(2)` into a fresh PID namespace with a dedicated
//!   child stack.
//! - **Bootstrap**: the namespace root's setup (new session, stdio
//!   redirection, optional network namespace with loopback bring-up) and
//!   its heartbeat loop.
//! - **Traffic harness**: forked server/client TCP peers generating
//!   loopback background traffic.
//!
//! All unsafe system calls are encapsulated in safe wrappers with
//! `// SAFETY:` documentation.

pub mod bootstrap;
pub mod error;
pub mod launcher;
pub mod net;
pub mod stdio;
pub mod traffic;
