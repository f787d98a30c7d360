//! # hoglet-common
//!
//! Shared types, error definitions, and constants used across the hoglet
//! workspace.
//!
//! This crate is the leaf of the dependency graph — it depends on no other
//! internal crate and provides the foundational primitives that the core
//! and CLI crates build upon.

pub mod constants;
pub mod error;
pub mod types;
