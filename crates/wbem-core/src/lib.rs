//! wbem-core: transport-agnostic CIM-XML primitives, error taxonomy, and the
//! operation encoder.
//!
//! This crate defines the wire-level document grammar (DMTF DSP0201) and the
//! error surface shared by the client, the indication listener, and tooling.
//! It carries no transport or runtime dependencies so it can be reused in
//! multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `WbemError`/`Result` so a malformed
//! server response never takes the calling process down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod cimerr;
pub mod encode;
pub mod error;
pub mod model;
pub mod path;
pub mod xml;

pub use cimerr::{CimError, CimStatus};
/// Shared result type.
pub use error::{Result, WbemError};
