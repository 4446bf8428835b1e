//! Snackpoint Core - Shared types library.
//!
//! This crate provides common types used across all Snackpoint components:
//! - `kiosk` - The kiosk client library (session, catalog, polling)
//! - `integration-tests` - Cross-crate scenario tests
//!
//! # Architecture
//!
//! The core crate contains only types and pure value-level helpers - no I/O,
//! no HTTP clients, no timers. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Canonical records (identity, product, cart, receipt, health)
//!   and numeric coercion for malformed upstream values

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
