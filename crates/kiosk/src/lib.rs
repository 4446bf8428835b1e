//! Snackpoint kiosk client library.
//!
//! The session, identity-resolution, and catalog-normalization core behind a
//! vending kiosk. It turns ambiguous external payloads into canonical
//! records, owns the authenticated session and its cart, and keeps a
//! normalized view of machine health.
//!
//! # Modules
//!
//! - [`config`] - Environment-driven configuration
//! - [`error`] - Unified error type
//! - [`backend`] - HTTP client for the kiosk backend plus payload normalizers
//! - [`catalog`] - Owned catalog state with fallback inventory
//! - [`session`] - Session lifecycle and cart invariants
//! - [`status`] - Periodic health polling

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod catalog;
pub mod config;
pub mod error;
pub mod session;
pub mod status;
