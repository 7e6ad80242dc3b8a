//! Core components of the `finsight` crate.
//!
//! This module contains the foundational building blocks shared by the data
//! source, the updater and the exporters:
//! - The [`FsClient`] HTTP wrapper and its builder.
//! - The primary [`FsError`] type.
//! - Wire helpers for Yahoo's number wrappers.

/// The HTTP client (`FsClient`), builder, and endpoint defaults.
pub mod client;
/// The primary error type (`FsError`) for the crate.
pub mod error;
pub(crate) mod net;
pub(crate) mod wire;

#[cfg(feature = "test-mode")]
pub(crate) mod fixtures;

// convenient re-exports so most code can just `use crate::core::FsClient`
pub use client::{FsClient, FsClientBuilder};
pub use error::FsError;
