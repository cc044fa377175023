// SPDX-FileCopyrightText: 2026 Plinth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core types for the Plinth plugin host.
//!
//! This crate defines the pieces the extension registry builds on: the
//! `Capability` trait that plugin callables implement, the `HostNamespace`
//! contract (plus a default in-memory `Namespace`), and the shared error
//! type. The registry itself lives in `plinth-plugin`.

pub mod capability;
pub mod error;
pub mod namespace;

// Re-export key items at crate root for ergonomic imports.
pub use capability::{Capability, SharedCapability};
pub use error::PlinthError;
pub use namespace::{HostNamespace, Namespace};
