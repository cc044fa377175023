// SPDX-FileCopyrightText: 2026 Plinth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Extension registry for the Plinth plugin host.
//!
//! Independently authored plugins inject named capabilities into a single
//! shared host namespace. The registry enforces name uniqueness, eager
//! dependency validation, first-writer-wins key shadowing, and
//! dependency-aware removal; the namespace itself is owned by the caller and
//! only ever mutated through the registry.

pub mod bundle;
pub mod host;
pub mod registry;

pub use bundle::{BundleEntry, CapabilityBundle, INIT_KEY, LEGACY_INIT_KEY};
pub use host::Host;
pub use registry::{ExtensionRegistry, PluginDescriptor};
