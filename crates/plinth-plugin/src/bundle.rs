// SPDX-FileCopyrightText: 2026 Plinth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability bundles: the input shape accepted by `ExtensionRegistry::add`.
//!
//! A bundle carries a plugin's name, its declared dependencies, and a set of
//! named entries. Only callable entries can end up on the host namespace;
//! data entries are accepted by the builder but discarded during grafting.

use std::sync::Arc;

use indexmap::IndexMap;
use plinth_core::{Capability, SharedCapability};
use serde_json::Value;

/// Well-known bundle key for the initialization hook. The hook is invoked
/// during `add` with the host namespace and is never grafted as a capability.
pub const INIT_KEY: &str = "_init";

/// Deprecated spelling of the initialization key. Still honored, but using it
/// emits a deprecation notice. If both keys are present, both hooks run.
pub const LEGACY_INIT_KEY: &str = "init_";

/// A single named entry in a capability bundle.
pub enum BundleEntry {
    /// A callable that may be grafted onto the host namespace.
    Callable(SharedCapability),
    /// A non-callable payload. Dropped during grafting, never stored.
    Data(Value),
}

impl BundleEntry {
    /// Whether this entry is a callable.
    pub fn is_callable(&self) -> bool {
        matches!(self, BundleEntry::Callable(_))
    }
}

/// A plugin's registration request: name, optional version, declared
/// dependencies, and named entries in insertion order.
pub struct CapabilityBundle {
    pub(crate) name: String,
    pub(crate) version: Option<String>,
    pub(crate) dependencies: Vec<String>,
    pub(crate) entries: IndexMap<String, BundleEntry>,
}

impl CapabilityBundle {
    /// Start a bundle for the plugin called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            dependencies: Vec::new(),
            entries: IndexMap::new(),
        }
    }

    /// Set the plugin's version string.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Declare a dependency on another plugin. Dependencies must already be
    /// registered when this bundle is added.
    pub fn dependency(mut self, name: impl Into<String>) -> Self {
        self.dependencies.push(name.into());
        self
    }

    /// Declare several dependencies at once.
    pub fn dependencies<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies.extend(names.into_iter().map(Into::into));
        self
    }

    /// Add a callable entry under `key`. A later entry with the same key
    /// replaces the earlier one, mirroring plain map assignment.
    pub fn callable(
        mut self,
        key: impl Into<String>,
        capability: impl Capability + 'static,
    ) -> Self {
        self.entries
            .insert(key.into(), BundleEntry::Callable(Arc::new(capability)));
        self
    }

    /// Add a non-callable data entry under `key`. Data entries never reach
    /// the host namespace.
    pub fn data(mut self, key: impl Into<String>, value: Value) -> Self {
        self.entries.insert(key.into(), BundleEntry::Data(value));
        self
    }

    /// Add an initialization hook. Shortcut for `callable(INIT_KEY, hook)`.
    pub fn init(self, hook: impl Capability + 'static) -> Self {
        self.callable(INIT_KEY, hook)
    }

    /// The plugin name this bundle registers under.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for CapabilityBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilityBundle")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("dependencies", &self.dependencies)
            .field("entries", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}
