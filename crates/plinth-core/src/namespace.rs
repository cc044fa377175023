// SPDX-FileCopyrightText: 2026 Plinth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The shared host namespace that plugin capabilities are merged into.
//!
//! The namespace is owned by the surrounding host, not by the registry: the
//! registry receives it as an injected mutable reference and is its sole
//! writer.

use indexmap::IndexMap;

use crate::capability::SharedCapability;

/// Mutable key -> capability mapping consumed by the extension registry.
///
/// `bind` is set-if-absent: an occupied key is never overwritten, which makes
/// first-writer-wins shadowing a property of the namespace itself rather than
/// something callers have to remember to check.
pub trait HostNamespace {
    /// Look up the capability bound to `key`.
    fn get(&self, key: &str) -> Option<SharedCapability>;

    /// Whether `key` currently has a live binding.
    fn contains(&self, key: &str) -> bool;

    /// Bind `capability` under `key` if the key is free. Returns `false` and
    /// leaves the existing binding untouched when the key is occupied.
    fn bind(&mut self, key: &str, capability: SharedCapability) -> bool;

    /// Delete the binding under `key`, returning it if one existed.
    fn unbind(&mut self, key: &str) -> Option<SharedCapability>;

    /// Currently bound keys, in binding order.
    fn keys(&self) -> Vec<String>;
}

/// Default in-memory namespace backed by an insertion-ordered map.
#[derive(Default)]
pub struct Namespace {
    bindings: IndexMap<String, SharedCapability>,
}

impl Namespace {
    /// Create an empty namespace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the namespace has no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl HostNamespace for Namespace {
    fn get(&self, key: &str) -> Option<SharedCapability> {
        self.bindings.get(key).cloned()
    }

    fn contains(&self, key: &str) -> bool {
        self.bindings.contains_key(key)
    }

    fn bind(&mut self, key: &str, capability: SharedCapability) -> bool {
        if self.bindings.contains_key(key) {
            return false;
        }
        self.bindings.insert(key.to_string(), capability);
        true
    }

    fn unbind(&mut self, key: &str) -> Option<SharedCapability> {
        self.bindings.shift_remove(key)
    }

    fn keys(&self) -> Vec<String> {
        self.bindings.keys().cloned().collect()
    }
}

impl std::fmt::Debug for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Namespace")
            .field("keys", &self.keys())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::sync::Arc;

    fn noop() -> SharedCapability {
        Arc::new(|_host: &mut dyn HostNamespace, _args: Value| Value::Null)
    }

    #[test]
    fn bind_refuses_occupied_keys() {
        let mut ns = Namespace::new();
        let first = noop();

        assert!(ns.bind("greet", first.clone()));
        assert!(!ns.bind("greet", noop()));

        // The original binding survives.
        let live = ns.get("greet").unwrap();
        assert!(Arc::ptr_eq(&live, &first));
    }

    #[test]
    fn unbind_deletes_and_returns_the_binding() {
        let mut ns = Namespace::new();
        ns.bind("greet", noop());

        assert!(ns.unbind("greet").is_some());
        assert!(!ns.contains("greet"));
        assert!(ns.unbind("greet").is_none());
    }

    #[test]
    fn keys_preserve_binding_order() {
        let mut ns = Namespace::new();
        ns.bind("zeta", noop());
        ns.bind("alpha", noop());
        ns.bind("mid", noop());

        assert_eq!(ns.keys(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(ns.len(), 3);
    }

    #[test]
    fn empty_namespace_reports_empty() {
        let ns = Namespace::new();
        assert!(ns.is_empty());
        assert!(ns.get("anything").is_none());
    }
}
