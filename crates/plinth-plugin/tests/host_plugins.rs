// SPDX-FileCopyrightText: 2026 Plinth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests driving the registry through the `Host` facade, the way
//! a framework embedding Plinth would. Each test builds its own host; tests
//! are independent and order-insensitive.

use plinth_core::{HostNamespace, PlinthError};
use plinth_plugin::{CapabilityBundle, Host};
use serde_json::{json, Value};

fn noop(_host: &mut dyn HostNamespace, _args: Value) -> Value {
    Value::Null
}

// ---- Registration ----

#[test]
fn a_full_plugin_lifecycle_through_the_host() {
    let mut host = Host::new();

    host.use_plugin(CapabilityBundle::new("core").version("0.1.0"))
        .unwrap();
    host.use_plugin(
        CapabilityBundle::new("mailer")
            .dependency("core")
            .callable("send", |_: &mut dyn HostNamespace, args: Value| {
                json!({"sent": args})
            }),
    )
    .unwrap();

    assert_eq!(host.plugins().list(), vec!["core", "mailer"]);
    assert_eq!(
        host.invoke("send", json!("ping")).unwrap(),
        json!({"sent": "ping"})
    );

    assert!(matches!(
        host.remove_plugin("core"),
        Err(PlinthError::DependentsExist { .. })
    ));
    host.remove_plugin("mailer").unwrap();
    host.remove_plugin("core").unwrap();
    assert!(host.plugins().is_empty());
    assert!(host.namespace().is_empty());
}

#[test]
fn second_plugin_with_a_used_name_is_refused() {
    let mut host = Host::new();
    host.use_plugin(CapabilityBundle::new("used").callable("extra", noop))
        .unwrap();

    let err = host
        .use_plugin(CapabilityBundle::new("used").callable("other", noop))
        .unwrap_err();
    assert!(matches!(err, PlinthError::Conflict { .. }));

    // The namespace still reflects only the first registration.
    assert!(host.namespace().contains("extra"));
    assert!(!host.namespace().contains("other"));
}

#[test]
fn dependency_must_be_registered_first() {
    let mut host = Host::new();

    let err = host
        .use_plugin(CapabilityBundle::new("correct").dependency("non-existant"))
        .unwrap_err();
    assert!(matches!(err, PlinthError::MissingDependency { .. }));

    host.use_plugin(CapabilityBundle::new("non-existant")).unwrap();
    host.use_plugin(CapabilityBundle::new("correct").dependency("non-existant"))
        .unwrap();
}

#[test]
fn init_hook_runs_and_is_never_exposed() {
    let mut host = Host::new();
    host.use_plugin(
        CapabilityBundle::new("entry")
            .init(|host: &mut dyn HostNamespace, _: Value| {
                // The hook may inspect the namespace it is being grafted into.
                assert!(!host.contains("extra"));
                json!("initializing")
            })
            .callable("extra", |_: &mut dyn HostNamespace, _: Value| {
                json!("should be added")
            }),
    )
    .unwrap();

    assert!(host.namespace().contains("extra"));
    assert!(!host.namespace().contains("_init"));
    assert_eq!(host.invoke("extra", Value::Null).unwrap(), json!("should be added"));
}

// ---- Removal ----

#[test]
fn removing_a_plugin_retracts_its_entries() {
    let mut host = Host::new();
    host.use_plugin(CapabilityBundle::new("existant").callable("extra", noop))
        .unwrap();

    host.remove_plugin("existant").unwrap();
    assert!(host.plugins().list().is_empty());
    assert!(matches!(
        host.invoke("extra", Value::Null),
        Err(PlinthError::NotFound { .. })
    ));
}

#[test]
fn removing_an_unknown_plugin_fails() {
    let mut host = Host::new();
    assert!(matches!(
        host.remove_plugin("non-existant"),
        Err(PlinthError::NotFound { .. })
    ));
}

// ---- Queries ----

#[test]
fn has_and_list_reflect_registrations() {
    let mut host = Host::new();
    assert!(host.plugins().list().is_empty());
    assert!(!host.plugins().has("non-existant"));

    host.use_plugin(CapabilityBundle::new("plugin1")).unwrap();
    host.use_plugin(CapabilityBundle::new("plugin2")).unwrap();

    assert!(host.plugins().has("plugin1"));
    assert_eq!(host.plugins().list(), vec!["plugin1", "plugin2"]);
}

// ---- Clear ----

#[test]
fn clear_unwinds_dependency_chains_completely() {
    let mut host = Host::new();
    host.use_plugin(CapabilityBundle::new("core").callable("base", noop))
        .unwrap();
    host.use_plugin(
        CapabilityBundle::new("mid")
            .dependency("core")
            .callable("step", noop),
    )
    .unwrap();
    host.use_plugin(CapabilityBundle::new("leaf").dependency("mid"))
        .unwrap();

    host.clear_plugins().unwrap();
    assert!(host.plugins().is_empty());
    assert!(host.namespace().is_empty());

    // Idempotent: a second clear is a no-op.
    host.clear_plugins().unwrap();
}
