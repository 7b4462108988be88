use crate::{ProviderCapability, ProviderRegistry, RegistryError};

#[test]
fn parse_registry() {
    let json = r#"{
        "amplitude": { "supports_native_exclude": true, "supports_visited": true },
        "funnelco": { "supports_visited": true, "supports_ordered": true, "max_funnel_length": 10 }
    }"#;

    let registry = ProviderRegistry::from_json(json).unwrap();
    assert_eq!(registry.len(), 2);

    let amplitude = registry.get("amplitude").unwrap();
    assert!(amplitude.supports_native_exclude);
    assert!(!amplitude.supports_ordered);
    assert_eq!(amplitude.max_funnel_length, None);

    let funnel = registry.get("funnelco").unwrap();
    assert!(!funnel.supports_native_exclude);
    assert_eq!(funnel.max_funnel_length, Some(10));
}

#[test]
fn lookup_is_case_insensitive() {
    let mut registry = ProviderRegistry::new();
    registry.insert("Amplitude", ProviderCapability::native_exclude());

    assert!(registry.get("amplitude").is_some());
    assert!(registry.get(" AMPLITUDE ").is_some());

    registry.insert("amplitude", ProviderCapability::funnel_only());
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.names().collect::<Vec<_>>(), vec!["Amplitude"]);
    assert!(!registry.get("amplitude").unwrap().supports_native_exclude);
}

#[test]
fn require_lists_known_providers() {
    let mut registry = ProviderRegistry::new();
    registry.insert("a", ProviderCapability::default());
    registry.insert("b", ProviderCapability::default());

    let err = registry.require("c").unwrap_err();
    assert!(matches!(err, RegistryError::UnknownProvider { .. }));
    assert_eq!(err.to_string(), "unknown provider `c` (known: a, b)");
}

#[test]
fn builder_sets_funnel_limit() {
    let cap = ProviderCapability::funnel_only().with_max_funnel_length(6);
    assert_eq!(cap.max_funnel_length, Some(6));
    assert!(cap.supports_visited);
}
