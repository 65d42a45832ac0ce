//! Integration tests for setting resolution

use config_resolver::contract::*;
use config_resolver::domain::{application_schema, keys, resolve, Resolver};
use config_resolver::AppConfig;

mod common;
use common::{print_test_header, source, source_with_url, TEST_DB_URL};

#[test]
fn test_defaults_against_empty_source() {
    print_test_header(
        "test_defaults_against_empty_source",
        "Every defaulted entry resolves to its typed default when nothing is supplied",
    );

    // Resolve only the defaulted entries so the required url does not fail first
    let schema: Vec<SettingDescriptor> = application_schema()
        .into_iter()
        .filter(|d| d.default_value().is_some())
        .collect();
    let config = resolve(&source(&[]), &schema).unwrap();

    assert_eq!(config.get(keys::SERVER_PORT), Some(&SettingValue::Integer(8080)));
    assert_eq!(
        config.get(keys::DATASOURCE_USERNAME),
        Some(&SettingValue::String("defaultUser".to_string()))
    );
    assert_eq!(config.get(keys::JVM_METRICS_ENABLED), Some(&SettingValue::Boolean(true)));
    assert_eq!(config.get(keys::TOMCAT_METRICS_ENABLED), Some(&SettingValue::Boolean(false)));

    for (key, entry) in config.entries() {
        assert_eq!(entry.origin, ValueOrigin::Default, "{key} should come from its default");
    }
}

#[test]
fn test_missing_datasource_url() {
    print_test_header(
        "test_missing_datasource_url",
        "The datasource url has no default and must be supplied",
    );

    let result = resolve(&source(&[]), &application_schema());
    assert_eq!(
        result,
        Err(ConfigError::MissingRequiredSetting {
            key: keys::DATASOURCE_URL.to_string()
        })
    );
}

#[test]
fn test_port_not_a_number() {
    let result = resolve(
        &source_with_url(&[(keys::SERVER_PORT, "not-a-number")]),
        &application_schema(),
    );
    assert_eq!(
        result,
        Err(ConfigError::TypeCoercion {
            key: keys::SERVER_PORT.to_string(),
            raw_value: "not-a-number".to_string(),
            target_type: SettingType::Integer,
        })
    );
}

#[test]
fn test_boolean_any_case() {
    for raw in ["TRUE", "True", "true", "tRuE"] {
        let config = resolve(
            &source_with_url(&[(keys::JVM_METRICS_ENABLED, raw)]),
            &application_schema(),
        )
        .unwrap();
        assert_eq!(config.get_bool(keys::JVM_METRICS_ENABLED), Ok(true), "raw {raw:?}");
    }
}

#[test]
fn test_invalid_boolean() {
    let result = resolve(
        &source_with_url(&[(keys::TOMCAT_METRICS_ENABLED, "enabled")]),
        &application_schema(),
    );
    assert!(matches!(
        result,
        Err(ConfigError::TypeCoercion { target_type: SettingType::Boolean, .. })
    ));
}

#[test]
fn test_empty_string_accepted() {
    let config = resolve(
        &source_with_url(&[(keys::DATASOURCE_USERNAME, "")]),
        &application_schema(),
    )
    .unwrap();
    assert_eq!(config.get_string(keys::DATASOURCE_USERNAME), Ok(""));
    assert_eq!(
        config.entry(keys::DATASOURCE_USERNAME).unwrap().origin,
        ValueOrigin::Source { name: "test".to_string() }
    );
}

#[test]
fn test_supplied_values_override_defaults() {
    let src = source_with_url(&[
        (keys::SERVER_PORT, "9090"),
        (keys::DATASOURCE_USERNAME, "orders_app"),
        (keys::JVM_METRICS_ENABLED, "false"),
        (keys::TOMCAT_METRICS_ENABLED, "true"),
    ]);
    let config = Resolver::application().unwrap().resolve(&src).unwrap();
    let app = AppConfig::from_resolved(&config).unwrap();

    assert_eq!(app.server_port(), 9090);
    assert_eq!(app.database_url(), TEST_DB_URL);
    assert_eq!(app.database_username(), "orders_app");
    assert!(!app.is_jvm_metrics_enabled());
    assert!(app.is_tomcat_metrics_enabled());
}

#[test]
fn test_accessor_type_mismatch() {
    let config = resolve(&source_with_url(&[]), &application_schema()).unwrap();

    assert_eq!(
        config.get_string(keys::SERVER_PORT),
        Err(ConfigError::TypeMismatch {
            key: keys::SERVER_PORT.to_string(),
            requested: SettingType::String,
            declared: SettingType::Integer,
        })
    );
    assert!(matches!(
        config.get_integer(keys::JVM_METRICS_ENABLED),
        Err(ConfigError::TypeMismatch { .. })
    ));
    assert!(matches!(
        config.get_bool(keys::DATASOURCE_URL),
        Err(ConfigError::TypeMismatch { .. })
    ));
    assert_eq!(
        config.get_bool("no.such.key"),
        Err(ConfigError::UnknownSetting { key: "no.such.key".to_string() })
    );
}

#[test]
fn test_optional_exposure_key() {
    let config = resolve(&source_with_url(&[]), &application_schema()).unwrap();
    assert!(!config.contains(keys::WEB_EXPOSURE_INCLUDE));
    assert_eq!(config.len(), 5);

    let config = resolve(
        &source_with_url(&[(keys::WEB_EXPOSURE_INCLUDE, "health")]),
        &application_schema(),
    )
    .unwrap();
    assert_eq!(config.get_string(keys::WEB_EXPOSURE_INCLUDE), Ok("health"));
}

#[test]
fn test_resolve_is_idempotent() {
    print_test_header(
        "test_resolve_is_idempotent",
        "Resolving the same source twice yields field-wise equal snapshots",
    );

    let src = source_with_url(&[(keys::SERVER_PORT, "7000"), (keys::JVM_METRICS_ENABLED, "FALSE")]);
    let first = resolve(&src, &application_schema()).unwrap();
    let second = resolve(&src, &application_schema()).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        AppConfig::from_resolved(&first).unwrap(),
        AppConfig::from_resolved(&second).unwrap()
    );
}

#[test]
fn test_resolved_config_shared_across_threads() {
    let config = std::sync::Arc::new(
        resolve(&source_with_url(&[(keys::SERVER_PORT, "8181")]), &application_schema()).unwrap(),
    );

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let config = config.clone();
            std::thread::spawn(move || config.get_integer(keys::SERVER_PORT))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), Ok(8181));
    }
}

#[test]
fn test_custom_schema() {
    let schema = vec![
        SettingDescriptor::with_default("cache.ttl.seconds", SettingType::Integer, "300"),
        SettingDescriptor::required("cache.region", SettingType::String),
    ];
    let resolver = Resolver::new(schema).unwrap();
    let config = resolver.resolve(&source(&[("cache.region", "eu-west-1")])).unwrap();
    assert_eq!(config.get_integer("cache.ttl.seconds"), Ok(300));
    assert_eq!(config.get_string("cache.region"), Ok("eu-west-1"));
}
