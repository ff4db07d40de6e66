//! Integration tests for the configuration facade.
//!
//! These drive `ConfigStore` end to end over the in-memory and file-backed
//! host stores, so they run on every platform.

use std::path::PathBuf;

use regbase::infrastructure::host_store::file::FileStore;
use regbase::infrastructure::host_store::memory::InMemoryStore;
use regbase::infrastructure::storage::config::{BackendKind, StoreSettings};
use regbase::{ConfigStore, Hive, HostStore, NamespaceRoot, ProductId, StoreView};
use uuid::Uuid;

fn facade() -> ConfigStore<InMemoryStore> {
    ConfigStore::new(InMemoryStore::new())
}

fn temp_dir() -> PathBuf {
    std::env::temp_dir().join(format!("regbase_it_{}", Uuid::new_v4()))
}

#[test]
fn test_string_round_trip_under_product_base() {
    // Arrange
    let config = facade();

    // Act
    config
        .set_string(Some("UserInfo"), "AuthCode", "ABC123", ProductId(0))
        .unwrap();

    // Assert
    assert_eq!(
        config.get_string(Some("UserInfo"), "AuthCode", "", ProductId(0)),
        "ABC123"
    );
    let expected = NamespaceRoot::new(Hive::LocalMachine, r"Software\Alachisoft\NCache")
        .locate(Some("UserInfo"), StoreView::Native);
    assert!(config.store().open_container(&expected).is_ok());
}

#[test]
fn test_missing_entry_returns_default() {
    let config = facade();
    config
        .set_string(Some("UserInfo"), "Other", "x", ProductId(0))
        .unwrap();

    assert_eq!(
        config.get_string(Some("UserInfo"), "AuthCode", "N/A", ProductId(0)),
        "N/A"
    );
    assert_eq!(
        config.get_string(Some("NoSuchSection"), "AuthCode", "N/A", ProductId(0)),
        "N/A"
    );
}

#[test]
fn test_int_round_trip_and_text_fallback() {
    // Arrange
    let config = facade();

    // Act
    config
        .set_int(Some("Limits"), "MaxConns", 500, ProductId(0))
        .unwrap();
    config
        .set_string(Some("Limits"), "Label", "many", ProductId(0))
        .unwrap();

    // Assert
    assert_eq!(config.get_int(Some("Limits"), "MaxConns", 0, ProductId(0)), 500);
    assert_eq!(config.get_int(Some("Limits"), "Label", 7, ProductId(0)), 7);
    assert_eq!(config.get_int(Some("Limits"), "Missing", -1, ProductId(0)), -1);
    assert_eq!(
        config.get_string(Some("Limits"), "MaxConns", "", ProductId(0)),
        "500"
    );
}

#[test]
fn test_get_keys_lists_every_entry_with_trailing_separator() {
    let config = facade();
    for name in ["a", "b", "c"] {
        config
            .set_string(Some("Section"), name, "v", ProductId(0))
            .unwrap();
    }

    assert_eq!(
        config.get_keys(Some("Section"), "ignored", "", ProductId(0)),
        "a:b:c:"
    );
    assert_eq!(
        config.get_keys(Some("Absent"), "", "none", ProductId(0)),
        "none"
    );
}

#[test]
fn test_products_are_isolated_from_each_other() {
    let config = facade();
    config
        .set_string(Some("UserInfo"), "Edition", "grid", ProductId(2))
        .unwrap();

    assert_eq!(
        config.get_string(Some("UserInfo"), "Edition", "-", ProductId(0)),
        "-"
    );
    assert_eq!(
        config.get_string(Some("UserInfo"), "Edition", "-", ProductId(2)),
        "grid"
    );
}

#[test]
fn test_unknown_product_keeps_last_resolved_base() {
    // Arrange
    let config = facade();
    config
        .set_string(Some("UserInfo"), "Edition", "grid", ProductId(2))
        .unwrap();

    // Act: an unknown id addresses whatever base the previous call resolved.
    let value = config.get_string(Some("UserInfo"), "Edition", "-", ProductId(99));

    // Assert
    assert_eq!(value, "grid");
    assert_eq!(
        config.resolve_base(ProductId(99)).base_path,
        r"Software\Alachisoft\TayzGrid"
    );
}

#[test]
fn test_namespace_root_override_applies_to_unknown_products_only() {
    // Arrange
    let config = facade();

    // Act
    config.set_namespace_root(r"Software\Custom", Hive::CurrentUser);
    config
        .set_string(None, "Mode", "custom", ProductId(42))
        .unwrap();

    // Assert
    let custom = NamespaceRoot::new(Hive::CurrentUser, r"Software\Custom")
        .locate(None, StoreView::Native);
    assert!(config.store().open_container(&custom).is_ok());
    assert_eq!(config.get_string(None, "Mode", "", ProductId(42)), "custom");

    // A known id replaces the base path but keeps the overridden hive.
    let root = config.resolve_base(ProductId(0));
    assert_eq!(root.hive, Hive::CurrentUser);
    assert_eq!(root.base_path, r"Software\Alachisoft\NCache");
}

#[test]
fn test_container_exists_follows_writes() {
    let config = facade();
    assert!(!config.container_exists(Some("UserInfo"), ProductId(0)));

    config
        .set_string(Some("UserInfo"), "AuthCode", "ABC123", ProductId(0))
        .unwrap();

    assert!(config.container_exists(Some("UserInfo"), ProductId(0)));
    assert!(config.container_exists(None, ProductId(0)));
}

#[test]
fn test_views_are_separate_namespaces() {
    let store = InMemoryStore::new();
    let native = ConfigStore::with_view(store.clone(), StoreView::Native);
    let alternate = ConfigStore::with_view(store, StoreView::Alternate);

    native
        .set_string(Some("UserInfo"), "Bits", "64", ProductId(0))
        .unwrap();

    assert_eq!(
        alternate.get_string(Some("UserInfo"), "Bits", "none", ProductId(0)),
        "none"
    );
}

#[test]
fn test_bulk_values_and_license_key() {
    // Arrange
    let config = facade();
    config
        .set_values(
            Some("Features"),
            [("Compression", "true"), ("Encryption", "0"), ("Mode", "fast")],
            ProductId(0),
        )
        .unwrap();
    config
        .set_string(Some("UserInfo"), "licensekey", "KEY-1234", ProductId(0))
        .unwrap();

    // Act
    let values = config.get_values(Some("Features"), ProductId(0));
    let flags = config.get_bool_values(Some("Features"), ProductId(0));

    // Assert
    assert_eq!(values.len(), 3);
    assert_eq!(values["Mode"], "fast");
    assert_eq!(flags.get("Compression"), Some(&true));
    assert_eq!(flags.get("Encryption"), Some(&false));
    assert!(!flags.contains_key("Mode"));
    assert_eq!(config.license_key(ProductId(0)).as_deref(), Some("KEY-1234"));
    assert_eq!(config.license_key(ProductId(3)), None);
}

#[test]
fn test_file_store_persists_across_facades() {
    // Arrange
    let dir = temp_dir();
    let path = dir.join("store.toml");

    // Act
    {
        let config = ConfigStore::new(FileStore::new(&path));
        config
            .set_int(Some("Limits"), "MaxConns", 500, ProductId(1))
            .unwrap();
    }
    let reopened = ConfigStore::new(FileStore::new(&path));

    // Assert
    assert!(path.exists());
    assert_eq!(
        reopened.get_int(Some("Limits"), "MaxConns", 0, ProductId(1)),
        500
    );

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_native_store_from_settings_drives_the_facade() {
    // Arrange
    let dir = temp_dir();
    let settings = StoreSettings {
        hive: Hive::CurrentUser,
        backend: BackendKind::File,
        file_path: Some(dir.join("store.toml")),
        ..StoreSettings::default()
    };
    let store = regbase::infrastructure::host_store::open_native_store(&settings).unwrap();
    let config = ConfigStore::with_root(store, settings.namespace_root(), settings.view);

    // Act
    config
        .set_string(Some("UserInfo"), "AuthCode", "ABC123", settings.default_product)
        .unwrap();

    // Assert
    assert_eq!(config.namespace_root().hive, Hive::CurrentUser);
    assert_eq!(
        config.get_string(Some("UserInfo"), "AuthCode", "", settings.default_product),
        "ABC123"
    );

    std::fs::remove_dir_all(&dir).ok();
}
