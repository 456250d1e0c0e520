use super::*;
use crate::util::storage::MemoryStore;

fn prefs(namespace: &str, stores: &[StoredField], store: &MemoryStore) -> PersistedPreferences {
    PersistedPreferences::new(namespace, stores.to_vec(), Box::new(store.clone()))
}

const ALL_STORED: [StoredField; 3] = [StoredField::Limit, StoredField::Sort, StoredField::Order];

// =============================================================
// keys and enablement
// =============================================================

#[test]
fn keys_are_namespaced() {
    let store = MemoryStore::new();
    let p = prefs("users", &ALL_STORED, &store);
    assert_eq!(p.key(StoredField::Limit), "users::limit");
    assert_eq!(p.key(StoredField::Sort), "users::sort");
    assert_eq!(p.key(StoredField::Order), "users::order");
}

#[test]
fn blank_namespace_disables_persistence() {
    let store = MemoryStore::new();
    let p = prefs("  ", &ALL_STORED, &store);
    assert!(!p.is_enabled());
    p.save(50, "name", Order::Desc);
    assert!(store.is_empty());
}

// =============================================================
// load
// =============================================================

#[test]
fn load_overrides_defaults_with_stored_values() {
    let store = MemoryStore::with_entries([
        ("users::limit", "50"),
        ("users::sort", "name"),
        ("users::order", "desc"),
    ]);
    let options = ListerOptions::default();
    let loaded = prefs("users", &ALL_STORED, &store).load(&options, options.defaults());
    assert_eq!(loaded.limit, 50);
    assert_eq!(loaded.sort, "name");
    assert_eq!(loaded.order, Order::Desc);
}

#[test]
fn load_ignores_fields_not_configured_for_storage() {
    let store = MemoryStore::with_entries([("users::limit", "50"), ("users::sort", "name")]);
    let options = ListerOptions::default();
    let loaded = prefs("users", &[StoredField::Sort], &store).load(&options, options.defaults());
    assert_eq!(loaded.limit, 25);
    assert_eq!(loaded.sort, "name");
}

#[test]
fn load_keeps_defaults_for_invalid_entries() {
    let store = MemoryStore::with_entries([
        ("users::limit", "lots"),
        ("users::sort", "password"),
        ("users::order", "upward"),
    ]);
    let options = ListerOptions::default().with_sorts(["name"]);
    let loaded = prefs("users", &ALL_STORED, &store).load(&options, options.defaults());
    assert_eq!(loaded.limit, 25);
    assert_eq!(loaded.sort, "_id");
    assert_eq!(loaded.order, Order::Asc);
}

#[test]
fn load_rejects_limits_outside_allow_list() {
    let store = MemoryStore::with_entries([("users::limit", "75")]);
    let options = ListerOptions::default().with_limits([25, 50]);
    let loaded = prefs("users", &ALL_STORED, &store).load(&options, options.defaults());
    assert_eq!(loaded.limit, 25);
}

// =============================================================
// save
// =============================================================

#[test]
fn save_writes_only_configured_fields() {
    let store = MemoryStore::new();
    prefs("orders", &[StoredField::Limit, StoredField::Order], &store).save(100, "total", Order::Desc);
    assert_eq!(store.get("orders::limit").as_deref(), Some("100"));
    assert_eq!(store.get("orders::order").as_deref(), Some("desc"));
    assert_eq!(store.get("orders::sort"), None);
}

#[test]
fn saved_values_load_back() {
    let store = MemoryStore::new();
    let options = ListerOptions::default();
    let p = prefs("orders", &ALL_STORED, &store);
    p.save(10, "total", Order::Desc);
    let loaded = p.load(&options, options.defaults());
    assert_eq!((loaded.limit, loaded.sort.as_str(), loaded.order), (10, "total", Order::Desc));
}
