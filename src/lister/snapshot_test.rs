use super::*;
use serde_json::json;

fn map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

// =============================================================
// from_map / to_map
// =============================================================

#[test]
fn from_map_splits_known_fields_and_metadata() {
    let snapshot = Snapshot::from_map(map(json!({
        "page": 2,
        "limit": 50,
        "sort": "name",
        "order": "desc",
        "search": "ann",
        "filters": {"status": "active"},
        "total": 120,
        "data": [{"id": 1}]
    })));
    assert_eq!(snapshot.page, Some(2));
    assert_eq!(snapshot.limit, Some(50));
    assert_eq!(snapshot.sort.as_deref(), Some("name"));
    assert_eq!(snapshot.order, Some(Order::Desc));
    assert_eq!(snapshot.search.as_deref(), Some("ann"));
    assert_eq!(snapshot.filters, Some(map(json!({"status": "active"}))));
    assert_eq!(snapshot.extra.len(), 2);
    assert_eq!(snapshot.total(), 120);
}

#[test]
fn from_map_drops_malformed_known_fields() {
    let snapshot = Snapshot::from_map(map(json!({
        "page": "two",
        "limit": 0,
        "sort": 5,
        "order": "up",
        "search": null,
        "filters": ["a"]
    })));
    assert_eq!(snapshot, Snapshot::default());
}

#[test]
fn to_map_round_trips_through_from_map() {
    let raw = map(json!({"page": 3, "order": "asc", "filters": {}, "pages": 9}));
    let snapshot = Snapshot::from_map(raw.clone());
    assert_eq!(snapshot.to_map(), raw);
}

#[test]
fn from_value_of_non_object_is_empty() {
    assert_eq!(Snapshot::from_value(&json!([1, 2])), Snapshot::default());
    assert_eq!(Snapshot::from_value(&json!(null)), Snapshot::default());
}

#[test]
fn serialize_flattens_metadata() {
    let snapshot = Snapshot::from_map(map(json!({"page": 1, "total": 4})));
    assert_eq!(serde_json::to_value(&snapshot).expect("serialize"), json!({"page": 1, "total": 4}));
    assert_eq!(snapshot.to_value(), json!({"page": 1, "total": 4}));
}

// =============================================================
// merged
// =============================================================

#[test]
fn merged_overlays_raw_keys() {
    let base = Snapshot::from_map(map(json!({"page": 1, "limit": 25, "total": 10})));
    let merged = base.merged(&json!({"page": 4, "data": [1, 2]}));
    assert_eq!(merged.page, Some(4));
    assert_eq!(merged.limit, Some(25));
    assert_eq!(merged.total(), 10);
    assert_eq!(merged.records(), vec![json!(1), json!(2)]);
}

#[test]
fn merged_with_non_object_keeps_base() {
    let base = Snapshot::from_map(map(json!({"page": 1})));
    assert_eq!(base.merged(&json!("junk")), base);
}

// =============================================================
// metadata views
// =============================================================

#[test]
fn metadata_defaults_to_zero_and_empty() {
    let snapshot = Snapshot::from_map(map(json!({"total": "many", "from": 1.5, "data": {}})));
    assert_eq!(snapshot.total(), 0);
    assert_eq!(snapshot.from(), 0);
    assert_eq!(snapshot.to(), 0);
    assert_eq!(snapshot.pages(), 0);
    assert!(snapshot.records().is_empty());
}

// =============================================================
// params
// =============================================================

#[test]
fn params_hash_of_empty_snapshot_is_empty_object() {
    assert_eq!(Snapshot::default().params().hash(), "e30=");
}

#[test]
fn params_serialize_in_canonical_field_order() {
    let snapshot = Snapshot::from_map(map(json!({
        "filters": {}, "search": "", "order": "asc", "sort": "_id", "limit": 25, "page": 1
    })));
    let json = serde_json::to_string(&snapshot.params()).expect("serialize");
    assert_eq!(
        json,
        r#"{"page":1,"limit":25,"sort":"_id","order":"asc","search":"","filters":{}}"#
    );
}

#[test]
fn params_hash_round_trips() {
    let params = Params {
        page: Some(3),
        limit: Some(50),
        sort: Some("name".to_owned()),
        order: Some(Order::Desc),
        search: Some("zoë".to_owned()),
        filters: Some(map(json!({"tags": ["a", "b"], "active": true}))),
    };
    assert_eq!(Params::from_hash(&params.hash()).expect("decode"), params);
}

#[test]
fn params_from_hash_rejects_garbage() {
    assert!(Params::from_hash("%%%").is_err());
}

#[test]
fn new_params_wraps_sort_in_list() {
    let snapshot = Snapshot::from_map(map(json!({"sort": "name", "order": "desc", "page": 1})));
    let params = snapshot.new_params();
    assert_eq!(
        params.sorts,
        vec![SortSpec { field: "name".to_owned(), order: Order::Desc }]
    );
    assert_eq!(params.page, Some(1));
}

#[test]
fn new_params_without_sort_has_no_sort_keys() {
    assert!(Snapshot::default().new_params().sorts.is_empty());
}
