use super::*;
use serde_json::json;

// =============================================================
// object_of / array_of
// =============================================================

#[test]
fn object_of_clones_objects() {
    let value = json!({"a": 1});
    assert_eq!(object_of(Some(&value)).get("a"), Some(&json!(1)));
}

#[test]
fn object_of_degrades_non_objects_to_empty_map() {
    assert!(object_of(None).is_empty());
    assert!(object_of(Some(&json!(null))).is_empty());
    assert!(object_of(Some(&json!([1, 2]))).is_empty());
    assert!(object_of(Some(&json!("x"))).is_empty());
}

#[test]
fn array_of_degrades_non_arrays_to_empty_vec() {
    assert_eq!(array_of(Some(&json!([1, "b"]))), vec![json!(1), json!("b")]);
    assert!(array_of(Some(&json!({"0": 1}))).is_empty());
    assert!(array_of(None).is_empty());
}

// =============================================================
// integer coercion
// =============================================================

#[test]
fn integer_of_accepts_whole_floats() {
    assert_eq!(integer_of(Some(&json!(3))), Some(3));
    assert_eq!(integer_of(Some(&json!(3.0))), Some(3));
    assert_eq!(integer_of(Some(&json!(-2))), Some(-2));
}

#[test]
fn integer_of_rejects_fractions_and_strings() {
    assert_eq!(integer_of(Some(&json!(2.5))), None);
    assert_eq!(integer_of(Some(&json!("2"))), None);
    assert_eq!(integer_of(Some(&json!(true))), None);
    assert_eq!(integer_of(None), None);
}

#[test]
fn positive_of_rejects_zero_and_negatives() {
    assert_eq!(positive_of(Some(&json!(0))), None);
    assert_eq!(positive_of(Some(&json!(-4))), None);
    assert_eq!(positive_of(Some(&json!(4))), Some(4));
}

#[test]
fn count_of_defaults_to_zero() {
    assert_eq!(count_of(Some(&json!(120))), 120);
    assert_eq!(count_of(Some(&json!("120"))), 0);
    assert_eq!(count_of(Some(&json!(-1))), 0);
    assert_eq!(count_of(None), 0);
}

// =============================================================
// truthiness
// =============================================================

#[test]
fn is_truthy_follows_javascript_rules() {
    assert!(!is_truthy(&json!(null)));
    assert!(!is_truthy(&json!(false)));
    assert!(!is_truthy(&json!(0)));
    assert!(!is_truthy(&json!("")));
    assert!(is_truthy(&json!("a")));
    assert!(is_truthy(&json!(1)));
    assert!(is_truthy(&json!([])));
    assert!(is_truthy(&json!({})));
}
