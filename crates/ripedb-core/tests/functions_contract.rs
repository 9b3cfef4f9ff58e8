//! Contract Test: Attribute Lookup Functions
//!
//! Constraints verified:
//! - `get_first` returns null (not "") when no attribute has the name
//! - `get_all` keeps list order and never yields empty strings
//! - Both work on arbitrary attribute lists, with no remote access
//! - The argument-binding layer rejects malformed calls

mod common;

use common::*;
use ripedb_core::functions::{self, get_all, get_first};
use serde_json::{Value, json};

#[test]
fn get_all_returns_every_match_in_order() {
    let attrs = attributes(&[("mnt-by", "RIPE-MNT"), ("mnt-by", "ARIN-MNT")]);
    assert_eq!(get_all(&attrs, "mnt-by"), ["RIPE-MNT", "ARIN-MNT"]);
}

#[test]
fn get_all_without_match_is_empty_list() {
    let attrs = attributes(&[("mnt-by", "RIPE-MNT")]);
    assert!(get_all(&attrs, "admin-c").is_empty());

    let result = functions::lookup("get_all")
        .expect("registered")
        .run(&[json!([{ "name": "mnt-by", "value": "RIPE-MNT" }]), json!("admin-c")])
        .expect("call succeeds");
    assert_eq!(result, json!([]));
}

#[test]
fn get_first_returns_value_or_null() {
    let attrs = attributes(&[("name", "TEST ORG")]);
    assert_eq!(get_first(&attrs, "name"), Some("TEST ORG"));
    assert_eq!(get_first(&attrs, "admin-c"), None);

    let function = functions::lookup("get_first").expect("registered");
    let list = json!([{ "name": "name", "value": "TEST ORG" }]);
    assert_eq!(function.run(&[list.clone(), json!("name")]).unwrap(), json!("TEST ORG"));
    assert_eq!(function.run(&[list, json!("admin-c")]).unwrap(), Value::Null);
}

#[test]
fn get_all_never_yields_empty_strings() {
    let attrs = attributes(&[
        ("remarks", ""),
        ("remarks", "first"),
        ("descr", ""),
        ("remarks", ""),
        ("remarks", "second"),
    ]);

    let values = get_all(&attrs, "remarks");
    assert_eq!(values, ["first", "second"]);
    assert!(values.iter().all(|value| !value.is_empty()));
    assert!(get_all(&attrs, "descr").is_empty());
}

#[test]
fn present_but_empty_is_a_value_for_get_first_only() {
    let attrs = attributes(&[("remarks", ""), ("remarks", "second")]);

    assert_eq!(get_first(&attrs, "remarks"), Some(""));
    assert_eq!(get_all(&attrs, "remarks"), ["second"]);

    let attrs = attributes(&[("remarks", "")]);
    let function = functions::lookup("get_first").expect("registered");
    let list = json!([{ "name": "remarks", "value": "" }]);
    assert_eq!(function.run(&[list, json!("remarks")]).unwrap(), json!(""));
    assert!(get_all(&attrs, "remarks").is_empty());
}

#[test]
fn lookups_work_on_raw_objects_with_head_and_source() {
    let raw = object(&[
        ("aut-num", "AS3333"),
        ("mnt-by", "RIPE-NCC-MNT"),
        ("source", "RIPE"),
    ]);

    assert_eq!(get_first(raw.as_slice(), "aut-num"), Some("AS3333"));
    assert_eq!(get_all(raw.as_slice(), "source"), ["RIPE"]);
}

#[test]
fn malformed_calls_are_rejected_before_lookup() {
    for name in ["get_first", "get_all"] {
        let function = functions::lookup(name).expect("registered");

        assert!(function.run(&[]).is_err(), "{name} without arguments");
        assert!(function.run(&[json!("not a list"), json!("key")]).is_err());
        assert!(function.run(&[json!([]), Value::Null]).is_err());
        assert!(function.run(&[json!([]), json!("key"), json!("extra")]).is_err());
    }
}
