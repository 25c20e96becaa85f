//! Tests for the asset tree model.

use super::*;
use rust_decimal_macros::dec;
use serde_json::json;

#[test]
fn test_from_value_reads_each_node_kind() {
    let node = AssetNode::from(json!({
        "Bank": { "DBS": { "savings": 1000, "fixed_deposit": 500.25 } },
        "Others": { "watch": { "amount": 3000, "label": "Rolex", "notes": "gift" } },
        "memo": "not a number",
    }));

    let bank = node.get("Bank").and_then(|b| b.get("DBS")).unwrap();
    assert_eq!(bank.get("savings"), Some(&AssetNode::Amount(dec!(1000))));
    assert_eq!(
        bank.get("fixed_deposit"),
        Some(&AssetNode::Amount(dec!(500.25)))
    );

    let watch = node.get("Others").and_then(|o| o.get("watch")).unwrap();
    assert_eq!(
        watch,
        &AssetNode::Labeled(
            LabeledAmount::new(dec!(3000))
                .with_label("Rolex")
                .with_notes("gift")
        )
    );

    assert_eq!(
        node.get("memo"),
        Some(&AssetNode::Opaque(json!("not a number")))
    );
}

#[test]
fn test_object_with_extra_keys_is_a_category() {
    let node = AssetNode::from(json!({ "amount": 10, "label": "x", "bonus": 5 }));
    assert!(node.is_category());
    assert_eq!(node.get("amount"), Some(&AssetNode::Amount(dec!(10))));
    assert_eq!(node.get("label"), Some(&AssetNode::Opaque(json!("x"))));
}

#[test]
fn test_out_of_range_number_is_opaque() {
    let node = AssetNode::from(json!(1e300));
    assert!(matches!(node, AssetNode::Opaque(_)));
    assert_eq!(node.leaf_value(), None);
}

#[test]
fn test_deserialize_never_fails_on_malformed_branches() {
    let node: AssetNode =
        serde_json::from_str(r#"{"a": [1, 2], "b": null, "c": true, "d": {"e": 4}}"#).unwrap();
    let children = node.children().unwrap();
    assert_eq!(children.len(), 4);
    assert_eq!(children["a"], AssetNode::Opaque(json!([1, 2])));
    assert_eq!(children["b"], AssetNode::Opaque(json!(null)));
    assert_eq!(children["d"].get("e"), Some(&AssetNode::Amount(dec!(4))));
}

#[test]
fn test_to_value_preserves_shape() {
    let raw = json!({
        "DBS": { "savings": 1000, "notes": "primary account" },
        "car": { "amount": 20000, "label": "Car" },
        "tags": ["a", "b"],
    });
    let node = AssetNode::from(raw.clone());
    let back = node.to_value();

    assert_eq!(back["DBS"]["notes"], json!("primary account"));
    assert_eq!(back["car"]["label"], json!("Car"));
    assert!(back["car"].get("notes").is_none());
    assert_eq!(back["tags"], raw["tags"]);
    assert_eq!(AssetNode::from(back), node);
}

#[test]
fn test_serialize_matches_to_value() {
    let node = AssetNode::category([
        ("cash", AssetNode::amount(dec!(12.5))),
        ("art", AssetNode::labeled(dec!(400), "Painting")),
    ]);
    let serialized = serde_json::to_value(&node).unwrap();
    assert_eq!(serialized, node.to_value());
    assert_eq!(serialized["art"], json!({ "amount": 400, "label": "Painting" }));
    assert_eq!(serialized["cash"], json!(12.5));
}

#[test]
fn test_null_label_and_notes_survive_write_back() {
    let raw = json!({
        "car": { "amount": 1, "notes": null },
        "boat": { "amount": 2, "label": null, "notes": "moored" }
    });
    let node = AssetNode::from(raw.clone());

    assert_eq!(node.to_value(), raw);
    assert_eq!(serde_json::to_value(&node).unwrap(), raw);

    let car = node.get("car").and_then(AssetNode::leaf_value);
    assert_eq!(car, Some(dec!(1)));
}

#[test]
fn test_setting_a_label_replaces_explicit_null() {
    let node = AssetNode::from(json!({ "amount": 5, "label": null }));
    let AssetNode::Labeled(labeled) = node else {
        panic!("expected a labeled leaf");
    };
    let relabeled = labeled.with_label("Bike");
    assert_eq!(relabeled.to_value(), json!({ "amount": 5, "label": "Bike" }));
}

#[test]
fn test_whole_amounts_are_written_as_integers() {
    let raw = json!({ "big": 12345678901234567891u64, "negative": -42, "cents": 10.25 });
    let node = AssetNode::from(raw.clone());

    let back = node.to_value();
    assert_eq!(back["big"], json!(12345678901234567891u64));
    assert_eq!(back["negative"], json!(-42));
    assert_eq!(back["cents"], json!(10.25));
    assert_eq!(back, raw);
}

#[test]
fn test_insert_into_leaf_promotes_to_category() {
    let mut node = AssetNode::amount(dec!(5));
    assert!(node.insert("child", AssetNode::amount(dec!(1))).is_none());
    assert!(node.is_category());
    assert_eq!(node.get("child"), Some(&AssetNode::Amount(dec!(1))));

    let previous = node.insert("child", AssetNode::amount(dec!(2)));
    assert_eq!(previous, Some(AssetNode::Amount(dec!(1))));
}

#[test]
fn test_default_is_empty_category() {
    let node = AssetNode::default();
    assert!(node.children().is_some_and(|c| c.is_empty()));
    assert_eq!(node.leaf_value(), None);
}
