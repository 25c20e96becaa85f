//! Classification of untyped portfolio values.
//!
//! Persisted documents arrive loosely typed. These predicates decide how a raw
//! JSON value is read into an [`AssetNode`](super::AssetNode) and whether it is
//! eligible for recursive descent.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Map, Number, Value};

/// Key holding the monetary value of a labeled leaf.
pub const LABELED_AMOUNT_KEY: &str = "amount";
/// Optional display label of a labeled leaf.
pub const LABELED_LABEL_KEY: &str = "label";
/// Optional free-text annotation of a labeled leaf.
pub const LABELED_NOTES_KEY: &str = "notes";

/// Shape of a raw value as seen by the aggregation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A mapping of named children that is not a labeled leaf
    Category,
    /// A finite number representable as a decimal
    NumericLeaf,
    /// An `{amount, label?, notes?}` object
    LabeledLeaf,
    /// Anything else: strings, booleans, null, arrays, out-of-range numbers
    Malformed,
}

/// Returns true if the value can be descended into as a category.
///
/// Any non-null, non-array object qualifies, including labeled leaves.
pub fn is_category_node(value: &Value) -> bool {
    value.is_object()
}

/// Returns true if the value is a number the engine can count.
pub fn is_numeric_leaf(value: &Value) -> bool {
    match value {
        Value::Number(n) => number_to_decimal(n).is_some(),
        _ => false,
    }
}

/// Returns true if the value has the exact `{amount, label?, notes?}` shape.
pub fn is_labeled_leaf(value: &Value) -> bool {
    value.as_object().is_some_and(is_labeled_map)
}

/// Classifies a raw value. Every JSON value falls into exactly one kind.
pub fn classify(value: &Value) -> NodeKind {
    match value {
        Value::Number(n) if number_to_decimal(n).is_some() => NodeKind::NumericLeaf,
        Value::Object(map) if is_labeled_map(map) => NodeKind::LabeledLeaf,
        Value::Object(_) => NodeKind::Category,
        _ => NodeKind::Malformed,
    }
}

pub(crate) fn is_labeled_map(map: &Map<String, Value>) -> bool {
    let has_amount = map
        .get(LABELED_AMOUNT_KEY)
        .is_some_and(|amount| matches!(amount, Value::Number(n) if number_to_decimal(n).is_some()));
    if !has_amount {
        return false;
    }

    map.iter().all(|(key, value)| match key.as_str() {
        LABELED_AMOUNT_KEY => true,
        LABELED_LABEL_KEY | LABELED_NOTES_KEY => value.is_string() || value.is_null(),
        _ => false,
    })
}

/// Converts a JSON number into a decimal.
///
/// Returns `None` for values outside the decimal range (e.g. `1e300`).
pub(crate) fn number_to_decimal(number: &Number) -> Option<Decimal> {
    if let Some(i) = number.as_i64() {
        return Some(Decimal::from(i));
    }
    if let Some(u) = number.as_u64() {
        return Some(Decimal::from(u));
    }

    // serde_json prints floats in their shortest round-trip form, which keeps
    // values such as 0.1 exact once parsed as a decimal.
    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}
