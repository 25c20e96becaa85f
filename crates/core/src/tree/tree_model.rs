//! Asset tree domain model.

use std::collections::BTreeMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::tree_classifier::{
    is_labeled_map, number_to_decimal, LABELED_AMOUNT_KEY, LABELED_LABEL_KEY, LABELED_NOTES_KEY,
};

/// A single named asset carrying a display label and an annotation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LabeledAmount {
    /// Monetary value
    pub amount: Decimal,
    /// Display label (e.g. "Rolex Submariner")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// `label`/`notes` keys stored as explicit nulls in the source document
    #[serde(skip)]
    explicit_nulls: ExplicitNulls,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct ExplicitNulls {
    label: bool,
    notes: bool,
}

impl LabeledAmount {
    pub fn new(amount: Decimal) -> Self {
        Self {
            amount,
            label: None,
            notes: None,
            explicit_nulls: ExplicitNulls::default(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self.explicit_nulls.label = false;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self.explicit_nulls.notes = false;
        self
    }

    /// Converts the leaf back into its `{amount, label, notes}` object.
    /// Absent fields are omitted; fields read as `null` are written as `null`.
    pub fn to_value(&self) -> Value {
        let mut map = serde_json::Map::new();
        map.insert(LABELED_AMOUNT_KEY.to_string(), decimal_to_value(self.amount));
        let fields = [
            (LABELED_LABEL_KEY, &self.label, self.explicit_nulls.label),
            (LABELED_NOTES_KEY, &self.notes, self.explicit_nulls.notes),
        ];
        for (key, text, explicit_null) in fields {
            match text {
                Some(text) => {
                    map.insert(key.to_string(), Value::String(text.clone()));
                }
                None if explicit_null => {
                    map.insert(key.to_string(), Value::Null);
                }
                None => {}
            }
        }
        Value::Object(map)
    }
}

/// A node of the portfolio tree.
///
/// Category keys are user or platform defined (bank names, fund names) and
/// their order carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetNode {
    /// A plain monetary value
    Amount(Decimal),
    /// A monetary value with label and notes
    Labeled(LabeledAmount),
    /// Named children, each itself a node
    Category(BTreeMap<String, AssetNode>),
    /// A value that is neither a number nor an object, kept verbatim so the
    /// tree can be written back unchanged. Counts as zero.
    Opaque(Value),
}

impl Default for AssetNode {
    fn default() -> Self {
        AssetNode::empty()
    }
}

impl AssetNode {
    /// An empty category.
    pub fn empty() -> Self {
        AssetNode::Category(BTreeMap::new())
    }

    pub fn amount(value: Decimal) -> Self {
        AssetNode::Amount(value)
    }

    pub fn labeled(amount: Decimal, label: impl Into<String>) -> Self {
        AssetNode::Labeled(LabeledAmount::new(amount).with_label(label))
    }

    /// Builds a category from `(key, node)` pairs.
    pub fn category<K, I>(children: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, AssetNode)>,
    {
        AssetNode::Category(
            children
                .into_iter()
                .map(|(key, node)| (key.into(), node))
                .collect(),
        )
    }

    pub fn is_category(&self) -> bool {
        matches!(self, AssetNode::Category(_))
    }

    /// Returns the monetary value of a numeric or labeled leaf.
    pub fn leaf_value(&self) -> Option<Decimal> {
        match self {
            AssetNode::Amount(value) => Some(*value),
            AssetNode::Labeled(labeled) => Some(labeled.amount),
            _ => None,
        }
    }

    pub fn children(&self) -> Option<&BTreeMap<String, AssetNode>> {
        match self {
            AssetNode::Category(children) => Some(children),
            _ => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut BTreeMap<String, AssetNode>> {
        match self {
            AssetNode::Category(children) => Some(children),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&AssetNode> {
        self.children().and_then(|children| children.get(key))
    }

    /// Inserts a child, turning a non-category node into a category first.
    /// Returns the node previously stored under `key`.
    pub fn insert(&mut self, key: impl Into<String>, node: AssetNode) -> Option<AssetNode> {
        if !self.is_category() {
            *self = AssetNode::empty();
        }
        self.children_mut()
            .and_then(|children| children.insert(key.into(), node))
    }

    /// Converts the node back into untyped JSON.
    pub fn to_value(&self) -> Value {
        match self {
            AssetNode::Amount(value) => decimal_to_value(*value),
            AssetNode::Labeled(labeled) => labeled.to_value(),
            AssetNode::Category(children) => Value::Object(
                children
                    .iter()
                    .map(|(key, child)| (key.clone(), child.to_value()))
                    .collect(),
            ),
            AssetNode::Opaque(value) => value.clone(),
        }
    }
}

/// Whole amounts within the 64-bit range are written as JSON integers so they
/// survive write-back exactly. Everything else goes through `f64` and keeps
/// about 17 significant digits.
fn decimal_to_value(value: Decimal) -> Value {
    if value.fract().is_zero() {
        if let Some(i) = value.to_i64() {
            return Value::from(i);
        }
        if let Some(u) = value.to_u64() {
            return Value::from(u);
        }
    }
    serde_json::to_value(value).unwrap_or(Value::Null)
}

impl From<Value> for AssetNode {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(number) => match number_to_decimal(&number) {
                Some(decimal) => AssetNode::Amount(decimal),
                None => AssetNode::Opaque(Value::Number(number)),
            },
            Value::Object(map) if is_labeled_map(&map) => {
                let amount = match map.get(LABELED_AMOUNT_KEY) {
                    Some(Value::Number(number)) => number_to_decimal(number).unwrap_or_default(),
                    _ => Decimal::ZERO,
                };
                let text = |key: &str| map.get(key).and_then(Value::as_str).map(str::to_string);
                let is_null = |key: &str| map.get(key).is_some_and(Value::is_null);
                AssetNode::Labeled(LabeledAmount {
                    amount,
                    label: text(LABELED_LABEL_KEY),
                    notes: text(LABELED_NOTES_KEY),
                    explicit_nulls: ExplicitNulls {
                        label: is_null(LABELED_LABEL_KEY),
                        notes: is_null(LABELED_NOTES_KEY),
                    },
                })
            }
            Value::Object(map) => AssetNode::Category(
                map.into_iter()
                    .map(|(key, child)| (key, AssetNode::from(child)))
                    .collect(),
            ),
            other => AssetNode::Opaque(other),
        }
    }
}

impl From<Decimal> for AssetNode {
    fn from(value: Decimal) -> Self {
        AssetNode::Amount(value)
    }
}

impl From<LabeledAmount> for AssetNode {
    fn from(value: LabeledAmount) -> Self {
        AssetNode::Labeled(value)
    }
}

impl Serialize for AssetNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AssetNode::Amount(value) => decimal_to_value(*value).serialize(serializer),
            AssetNode::Labeled(labeled) => labeled.to_value().serialize(serializer),
            AssetNode::Category(children) => children.serialize(serializer),
            AssetNode::Opaque(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for AssetNode {
    /// Accepts any JSON value. Malformed branches become `Opaque` nodes
    /// instead of failing the whole document.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(AssetNode::from)
    }
}
