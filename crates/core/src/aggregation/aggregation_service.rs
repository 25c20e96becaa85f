//! Aggregation engine: totals, percentages and proportional scaling over
//! asset trees.
//!
//! Every function here is total. Malformed branches (strings, nulls, arrays,
//! out-of-range numbers) contribute zero and are never scaled, so one bad
//! field cannot break a computed view. Sums saturate at the decimal range
//! instead of overflowing. Walks use a heap-allocated work list rather than
//! recursion.

use log::warn;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use crate::tree::{number_to_decimal, AssetNode, LABELED_AMOUNT_KEY};

/// Total of a node.
///
/// An amount is its own total, a labeled leaf totals to its amount, and a
/// category totals to the sum of its children. The tree is walked with an
/// explicit work list, so nesting depth is bounded by memory, not the stack.
pub fn total(node: &AssetNode) -> Decimal {
    let mut sum = Decimal::ZERO;
    let mut pending = vec![node];
    while let Some(current) = pending.pop() {
        match current {
            AssetNode::Amount(value) => sum = sum.saturating_add(*value),
            AssetNode::Labeled(labeled) => sum = sum.saturating_add(labeled.amount),
            AssetNode::Category(children) => pending.extend(children.values()),
            AssetNode::Opaque(_) => {}
        }
    }
    sum
}

/// Total of an untyped value.
///
/// Numbers count, objects are descended, everything else is zero. A labeled
/// `{amount, label, notes}` object totals to its amount because the strings
/// contribute nothing.
pub fn total_value(value: &Value) -> Decimal {
    let mut sum = Decimal::ZERO;
    let mut pending = vec![value];
    while let Some(current) = pending.pop() {
        match current {
            Value::Number(number) => {
                sum = sum.saturating_add(number_to_decimal(number).unwrap_or(Decimal::ZERO))
            }
            Value::Object(map) => pending.extend(map.values()),
            _ => {}
        }
    }
    sum
}

/// Largest numeric value stored under `target_key` anywhere in the tree.
///
/// A value is a candidate when its own key equals `target_key` and it is a
/// number. A labeled leaf is read as the object it was stored as, so its
/// amount is a candidate only under the `amount` key, never under the key of
/// the leaf itself. Categories are descended whatever their key. Matches at
/// different depths are not summed; the largest wins. Returns zero when there
/// is no match.
pub fn total_for_category(node: &AssetNode, target_key: &str) -> Decimal {
    let mut best = Decimal::ZERO;
    let mut pending: Vec<&AssetNode> = vec![node];
    while let Some(current) = pending.pop() {
        let Some(children) = current.children() else {
            continue;
        };
        for (key, child) in children {
            let candidate = match child {
                AssetNode::Category(_) => {
                    pending.push(child);
                    None
                }
                AssetNode::Amount(value) if key == target_key => Some(*value),
                AssetNode::Labeled(labeled) if target_key == LABELED_AMOUNT_KEY => {
                    Some(labeled.amount)
                }
                _ => None,
            };
            if let Some(value) = candidate {
                best = best.max(value);
            }
        }
    }
    best
}

/// `value` as a percentage (0-100) of `total`. Zero when `total` is zero.
///
/// The result is not rounded.
pub fn percentage_of(value: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    value
        .checked_div(total)
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .unwrap_or(Decimal::ZERO)
}

/// Multiplies every amount in the tree by `factor`, in place.
///
/// Labeled leaves have their amount scaled and keep label and notes. Opaque
/// nodes, keys and shape are untouched. A leaf whose product would overflow
/// keeps its value.
///
/// Concurrent mutation of one tree is ruled out by the `&mut` borrow; callers
/// sharing a tree across threads must provide their own synchronisation.
pub fn scale_in_place(node: &mut AssetNode, factor: Decimal) {
    let mut pending = vec![node];
    while let Some(current) = pending.pop() {
        match current {
            AssetNode::Amount(value) => scale_leaf(value, factor),
            AssetNode::Labeled(labeled) => scale_leaf(&mut labeled.amount, factor),
            AssetNode::Category(children) => pending.extend(children.values_mut()),
            AssetNode::Opaque(_) => {}
        }
    }
}

/// Returns a copy of the tree with every amount multiplied by `factor`.
///
/// Same numeric result as [`scale_in_place`], leaving the input untouched.
pub fn scaled(node: &AssetNode, factor: Decimal) -> AssetNode {
    let mut copy = node.clone();
    scale_in_place(&mut copy, factor);
    copy
}

fn scale_leaf(value: &mut Decimal, factor: Decimal) {
    match value.checked_mul(factor) {
        Some(product) => *value = product,
        None => warn!(
            "Scaling {} by {} overflows the decimal range; leaving value unchanged",
            value, factor
        ),
    }
}
