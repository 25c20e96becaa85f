//! Portfolio-level aggregates built on the aggregation engine.

use log::debug;
use rust_decimal::Decimal;

use crate::aggregation::{percentage_of, scale_in_place, total};
use crate::platforms::{is_custom_platform_category, PlatformCatalog};
use crate::tree::AssetNode;

use super::{
    AllocationBreakdown, AssetAllocation, CategoryShare, PlatformBreakdown, ProductShare,
    TopLevelCategory,
};

impl AssetAllocation {
    pub fn category_total(&self, category: TopLevelCategory) -> Decimal {
        total(self.category(category))
    }

    /// Sum of all top-level category totals.
    pub fn net_worth(&self) -> Decimal {
        TopLevelCategory::ALL
            .iter()
            .fold(Decimal::ZERO, |acc, category| {
                acc.saturating_add(self.category_total(*category))
            })
    }

    /// Multiplies every amount in every category by `factor`. Narrative and
    /// owner fields are untouched.
    pub fn scale_in_place(&mut self, factor: Decimal) {
        for category in TopLevelCategory::ALL {
            scale_in_place(self.category_mut(category), factor);
        }
    }

    /// Returns a scaled copy, leaving `self` untouched.
    pub fn scaled(&self, factor: Decimal) -> AssetAllocation {
        let mut copy = self.clone();
        copy.scale_in_place(factor);
        copy
    }
}

/// Computes net worth, per-category shares and the per-platform breakdown of
/// the `Robos` category.
pub fn compute_breakdown(
    allocation: &AssetAllocation,
    catalog: &PlatformCatalog,
) -> AllocationBreakdown {
    let net_worth = allocation.net_worth();
    debug!(
        "Computing allocation breakdown for {} (net worth {})",
        allocation.user_id.as_deref().unwrap_or("unknown user"),
        net_worth
    );

    let categories = TopLevelCategory::ALL
        .into_iter()
        .map(|category| {
            let category_total = allocation.category_total(category);
            CategoryShare {
                category,
                total: category_total,
                percentage: percentage_of(category_total, net_worth),
            }
        })
        .collect();

    let mut platforms: Vec<PlatformBreakdown> = allocation
        .robos
        .children()
        .into_iter()
        .flatten()
        .map(|(platform_id, platform_node)| {
            platform_breakdown(platform_id, platform_node, net_worth, catalog)
        })
        .collect();
    platforms.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.platform_id.cmp(&b.platform_id))
    });

    AllocationBreakdown {
        net_worth,
        categories,
        platforms,
    }
}

fn platform_breakdown(
    platform_id: &str,
    platform_node: &AssetNode,
    net_worth: Decimal,
    catalog: &PlatformCatalog,
) -> PlatformBreakdown {
    let platform_total = total(platform_node);
    let schema = catalog.get(platform_id);

    let mut products: Vec<ProductShare> = platform_node
        .children()
        .into_iter()
        .flatten()
        .map(|(key, product)| {
            let product_total = total(product);
            ProductShare {
                key: key.clone(),
                total: product_total,
                percentage: percentage_of(product_total, platform_total),
                is_custom: schema.map_or(true, |s| is_custom_platform_category(key, s)),
            }
        })
        .collect();
    products.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.key.cmp(&b.key)));

    PlatformBreakdown {
        platform_id: platform_id.to_string(),
        total: platform_total,
        percentage: percentage_of(platform_total, net_worth),
        products,
    }
}

/// Returns a copy of `allocation` scaled so that its net worth equals
/// `target_net_worth`.
///
/// Used to fit a recommended allocation to the user's actual net worth. An
/// allocation with zero net worth cannot be scaled and is returned unchanged.
pub fn rescale_to_total(allocation: &AssetAllocation, target_net_worth: Decimal) -> AssetAllocation {
    let current = allocation.net_worth();
    if current.is_zero() {
        debug!("Skipping rescale of allocation with zero net worth");
        return allocation.clone();
    }

    match target_net_worth.checked_div(current) {
        Some(factor) => {
            debug!(
                "Rescaling allocation from {} to {} (factor {})",
                current, target_net_worth, factor
            );
            allocation.scaled(factor)
        }
        None => {
            debug!(
                "Rescale factor {} / {} is out of range; returning allocation unchanged",
                target_net_worth, current
            );
            allocation.clone()
        }
    }
}
