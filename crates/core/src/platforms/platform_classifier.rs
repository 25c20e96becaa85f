//! Standard vs. custom classification of platform product categories.

use crate::tree::AssetNode;

use super::{PlatformCatalog, PlatformSchema};

/// Returns true if `key` is not one of the platform's standard categories.
///
/// The same key may be standard for one platform and custom for another.
pub fn is_custom_platform_category(key: &str, platform: &PlatformSchema) -> bool {
    !platform.is_standard(key)
}

/// Product category keys of one platform, split by classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPartition {
    pub standard: Vec<String>,
    pub custom: Vec<String>,
}

impl PlatformSchema {
    /// Splits the immediate children of a platform node into standard and
    /// custom keys. Leaves and malformed nodes have no children.
    pub fn partition(&self, platform_node: &AssetNode) -> CategoryPartition {
        let mut partition = CategoryPartition::default();
        for key in platform_node.children().into_iter().flat_map(|c| c.keys()) {
            if is_custom_platform_category(key, self) {
                partition.custom.push(key.clone());
            } else {
                partition.standard.push(key.clone());
            }
        }
        partition
    }
}

impl PlatformCatalog {
    /// Classifies `key` under the given platform. Unknown platforms have no
    /// standard categories, so every key is custom.
    pub fn is_custom_category(&self, platform_id: &str, key: &str) -> bool {
        self.get(platform_id)
            .map_or(true, |schema| is_custom_platform_category(key, schema))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_custom_is_complement_of_standard() {
        let syfe = PlatformSchema::new("Syfe", ["core", "reit"]);
        assert!(!is_custom_platform_category("core", &syfe));
        assert!(!is_custom_platform_category("reit", &syfe));
        assert!(is_custom_platform_category("myGoldPortfolio", &syfe));
        // Keys are case sensitive
        assert!(is_custom_platform_category("Core", &syfe));
        assert!(is_custom_platform_category("", &syfe));
    }

    #[test]
    fn test_classification_is_per_platform() {
        let catalog = PlatformCatalog::default();
        assert!(!catalog.is_custom_category("Syfe", "core"));
        assert!(catalog.is_custom_category("Endowus", "core"));
        assert!(!catalog.is_custom_category("Endowus", "satellite"));
        assert!(catalog.is_custom_category("Syfe", "satellite"));
    }

    #[test]
    fn test_unknown_platform_treats_everything_as_custom() {
        let catalog = PlatformCatalog::default();
        assert!(catalog.is_custom_category("Unknown", "core"));
        assert!(PlatformCatalog::empty().is_custom_category("Syfe", "core"));
    }

    #[test]
    fn test_partition_platform_node() {
        let syfe = PlatformSchema::new("Syfe", ["core", "reit"]);
        let node = AssetNode::category([
            ("core", AssetNode::amount(dec!(100))),
            ("reit", AssetNode::amount(dec!(50))),
            ("kidsFund", AssetNode::amount(dec!(10))),
        ]);

        let partition = syfe.partition(&node);
        assert_eq!(partition.standard, vec!["core", "reit"]);
        assert_eq!(partition.custom, vec!["kidsFund"]);

        assert_eq!(
            syfe.partition(&AssetNode::amount(dec!(1))),
            CategoryPartition::default()
        );
    }
}
