//! Platform schema and catalog models.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::constants::{
    ENDOWUS_STANDARD_CATEGORIES, PLATFORM_ENDOWUS, PLATFORM_SYFE, SYFE_STANDARD_CATEGORIES,
};
use crate::errors::{Error, Result};

/// The fixed product vocabulary of one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformSchema {
    /// Platform identifier as used under `Robos` (e.g. "Syfe")
    pub id: String,
    /// Display name
    #[serde(default)]
    pub display_name: Option<String>,
    /// Keys of the platform's standard product categories
    #[serde(default)]
    pub standard_categories: BTreeSet<String>,
}

impl PlatformSchema {
    pub fn new<I, S>(id: impl Into<String>, standard_categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            display_name: None,
            standard_categories: standard_categories.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Display name, falling back to the identifier.
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.id)
    }

    pub fn is_standard(&self, key: &str) -> bool {
        self.standard_categories.contains(key)
    }
}

/// Raw catalog document as stored in configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogDocument {
    #[serde(default)]
    platforms: Vec<PlatformSchema>,
}

/// The set of known platforms, keyed by identifier.
///
/// The default catalog carries the built-in Syfe and Endowus lineups. Adding a
/// platform or changing a lineup only touches this data, never the
/// classification logic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformCatalog {
    platforms: BTreeMap<String, PlatformSchema>,
}

impl Default for PlatformCatalog {
    fn default() -> Self {
        Self::empty()
            .with_platform(PlatformSchema::new(PLATFORM_SYFE, SYFE_STANDARD_CATEGORIES))
            .with_platform(PlatformSchema::new(
                PLATFORM_ENDOWUS,
                ENDOWUS_STANDARD_CATEGORIES,
            ))
    }
}

impl PlatformCatalog {
    /// A catalog with no known platforms.
    pub fn empty() -> Self {
        Self {
            platforms: BTreeMap::new(),
        }
    }

    /// Loads a catalog from a JSON configuration document of the form
    /// `{"platforms": [{"id": "...", "standardCategories": [...]}]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let document: CatalogDocument = serde_json::from_str(json)
            .map_err(|e| Error::InvalidConfig(format!("platform catalog: {}", e)))?;

        let mut platforms = BTreeMap::new();
        for schema in document.platforms {
            if schema.id.trim().is_empty() {
                warn!("Rejecting platform catalog entry with an empty id");
                return Err(Error::InvalidConfig(
                    "platform id must not be empty".to_string(),
                ));
            }
            if platforms.contains_key(&schema.id) {
                warn!("Rejecting duplicate platform catalog entry {}", schema.id);
                return Err(Error::InvalidConfig(format!(
                    "duplicate platform id '{}'",
                    schema.id
                )));
            }
            platforms.insert(schema.id.clone(), schema);
        }

        debug!("Loaded platform catalog with {} platforms", platforms.len());
        Ok(Self { platforms })
    }

    /// Serializes the catalog back into its configuration document form.
    pub fn to_json(&self) -> Result<String> {
        let document = CatalogDocument {
            platforms: self.platforms.values().cloned().collect(),
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Adds a platform, replacing any schema with the same id.
    pub fn with_platform(mut self, schema: PlatformSchema) -> Self {
        self.platforms.insert(schema.id.clone(), schema);
        self
    }

    pub fn get(&self, platform_id: &str) -> Option<&PlatformSchema> {
        self.platforms.get(platform_id)
    }

    pub fn platforms(&self) -> impl Iterator<Item = &PlatformSchema> {
        self.platforms.values()
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_has_builtin_platforms() {
        let catalog = PlatformCatalog::default();
        assert_eq!(catalog.len(), 2);

        let syfe = catalog.get("Syfe").unwrap();
        assert_eq!(syfe.standard_categories.len(), 6);
        assert!(syfe.is_standard("core"));

        let endowus = catalog.get("Endowus").unwrap();
        assert_eq!(endowus.standard_categories.len(), 4);
        assert!(endowus.is_standard("satellite"));
        assert!(!endowus.is_standard("core"));
    }

    #[test]
    fn test_from_json_loads_platforms() {
        let catalog = PlatformCatalog::from_json(
            r#"{
                "platforms": [
                    { "id": "StashAway", "displayName": "Stash Away", "standardCategories": ["general", "simple"] },
                    { "id": "Syfe", "standardCategories": ["core"] }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        let stash = catalog.get("StashAway").unwrap();
        assert_eq!(stash.name(), "Stash Away");
        assert!(stash.is_standard("simple"));
        assert_eq!(catalog.get("Syfe").unwrap().name(), "Syfe");
    }

    #[test]
    fn test_from_json_rejects_duplicates_and_empty_ids() {
        let duplicate = PlatformCatalog::from_json(
            r#"{ "platforms": [ { "id": "A" }, { "id": "A" } ] }"#,
        );
        assert!(matches!(duplicate, Err(Error::InvalidConfig(msg)) if msg.contains("'A'")));

        let empty = PlatformCatalog::from_json(r#"{ "platforms": [ { "id": " " } ] }"#);
        assert!(matches!(empty, Err(Error::InvalidConfig(_))));

        let broken = PlatformCatalog::from_json("not json");
        assert!(matches!(broken, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_json_round_trip() {
        let catalog = PlatformCatalog::default()
            .with_platform(PlatformSchema::new("Custom", ["a"]).with_display_name("Mine"));
        let json = catalog.to_json().unwrap();
        assert_eq!(PlatformCatalog::from_json(&json).unwrap(), catalog);
    }

    #[test]
    fn test_with_platform_replaces_existing() {
        let catalog =
            PlatformCatalog::default().with_platform(PlatformSchema::new("Syfe", ["only"]));
        assert_eq!(catalog.len(), 2);
        assert!(!catalog.get("Syfe").unwrap().is_standard("core"));
    }
}
