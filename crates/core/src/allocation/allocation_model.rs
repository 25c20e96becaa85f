//! Portfolio snapshot and recommendation models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{
    CATEGORY_BANK, CATEGORY_CPF, CATEGORY_CRYPTO, CATEGORY_INVESTMENTS, CATEGORY_OTHERS,
    CATEGORY_ROBOS, DISPLAY_DECIMAL_PRECISION,
};
use crate::errors::Result;
use crate::tree::AssetNode;

/// Top-level portfolio categories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TopLevelCategory {
    Bank,
    Robos,
    Investments,
    #[serde(rename = "CPF")]
    Cpf,
    Crypto,
    Others,
}

impl TopLevelCategory {
    pub const ALL: [TopLevelCategory; 6] = [
        TopLevelCategory::Bank,
        TopLevelCategory::Robos,
        TopLevelCategory::Investments,
        TopLevelCategory::Cpf,
        TopLevelCategory::Crypto,
        TopLevelCategory::Others,
    ];

    /// Key of the category in stored documents.
    pub fn key(&self) -> &'static str {
        match self {
            TopLevelCategory::Bank => CATEGORY_BANK,
            TopLevelCategory::Robos => CATEGORY_ROBOS,
            TopLevelCategory::Investments => CATEGORY_INVESTMENTS,
            TopLevelCategory::Cpf => CATEGORY_CPF,
            TopLevelCategory::Crypto => CATEGORY_CRYPTO,
            TopLevelCategory::Others => CATEGORY_OTHERS,
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.key() == key)
    }
}

/// A user's portfolio snapshot, or a recommended one.
///
/// Missing categories read as empty. Category contents are accepted in any
/// shape; malformed branches are kept and count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetAllocation {
    #[serde(rename = "Bank", default)]
    pub bank: AssetNode,
    /// Platform id -> product category -> holdings
    #[serde(rename = "Robos", default)]
    pub robos: AssetNode,
    #[serde(rename = "Investments", default)]
    pub investments: AssetNode,
    #[serde(rename = "CPF", default)]
    pub cpf: AssetNode,
    #[serde(rename = "Crypto", default)]
    pub crypto: AssetNode,
    /// Named items stored as `{amount, label, notes}`
    #[serde(rename = "Others", default)]
    pub others: AssetNode,
    /// Owner of the snapshot
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Recommendation narrative
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
    #[serde(
        rename = "projectedReturns",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub projected_returns: Option<String>,
    /// RFC 3339 timestamp of the analysis
    #[serde(rename = "analysisDate", default, skip_serializing_if = "Option::is_none")]
    pub analysis_date: Option<String>,
}

impl AssetAllocation {
    /// Parses a stored snapshot document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn category(&self, category: TopLevelCategory) -> &AssetNode {
        match category {
            TopLevelCategory::Bank => &self.bank,
            TopLevelCategory::Robos => &self.robos,
            TopLevelCategory::Investments => &self.investments,
            TopLevelCategory::Cpf => &self.cpf,
            TopLevelCategory::Crypto => &self.crypto,
            TopLevelCategory::Others => &self.others,
        }
    }

    pub fn category_mut(&mut self, category: TopLevelCategory) -> &mut AssetNode {
        match category {
            TopLevelCategory::Bank => &mut self.bank,
            TopLevelCategory::Robos => &mut self.robos,
            TopLevelCategory::Investments => &mut self.investments,
            TopLevelCategory::Cpf => &mut self.cpf,
            TopLevelCategory::Crypto => &mut self.crypto,
            TopLevelCategory::Others => &mut self.others,
        }
    }

    /// Parsed analysis timestamp. `None` when absent or not RFC 3339.
    pub fn analysis_date(&self) -> Option<DateTime<Utc>> {
        self.analysis_date
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|date| date.with_timezone(&Utc))
    }
}

/// Narrative part of a recommendation response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationFeedback {
    #[serde(default)]
    pub strategy_text: Option<String>,
    #[serde(default)]
    pub projected_returns_text: Option<String>,
    #[serde(default)]
    pub analysis_date: Option<String>,
    /// Any other fields the service sends
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Already-received body of the recommendation service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub recommendation: AssetAllocation,
    #[serde(default)]
    pub feedback: RecommendationFeedback,
}

impl RecommendationResponse {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The recommended allocation with the feedback narrative attached.
    /// Narrative already present on the allocation is kept when the feedback
    /// omits it.
    pub fn into_allocation(self) -> AssetAllocation {
        let RecommendationResponse {
            mut recommendation,
            feedback,
        } = self;
        if feedback.strategy_text.is_some() {
            recommendation.strategy = feedback.strategy_text;
        }
        if feedback.projected_returns_text.is_some() {
            recommendation.projected_returns = feedback.projected_returns_text;
        }
        if feedback.analysis_date.is_some() {
            recommendation.analysis_date = feedback.analysis_date;
        }
        recommendation
    }
}

/// Share of one top-level category in the portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    pub category: TopLevelCategory,
    /// Total value of the category
    pub total: Decimal,
    /// Percentage of net worth (0-100)
    pub percentage: Decimal,
}

/// Share of one product category within a platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductShare {
    pub key: String,
    pub total: Decimal,
    /// Percentage of the platform total (0-100)
    pub percentage: Decimal,
    /// True when the key is not in the platform's standard lineup
    pub is_custom: bool,
}

/// Breakdown of one robo-advisor platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformBreakdown {
    pub platform_id: String,
    pub total: Decimal,
    /// Percentage of net worth (0-100)
    pub percentage: Decimal,
    /// Product categories, sorted by value descending
    pub products: Vec<ProductShare>,
}

/// Complete aggregate view of a portfolio snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationBreakdown {
    pub net_worth: Decimal,
    /// One entry per top-level category, in display order
    pub categories: Vec<CategoryShare>,
    /// Robo-advisor platforms, sorted by value descending
    pub platforms: Vec<PlatformBreakdown>,
}

impl AllocationBreakdown {
    pub fn category(&self, category: TopLevelCategory) -> Option<&CategoryShare> {
        self.categories.iter().find(|share| share.category == category)
    }

    pub fn platform(&self, platform_id: &str) -> Option<&PlatformBreakdown> {
        self.platforms
            .iter()
            .find(|platform| platform.platform_id == platform_id)
    }
}

/// Rounds a percentage for display.
pub fn display_percentage(percentage: Decimal) -> Decimal {
    percentage.round_dp(DISPLAY_DECIMAL_PRECISION)
}
