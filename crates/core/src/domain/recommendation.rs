//! Derived recommendation shapes. These are computed per request and never persisted.

use serde::{Deserialize, Serialize};

use crate::domain::product::{ProductId, ScentProduct};

/// Which parts of a profile satisfied the shopper's stated preferences.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingAttributes {
    pub notes: Vec<String>,
    pub intensity: bool,
    pub mood: Vec<String>,
    pub season: Vec<String>,
}

impl MatchingAttributes {
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty() && !self.intensity && self.mood.is_empty() && self.season.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScentRecommendation {
    pub product_id: ProductId,
    pub product_name: String,
    /// 0-100
    pub match_score: u8,
    pub matching_attributes: MatchingAttributes,
    pub reasons: Vec<String>,
}

/// A product ranked by similarity to a source product.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimilarScent {
    pub product: ScentProduct,
    pub match_score: u8,
    pub match_reason: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpsellItem {
    pub product: ScentProduct,
    pub match_reason: String,
    /// 0-100
    pub complementary_score: u8,
}

/// "Goes well with" pairings for a source product.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScentBasedUpsell {
    pub source_product: ScentProduct,
    pub items: Vec<UpsellItem>,
}
