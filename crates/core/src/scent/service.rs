//! Recommendation service: fetches candidates through injected stores and ranks them

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, warn};

use super::ranking::{
    rank_products, CandidateScorer, CompatibilityScorer, ComplementaryScorer, PreferenceScorer,
};
use super::scoring::{calculate_overall_match, preference_reasons};
use crate::config::RecommendationConfig;
use crate::domain::customer::{CustomerId, CustomerPreferenceRecord};
use crate::domain::product::{ProductId, ScentProduct};
use crate::domain::recommendation::{
    ScentBasedUpsell, ScentRecommendation, SimilarScent, UpsellItem,
};
use crate::domain::scent::{PreferenceUpdate, ScentProfile};
use crate::errors::{ApplicationError, DomainError};

/// Read access to the product catalog.
#[async_trait]
pub trait ScentCatalog: Send + Sync {
    async fn find_product(&self, id: &ProductId)
        -> Result<Option<ScentProduct>, ApplicationError>;

    async fn list_products(&self) -> Result<Vec<ScentProduct>, ApplicationError>;
}

/// Storage for shopper preferences.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn find_preferences(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Option<CustomerPreferenceRecord>, ApplicationError>;

    async fn save_preferences(
        &self,
        record: CustomerPreferenceRecord,
    ) -> Result<(), ApplicationError>;
}

/// Entry point for the storefront recommendation surfaces.
///
/// Constructed explicitly with its collaborators; holds no global state, so one instance can
/// serve concurrent requests.
#[derive(Clone)]
pub struct ScentRecommendationService {
    catalog: Arc<dyn ScentCatalog>,
    preferences: Arc<dyn PreferenceStore>,
    config: RecommendationConfig,
}

impl ScentRecommendationService {
    pub fn new(
        catalog: Arc<dyn ScentCatalog>,
        preferences: Arc<dyn PreferenceStore>,
        config: RecommendationConfig,
    ) -> Self {
        Self { catalog, preferences, config }
    }

    pub fn config(&self) -> &RecommendationConfig {
        &self.config
    }

    /// Effective result count for a request: `None` means the default, anything else is
    /// clamped to `1..=max_limit`.
    pub fn resolve_limit(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.config.default_limit).clamp(1, self.config.max_limit.max(1))
    }

    /// Products that smell most like `product_id`.
    pub async fn similar_scents(
        &self,
        product_id: &ProductId,
        limit: Option<usize>,
    ) -> Result<Vec<SimilarScent>, ApplicationError> {
        let source = self.load_source(product_id).await?;
        let candidates = self.load_candidates(Some(product_id)).await?;
        let scorer = CompatibilityScorer::new(self.config.weights);
        let limit = self.resolve_limit(limit);

        let similar: Vec<SimilarScent> =
            self.rank(&source.profile, &candidates, &scorer, limit, self.config.min_match_score)
                .into_iter()
                .map(|(product, match_score, match_reason)| SimilarScent {
                    product,
                    match_score,
                    match_reason,
                })
                .collect();

        info!(
            event_name = "scent.service.similar_scents",
            product_id = %product_id,
            candidate_count = candidates.len(),
            result_count = similar.len(),
            "ranked similar scents"
        );
        Ok(similar)
    }

    /// Products that pair well with `product_id`.
    ///
    /// `min_match_score` does not apply: complementary scores measure pairing, not similarity.
    pub async fn scent_based_upsells(
        &self,
        product_id: &ProductId,
        limit: Option<usize>,
    ) -> Result<ScentBasedUpsell, ApplicationError> {
        let source = self.load_source(product_id).await?;
        let candidates = self.load_candidates(Some(product_id)).await?;
        let limit = self.resolve_limit(limit);

        let items: Vec<UpsellItem> = self
            .rank(&source.profile, &candidates, &ComplementaryScorer, limit, 0)
            .into_iter()
            .map(|(product, complementary_score, match_reason)| UpsellItem {
                product,
                match_reason,
                complementary_score,
            })
            .collect();

        info!(
            event_name = "scent.service.upsells",
            product_id = %product_id,
            candidate_count = candidates.len(),
            result_count = items.len(),
            "ranked complementary upsells"
        );
        Ok(ScentBasedUpsell { source_product: source, items })
    }

    /// Personal recommendations from a shopper's stored preferences.
    pub async fn recommendations_for_customer(
        &self,
        customer_id: &CustomerId,
        limit: Option<usize>,
    ) -> Result<Vec<ScentRecommendation>, ApplicationError> {
        let record = self
            .preferences
            .find_preferences(customer_id)
            .await?
            .ok_or_else(|| DomainError::CustomerNotFound(customer_id.clone()))?;
        record.preferences.validate().map_err(DomainError::from)?;

        let candidates = self.load_candidates(None).await?;
        let scorer = PreferenceScorer::new(self.config.weights);
        let limit = self.resolve_limit(limit);

        let recommendations: Vec<ScentRecommendation> = rank_products(
            &record.preferences,
            &candidates,
            &scorer,
            limit,
            self.config.min_match_score,
        )
        .into_iter()
        .map(|ranked| {
            let matching_attributes =
                calculate_overall_match(&ranked.product.profile, &record.preferences);
            let reasons = preference_reasons(&matching_attributes);
            ScentRecommendation {
                product_id: ranked.product.id.clone(),
                product_name: ranked.product.name.clone(),
                match_score: ranked.score,
                matching_attributes,
                reasons,
            }
        })
        .collect();

        info!(
            event_name = "scent.service.customer_recommendations",
            customer_id = %customer_id,
            candidate_count = candidates.len(),
            result_count = recommendations.len(),
            "ranked products against customer preferences"
        );
        Ok(recommendations)
    }

    /// The only write path for preferences. Creates a record for new shoppers.
    pub async fn update_preferences(
        &self,
        customer_id: &CustomerId,
        update: PreferenceUpdate,
    ) -> Result<CustomerPreferenceRecord, ApplicationError> {
        let mut preferences = self
            .preferences
            .find_preferences(customer_id)
            .await?
            .map(|record| record.preferences)
            .unwrap_or_default();

        preferences.apply(update);
        preferences.validate().map_err(DomainError::from)?;

        let record = CustomerPreferenceRecord {
            customer_id: customer_id.clone(),
            preferences,
            updated_at: Utc::now(),
        };
        self.preferences.save_preferences(record.clone()).await?;

        info!(
            event_name = "scent.service.preferences_updated",
            customer_id = %customer_id,
            favorite_count = record.preferences.favorite_notes.len(),
            avoided_count = record.preferences.avoided_notes.len(),
            "customer scent preferences updated"
        );
        Ok(record)
    }

    async fn load_source(&self, product_id: &ProductId) -> Result<ScentProduct, ApplicationError> {
        let product = self
            .catalog
            .find_product(product_id)
            .await?
            .ok_or_else(|| DomainError::ProductNotFound(product_id.clone()))?;
        product.profile.validate().map_err(DomainError::from)?;
        Ok(product)
    }

    /// Active, well-formed catalog entries, minus `exclude`.
    async fn load_candidates(
        &self,
        exclude: Option<&ProductId>,
    ) -> Result<Vec<ScentProduct>, ApplicationError> {
        let products = self.catalog.list_products().await?;
        let total = products.len();

        let candidates: Vec<ScentProduct> = products
            .into_iter()
            .filter(|product| product.active && Some(&product.id) != exclude)
            .filter(|product| match product.profile.validate() {
                Ok(()) => true,
                Err(error) => {
                    warn!(
                        event_name = "scent.service.invalid_profile_skipped",
                        product_id = %product.id,
                        error = %error,
                        "skipping catalog entry with malformed scent profile"
                    );
                    false
                }
            })
            .collect();

        debug!(total, eligible = candidates.len(), "loaded recommendation candidates");
        Ok(candidates)
    }

    fn rank<C>(
        &self,
        source: &ScentProfile,
        candidates: &[ScentProduct],
        scorer: &C,
        limit: usize,
        min_score: u8,
    ) -> Vec<(ScentProduct, u8, String)>
    where
        C: CandidateScorer<ScentProfile>,
    {
        rank_products(source, candidates, scorer, limit, min_score)
            .into_iter()
            .map(|ranked| (ranked.product.clone(), ranked.score, ranked.reason))
            .collect()
    }
}
