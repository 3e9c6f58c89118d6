//! Candidate ranking shared by the similar-scent, upsell and personal recommendation surfaces

use std::cmp::Ordering;

use serde::Serialize;

use super::scoring::{
    calculate_complementary_score, calculate_overall_match, calculate_scent_compatibility,
    compatibility_reason, match_reason, preference_match_score, preference_reasons,
    ScoringWeights,
};
use crate::domain::product::ScentProduct;
use crate::domain::scent::{CustomerScentPreferences, ScentProfile};

/// Scores a candidate profile against some source (a profile or a shopper).
pub trait CandidateScorer<S: ?Sized> {
    /// 0-100
    fn score(&self, source: &S, candidate: &ScentProfile) -> u8;

    fn reason(&self, score: u8, source: &S, candidate: &ScentProfile) -> String;
}

/// "Similar to" scoring between two profiles.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompatibilityScorer {
    weights: ScoringWeights,
}

impl CompatibilityScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }
}

impl CandidateScorer<ScentProfile> for CompatibilityScorer {
    fn score(&self, source: &ScentProfile, candidate: &ScentProfile) -> u8 {
        calculate_scent_compatibility(source, candidate, &self.weights)
    }

    fn reason(&self, score: u8, _source: &ScentProfile, _candidate: &ScentProfile) -> String {
        compatibility_reason(score).to_owned()
    }
}

/// "Goes well with" scoring between two profiles.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComplementaryScorer;

impl CandidateScorer<ScentProfile> for ComplementaryScorer {
    fn score(&self, source: &ScentProfile, candidate: &ScentProfile) -> u8 {
        calculate_complementary_score(source, candidate)
    }

    fn reason(&self, score: u8, _source: &ScentProfile, _candidate: &ScentProfile) -> String {
        match_reason(score).to_owned()
    }
}

/// Scores a profile against a shopper's stated preferences.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreferenceScorer {
    weights: ScoringWeights,
}

impl PreferenceScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }
}

impl CandidateScorer<CustomerScentPreferences> for PreferenceScorer {
    fn score(&self, source: &CustomerScentPreferences, candidate: &ScentProfile) -> u8 {
        preference_match_score(candidate, source, &self.weights)
    }

    fn reason(
        &self,
        _score: u8,
        source: &CustomerScentPreferences,
        candidate: &ScentProfile,
    ) -> String {
        preference_reasons(&calculate_overall_match(candidate, source)).join("; ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedCandidate {
    /// Position of the candidate in the input slice.
    pub index: usize,
    pub score: u8,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedProduct<'a> {
    pub product: &'a ScentProduct,
    pub score: u8,
    pub reason: String,
}

/// Score every candidate, sort by score descending (ties by input position) and keep at most
/// `limit`.
pub fn rank_candidates<S, C>(
    source: &S,
    candidates: &[ScentProfile],
    scorer: &C,
    limit: usize,
) -> Vec<RankedCandidate>
where
    S: ?Sized,
    C: CandidateScorer<S> + ?Sized,
{
    let mut scored: Vec<(usize, u8)> = candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| (index, scorer.score(source, candidate)))
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    scored.truncate(limit);

    scored
        .into_iter()
        .map(|(index, score)| RankedCandidate {
            index,
            score,
            reason: scorer.reason(score, source, &candidates[index]),
        })
        .collect()
}

/// Product-level ranking: drops candidates under `min_score`, breaks ties by product id.
pub fn rank_products<'a, S, C>(
    source: &S,
    products: &'a [ScentProduct],
    scorer: &C,
    limit: usize,
    min_score: u8,
) -> Vec<RankedProduct<'a>>
where
    S: ?Sized,
    C: CandidateScorer<S> + ?Sized,
{
    let mut scored: Vec<(&ScentProduct, u8)> = products
        .iter()
        .map(|product| (product, scorer.score(source, &product.profile)))
        .filter(|(_, score)| *score >= min_score)
        .collect();

    scored.sort_by(|a, b| match b.1.cmp(&a.1) {
        Ordering::Equal => a.0.id.cmp(&b.0.id),
        other => other,
    });
    scored.truncate(limit);

    scored
        .into_iter()
        .map(|(product, score)| RankedProduct {
            product,
            score,
            reason: scorer.reason(score, source, &product.profile),
        })
        .collect()
}
