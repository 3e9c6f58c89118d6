//! Scent recommendation scoring
//!
//! Scores products against a shopper's preferences ("match"), against another product
//! ("compatibility", i.e. similar scents) and as a pairing partner ("complementary", i.e.
//! goes-well-with upsells), then ranks candidate lists for the recommendation surfaces.

mod ranking;
mod scoring;
mod service;
mod tables;

pub use ranking::{
    rank_candidates, rank_products, CandidateScorer, CompatibilityScorer, ComplementaryScorer,
    PreferenceScorer, RankedCandidate, RankedProduct,
};
pub use scoring::*;
pub use service::{PreferenceStore, ScentCatalog, ScentRecommendationService};
pub use tables::{harmonizes, mood_complements};

/// Default scoring weights for compatibility and preference blends.
pub const DEFAULT_WEIGHTS: ScoringWeights =
    ScoringWeights { notes: 0.40, intensity: 0.20, mood: 0.20, season: 0.20 };

/// Recommendations returned when the caller does not ask for a specific count.
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 4;

/// Upper bound on a single recommendation request.
pub const MAX_RECOMMENDATION_LIMIT: usize = 20;

/// Score for a profile with no notes to judge.
pub const NEUTRAL_NOTE_SCORE: f64 = 50.0;

/// Sub-score used when a shopper has expressed no preference for a dimension.
pub const NEUTRAL_PREFERENCE_RATIO: f64 = 0.5;

/// Points per source mood that finds a complementary mood in the target.
pub const MOOD_COMPLEMENT_POINTS: u32 = 25;

/// Points per source season whose following season appears in the target.
pub const SEASON_COMPLEMENT_POINTS: u32 = 20;

/// Points for identical intensities; scaled down by the intensity distance.
pub const INTENSITY_COMPLEMENT_POINTS: u32 = 20;

/// Points per harmonizing note pair, and the cap on their total.
pub const NOTE_HARMONY_POINTS: u32 = 5;
pub const NOTE_HARMONY_CAP: u32 = 25;
