pub mod config;
pub mod domain;
pub mod errors;
pub mod scent;

pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, RecommendationConfig};
pub use domain::customer::{CustomerId, CustomerPreferenceRecord};
pub use domain::product::{ProductId, ScentProduct};
pub use domain::recommendation::{
    MatchingAttributes, ScentBasedUpsell, ScentRecommendation, SimilarScent, UpsellItem,
};
pub use domain::scent::{
    CustomerScentPreferences, Intensity, Mood, PreferenceUpdate, ScentNote, ScentProfile, Season,
};
pub use errors::{ApplicationError, DomainError, InterfaceError, ValidationError};
pub use scent::{PreferenceStore, ScentCatalog, ScentRecommendationService, ScoringWeights};
