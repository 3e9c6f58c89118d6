use chrono::{DateTime, Utc};

use scentwise_core::domain::customer::{CustomerId, CustomerPreferenceRecord};
use scentwise_core::domain::product::{ProductId, ScentProduct};
use scentwise_core::domain::scent::{
    CustomerScentPreferences, Intensity, Mood, ScentNote, ScentProfile, Season,
};

use crate::repositories::{InMemoryPreferenceStore, InMemoryScentCatalog};

/// 2024-01-01T00:00:00Z
const SEED_TIMESTAMP: i64 = 1_704_067_200;

type Notes = &'static [(&'static str, u8)];

struct CandleSeed {
    id: &'static str,
    sku: &'static str,
    name: &'static str,
    active: bool,
    primary: Notes,
    middle: Notes,
    base: Notes,
    intensity: Intensity,
    mood: &'static [Mood],
    season: &'static [Season],
}

struct CustomerSeed {
    id: &'static str,
    favorite_notes: &'static [&'static str],
    avoided_notes: &'static [&'static str],
    preferred_intensity: &'static [Intensity],
    seasonal_preferences: &'static [Season],
    mood_preferences: &'static [Mood],
}

const CANDLES: &[CandleSeed] = &[
    CandleSeed {
        id: "lavender-fields",
        sku: "CND-LAV-001",
        name: "Lavender Fields",
        active: true,
        primary: &[("Lavender", 8), ("Bergamot", 5)],
        middle: &[("Chamomile", 4)],
        base: &[("Vanilla", 3)],
        intensity: Intensity::Light,
        mood: &[Mood::Relaxing],
        season: &[Season::Spring, Season::Summer],
    },
    CandleSeed {
        id: "vanilla-bean-dream",
        sku: "CND-VAN-001",
        name: "Vanilla Bean Dream",
        active: true,
        primary: &[("Vanilla", 8)],
        middle: &[("Tonka", 5)],
        base: &[("Sandalwood", 4)],
        intensity: Intensity::Moderate,
        mood: &[Mood::Cozy, Mood::Romantic],
        season: &[Season::Fall, Season::Winter],
    },
    CandleSeed {
        id: "citrus-grove",
        sku: "CND-CIT-001",
        name: "Citrus Grove",
        active: true,
        primary: &[("Lemon", 8), ("Orange", 6)],
        middle: &[("Mint", 3)],
        base: &[],
        intensity: Intensity::Light,
        mood: &[Mood::Energizing, Mood::Fresh],
        season: &[Season::Summer],
    },
    CandleSeed {
        id: "spiced-hearth",
        sku: "CND-SPC-001",
        name: "Spiced Hearth",
        active: true,
        primary: &[("Cinnamon", 8), ("Clove", 6)],
        middle: &[("Orange", 4)],
        base: &[("Vanilla", 4)],
        intensity: Intensity::Strong,
        mood: &[Mood::Cozy],
        season: &[Season::Fall, Season::Winter],
    },
    CandleSeed {
        id: "midnight-rose",
        sku: "CND-ROS-001",
        name: "Midnight Rose",
        active: true,
        primary: &[("Rose", 8)],
        middle: &[("Jasmine", 6)],
        base: &[("Musk", 5)],
        intensity: Intensity::Moderate,
        mood: &[Mood::Romantic],
        season: &[Season::Spring],
    },
    CandleSeed {
        id: "ocean-breeze",
        sku: "CND-OCN-001",
        name: "Ocean Breeze",
        active: true,
        primary: &[("Sea Salt", 7)],
        middle: &[("Eucalyptus", 5)],
        base: &[("Driftwood", 3)],
        intensity: Intensity::Light,
        mood: &[Mood::Fresh, Mood::Energizing],
        season: &[Season::Summer],
    },
    CandleSeed {
        id: "cedar-campfire",
        sku: "CND-CDR-001",
        name: "Cedar Campfire",
        active: true,
        primary: &[("Smoke", 7)],
        middle: &[("Cedarwood", 7)],
        base: &[("Amber", 5)],
        intensity: Intensity::Strong,
        mood: &[Mood::Cozy],
        season: &[Season::Fall, Season::Winter],
    },
    CandleSeed {
        id: "eucalyptus-mint-spa",
        sku: "CND-EUC-001",
        name: "Eucalyptus Mint Spa",
        active: true,
        primary: &[("Eucalyptus", 8), ("Mint", 6)],
        middle: &[("Lavender", 4)],
        base: &[],
        intensity: Intensity::Moderate,
        mood: &[Mood::Relaxing, Mood::Fresh],
        season: &[Season::Spring],
    },
    CandleSeed {
        id: "sandalwood-amber",
        sku: "CND-SND-001",
        name: "Sandalwood Amber",
        active: true,
        primary: &[("Sandalwood", 7)],
        middle: &[("Amber", 6)],
        base: &[("Vanilla", 4)],
        intensity: Intensity::Moderate,
        mood: &[Mood::Relaxing, Mood::Romantic],
        season: &[Season::Fall],
    },
    CandleSeed {
        id: "pumpkin-spice-classic",
        sku: "CND-PMK-001",
        name: "Pumpkin Spice Classic",
        active: false,
        primary: &[("Pumpkin", 7), ("Cinnamon", 5)],
        middle: &[("Clove", 4)],
        base: &[],
        intensity: Intensity::Strong,
        mood: &[Mood::Cozy],
        season: &[Season::Fall],
    },
];

const CUSTOMERS: &[CustomerSeed] = &[
    CustomerSeed {
        id: "cust-calm-reader",
        favorite_notes: &["Lavender", "Vanilla"],
        avoided_notes: &["Smoke"],
        preferred_intensity: &[Intensity::Light],
        seasonal_preferences: &[Season::Spring],
        mood_preferences: &[Mood::Relaxing],
    },
    CustomerSeed {
        id: "cust-cozy-nights",
        favorite_notes: &["Cinnamon", "Amber"],
        avoided_notes: &["Mint"],
        preferred_intensity: &[Intensity::Strong, Intensity::Moderate],
        seasonal_preferences: &[Season::Fall, Season::Winter],
        mood_preferences: &[Mood::Cozy],
    },
    CustomerSeed {
        id: "cust-fresh-start",
        favorite_notes: &["Lemon", "Eucalyptus"],
        avoided_notes: &["Vanilla"],
        preferred_intensity: &[Intensity::Light],
        seasonal_preferences: &[Season::Summer],
        mood_preferences: &[Mood::Energizing, Mood::Fresh],
    },
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeedResult {
    pub products_loaded: usize,
    pub customers_loaded: usize,
}

/// Deterministic demo data: ten candles (one retired) and three shoppers.
pub struct DemoCatalog;

impl DemoCatalog {
    pub fn products() -> Vec<ScentProduct> {
        CANDLES.iter().map(CandleSeed::build).collect()
    }

    pub fn customers() -> Vec<CustomerPreferenceRecord> {
        let updated_at = DateTime::<Utc>::from_timestamp(SEED_TIMESTAMP, 0).unwrap_or_default();
        CUSTOMERS.iter().map(|seed| seed.build(updated_at)).collect()
    }

    pub async fn seed(
        catalog: &InMemoryScentCatalog,
        store: &InMemoryPreferenceStore,
    ) -> SeedResult {
        let mut result = SeedResult::default();

        for product in Self::products() {
            catalog.insert(product).await;
            result.products_loaded += 1;
        }

        for record in Self::customers() {
            store.insert(record).await;
            result.customers_loaded += 1;
        }

        result
    }
}

impl CandleSeed {
    fn build(&self) -> ScentProduct {
        ScentProduct {
            id: ProductId::new(self.id),
            sku: self.sku.to_string(),
            name: self.name.to_string(),
            active: self.active,
            profile: ScentProfile {
                primary_notes: notes(self.primary),
                middle_notes: notes(self.middle),
                base_notes: notes(self.base),
                intensity: self.intensity,
                mood: self.mood.to_vec(),
                season: self.season.to_vec(),
            },
        }
    }
}

impl CustomerSeed {
    fn build(&self, updated_at: DateTime<Utc>) -> CustomerPreferenceRecord {
        CustomerPreferenceRecord {
            customer_id: CustomerId::new(self.id),
            preferences: CustomerScentPreferences {
                favorite_notes: self.favorite_notes.iter().map(|name| name.to_string()).collect(),
                avoided_notes: self.avoided_notes.iter().map(|name| name.to_string()).collect(),
                preferred_intensity: self.preferred_intensity.to_vec(),
                seasonal_preferences: self.seasonal_preferences.to_vec(),
                mood_preferences: self.mood_preferences.to_vec(),
            },
            updated_at,
        }
    }
}

fn notes(seed: Notes) -> Vec<ScentNote> {
    seed.iter().map(|(name, intensity)| ScentNote::new(*name, *intensity)).collect()
}
