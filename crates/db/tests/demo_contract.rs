use std::collections::HashSet;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use scentwise_core::config::RecommendationConfig;
use scentwise_core::domain::customer::CustomerId;
use scentwise_core::domain::product::ProductId;
use scentwise_core::errors::{ApplicationError, DomainError};
use scentwise_core::scent::ScentRecommendationService;
use scentwise_db::{DemoCatalog, InMemoryPreferenceStore, InMemoryScentCatalog};

type DemoContractTestResult<T = ()> = Result<T, String>;

macro_rules! require {
    ($cond:expr) => {
        if !$cond {
            return Err(format!("assertion failed: `{}`", stringify!($cond)));
        }
    };
    ($cond:expr, $($arg:tt)*) => {
        if !$cond {
            return Err(format!($($arg)*));
        }
    };
}

macro_rules! require_eq {
    ($left:expr, $right:expr) => {
        if $left != $right {
            return Err(format!(
                "assertion failed: `left == right` (`{:?}` != `{:?}`)",
                $left,
                $right
            ));
        }
    };
}

#[derive(Debug, Deserialize)]
struct ProfileShape {
    intensity: String,
    mood: Vec<String>,
    season: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ProductShape {
    id: String,
    active: bool,
    profile: ProfileShape,
}

async fn demo_service() -> ScentRecommendationService {
    let catalog = InMemoryScentCatalog::default();
    let store = InMemoryPreferenceStore::default();
    DemoCatalog::seed(&catalog, &store).await;

    ScentRecommendationService::new(
        Arc::new(catalog),
        Arc::new(store),
        RecommendationConfig::default(),
    )
}

fn ids<'a>(values: impl IntoIterator<Item = &'a ProductId>) -> Vec<&'a str> {
    values.into_iter().map(ProductId::as_str).collect()
}

#[test]
fn demo_products_serialize_with_upper_snake_enums() -> DemoContractTestResult {
    let json = serde_json::to_value(DemoCatalog::products()).map_err(|err| err.to_string())?;
    let products: Vec<ProductShape> =
        serde_json::from_value(json.clone()).map_err(|err| err.to_string())?;

    let known_moods: HashSet<&str> =
        ["RELAXING", "ENERGIZING", "ROMANTIC", "FRESH", "COZY"].into_iter().collect();
    let known_seasons: HashSet<&str> = ["SPRING", "SUMMER", "FALL", "WINTER"].into_iter().collect();

    for product in &products {
        require!(
            ["LIGHT", "MODERATE", "STRONG"].contains(&product.profile.intensity.as_str()),
            "{} has unexpected intensity {}",
            product.id,
            product.profile.intensity
        );
        for mood in &product.profile.mood {
            require!(known_moods.contains(mood.as_str()), "{} has unknown mood {mood}", product.id);
        }
        for season in &product.profile.season {
            require!(
                known_seasons.contains(season.as_str()),
                "{} has unknown season {season}",
                product.id
            );
        }
    }

    let retired: Vec<&str> =
        products.iter().filter(|product| !product.active).map(|p| p.id.as_str()).collect();
    require_eq!(retired, vec!["pumpkin-spice-classic"]);

    let first_note = json
        .get(0)
        .and_then(|product| product.pointer("/profile/primary_notes/0/name"))
        .and_then(Value::as_str);
    require_eq!(first_note, Some("Lavender"));
    Ok(())
}

#[tokio::test]
async fn similar_scents_for_lavender_fields_are_ranked_and_tie_broken_by_id(
) -> DemoContractTestResult {
    let service = demo_service().await;

    let similar = service
        .similar_scents(&ProductId::new("lavender-fields"), None)
        .await
        .map_err(|err| err.to_string())?;

    require_eq!(
        ids(similar.iter().map(|entry| &entry.product.id)),
        vec!["eucalyptus-mint-spa", "citrus-grove", "ocean-breeze", "sandalwood-amber"]
    );
    require_eq!(
        similar.iter().map(|entry| entry.match_score).collect::<Vec<_>>(),
        vec![40, 30, 30, 30]
    );
    require!(similar.iter().all(|entry| entry.product.id.as_str() != "lavender-fields"));
    Ok(())
}

#[tokio::test]
async fn upsells_for_lavender_fields_favor_light_bright_partners() -> DemoContractTestResult {
    let service = demo_service().await;

    let upsell = service
        .scent_based_upsells(&ProductId::new("lavender-fields"), Some(4))
        .await
        .map_err(|err| err.to_string())?;

    require_eq!(upsell.source_product.id.as_str(), "lavender-fields");
    // citrus-grove and ocean-breeze: mood 25 + season 20 + same intensity 20.
    // vanilla-bean-dream: mood 25 + season 20 + adjacent intensity 10 + two harmonies 10.
    require_eq!(
        upsell.items.iter().map(|item| item.product.id.as_str()).collect::<Vec<_>>(),
        vec!["citrus-grove", "ocean-breeze", "vanilla-bean-dream", "cedar-campfire"]
    );
    require_eq!(
        upsell.items.iter().map(|item| item.complementary_score).collect::<Vec<_>>(),
        vec![65, 65, 65, 55]
    );
    require_eq!(upsell.items[0].match_reason.as_str(), "Adds an interesting contrast");
    require!(upsell.items.iter().all(|item| item.product.active));
    Ok(())
}

#[tokio::test]
async fn cozy_customer_gets_warm_candles_and_never_retired_ones() -> DemoContractTestResult {
    let service = demo_service().await;

    let recommendations = service
        .recommendations_for_customer(&CustomerId::new("cust-cozy-nights"), Some(20))
        .await
        .map_err(|err| err.to_string())?;

    require_eq!(recommendations.len(), 9);
    require_eq!(
        ids(recommendations.iter().take(2).map(|entry| &entry.product_id)),
        vec!["cedar-campfire", "spiced-hearth"]
    );
    require!(recommendations
        .iter()
        .all(|entry| entry.product_id.as_str() != "pumpkin-spice-classic"));

    let spiced = &recommendations[1];
    require_eq!(spiced.matching_attributes.notes, vec!["Cinnamon".to_string()]);
    require!(spiced.matching_attributes.intensity);
    require!(spiced.reasons.iter().any(|reason| reason == "Made for Fall and Winter"));
    Ok(())
}

#[tokio::test]
async fn calm_reader_prefers_lavender_fields() -> DemoContractTestResult {
    let service = demo_service().await;

    let recommendations = service
        .recommendations_for_customer(&CustomerId::new("cust-calm-reader"), None)
        .await
        .map_err(|err| err.to_string())?;

    require_eq!(recommendations.len(), 4);
    let top = &recommendations[0];
    require_eq!(top.product_id.as_str(), "lavender-fields");
    require_eq!(
        top.reasons.first().map(String::as_str),
        Some("Features your favorite notes: Lavender, Vanilla")
    );
    Ok(())
}

#[tokio::test]
async fn unknown_ids_surface_not_found_errors() -> DemoContractTestResult {
    let service = demo_service().await;

    let product = service.similar_scents(&ProductId::new("no-such-candle"), None).await;
    require!(matches!(
        product,
        Err(ApplicationError::Domain(DomainError::ProductNotFound(_)))
    ));

    let customer = service.recommendations_for_customer(&CustomerId::new("nobody"), None).await;
    require!(matches!(
        customer,
        Err(ApplicationError::Domain(DomainError::CustomerNotFound(_)))
    ));
    Ok(())
}
