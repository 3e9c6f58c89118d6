use std::sync::Arc;

use scentwise_core::config::{AppConfig, LoadOptions};
use scentwise_core::domain::product::ScentProduct;
use scentwise_core::scent::ScentRecommendationService;
use scentwise_db::{load_catalog_file, DemoCatalog, InMemoryPreferenceStore, InMemoryScentCatalog};
use tokio::runtime::{Builder, Runtime};
use tracing::info;

use super::{CommandFailure, EXIT_CATALOG, EXIT_CONFIG, EXIT_RUNTIME};

/// Everything a query command needs: validated config, a runtime to drive the async service,
/// and the service wired to the active catalog.
pub(crate) struct CommandContext {
    pub runtime: Runtime,
    pub service: ScentRecommendationService,
    pub catalog: Arc<InMemoryScentCatalog>,
    pub catalog_source: String,
}

impl CommandContext {
    pub fn load() -> Result<Self, CommandFailure> {
        let config = load_config()?;

        let runtime = Builder::new_current_thread().enable_all().build().map_err(|error| {
            ("runtime_init", format!("failed to initialize async runtime: {error}"), EXIT_RUNTIME)
        })?;

        let (products, catalog_source) = load_products(&config)?;
        let product_count = products.len();
        let catalog = Arc::new(InMemoryScentCatalog::from_products(products));
        let preferences = Arc::new(InMemoryPreferenceStore::default());
        runtime.block_on(async {
            for record in DemoCatalog::customers() {
                preferences.insert(record).await;
            }
        });

        let service = ScentRecommendationService::new(
            catalog.clone(),
            preferences,
            config.recommendations.clone(),
        );

        info!(
            event_name = "cli.context.ready",
            catalog_source = %catalog_source,
            product_count,
            default_limit = config.recommendations.default_limit,
            "recommendation service ready"
        );

        Ok(Self { runtime, service, catalog, catalog_source })
    }
}

pub(crate) fn load_config() -> Result<AppConfig, CommandFailure> {
    AppConfig::load(LoadOptions::default()).map_err(|error| {
        ("config_validation", format!("configuration issue: {error}"), EXIT_CONFIG)
    })
}

/// Products from `catalog.path` when set, otherwise the demo catalog. The second element
/// names the source for output messages.
pub(crate) fn load_products(
    config: &AppConfig,
) -> Result<(Vec<ScentProduct>, String), CommandFailure> {
    match &config.catalog.path {
        Some(path) => {
            let products = load_catalog_file(path).map_err(|error| {
                ("catalog_load", format!("failed to load catalog: {error}"), EXIT_CATALOG)
            })?;
            Ok((products, path.display().to_string()))
        }
        None => Ok((DemoCatalog::products(), "demo".to_string())),
    }
}
