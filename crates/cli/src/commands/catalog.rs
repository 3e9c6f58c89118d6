use scentwise_core::domain::product::ScentProduct;
use scentwise_core::domain::scent::{Intensity, Mood, Season};
use scentwise_core::scent::ScentCatalog;
use serde::Serialize;

use super::context::CommandContext;
use super::{application_failure, CommandResult};

const COMMAND: &str = "catalog";

#[derive(Debug, Serialize)]
struct CatalogEntry {
    id: String,
    sku: String,
    name: String,
    active: bool,
    valid: bool,
    intensity: Intensity,
    notes: Vec<String>,
    mood: Vec<Mood>,
    season: Vec<Season>,
}

impl From<&ScentProduct> for CatalogEntry {
    fn from(product: &ScentProduct) -> Self {
        Self {
            id: product.id.to_string(),
            sku: product.sku.clone(),
            name: product.name.clone(),
            active: product.active,
            valid: product.profile.validate().is_ok(),
            intensity: product.profile.intensity,
            notes: product.profile.note_names().into_iter().map(str::to_owned).collect(),
            mood: product.profile.mood.clone(),
            season: product.profile.season.clone(),
        }
    }
}

pub fn run() -> CommandResult {
    let context = match CommandContext::load() {
        Ok(context) => context,
        Err(failure) => return CommandResult::from_failure(COMMAND, failure),
    };

    let products = match context.runtime.block_on(context.catalog.list_products()) {
        Ok(products) => products,
        Err(error) => {
            return CommandResult::from_failure(COMMAND, application_failure(COMMAND, error))
        }
    };

    let entries: Vec<CatalogEntry> = products.iter().map(CatalogEntry::from).collect();
    let active = entries.iter().filter(|entry| entry.active).count();
    CommandResult::success_with_data(
        COMMAND,
        format!(
            "{} products in {} catalog ({active} active)",
            entries.len(),
            context.catalog_source
        ),
        entries,
    )
}
