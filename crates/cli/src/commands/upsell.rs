use scentwise_core::domain::product::ProductId;

use super::context::CommandContext;
use super::{application_failure, CommandResult};

const COMMAND: &str = "upsell";

pub fn run(product_id: &str, limit: Option<usize>) -> CommandResult {
    let context = match CommandContext::load() {
        Ok(context) => context,
        Err(failure) => return CommandResult::from_failure(COMMAND, failure),
    };

    let product_id = ProductId::new(product_id);
    match context.runtime.block_on(context.service.scent_based_upsells(&product_id, limit)) {
        Ok(upsell) => CommandResult::success_with_data(
            COMMAND,
            format!(
                "{} products pair well with `{}`",
                upsell.items.len(),
                upsell.source_product.name
            ),
            upsell,
        ),
        Err(error) => CommandResult::from_failure(COMMAND, application_failure(COMMAND, error)),
    }
}
