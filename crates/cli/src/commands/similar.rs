use scentwise_core::domain::product::ProductId;

use super::context::CommandContext;
use super::{application_failure, CommandResult};

const COMMAND: &str = "similar";

pub fn run(product_id: &str, limit: Option<usize>) -> CommandResult {
    let context = match CommandContext::load() {
        Ok(context) => context,
        Err(failure) => return CommandResult::from_failure(COMMAND, failure),
    };

    let product_id = ProductId::new(product_id);
    match context.runtime.block_on(context.service.similar_scents(&product_id, limit)) {
        Ok(similar) => CommandResult::success_with_data(
            COMMAND,
            format!("{} products smell similar to `{product_id}`", similar.len()),
            similar,
        ),
        Err(error) => CommandResult::from_failure(COMMAND, application_failure(COMMAND, error)),
    }
}
