use scentwise_core::domain::customer::CustomerId;

use super::context::CommandContext;
use super::{application_failure, CommandResult};

const COMMAND: &str = "recommend";

pub fn run(customer_id: &str, limit: Option<usize>) -> CommandResult {
    let context = match CommandContext::load() {
        Ok(context) => context,
        Err(failure) => return CommandResult::from_failure(COMMAND, failure),
    };

    let customer_id = CustomerId::new(customer_id);
    let result =
        context.runtime.block_on(context.service.recommendations_for_customer(&customer_id, limit));

    match result {
        Ok(recommendations) => CommandResult::success_with_data(
            COMMAND,
            format!("{} recommendations for `{customer_id}`", recommendations.len()),
            recommendations,
        ),
        Err(error) => CommandResult::from_failure(COMMAND, application_failure(COMMAND, error)),
    }
}
