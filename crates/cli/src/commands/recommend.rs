use geolens_core::config::MAX_RECOMMENDATION_LIMIT;

use crate::commands::{run_with_service, CommandResult};

pub fn run(exclude: Vec<String>, limit: Option<usize>) -> CommandResult {
    if let Some(limit) = limit.filter(|limit| *limit > MAX_RECOMMENDATION_LIMIT) {
        return CommandResult::invalid_input(
            "recommend",
            format!("limit {limit} exceeds the maximum of {MAX_RECOMMENDATION_LIMIT}"),
        );
    }

    run_with_service("recommend", |service| async move {
        let recommendations = service.recommendations(&exclude, limit).await;
        let personalized = service.is_personalized().await;
        let message = format!(
            "{} {} recommendations",
            recommendations.len(),
            if personalized { "personalized" } else { "popular" }
        );
        Ok(CommandResult::success_with_data("recommend", message, &recommendations))
    })
}
