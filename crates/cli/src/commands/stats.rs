use crate::commands::{run_with_service, CommandResult};

pub fn run() -> CommandResult {
    run_with_service("stats", |service| async move {
        let stats = service.stats().await;
        let message = format!(
            "{} interactions across {} countries",
            stats.total_interactions, stats.countries_explored
        );
        Ok(CommandResult::success_with_data("stats", message, &stats))
    })
}
