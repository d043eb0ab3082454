use crate::commands::{run_with_service, CommandResult};

pub fn run(country: &str) -> CommandResult {
    if country.trim().is_empty() {
        return CommandResult::invalid_input("insights", "country name must not be empty");
    }

    let country = country.to_string();
    run_with_service("insights", |service| async move {
        let insights = service.insights(&country).await;
        let message = format!("{} insights for {}", insights.insights.len(), country.trim());
        Ok(CommandResult::success_with_data("insights", message, &insights))
    })
}
