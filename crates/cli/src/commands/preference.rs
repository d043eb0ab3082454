use geolens_core::preferences::PreferenceUpdate;

use crate::commands::{run_with_service, CommandResult};

pub fn run(field: &str, value: &str) -> CommandResult {
    let update = match PreferenceUpdate::parse(field, value) {
        Ok(update) => update,
        Err(error) => return CommandResult::invalid_input("set-preference", error.to_string()),
    };

    run_with_service("set-preference", |service| async move {
        let field = update.field_name();
        let preferences = service.update_preference(update).await;
        Ok(CommandResult::success_with_data(
            "set-preference",
            format!("updated {field}"),
            &preferences,
        ))
    })
}
