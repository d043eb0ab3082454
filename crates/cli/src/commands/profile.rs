use crate::commands::{run_with_service, CommandResult};

pub fn run() -> CommandResult {
    run_with_service("profile", |service| async move {
        let preferences = service.preferences().await;
        let message = match &preferences {
            Some(_) => "preference profile loaded",
            None => "no preference profile yet",
        };
        Ok(CommandResult::success_with_data("profile", message, &preferences))
    })
}
