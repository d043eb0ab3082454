use crate::commands::{run_with_service, CommandResult};

pub fn run() -> CommandResult {
    run_with_service("reset", |service| async move {
        service.reset().await;
        Ok(CommandResult::success("reset", "cleared interactions, profile and stored state"))
    })
}
