use std::time::Duration;

use geolens_core::interactions::{DataTypeViewed, Interaction, InteractionAction};
use serde_json::json;

use crate::commands::{run_with_service, CommandResult};

#[derive(Debug, Clone, Default)]
pub struct TrackArgs {
    pub country: String,
    pub action: String,
    pub rating: Option<u8>,
    pub duration_ms: Option<u64>,
    pub data_type: Option<String>,
}

pub fn run(args: TrackArgs) -> CommandResult {
    let interaction = match build_interaction(args) {
        Ok(interaction) => interaction,
        Err(message) => return CommandResult::invalid_input("track", message),
    };

    run_with_service("track", |service| async move {
        let recorded = service.track_interaction(interaction).await;
        let preferences = service.preferences().await;
        let message = format!("recorded {} on {}", recorded.action, recorded.country_name);
        Ok(CommandResult::success_with_data(
            "track",
            message,
            &json!({ "interaction": recorded, "preferences": preferences }),
        ))
    })
}

fn build_interaction(args: TrackArgs) -> Result<Interaction, String> {
    if args.country.trim().is_empty() {
        return Err("country name must not be empty".to_string());
    }

    let action = args.action.parse::<InteractionAction>().map_err(|error| error.to_string())?;
    let mut interaction = Interaction::new(&args.country, action);

    if let Some(rating) = args.rating {
        interaction = interaction.with_rating(rating).map_err(|error| error.to_string())?;
    }
    if let Some(duration_ms) = args.duration_ms {
        interaction = interaction.with_duration(Duration::from_millis(duration_ms));
    }
    if let Some(data_type) = args.data_type {
        let data_type =
            data_type.parse::<DataTypeViewed>().map_err(|error| error.to_string())?;
        interaction = interaction.with_data_type(data_type);
    }

    Ok(interaction)
}
