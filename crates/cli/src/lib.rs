pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "geolens",
    about = "GeoLens personalization CLI",
    long_about = "Track map interactions, inspect the inferred travel profile, and request personalized destination recommendations.",
    after_help = "Examples:\n  geolens track Japan click\n  geolens track Japan rate --rating 5\n  geolens recommend --exclude Japan --limit 3\n  geolens doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Record one interaction and recompute the preference profile")]
    Track {
        #[arg(help = "Country name as shown on the map")]
        country: String,
        #[arg(help = "One of hover, click, pin, search, rate")]
        action: String,
        #[arg(long, help = "Explicit rating 1-5")]
        rating: Option<u8>,
        #[arg(long = "duration-ms", help = "Time spent viewing, in milliseconds")]
        duration_ms: Option<u64>,
        #[arg(long = "data-type", help = "Tooltip panel viewed: population, news, travel, facts")]
        data_type: Option<String>,
    },
    #[command(about = "Rank destinations for the current profile")]
    Recommend {
        #[arg(long = "exclude", help = "Country to leave out; repeatable")]
        exclude: Vec<String>,
        #[arg(long, help = "Maximum number of results (defaults to recommendations.default_limit)")]
        limit: Option<usize>,
    },
    #[command(about = "Profile-based insights and similar countries for one country")]
    Insights {
        #[arg(help = "Country name")]
        country: String,
    },
    #[command(about = "Show the inferred preference profile")]
    Profile,
    #[command(about = "Manually override one preference field")]
    SetPreference {
        #[arg(help = "favorite_regions, preferred_safety_rating, budget_range, travel_style, population_preference or visa_preference")]
        field: String,
        #[arg(help = "New value; favorite_regions takes a comma-separated list")]
        value: String,
    },
    #[command(about = "Aggregate statistics over the interaction log")]
    Stats,
    #[command(about = "Clear the interaction log, the profile and stored state")]
    Reset,
    #[command(about = "List the static country feature catalog")]
    Catalog,
    #[command(about = "Apply pending database migrations and return structured status output")]
    Migrate,
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config, DB connectivity and stored state readiness")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Track { country, action, rating, duration_ms, data_type } => {
            commands::track::run(commands::track::TrackArgs {
                country,
                action,
                rating,
                duration_ms,
                data_type,
            })
        }
        Command::Recommend { exclude, limit } => commands::recommend::run(exclude, limit),
        Command::Insights { country } => commands::insights::run(&country),
        Command::Profile => commands::profile::run(),
        Command::SetPreference { field, value } => commands::preference::run(&field, &value),
        Command::Stats => commands::stats::run(),
        Command::Reset => commands::reset::run(),
        Command::Catalog => commands::catalog::run(),
        Command::Migrate => commands::migrate::run(),
        Command::Config => commands::config::run(),
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
