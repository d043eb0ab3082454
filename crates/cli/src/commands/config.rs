use std::env;
use std::fs;
use std::path::Path;

use geolens_core::config::{resolve_config_path, AppConfig, LoadOptions};
use serde::Serialize;
use toml::Value;

use crate::commands::{CommandResult, EXIT_CONFIG};

#[derive(Debug, Serialize)]
struct ConfigEntry {
    key: &'static str,
    value: String,
    source: String,
}

pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "config",
                "config_validation",
                format!("config validation failed: {error}"),
                EXIT_CONFIG,
            );
        }
    };

    let config_file_path = resolve_config_path(None);
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let sources = SourceLookup { doc: config_file_doc.as_ref(), path: config_file_path.as_deref() };

    let entries = vec![
        sources.entry("database.url", config.database.url.clone(), &["GEOLENS_DATABASE_URL"]),
        sources.entry(
            "database.max_connections",
            config.database.max_connections.to_string(),
            &["GEOLENS_DATABASE_MAX_CONNECTIONS"],
        ),
        sources.entry(
            "database.timeout_secs",
            config.database.timeout_secs.to_string(),
            &["GEOLENS_DATABASE_TIMEOUT_SECS"],
        ),
        sources.entry("storage.key", config.storage.key.clone(), &["GEOLENS_STORAGE_KEY"]),
        sources.entry(
            "recommendations.default_limit",
            config.recommendations.default_limit.to_string(),
            &["GEOLENS_RECOMMENDATIONS_DEFAULT_LIMIT"],
        ),
        sources.entry(
            "logging.level",
            config.logging.level.clone(),
            &["GEOLENS_LOGGING_LEVEL", "GEOLENS_LOG_LEVEL"],
        ),
        sources.entry(
            "logging.format",
            config.logging.format.as_str().to_string(),
            &["GEOLENS_LOGGING_FORMAT", "GEOLENS_LOG_FORMAT"],
        ),
    ];

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];
    lines.extend(entries.iter().map(render_line));

    CommandResult::success_with_data("config", lines.join("\n"), &entries)
}

struct SourceLookup<'a> {
    doc: Option<&'a Value>,
    path: Option<&'a Path>,
}

impl SourceLookup<'_> {
    fn entry(&self, key: &'static str, value: String, env_keys: &[&str]) -> ConfigEntry {
        ConfigEntry { key, value, source: field_source(key, env_keys, self.doc, self.path) }
    }
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(entry: &ConfigEntry) -> String {
    format!("- {} = {} (source: {})", entry.key, entry.value, entry.source)
}
