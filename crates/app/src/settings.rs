//! Handles settings for the application.
//!
//! Values come, from lowest to highest priority, from the defaults below, an
//! optional `settings.toml`, `SUBTRACK_*` environment variables (nested keys
//! separated by `__`, e.g. `SUBTRACK_STORE__PATH`) and command line flags.
use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "settings";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct App {
    /// `tracing` level for the workspace crates.
    pub level: String,
    /// IANA time zone used to decide what "today" is.
    pub timezone: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            timezone: "Europe/Rome".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Store {
    pub path: String,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            path: "data/subscriptions.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub store: Store,
}

#[derive(Debug, Parser)]
#[command(name = "subtrack", about = "Track subscriptions from plain-text commands read on stdin")]
struct Args {
    /// Optional config file path (TOML), without or with extension.
    #[arg(long)]
    config: Option<String>,
    /// Override the subscriptions file.
    #[arg(long)]
    data: Option<String>,
    /// Override timezone (IANA name).
    #[arg(long)]
    timezone: Option<String>,
    /// Override log level.
    #[arg(long)]
    level: Option<String>,
}

pub fn load() -> Result<Settings> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut settings = read(config_path, environment())?;

    if let Some(data) = args.data {
        settings.store.path = data;
    }
    if let Some(timezone) = args.timezone {
        settings.app.timezone = timezone;
    }
    if let Some(level) = args.level {
        settings.app.level = level;
    }

    Ok(settings)
}

/// `SUBTRACK_` prefix, `__` between nested keys.
fn environment() -> config::Environment {
    config::Environment::with_prefix("SUBTRACK")
        .prefix_separator("_")
        .separator("__")
}

fn read(config_path: &str, environment: config::Environment) -> Result<Settings> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(config_path).required(false))
        .add_source(environment)
        .build()?
        .try_deserialize()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_missing_keys() {
        let settings: Settings = config::Config::builder()
            .add_source(config::File::from_str(
                "[store]\npath = \"/tmp/subs.json\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.store.path, "/tmp/subs.json");
        assert_eq!(settings.app.level, "info");
        assert_eq!(settings.app.timezone, "Europe/Rome");
    }

    #[test]
    fn environment_overrides_nested_keys() {
        let mut vars = config::Map::new();
        vars.insert("SUBTRACK_STORE__PATH".to_string(), "/tmp/env.json".to_string());
        vars.insert("SUBTRACK_APP__LEVEL".to_string(), "debug".to_string());
        vars.insert("OTHER_STORE__PATH".to_string(), "/tmp/ignored.json".to_string());

        let settings = read("missing/settings", environment().source(Some(vars))).unwrap();

        assert_eq!(settings.store.path, "/tmp/env.json");
        assert_eq!(settings.app.level, "debug");
        assert_eq!(settings.app.timezone, "Europe/Rome");
    }
}
