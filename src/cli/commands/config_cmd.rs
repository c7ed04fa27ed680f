//! config command - Get, set, unset, or list configuration values

use anyhow::{bail, Result};
use serde_json::{json, Map, Value};

use crate::cli::args::ConfigAction;
use crate::cli::context::Context;
use crate::core::config::{Config, ConfigError, ConfigKey, ConfigStore, OutputMode};
use crate::ui::format::PLACEHOLDER;
use crate::ui::output;

const MASK: &str = "********";

pub fn config(ctx: &Context, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Get { key } => get(ctx, &key),
        ConfigAction::Set { key, value } => set(ctx, &key, &value),
        ConfigAction::Unset { key } => unset(ctx, &key),
        ConfigAction::List => list(ctx),
        ConfigAction::Path => path(ctx),
        ConfigAction::Validate => validate(ctx),
    }
}

fn parse_key(key: &str) -> Result<ConfigKey> {
    ConfigKey::parse(key).ok_or_else(|| ConfigError::UnknownKey(key.to_string()).into())
}

/// Display form of a value; secrets are masked.
pub(super) fn display_value(key: ConfigKey, value: Option<&str>) -> String {
    match value {
        None => PLACEHOLDER.to_string(),
        Some(_) if key.is_secret() => MASK.to_string(),
        Some(v) => v.to_string(),
    }
}

fn get(ctx: &Context, key: &str) -> Result<()> {
    let key = parse_key(key)?;
    let config = ctx.load_config()?;
    let value = config.value(key);

    if ctx.output_mode(&config) == OutputMode::Json {
        output::print(serde_json::to_string_pretty(&json!({
            "key": key.name(),
            "value": value,
        }))?);
    } else if let Some(value) = value {
        output::print(value);
    }
    // An unset key prints nothing in table mode.
    Ok(())
}

fn set(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let path = ctx.store().set(key, value, ctx.config_path())?;
    let key = parse_key(key)?;
    output::success(
        format!(
            "Set {} = {} in {}",
            key,
            display_value(key, Some(value)),
            path.display()
        ),
        ctx.verbosity(),
    );
    Ok(())
}

fn unset(ctx: &Context, key: &str) -> Result<()> {
    let removed = ctx.store().unset(key, ctx.config_path())?;
    let key = parse_key(key)?;
    if removed {
        output::success(format!("Removed {}", key), ctx.verbosity());
    } else {
        output::success(format!("{} was not set", key), ctx.verbosity());
    }
    Ok(())
}

fn list(ctx: &Context) -> Result<()> {
    let config = ctx.load_config()?;
    match ctx.output_mode(&config) {
        OutputMode::Json => output::print(serde_json::to_string_pretty(&list_json(&config))?),
        OutputMode::Table => output::print(list_table(&config)),
    }
    Ok(())
}

fn list_table(config: &Config) -> String {
    let rows: Vec<Vec<String>> = ConfigKey::ALL
        .iter()
        .map(|&key| {
            vec![
                key.name().to_string(),
                display_value(key, config.value(key).as_deref()),
                config
                    .source_of(key)
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| PLACEHOLDER.to_string()),
            ]
        })
        .collect();
    output::render_table(&["KEY", "VALUE", "SOURCE"], &rows)
}

fn list_json(config: &Config) -> Value {
    let mut entries = Map::new();
    for key in ConfigKey::ALL {
        let value = config
            .value(key)
            .map(|v| if key.is_secret() { MASK.to_string() } else { v });
        entries.insert(
            key.name().to_string(),
            json!({
                "value": value,
                "source": config.source_of(key).map(|s| s.to_string()),
            }),
        );
    }
    Value::Object(entries)
}

fn path(ctx: &Context) -> Result<()> {
    let path = match ctx.config_path() {
        Some(path) => path.to_path_buf(),
        None => ConfigStore::default_path()?,
    };
    output::print(path.display());
    Ok(())
}

fn validate(ctx: &Context) -> Result<()> {
    let config = ctx.load_config()?;
    let violations = config.violations();

    if ctx.output_mode(&config) == OutputMode::Json {
        output::print(serde_json::to_string_pretty(&json!({
            "valid": violations.is_empty(),
            "violations": violations,
        }))?);
    } else if violations.is_empty() {
        output::success("Configuration is valid", ctx.verbosity());
    } else {
        for violation in &violations {
            output::error(violation);
        }
    }

    if !violations.is_empty() {
        bail!("configuration has {} problem(s)", violations.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{ConfigLayer, LayerSource};
    use std::path::PathBuf;

    fn config() -> Config {
        Config::resolve(
            &[
                (LayerSource::Default, ConfigLayer::default()),
                (
                    LayerSource::File,
                    ConfigLayer {
                        project_id: Some("alpha".into()),
                        api_token: Some("s3cret-token".into()),
                        ..Default::default()
                    },
                ),
            ],
            PathBuf::from("config.json"),
        )
    }

    #[test]
    fn secrets_are_masked() {
        assert_eq!(display_value(ConfigKey::ApiToken, Some("abc")), MASK);
        assert_eq!(display_value(ConfigKey::ProjectId, Some("abc")), "abc");
        assert_eq!(display_value(ConfigKey::ApiToken, None), PLACEHOLDER);
    }

    #[test]
    fn list_never_shows_the_token() {
        let config = config();
        assert!(!list_table(&config).contains("s3cret-token"));
        assert!(!list_json(&config).to_string().contains("s3cret-token"));
    }

    #[test]
    fn list_reports_sources() {
        let listed = list_json(&config());
        assert_eq!(listed["projectId"]["value"], "alpha");
        assert_eq!(listed["projectId"]["source"], "file");
        assert_eq!(listed["apiUrl"]["value"], Value::Null);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = parse_key("colour").unwrap_err();
        assert!(err.to_string().contains("colour"));
    }
}
