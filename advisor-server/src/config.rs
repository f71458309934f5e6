use std::collections::BTreeMap;
use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use advisor_core::billing::{PriceTierTable, parse_overrides};
use advisor_core::plan::Tier;
use advisor_core::usage::DayBoundary;
use advisor_interaction::DEFAULT_CLAUDE_MODEL;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_LOG_FILTER: &str = "info";

const REQUIRED_VARS: [&str; 8] = [
    "SUPABASE_URL",
    "SUPABASE_ANON_KEY",
    "SUPABASE_SERVICE_ROLE_KEY",
    "ANTHROPIC_API_KEY",
    "STRIPE_SECRET_KEY",
    "STRIPE_PUBLISHABLE_KEY",
    "STRIPE_WEBHOOK_SECRET",
    "APP_URL",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub log_filter: String,
    pub log_format: LogFormat,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub supabase_service_role_key: String,
    pub anthropic_api_key: String,
    pub anthropic_model: String,
    pub stripe_secret_key: String,
    pub stripe_publishable_key: String,
    pub stripe_webhook_secret: String,
    pub app_url: String,
    pub pro_monthly_price_id: Option<String>,
    pub pro_yearly_price_id: Option<String>,
    pub price_tiers: PriceTierTable,
    pub day_boundary: DayBoundary,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingVars(Vec<String>),
    #[error("invalid {name} value '{value}': {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
    #[error("failed to load config file {}: {message}", path.display())]
    ConfigFile { path: PathBuf, message: String },
}

/// Optional TOML file named by `ADVISOR_CONFIG_FILE`.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    price_tiers: BTreeMap<String, Tier>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    ///
    /// Blank values count as missing. Every missing required variable is
    /// reported in one error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let missing: Vec<String> = REQUIRED_VARS
            .iter()
            .filter(|name| get(**name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingVars(missing));
        }
        let required = |name: &str| get(name).unwrap_or_default();

        let bind_addr_raw = get("ADVISOR_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr_raw
            .parse()
            .map_err(|err: std::net::AddrParseError| ConfigError::InvalidValue {
                name: "ADVISOR_BIND_ADDR",
                value: bind_addr_raw.clone(),
                reason: err.to_string(),
            })?;

        let log_format = match get("ADVISOR_LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    name: "ADVISOR_LOG_FORMAT",
                    value: other.to_string(),
                    reason: "expected 'json' or 'pretty'".to_string(),
                });
            }
        };

        let day_boundary = match get("USAGE_DAY_UTC_OFFSET_MINUTES") {
            None => DayBoundary::utc(),
            Some(raw) => raw
                .trim()
                .parse::<i32>()
                .ok()
                .and_then(DayBoundary::from_offset_minutes)
                .ok_or_else(|| ConfigError::InvalidValue {
                    name: "USAGE_DAY_UTC_OFFSET_MINUTES",
                    value: raw.clone(),
                    reason: "expected whole minutes within one day of UTC".to_string(),
                })?,
        };

        let pro_monthly_price_id = get("STRIPE_PRICE_PRO_MONTHLY");
        let pro_yearly_price_id = get("STRIPE_PRICE_PRO_YEARLY");

        let mut price_tiers = PriceTierTable::new();
        for price in [&pro_monthly_price_id, &pro_yearly_price_id].into_iter().flatten() {
            price_tiers.insert(price.clone(), Tier::Pro);
        }
        if let Some(path) = get("ADVISOR_CONFIG_FILE") {
            price_tiers.extend(load_file_price_tiers(Path::new(&path))?);
        }
        if let Some(raw) = get("PRICE_TIER_OVERRIDES") {
            let overrides = parse_overrides(&raw).map_err(|err| ConfigError::InvalidValue {
                name: "PRICE_TIER_OVERRIDES",
                value: raw.clone(),
                reason: err.to_string(),
            })?;
            price_tiers.extend(overrides);
        }

        Ok(Self {
            bind_addr,
            log_filter: get("ADVISOR_LOG_FILTER").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            log_format,
            supabase_url: required("SUPABASE_URL"),
            supabase_anon_key: required("SUPABASE_ANON_KEY"),
            supabase_service_role_key: required("SUPABASE_SERVICE_ROLE_KEY"),
            anthropic_api_key: required("ANTHROPIC_API_KEY"),
            anthropic_model: get("ANTHROPIC_MODEL")
                .unwrap_or_else(|| DEFAULT_CLAUDE_MODEL.to_string()),
            stripe_secret_key: required("STRIPE_SECRET_KEY"),
            stripe_publishable_key: required("STRIPE_PUBLISHABLE_KEY"),
            stripe_webhook_secret: required("STRIPE_WEBHOOK_SECRET"),
            app_url: required("APP_URL"),
            pro_monthly_price_id,
            pro_yearly_price_id,
            price_tiers,
            day_boundary,
        })
    }

    /// Configured Pro price ids, monthly first.
    pub fn pro_price_ids(&self) -> Vec<String> {
        [&self.pro_monthly_price_id, &self.pro_yearly_price_id]
            .into_iter()
            .flatten()
            .cloned()
            .collect()
    }

    /// Optional settings whose absence limits functionality.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.pro_monthly_price_id.is_none() {
            warnings.push("STRIPE_PRICE_PRO_MONTHLY is not set".to_string());
        }
        if self.pro_yearly_price_id.is_none() {
            warnings.push("STRIPE_PRICE_PRO_YEARLY is not set".to_string());
        }
        if self.price_tiers.is_empty() {
            warnings.push("no price ids map to a paid tier; every subscription resolves to free".to_string());
        }
        warnings
    }
}

fn load_file_price_tiers(path: &Path) -> Result<PriceTierTable, ConfigError> {
    let file_error = |message: String| ConfigError::ConfigFile {
        path: path.to_path_buf(),
        message,
    };
    let raw = std::fs::read_to_string(path).map_err(|err| file_error(err.to_string()))?;
    let parsed: FileConfig = toml::from_str(&raw).map_err(|err| file_error(err.to_string()))?;

    let mut table = PriceTierTable::new();
    for (price, tier) in parsed.price_tiers {
        table.insert(price, tier);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn base_vars() -> HashMap<&'static str, String> {
        REQUIRED_VARS
            .iter()
            .map(|name| (*name, format!("{}-value", name.to_lowercase())))
            .collect()
    }

    fn load(vars: &HashMap<&'static str, String>) -> Result<Config, ConfigError> {
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults_apply() {
        let config = load(&base_vars()).unwrap();
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.anthropic_model, DEFAULT_CLAUDE_MODEL);
        assert_eq!(config.day_boundary, DayBoundary::utc());
        assert!(config.pro_price_ids().is_empty());
        assert_eq!(config.warnings().len(), 3);
    }

    #[test]
    fn test_missing_vars_are_all_listed() {
        let mut vars = base_vars();
        vars.remove("ANTHROPIC_API_KEY");
        vars.remove("APP_URL");
        vars.insert("STRIPE_WEBHOOK_SECRET", "   ".to_string());

        let err = load(&vars).unwrap_err();
        let ConfigError::MissingVars(missing) = &err else {
            panic!("expected MissingVars, got {err}");
        };
        assert_eq!(
            missing,
            &vec![
                "ANTHROPIC_API_KEY".to_string(),
                "STRIPE_WEBHOOK_SECRET".to_string(),
                "APP_URL".to_string(),
            ]
        );
        assert!(err.to_string().contains("ANTHROPIC_API_KEY, STRIPE_WEBHOOK_SECRET, APP_URL"));
    }

    #[test]
    fn test_price_table_layers() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[price_tiers]\nprice_team = \"enterprise\"\nprice_legacy = \"pro\""
        )
        .unwrap();

        let mut vars = base_vars();
        vars.insert("STRIPE_PRICE_PRO_MONTHLY", "price_monthly".to_string());
        vars.insert("STRIPE_PRICE_PRO_YEARLY", "price_yearly".to_string());
        vars.insert("ADVISOR_CONFIG_FILE", file.path().display().to_string());
        vars.insert("PRICE_TIER_OVERRIDES", "price_legacy=free".to_string());

        let config = load(&vars).unwrap();
        let table = &config.price_tiers;
        assert_eq!(table.tier_for(Some("price_monthly")), Tier::Pro);
        assert_eq!(table.tier_for(Some("price_yearly")), Tier::Pro);
        assert_eq!(table.tier_for(Some("price_team")), Tier::Enterprise);
        assert_eq!(table.tier_for(Some("price_legacy")), Tier::Free);
        assert_eq!(config.pro_price_ids(), vec!["price_monthly", "price_yearly"]);
        assert!(config.warnings().is_empty());
    }

    #[test]
    fn test_invalid_optional_values_are_rejected() {
        let mut vars = base_vars();
        vars.insert("ADVISOR_LOG_FORMAT", "xml".to_string());
        assert!(matches!(
            load(&vars).unwrap_err(),
            ConfigError::InvalidValue { name: "ADVISOR_LOG_FORMAT", .. }
        ));

        let mut vars = base_vars();
        vars.insert("USAGE_DAY_UTC_OFFSET_MINUTES", "1440".to_string());
        assert!(load(&vars).is_err());

        let mut vars = base_vars();
        vars.insert("PRICE_TIER_OVERRIDES", "price_a=gold".to_string());
        assert!(load(&vars).is_err());

        let mut vars = base_vars();
        vars.insert("ADVISOR_CONFIG_FILE", "/nonexistent/advisor.toml".to_string());
        assert!(matches!(load(&vars).unwrap_err(), ConfigError::ConfigFile { .. }));
    }

    #[test]
    fn test_day_offset_is_applied() {
        let mut vars = base_vars();
        vars.insert("USAGE_DAY_UTC_OFFSET_MINUTES", "-300".to_string());
        let config = load(&vars).unwrap();
        assert_eq!(
            config.day_boundary,
            DayBoundary::from_offset_minutes(-300).unwrap()
        );
    }
}
