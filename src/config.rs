use crate::error::{env_error, ScheduleResult};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::str::FromStr;

/// Default fixture file used when no REST endpoint is configured
pub const DEFAULT_FIXTURE_PATH: &str = "config/fixture.toml";

/// Component toggles file
pub const COMPONENTS_PATH: &str = "config/components.toml";

/// Main configuration structure for the application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// REST base URL; the fixture source is used when unset
    pub api_base_url: Option<String>,
    /// Bearer token sent to the REST API
    pub api_token: Option<String>,
    /// REST request timeout in seconds
    pub request_timeout_secs: u64,
    /// Fixture file for the in-memory source
    pub fixture_path: String,
    /// Timezone used to decide which day is "today"
    pub timezone: String,
    /// UI locale
    pub locale: String,
    /// Map of component names to their enabled status
    pub components: HashMap<String, bool>,
    /// Event markers shown per calendar day
    pub marker_limit: usize,
    /// Projects shown per collapsed section
    pub section_preview_limit: usize,
    /// Pad the last week row of the grid to seven cells
    pub pad_trailing_week: bool,
    /// Refetch every project list after apply/cancel
    pub reconcile_after_apply: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: None,
            api_token: None,
            request_timeout_secs: 10,
            fixture_path: DEFAULT_FIXTURE_PATH.to_string(),
            timezone: "UTC".to_string(),
            locale: "en".to_string(),
            components: default_components(),
            marker_limit: 3,
            section_preview_limit: 3,
            pad_trailing_week: false,
            reconcile_after_apply: true,
        }
    }
}

fn default_components() -> HashMap<String, bool> {
    let mut components = HashMap::new();
    components.insert("calendar".to_string(), true);
    components.insert("schedule".to_string(), true);
    components
}

/// Read an optional variable, failing only when it is present but malformed
fn parse_var<T: FromStr>(name: &str, default: T) -> ScheduleResult<T> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().map_err(|_| env_error(name)),
        Err(_) => Ok(default),
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> ScheduleResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let defaults = Config::default();

        let api_base_url = env::var("SCHEDULE_API_URL").ok().filter(|s| !s.is_empty());
        let api_token = env::var("SCHEDULE_API_TOKEN").ok().filter(|s| !s.is_empty());
        let fixture_path = env::var("SCHEDULE_FIXTURE").unwrap_or(defaults.fixture_path);
        let timezone = env::var("TIMEZONE").unwrap_or(defaults.timezone);
        let locale = env::var("APP_LOCALE").unwrap_or(defaults.locale);

        let request_timeout_secs = parse_var("API_TIMEOUT_SECS", defaults.request_timeout_secs)?;
        let marker_limit = parse_var("CALENDAR_MARKER_LIMIT", defaults.marker_limit)?;
        let section_preview_limit =
            parse_var("SECTION_PREVIEW_LIMIT", defaults.section_preview_limit)?;
        let pad_trailing_week =
            parse_var("CALENDAR_PAD_TRAILING_WEEK", defaults.pad_trailing_week)?;
        let reconcile_after_apply =
            parse_var("RECONCILE_AFTER_APPLY", defaults.reconcile_after_apply)?;

        let mut components = defaults.components;

        // Load components configuration from file if it exists
        if let Ok(content) = fs::read_to_string(COMPONENTS_PATH) {
            let file_components = toml::from_str::<HashMap<String, bool>>(&content)?;
            components.extend(file_components);
        }

        Ok(Config {
            api_base_url,
            api_token,
            request_timeout_secs,
            fixture_path,
            timezone,
            locale,
            components,
            marker_limit,
            section_preview_limit,
            pad_trailing_week,
            reconcile_after_apply,
        })
    }

    /// Check if a component is enabled
    pub fn is_component_enabled(&self, name: &str) -> bool {
        *self.components.get(name).unwrap_or(&false)
    }
}
