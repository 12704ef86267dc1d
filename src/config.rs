//! Build-time configuration.
//!
//! Values come from `option_env!` so a WASM bundle can be built against a
//! different provider or with a metals API key without code changes:
//!
//! ```text
//! METALS_API_KEY=... DASHBOARD_LOG_LEVEL=info trunk build --release
//! ```

use crate::domain::logging::LogLevel;
use crate::domain::market_data::Metal;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_METALS_API_URL: &str = "https://metals-api.com/api/latest";
pub const DEFAULT_CURRENCY_API_URL: &str = "https://api.exchangerate-api.com/v4/latest/USD";

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub metals_api_url: String,
    /// `None` keeps the dashboard on mock metal prices.
    pub metals_api_key: Option<String>,
    pub currency_api_url: String,
    pub refresh_interval: Duration,
    pub clock_interval: Duration,
    pub log_level: LogLevel,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            metals_api_url: DEFAULT_METALS_API_URL.to_string(),
            metals_api_key: None,
            currency_api_url: DEFAULT_CURRENCY_API_URL.to_string(),
            refresh_interval: Duration::from_secs(60),
            clock_interval: Duration::from_secs(1),
            log_level: LogLevel::Debug,
        }
    }
}

impl DashboardConfig {
    pub fn from_build_env() -> Self {
        Self::from_lookup(|key| match key {
            "METALS_API_KEY" => option_env!("METALS_API_KEY"),
            "METALS_API_URL" => option_env!("METALS_API_URL"),
            "CURRENCY_API_URL" => option_env!("CURRENCY_API_URL"),
            "DASHBOARD_LOG_LEVEL" => option_env!("DASHBOARD_LOG_LEVEL"),
            _ => None,
        })
    }

    /// Builds a config from an arbitrary key lookup; blank values count as unset.
    pub fn from_lookup<'a>(lookup: impl Fn(&str) -> Option<&'a str>) -> Self {
        let get = |key: &str| lookup(key).map(str::trim).filter(|value| !value.is_empty());
        let defaults = Self::default();

        Self {
            metals_api_url: get("METALS_API_URL").map(str::to_string).unwrap_or(defaults.metals_api_url),
            metals_api_key: get("METALS_API_KEY").map(str::to_string),
            currency_api_url: get("CURRENCY_API_URL")
                .map(str::to_string)
                .unwrap_or(defaults.currency_api_url),
            log_level: get("DASHBOARD_LOG_LEVEL")
                .and_then(|level| LogLevel::from_str(level).ok())
                .unwrap_or(defaults.log_level),
            ..defaults
        }
    }

    /// Latest-prices URL for all four metals, or `None` without an API key.
    pub fn metals_url(&self) -> Option<String> {
        let key = self.metals_api_key.as_deref()?;
        let symbols = Metal::ALL.map(|metal| metal.provider_symbol()).join(",");
        Some(format!("{}?access_key={}&base=USD&symbols={}", self.metals_api_url, key, symbols))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_mock_metals() {
        let config = DashboardConfig::default();
        assert_eq!(config.metals_url(), None);
        assert_eq!(config.refresh_interval, Duration::from_secs(60));
        assert_eq!(config.currency_api_url, DEFAULT_CURRENCY_API_URL);
    }

    #[test]
    fn metals_url_carries_key_and_symbols() {
        let config = DashboardConfig::from_lookup(|key| (key == "METALS_API_KEY").then_some("abc123"));
        assert_eq!(
            config.metals_url().unwrap(),
            "https://metals-api.com/api/latest?access_key=abc123&base=USD&symbols=XAU,XAG,XPT,XPD"
        );
    }

    #[test]
    fn blank_and_invalid_values_fall_back() {
        let config = DashboardConfig::from_lookup(|key| match key {
            "METALS_API_KEY" => Some("  "),
            "DASHBOARD_LOG_LEVEL" => Some("loud"),
            "CURRENCY_API_URL" => Some("http://localhost:9000/rates"),
            _ => None,
        });
        assert_eq!(config.metals_api_key, None);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.currency_api_url, "http://localhost:9000/rates");
    }
}
