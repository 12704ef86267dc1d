use super::HttpTransport;
use crate::config::DashboardConfig;
use crate::domain::{
    errors::{AppError, AppResult},
    logging::{LogComponent, get_time_provider},
    market_data::{CurrencyTable, Metal, MetalSnapshot},
};
use crate::infrastructure::mock_data::MockDataGenerator;
use crate::{log_info, log_warn};
use serde::Deserialize;
use std::collections::HashMap;

/// Body of the metals provider's `latest` endpoint.
#[derive(Debug, Deserialize)]
struct MetalsApiResponse {
    #[serde(default = "default_success")]
    success: bool,
    #[serde(default)]
    rates: HashMap<String, f64>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

fn default_success() -> bool {
    true
}

/// Why fallback data was used instead of a live response.
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackReason {
    /// No metals API key configured.
    NotConfigured,
    Failed(AppError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    Live,
    Fallback(FallbackReason),
}

impl DataSource {
    pub fn is_live(&self) -> bool {
        matches!(self, DataSource::Live)
    }
}

/// Data plus where it came from. Fetching never fails outward.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome<T> {
    pub data: T,
    pub source: DataSource,
}

impl<T> FetchOutcome<T> {
    fn live(data: T) -> Self {
        Self { data, source: DataSource::Live }
    }

    fn fallback(data: T, reason: FallbackReason) -> Self {
        Self { data, source: DataSource::Fallback(reason) }
    }
}

/// Pulls live metal prices and exchange rates, masking every failure with fallback data.
#[derive(Clone)]
pub struct RateFetcher<T: HttpTransport> {
    transport: T,
    config: DashboardConfig,
}

impl<T: HttpTransport> RateFetcher<T> {
    pub fn new(transport: T, config: DashboardConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Live snapshots carry USD only; conversion is the caller's next step.
    pub async fn fetch_metal_rates(&self) -> FetchOutcome<MetalSnapshot> {
        let now = get_time_provider().current_timestamp();

        let Some(url) = self.config.metals_url() else {
            log_info!(
                LogComponent::Infrastructure("RateFetcher"),
                "Using sample metal data (set METALS_API_KEY for live prices)"
            );
            return FetchOutcome::fallback(
                MockDataGenerator::fallback_metal_snapshot(now),
                FallbackReason::NotConfigured,
            );
        };

        let result = match self.transport.get_text(&url).await {
            Ok(body) => Self::parse_metals(&body, now),
            Err(err) => Err(err),
        };

        match result {
            Ok(snapshot) => {
                log_info!(
                    LogComponent::Infrastructure("RateFetcher"),
                    "✅ Live metal prices loaded for {} metals",
                    snapshot.metals().count()
                );
                FetchOutcome::live(snapshot)
            }
            Err(err) => {
                log_warn!(LogComponent::Infrastructure("RateFetcher"), "Metal API error: {err}");
                FetchOutcome::fallback(
                    MockDataGenerator::fallback_metal_snapshot(now),
                    FallbackReason::Failed(err),
                )
            }
        }
    }

    pub async fn fetch_currency_rates(&self) -> FetchOutcome<CurrencyTable> {
        let result = match self.transport.get_text(&self.config.currency_api_url).await {
            Ok(body) => Self::parse_currency(&body),
            Err(err) => Err(err),
        };

        match result {
            Ok(table) => {
                log_info!(
                    LogComponent::Infrastructure("RateFetcher"),
                    "✅ Live exchange rates loaded ({} codes, {})",
                    table.rates.len(),
                    table.date
                );
                FetchOutcome::live(table)
            }
            Err(err) => {
                log_warn!(LogComponent::Infrastructure("RateFetcher"), "Currency API error: {err}");
                let today = get_time_provider().format_date(get_time_provider().current_timestamp());
                FetchOutcome::fallback(
                    MockDataGenerator::fallback_currency_table(&today),
                    FallbackReason::Failed(err),
                )
            }
        }
    }

    /// Maps `XAU/XAG/XPT/XPD` onto metals; every symbol must be present.
    pub fn parse_metals(body: &str, timestamp: u64) -> AppResult<MetalSnapshot> {
        let response: MetalsApiResponse = serde_json::from_str(body)?;

        if !response.success {
            let detail = response.error.map(|e| e.to_string()).unwrap_or_default();
            return Err(AppError::FetchFailure(format!("provider reported failure {detail}")));
        }

        let prices = Metal::ALL
            .iter()
            .map(|metal| {
                response
                    .rates
                    .get(metal.provider_symbol())
                    .filter(|price| **price >= 0.0)
                    .map(|price| (*metal, *price))
                    .ok_or_else(|| {
                        AppError::MalformedResponse(format!("missing {} rate", metal.provider_symbol()))
                    })
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(MetalSnapshot::from_usd_prices(timestamp, prices))
    }

    pub fn parse_currency(body: &str) -> AppResult<CurrencyTable> {
        let table: CurrencyTable = serde_json::from_str(body)?;
        table.validate()?;
        Ok(table)
    }
}
