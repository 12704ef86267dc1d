use super::value_objects::{Currency, Metal, Price, round_half_up};
use crate::domain::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

pub const MONTHS_PER_YEAR: usize = 12;

/// Domain entity - per-metal, per-currency prices at one point in time.
///
/// Replaced wholesale on each fetch cycle; only the converter mutates it after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetalSnapshot {
    pub success: bool,
    pub timestamp: u64,
    prices: BTreeMap<Metal, BTreeMap<Currency, Price>>,
}

impl MetalSnapshot {
    pub fn new(timestamp: u64) -> Self {
        Self { success: true, timestamp, prices: BTreeMap::new() }
    }

    /// Snapshot holding only USD prices, as delivered by the live provider.
    pub fn from_usd_prices(timestamp: u64, usd: impl IntoIterator<Item = (Metal, f64)>) -> Self {
        let mut snapshot = Self::new(timestamp);
        for (metal, price) in usd {
            snapshot.set_price(metal, Currency::Usd, Price::new(price));
        }
        snapshot
    }

    pub fn set_price(&mut self, metal: Metal, currency: Currency, price: Price) {
        self.prices.entry(metal).or_default().insert(currency, price);
    }

    pub fn price(&self, metal: Metal, currency: Currency) -> Option<Price> {
        self.prices.get(&metal).and_then(|prices| prices.get(&currency)).copied()
    }

    pub fn usd(&self, metal: Metal) -> AppResult<Price> {
        self.price(metal, Currency::Usd)
            .ok_or_else(|| AppError::DataUnavailable(format!("no USD price for {}", metal.as_ref())))
    }

    pub fn metals(&self) -> impl Iterator<Item = Metal> + '_ {
        self.prices.keys().copied()
    }
}

/// Domain entity - exchange rates relative to `base`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyTable {
    pub base: String,
    pub date: String,
    pub rates: HashMap<String, f64>,
}

impl CurrencyTable {
    pub fn new(base: &str, date: &str, rates: impl IntoIterator<Item = (Currency, f64)>) -> Self {
        Self {
            base: base.to_uppercase(),
            date: date.to_string(),
            rates: rates.into_iter().map(|(c, r)| (c.code().to_string(), r)).collect(),
        }
    }

    pub fn rate(&self, currency: Currency) -> Option<f64> {
        self.rates.get(currency.code()).copied()
    }

    pub fn require_rate(&self, currency: Currency) -> AppResult<f64> {
        self.rate(currency)
            .ok_or_else(|| AppError::DataUnavailable(format!("no {} rate in table", currency)))
    }

    /// Checks `rates[base] == 1` and that every multiplier is positive.
    pub fn validate(&self) -> AppResult<()> {
        match self.rates.get(&self.base) {
            Some(rate) if (*rate - 1.0).abs() < f64::EPSILON => {}
            Some(rate) => {
                return Err(AppError::MalformedResponse(format!(
                    "base {} has rate {rate}, expected 1",
                    self.base
                )));
            }
            None => {
                return Err(AppError::MalformedResponse(format!("base {} missing from rates", self.base)));
            }
        }
        if let Some((code, rate)) = self.rates.iter().find(|(_, rate)| !(**rate > 0.0)) {
            return Err(AppError::MalformedResponse(format!("non-positive rate {rate} for {code}")));
        }
        Ok(())
    }
}

/// Twelve monthly prices for one metal and year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPrices([f64; MONTHS_PER_YEAR]);

impl MonthlyPrices {
    pub fn new(values: [f64; MONTHS_PER_YEAR]) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64; MONTHS_PER_YEAR] {
        &self.0
    }

    /// Rounded mean of the twelve months.
    pub fn average(&self) -> f64 {
        round_half_up(self.0.iter().sum::<f64>() / MONTHS_PER_YEAR as f64)
    }
}

/// Domain entity - synthetic monthly history, immutable once generated.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistoricalSeries {
    series: BTreeMap<Metal, BTreeMap<u16, MonthlyPrices>>,
}

impl HistoricalSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, metal: Metal, year: u16, prices: MonthlyPrices) {
        self.series.entry(metal).or_default().insert(year, prices);
    }

    pub fn year(&self, metal: Metal, year: u16) -> AppResult<&MonthlyPrices> {
        self.years(metal)?
            .get(&year)
            .ok_or_else(|| AppError::DataUnavailable(format!("no {} history for {year}", metal.as_ref())))
    }

    /// All years recorded for `metal`, ascending.
    pub fn years(&self, metal: Metal) -> AppResult<&BTreeMap<u16, MonthlyPrices>> {
        self.series
            .get(&metal)
            .ok_or_else(|| AppError::DataUnavailable(format!("no history for {}", metal.as_ref())))
    }

    pub fn metals(&self) -> impl Iterator<Item = Metal> + '_ {
        self.series.keys().copied()
    }
}
