use crate::domain::market_data::{
    Currency, CurrencyTable, HISTORY_YEARS, HistoricalSeries, MONTHS_PER_YEAR, Metal, MetalSnapshot,
    MonthlyPrices, Price, round_half_up,
};

/// Offline data: the synthetic price history and the tables used when a fetch fails.
pub struct MockDataGenerator;

impl MockDataGenerator {
    /// Metals with a synthetic history.
    pub const HISTORY_METALS: [Metal; 3] = [Metal::Gold, Metal::Silver, Metal::Platinum];

    /// Monthly USD/oz prices for 2019..=2023, trending up after 2020.
    pub fn historical_series() -> HistoricalSeries {
        let mut series = HistoricalSeries::new();
        for metal in Self::HISTORY_METALS {
            for year in HISTORY_YEARS {
                series.insert(metal, year, Self::monthly_prices(metal, year));
            }
        }
        series
    }

    fn base_price(metal: Metal, year: u16) -> f64 {
        let elapsed = f64::from(year.saturating_sub(HISTORY_YEARS[0]));
        match metal {
            Metal::Gold => 1200.0 + elapsed * 150.0,
            Metal::Silver => 15.0 + elapsed * 3.0,
            _ => 900.0 + elapsed * 50.0,
        }
    }

    fn monthly_prices(metal: Metal, year: u16) -> MonthlyPrices {
        let base = Self::base_price(metal, year);
        let post_2020 = if year > 2020 { 200.0 } else { 0.0 };
        let mut months = [0.0; MONTHS_PER_YEAR];
        for (i, month) in months.iter_mut().enumerate() {
            *month = round_half_up(base + (i as f64 / 2.0).sin() * 50.0 + post_2020);
        }
        MonthlyPrices::new(months)
    }

    pub fn fallback_metal_snapshot(timestamp: u64) -> MetalSnapshot {
        const TABLE: [(Metal, [f64; 5]); 4] = [
            (Metal::Gold, [2050.50, 171500.0, 1890.0, 1590.0, 308000.0]),
            (Metal::Silver, [25.20, 2100.0, 23.20, 19.60, 3790.0]),
            (Metal::Platinum, [950.00, 79300.0, 875.0, 737.0, 142800.0]),
            (Metal::Palladium, [1000.00, 83500.0, 921.0, 776.0, 150300.0]),
        ];

        let mut snapshot = MetalSnapshot::new(timestamp);
        for (metal, prices) in TABLE {
            for (currency, price) in Currency::PRICED.into_iter().zip(prices) {
                snapshot.set_price(metal, currency, Price::new(price));
            }
        }
        snapshot
    }

    pub fn fallback_currency_table(date: &str) -> CurrencyTable {
        CurrencyTable::new(
            "USD",
            date,
            [
                (Currency::Usd, 1.00),
                (Currency::Eur, 0.92),
                (Currency::Gbp, 0.78),
                (Currency::Jpy, 150.00),
                (Currency::Inr, 83.50),
                (Currency::Cad, 1.35),
                (Currency::Aud, 1.50),
                (Currency::Chf, 0.88),
            ],
        )
    }
}
