//! Rendering capability and the view models it consumes.
//!
//! Builders here are pure: they turn snapshots into the exact text a card or
//! row shows, so the browser binding only has to place strings.

use super::search::Searchable;
use super::state::Page;
use crate::domain::market_data::{
    Currency, CurrencyTable, GRAMS_PER_OUNCE, Metal, MetalSnapshot, Price, TEN_GRAMS_PER_OUNCE,
    round_half_up,
    services::{GainersLosers, MarketMovers},
};

/// Gold price used by the currency table before any metal data exists.
pub const FALLBACK_GOLD_USD: f64 = 2050.0;

/// Everything the dashboard can draw. Implementations replace what they show wholesale.
pub trait DashboardView {
    fn show_page(&self, page: Page);
    fn render_rates_grid(&self, cards: Vec<RateCard>);
    fn render_overview(&self, cards: Vec<OverviewCard>);
    fn render_currency_table(&self, rows: Vec<CurrencyRow>);
    fn render_gainers_losers(&self, movers: MoversCard);
    fn render_last_update(&self, text: String);
    fn render_status(&self, text: String);
    fn render_comparison(&self, text: String);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateSection {
    pub heading: String,
    pub lines: Vec<String>,
}

/// Live-rates card: one metal, three weight tiers, five currencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateCard {
    pub metal: Metal,
    pub title: String,
    pub sections: Vec<RateSection>,
}

impl RateCard {
    pub fn build(snapshot: &MetalSnapshot, metal: Metal) -> Self {
        let tiers: [(&str, fn(Price) -> f64); 3] = [
            ("Per Gram:", |p| round_half_up(p.value() / GRAMS_PER_OUNCE)),
            ("Per 10g:", |p| round_half_up(p.value() / TEN_GRAMS_PER_OUNCE)),
            ("Per Ounce:", |p| round_half_up(p.value())),
        ];

        let sections = tiers
            .iter()
            .map(|(heading, tier)| RateSection {
                heading: heading.to_string(),
                lines: Currency::PRICED
                    .iter()
                    .map(|currency| match snapshot.price(metal, *currency) {
                        Some(price) => format!("{currency}: {} {currency}", tier(price)),
                        None => format!("{currency}: n/a"),
                    })
                    .collect(),
            })
            .collect();

        Self { metal, title: metal.to_string(), sections }
    }

    pub fn grid(snapshot: &MetalSnapshot) -> Vec<RateCard> {
        Metal::ALL.iter().map(|metal| Self::build(snapshot, *metal)).collect()
    }
}

impl Searchable for RateCard {
    fn search_text(&self) -> String {
        let mut parts = vec![self.title.clone()];
        for section in &self.sections {
            parts.push(section.heading.clone());
            parts.extend(section.lines.iter().cloned());
        }
        parts.join(" ")
    }
}

/// Home-page summary for one metal, USD only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverviewCard {
    pub metal: Metal,
    pub title: String,
    pub lines: Vec<String>,
}

impl OverviewCard {
    pub const METALS: [Metal; 2] = [Metal::Gold, Metal::Silver];

    pub fn build(snapshot: &MetalSnapshot, metal: Metal) -> Self {
        let lines = match snapshot.price(metal, Currency::Usd) {
            Some(usd) => vec![
                format!("Per Gram: ${}", usd.per_gram()),
                format!("Per 10g: ${}", usd.per_ten_grams()),
                format!("Per Ounce: ${}", usd.value()),
            ],
            None => vec!["Price unavailable".to_string()],
        };
        Self { metal, title: metal.to_string(), lines }
    }

    pub fn all(snapshot: &MetalSnapshot) -> Vec<OverviewCard> {
        Self::METALS.iter().map(|metal| Self::build(snapshot, *metal)).collect()
    }
}

impl Searchable for OverviewCard {
    fn search_text(&self) -> String {
        format!("{} {}", self.title, self.lines.join(" "))
    }
}

/// One exchange-rate table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyRow {
    pub code: String,
    pub rate: String,
    pub gold_equivalent: String,
}

impl CurrencyRow {
    /// Rows in fixed order; a missing rate renders as `n/a` rather than failing the table.
    pub fn table(rates: &CurrencyTable, gold_usd: Option<f64>) -> Vec<CurrencyRow> {
        let gold = gold_usd.unwrap_or(FALLBACK_GOLD_USD);
        Currency::TABLE
            .iter()
            .map(|currency| match rates.rate(*currency) {
                Some(rate) => CurrencyRow {
                    code: currency.to_string(),
                    rate: format!("{rate:.4}"),
                    gold_equivalent: format!("{} {currency}", round_half_up(gold * rate)),
                },
                None => CurrencyRow {
                    code: currency.to_string(),
                    rate: "n/a".to_string(),
                    gold_equivalent: "n/a".to_string(),
                },
            })
            .collect()
    }
}

impl Searchable for CurrencyRow {
    fn search_text(&self) -> String {
        format!("{} {} {}", self.code, self.rate, self.gold_equivalent)
    }
}

/// Top gainers and losers, rendered as two lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MoversCard {
    pub gainers: String,
    pub losers: String,
}

impl MoversCard {
    pub fn from_split(split: &GainersLosers) -> Self {
        let line = |entries: &[crate::domain::market_data::services::GainLoserEntry]| {
            entries
                .iter()
                .map(|entry| format!("{}: {}", entry.name, entry.change))
                .collect::<Vec<_>>()
                .join(", ")
        };
        Self {
            gainers: format!("Top Gainers: {}", line(&split.gainers)),
            losers: format!("Top Losers: {}", line(&split.losers)),
        }
    }

    /// Built from the fixed demo change table.
    pub fn demo() -> Self {
        Self::from_split(&MarketMovers::partition(&MarketMovers::demo_changes()))
    }
}

impl Searchable for MoversCard {
    fn search_text(&self) -> String {
        format!("{} {}", self.gainers, self.losers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::mock_data::MockDataGenerator;

    #[test]
    fn rate_card_has_three_tiers_of_five_currencies() {
        let snapshot = MockDataGenerator::fallback_metal_snapshot(0);
        let card = RateCard::build(&snapshot, Metal::Gold);
        assert_eq!(card.title, "Gold");
        assert_eq!(card.sections.len(), 3);
        assert_eq!(card.sections[0].lines[0], "USD: 66 USD");
        assert_eq!(card.sections[1].lines[0], "USD: 659 USD");
        assert_eq!(card.sections[2].lines[0], "USD: 2051 USD");
        assert_eq!(card.sections[0].lines[1], "INR: 5514 INR");
        assert!(card.sections.iter().all(|s| s.lines.len() == 5));
    }

    #[test]
    fn rate_card_marks_missing_currencies() {
        let snapshot = MetalSnapshot::from_usd_prices(0, [(Metal::Silver, 31.1)]);
        let card = RateCard::build(&snapshot, Metal::Silver);
        assert_eq!(card.sections[0].lines[0], "USD: 1 USD");
        assert_eq!(card.sections[0].lines[1], "INR: n/a");
    }

    #[test]
    fn overview_prints_ounce_price_as_is() {
        let snapshot = MockDataGenerator::fallback_metal_snapshot(0);
        let cards = OverviewCard::all(&snapshot);
        assert_eq!(cards.len(), 2);
        insta::assert_snapshot!(cards[0].search_text(), @"Gold Per Gram: $66 Per 10g: $659 Per Ounce: $2050.5");
        assert_eq!(cards[1].lines[2], "Per Ounce: $25.2");
    }

    #[test]
    fn currency_table_uses_fixed_order_and_gold_fallback() {
        let rates = MockDataGenerator::fallback_currency_table("2024-05-01");
        let rows = CurrencyRow::table(&rates, None);
        let codes: Vec<_> = rows.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, ["USD", "EUR", "GBP", "JPY", "INR", "CAD", "AUD", "CHF"]);
        assert_eq!(rows[0].gold_equivalent, "2050 USD");
        assert_eq!(rows[3].rate, "150.0000");
        assert_eq!(rows[3].gold_equivalent, "307500 JPY");
    }

    #[test]
    fn currency_table_tolerates_missing_codes() {
        let rates = CurrencyTable::new("USD", "2024-05-01", [(Currency::Usd, 1.0)]);
        let rows = CurrencyRow::table(&rates, Some(2000.0));
        assert_eq!(rows[0].gold_equivalent, "2000 USD");
        assert_eq!(rows[7].rate, "n/a");
    }

    #[test]
    fn movers_card_lines() {
        let card = MoversCard::demo();
        assert_eq!(card.gainers, "Top Gainers: Gold: +2.5%, Platinum: +1.2%");
        assert_eq!(card.losers, "Top Losers: Silver: -0.8%, Palladium: -1.5%");
    }
}
