use super::entities::{CurrencyTable, HistoricalSeries, MetalSnapshot};
use super::value_objects::{Currency, Metal, Price, round_half_up, round_one_decimal};
use crate::domain::errors::AppResult;
use std::fmt;

/// Derives non-USD prices from the USD price and a rate table.
pub struct CurrencyConverter;

impl CurrencyConverter {
    /// Sets `snapshot[metal][c] = round(usd * rates[C])` for every metal and
    /// converted currency. Rates and USD prices are checked up front, so on
    /// error the snapshot is left exactly as it was.
    pub fn convert(snapshot: &mut MetalSnapshot, rates: &CurrencyTable) -> AppResult<()> {
        let factors = Currency::CONVERTED
            .iter()
            .map(|currency| Ok((*currency, rates.require_rate(*currency)?)))
            .collect::<AppResult<Vec<_>>>()?;

        let bases = snapshot
            .metals()
            .map(|metal| Ok((metal, snapshot.usd(metal)?)))
            .collect::<AppResult<Vec<_>>>()?;

        for (metal, usd) in bases {
            for (currency, rate) in &factors {
                snapshot.set_price(metal, *currency, Price::new(round_half_up(usd.value() * rate)));
            }
        }
        Ok(())
    }
}

/// Average prices of two years and how they differ.
#[derive(Debug, Clone, PartialEq)]
pub struct YearComparison {
    pub metal: Metal,
    pub year1: u16,
    pub year2: u16,
    pub avg1: f64,
    pub avg2: f64,
    pub difference: f64,
    pub percent_change: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
    SameYear,
    Compared(YearComparison),
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparison::SameYear => write!(f, "Select different years!"),
            Comparison::Compared(c) => {
                let name = c.metal.as_ref();
                let sign = if c.difference >= 0.0 { '+' } else { '-' };
                writeln!(f, "Average {name} in {}: ${}", c.year1, c.avg1)?;
                writeln!(f, "Average {name} in {}: ${}", c.year2, c.avg2)?;
                write!(f, "Difference: {sign}${} ({:.1}%)", c.difference.abs(), c.percent_change)
            }
        }
    }
}

pub struct YearComparator;

impl YearComparator {
    pub fn compare(series: &HistoricalSeries, metal: Metal, year1: u16, year2: u16) -> AppResult<Comparison> {
        if year1 == year2 {
            return Ok(Comparison::SameYear);
        }

        let avg1 = series.year(metal, year1)?.average();
        let avg2 = series.year(metal, year2)?.average();
        let difference = avg2 - avg1;
        let percent_change = round_one_decimal(difference / avg1 * 100.0);

        Ok(Comparison::Compared(YearComparison {
            metal,
            year1,
            year2,
            avg1,
            avg2,
            difference,
            percent_change,
        }))
    }
}

/// One line of the movers summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GainLoserEntry {
    pub name: String,
    pub change: String,
}

impl GainLoserEntry {
    fn new(name: &str, change: &str) -> Self {
        Self { name: name.to_string(), change: change.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GainersLosers {
    pub gainers: Vec<GainLoserEntry>,
    pub losers: Vec<GainLoserEntry>,
}

/// 24h movers. The table is fixed demo data: no previous snapshot is kept to derive real deltas.
pub struct MarketMovers;

impl MarketMovers {
    const SHOWN_PER_SIDE: usize = 2;

    pub fn demo_changes() -> Vec<GainLoserEntry> {
        vec![
            GainLoserEntry::new("Gold", "+2.5%"),
            GainLoserEntry::new("Platinum", "+1.2%"),
            GainLoserEntry::new("Silver", "-0.8%"),
            GainLoserEntry::new("Palladium", "-1.5%"),
        ]
    }

    /// Splits by leading sign, keeping table order and at most two per side.
    pub fn partition(changes: &[GainLoserEntry]) -> GainersLosers {
        let pick = |prefix: char| {
            changes
                .iter()
                .filter(|entry| entry.change.starts_with(prefix))
                .take(Self::SHOWN_PER_SIDE)
                .cloned()
                .collect()
        };
        GainersLosers { gainers: pick('+'), losers: pick('-') }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::AppError;
    use crate::domain::market_data::entities::MonthlyPrices;

    fn rates() -> CurrencyTable {
        CurrencyTable::new(
            "USD",
            "2024-05-01",
            [
                (Currency::Usd, 1.0),
                (Currency::Inr, 83.5),
                (Currency::Eur, 0.92),
                (Currency::Gbp, 0.78),
                (Currency::Jpy, 150.0),
            ],
        )
    }

    #[test]
    fn converts_every_metal_from_usd() {
        let mut snapshot =
            MetalSnapshot::from_usd_prices(0, [(Metal::Gold, 2050.0), (Metal::Silver, 25.2)]);
        CurrencyConverter::convert(&mut snapshot, &rates()).unwrap();

        assert_eq!(snapshot.price(Metal::Gold, Currency::Inr), Some(Price::new(171175.0)));
        assert_eq!(snapshot.price(Metal::Gold, Currency::Jpy), Some(Price::new(307500.0)));
        assert_eq!(snapshot.price(Metal::Silver, Currency::Eur), Some(Price::new(23.0)));
        assert_eq!(snapshot.price(Metal::Silver, Currency::Usd), Some(Price::new(25.2)));
    }

    #[test]
    fn missing_rate_leaves_snapshot_untouched() {
        let mut table = rates();
        table.rates.remove("GBP");
        let mut snapshot = MetalSnapshot::from_usd_prices(0, [(Metal::Gold, 2050.0)]);
        let before = snapshot.clone();

        let err = CurrencyConverter::convert(&mut snapshot, &table).unwrap_err();
        assert!(matches!(err, AppError::DataUnavailable(_)));
        assert_eq!(snapshot, before);
    }

    #[test]
    fn comparison_renders_signed_difference() {
        let mut series = HistoricalSeries::new();
        series.insert(Metal::Silver, 2020, MonthlyPrices::new([20.0; 12]));
        series.insert(Metal::Silver, 2021, MonthlyPrices::new([15.0; 12]));

        let down = YearComparator::compare(&series, Metal::Silver, 2020, 2021).unwrap();
        insta::assert_snapshot!(down.to_string(), @r"
        Average silver in 2020: $20
        Average silver in 2021: $15
        Difference: -$5 (-25.0%)
        ");

        let up = YearComparator::compare(&series, Metal::Silver, 2021, 2020).unwrap();
        assert!(up.to_string().ends_with("Difference: +$5 (33.3%)"));
    }

    #[test]
    fn same_year_short_circuits_even_without_history() {
        let series = HistoricalSeries::new();
        let outcome = YearComparator::compare(&series, Metal::Palladium, 2022, 2022).unwrap();
        assert_eq!(outcome, Comparison::SameYear);
        assert_eq!(outcome.to_string(), "Select different years!");
    }

    #[test]
    fn movers_split_by_sign() {
        let split = MarketMovers::partition(&MarketMovers::demo_changes());
        let names = |entries: &[GainLoserEntry]| entries.iter().map(|e| e.name.clone()).collect::<Vec<_>>();
        assert_eq!(names(&split.gainers), ["Gold", "Platinum"]);
        assert_eq!(names(&split.losers), ["Silver", "Palladium"]);
    }

    #[test]
    fn movers_keep_at_most_two_per_side() {
        let changes = vec![
            GainLoserEntry::new("A", "+1%"),
            GainLoserEntry::new("B", "+2%"),
            GainLoserEntry::new("C", "+3%"),
            GainLoserEntry::new("D", "0%"),
        ];
        let split = MarketMovers::partition(&changes);
        assert_eq!(split.gainers.len(), 2);
        assert_eq!(split.gainers[1].name, "B");
        assert!(split.losers.is_empty());
    }
}
