use metals_dashboard_wasm::domain::market_data::services::{Comparison, CurrencyConverter, YearComparator};
use metals_dashboard_wasm::domain::market_data::{
    Currency, CurrencyTable, HistoricalSeries, Metal, MetalSnapshot, round_half_up,
};
use metals_dashboard_wasm::infrastructure::mock_data::MockDataGenerator;
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

fn rate(raw: u32) -> f64 {
    f64::from(raw % 200_000 + 1) / 1000.0
}

#[quickcheck]
fn converted_prices_are_rounded_products(usd: Vec<u32>, inr: u32, eur: u32, gbp: u32, jpy: u32) -> TestResult {
    if usd.is_empty() {
        return TestResult::discard();
    }

    let prices: Vec<(Metal, f64)> = Metal::ALL
        .into_iter()
        .zip(usd.iter().map(|cents| f64::from(*cents % 10_000_000) / 100.0))
        .collect();
    let table = CurrencyTable::new(
        "USD",
        "2024-05-01",
        [
            (Currency::Usd, 1.0),
            (Currency::Inr, rate(inr)),
            (Currency::Eur, rate(eur)),
            (Currency::Gbp, rate(gbp)),
            (Currency::Jpy, rate(jpy)),
        ],
    );

    let mut snapshot = MetalSnapshot::from_usd_prices(0, prices.clone());
    if CurrencyConverter::convert(&mut snapshot, &table).is_err() {
        return TestResult::failed();
    }

    let holds = prices.iter().all(|(metal, usd)| {
        Currency::CONVERTED.iter().all(|currency| {
            let expected = round_half_up(usd * table.rate(*currency).unwrap_or_default());
            snapshot.price(*metal, *currency).map(|p| p.value()) == Some(expected)
        }) && snapshot.price(*metal, Currency::Usd).map(|p| p.value()) == Some(*usd)
    });
    TestResult::from_bool(holds)
}

#[quickcheck]
fn same_year_is_always_guarded(metal: u8, year: u16) -> bool {
    let metal = Metal::ALL[usize::from(metal) % Metal::ALL.len()];
    let series = MockDataGenerator::historical_series();

    let guarded = YearComparator::compare(&series, metal, year, year) == Ok(Comparison::SameYear);
    let empty = YearComparator::compare(&HistoricalSeries::new(), metal, year, year) == Ok(Comparison::SameYear);
    guarded && empty
}

#[test]
fn historical_generation_is_deterministic() {
    assert_eq!(MockDataGenerator::historical_series(), MockDataGenerator::historical_series());
}

#[test]
fn gold_gains_from_2019_to_2023() {
    let series = MockDataGenerator::historical_series();
    let Comparison::Compared(result) = YearComparator::compare(&series, Metal::Gold, 2019, 2023).unwrap() else {
        panic!("expected a comparison");
    };
    assert!(result.avg2 > result.avg1);
    assert!(result.percent_change > 0.0);
}
