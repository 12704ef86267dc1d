//! Application coordinator.
//!
//! Owns the [`AppState`] record and is the only writer to it. Every mutation
//! ends in [`DashboardController::redraw`], which rebuilds the view models
//! from scratch and hands them to the [`DashboardView`].

use super::chart_controller::ChartController;
use super::state::{AppState, Page};
use super::view::{CurrencyRow, DashboardView, MoversCard, OverviewCard, RateCard};
use crate::domain::{
    chart::{ChartBackend, YearFilter},
    errors::AppError,
    logging::{LogComponent, get_time_provider},
    market_data::{
        CurrencyTable, Metal, MetalSnapshot,
        services::{CurrencyConverter, YearComparator},
    },
};
use crate::infrastructure::http::HttpTransport;
use crate::infrastructure::http::rate_fetcher::{DataSource, FetchOutcome, RateFetcher};
use crate::infrastructure::mock_data::MockDataGenerator;
use crate::{log_debug, log_error, log_info, log_warn};
use std::cell::RefCell;
use std::rc::Rc;

/// Follow-up work a page switch asks the caller to schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    None,
    RefreshMetals,
    RefreshCurrency,
}

pub struct DashboardController<T, V, C>
where
    T: HttpTransport + Clone,
    V: DashboardView,
    C: ChartBackend,
{
    fetcher: RateFetcher<T>,
    view: V,
    chart: ChartController<C>,
    state: AppState,
}

impl<T, V, C> DashboardController<T, V, C>
where
    T: HttpTransport + Clone,
    V: DashboardView,
    C: ChartBackend,
{
    pub fn new(fetcher: RateFetcher<T>, view: V, backend: C) -> Self {
        let historical = MockDataGenerator::historical_series();
        log_info!(
            LogComponent::Application("Dashboard"),
            "Historical series generated for {} metals",
            historical.metals().count()
        );
        Self { fetcher, view, chart: ChartController::new(backend), state: AppState::new(historical) }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn chart(&self) -> &ChartController<C> {
        &self.chart
    }

    /// Stores a metal snapshot. Live snapshots only carry USD, so they are
    /// converted against the current exchange-rate table when one is loaded.
    pub fn apply_metals(&mut self, outcome: FetchOutcome<MetalSnapshot>) {
        let FetchOutcome { data: mut snapshot, source } = outcome;
        self.state.status = None;

        if source.is_live() {
            let converted = match &self.state.currency {
                Some(table) => CurrencyConverter::convert(&mut snapshot, table),
                None => {
                    log_warn!(
                        LogComponent::Application("Dashboard"),
                        "Live metal prices arrived before exchange rates; showing USD only"
                    );
                    Ok(())
                }
            };
            if let Err(err) = converted {
                self.report(err);
            }
        }

        self.state.metals = Some(snapshot);
        self.state.metals_source = Some(source);
        self.redraw();
    }

    /// Stores an exchange-rate table and re-converts loaded live metal prices,
    /// so the result does not depend on which fetch finished first.
    pub fn apply_currency(&mut self, outcome: FetchOutcome<CurrencyTable>) {
        let FetchOutcome { data: table, source } = outcome;
        self.state.status = None;

        let live_metals = matches!(self.state.metals_source, Some(DataSource::Live));
        let converted = match self.state.metals.as_mut() {
            Some(snapshot) if live_metals => CurrencyConverter::convert(snapshot, &table),
            _ => Ok(()),
        };
        if let Err(err) = converted {
            self.report(err);
        }

        self.state.currency = Some(table);
        self.state.currency_source = Some(source);
        self.redraw();
    }

    /// Pushes every view model derived from the current state to the view.
    pub fn redraw(&self) {
        let view = &self.view;
        view.show_page(self.state.page);

        if let Some(snapshot) = &self.state.metals {
            view.render_rates_grid(RateCard::grid(snapshot));
            view.render_overview(OverviewCard::all(snapshot));
            view.render_last_update(self.last_update_text(snapshot));
        }

        if let Some(table) = &self.state.currency {
            let gold_usd = self
                .state
                .metals
                .as_ref()
                .and_then(|snapshot| snapshot.usd(Metal::Gold).ok())
                .map(|price| price.value());
            view.render_currency_table(CurrencyRow::table(table, gold_usd));
        }

        view.render_gainers_losers(MoversCard::demo());
        view.render_status(self.state.status.clone().unwrap_or_default());
    }

    fn last_update_text(&self, snapshot: &MetalSnapshot) -> String {
        let time = get_time_provider().format_timestamp(snapshot.timestamp);
        match &self.state.metals_source {
            Some(DataSource::Live) | None => format!("Last updated: {time}"),
            Some(DataSource::Fallback(_)) => format!("Last updated: {time} (sample data)"),
        }
    }

    /// Switches the visible page and says which refresh the page wants.
    /// The historical page redraws its chart immediately.
    pub fn enter_page(&mut self, page: Page) -> PageAction {
        log_debug!(LogComponent::Application("Dashboard"), "Entering page {}", page.as_ref());
        self.state.page = page;
        self.view.show_page(page);

        match page {
            Page::Home => PageAction::None,
            Page::LiveRates => PageAction::RefreshMetals,
            Page::Currency => PageAction::RefreshCurrency,
            Page::Historical => {
                self.rebuild_chart();
                PageAction::None
            }
        }
    }

    pub fn update_chart(&mut self, metal: Metal, filter: YearFilter) {
        self.state.chart_metal = metal;
        self.state.chart_filter = filter;
        self.rebuild_chart();
    }

    fn rebuild_chart(&mut self) {
        let (metal, filter) = (self.state.chart_metal, self.state.chart_filter);
        if let Err(err) = self.chart.rebuild(&self.state.historical, metal, filter) {
            self.report(err);
        } else if self.state.status.take().is_some() {
            self.view.render_status(String::new());
        }
    }

    pub fn compare_years(&mut self, metal: Metal, year1: u16, year2: u16) {
        let text = match YearComparator::compare(&self.state.historical, metal, year1, year2) {
            Ok(comparison) => comparison.to_string(),
            Err(err) => {
                log_error!(LogComponent::Application("Dashboard"), "Comparison failed: {err}");
                format!("No historical data for {}", metal.as_ref())
            }
        };
        self.view.render_comparison(text);
    }

    fn report(&mut self, err: AppError) {
        log_error!(LogComponent::Application("Dashboard"), "{err}");
        let text = err.to_string();
        self.view.render_status(text.clone());
        self.state.status = Some(text);
    }

    /// Fetches metal prices. A live snapshot needs exchange rates before it
    /// can be converted, so the currency fetch runs first in that case.
    ///
    /// No `RefCell` borrow is held across an await point.
    pub async fn refresh_metals(controller: Rc<RefCell<Self>>) {
        let fetcher = controller.borrow().fetcher.clone();
        let outcome = fetcher.fetch_metal_rates().await;

        if outcome.source.is_live() {
            Self::refresh_currency(Rc::clone(&controller)).await;
        }

        controller.borrow_mut().apply_metals(outcome);
    }

    pub async fn refresh_currency(controller: Rc<RefCell<Self>>) {
        let fetcher = controller.borrow().fetcher.clone();
        let outcome = fetcher.fetch_currency_rates().await;
        controller.borrow_mut().apply_currency(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::view::{CurrencyRow, MoversCard, OverviewCard, RateCard};
    use crate::config::{DEFAULT_CURRENCY_API_URL, DashboardConfig};
    use crate::domain::chart::LineChartSpec;
    use crate::domain::errors::AppResult;
    use crate::domain::market_data::Currency;
    use crate::infrastructure::http::rate_fetcher::FallbackReason;
    use std::collections::HashMap;

    #[derive(Default)]
    struct RecordingView {
        page: RefCell<Option<Page>>,
        rates: RefCell<Vec<RateCard>>,
        overview: RefCell<Vec<OverviewCard>>,
        currency: RefCell<Vec<CurrencyRow>>,
        movers: RefCell<MoversCard>,
        last_update: RefCell<String>,
        status: RefCell<String>,
        comparison: RefCell<String>,
    }

    impl DashboardView for RecordingView {
        fn show_page(&self, page: Page) {
            *self.page.borrow_mut() = Some(page);
        }
        fn render_rates_grid(&self, cards: Vec<RateCard>) {
            *self.rates.borrow_mut() = cards;
        }
        fn render_overview(&self, cards: Vec<OverviewCard>) {
            *self.overview.borrow_mut() = cards;
        }
        fn render_currency_table(&self, rows: Vec<CurrencyRow>) {
            *self.currency.borrow_mut() = rows;
        }
        fn render_gainers_losers(&self, movers: MoversCard) {
            *self.movers.borrow_mut() = movers;
        }
        fn render_last_update(&self, text: String) {
            *self.last_update.borrow_mut() = text;
        }
        fn render_status(&self, text: String) {
            *self.status.borrow_mut() = text;
        }
        fn render_comparison(&self, text: String) {
            *self.comparison.borrow_mut() = text;
        }
    }

    #[derive(Default)]
    struct NullChart {
        live: usize,
    }

    impl ChartBackend for NullChart {
        type Instance = ();

        fn create(&mut self, _spec: &LineChartSpec) -> AppResult<()> {
            self.live += 1;
            Ok(())
        }
        fn destroy(&mut self, _instance: ()) {
            self.live -= 1;
        }
        fn show_empty(&mut self, _message: &str) {}
    }

    /// Answers by URL prefix; anything unscripted is a transport failure.
    #[derive(Clone, Default)]
    struct ScriptedTransport {
        responses: HashMap<&'static str, &'static str>,
    }

    impl HttpTransport for ScriptedTransport {
        async fn get_text(&self, url: &str) -> AppResult<String> {
            self.responses
                .iter()
                .find(|(prefix, _)| url.starts_with(**prefix))
                .map(|(_, body)| body.to_string())
                .ok_or_else(|| AppError::FetchFailure(format!("503 from {url}")))
        }
    }

    type TestController = DashboardController<ScriptedTransport, RecordingView, NullChart>;

    fn keyed_config() -> DashboardConfig {
        DashboardConfig { metals_api_key: Some("test-key".into()), ..DashboardConfig::default() }
    }

    fn controller(transport: ScriptedTransport) -> Rc<RefCell<TestController>> {
        let fetcher = RateFetcher::new(transport, keyed_config());
        Rc::new(RefCell::new(DashboardController::new(fetcher, RecordingView::default(), NullChart::default())))
    }

    fn rendered(controller: &TestController) -> (Vec<RateCard>, Vec<OverviewCard>, Vec<CurrencyRow>) {
        let view = controller.view();
        (view.rates.borrow().clone(), view.overview.borrow().clone(), view.currency.borrow().clone())
    }

    #[test]
    fn failed_fetches_render_the_fallback_datasets() {
        let failing = controller(ScriptedTransport::default());
        futures::executor::block_on(TestController::refresh_metals(Rc::clone(&failing)));
        futures::executor::block_on(TestController::refresh_currency(Rc::clone(&failing)));

        let direct = controller(ScriptedTransport::default());
        {
            let mut direct = direct.borrow_mut();
            let reason = || DataSource::Fallback(FallbackReason::NotConfigured);
            direct.apply_currency(FetchOutcome {
                data: MockDataGenerator::fallback_currency_table("1970-01-01"),
                source: reason(),
            });
            direct.apply_metals(FetchOutcome { data: MockDataGenerator::fallback_metal_snapshot(0), source: reason() });
        }

        assert_eq!(rendered(&failing.borrow()), rendered(&direct.borrow()));
        let failing = failing.borrow();
        assert!(failing.view().status.borrow().is_empty());
        assert!(failing.view().last_update.borrow().ends_with("(sample data)"));
        assert_eq!(failing.view().rates.borrow()[0].sections[2].lines[1], "INR: 171500 INR");
    }

    #[test]
    fn live_metals_are_converted_with_live_rates() {
        let transport = ScriptedTransport {
            responses: HashMap::from([
                ("https://metals-api.com", r#"{"success":true,"rates":{"XAU":2050,"XAG":25,"XPT":950,"XPD":1000}}"#),
                (DEFAULT_CURRENCY_API_URL, r#"{"base":"USD","date":"2024-05-01","rates":{"USD":1,"INR":83.5,"EUR":0.9,"GBP":0.8,"JPY":150}}"#),
            ]),
        };
        let live = controller(transport);
        futures::executor::block_on(TestController::refresh_metals(Rc::clone(&live)));

        let live = live.borrow();
        let snapshot = live.state().metals.as_ref().unwrap();
        assert_eq!(snapshot.price(Metal::Gold, Currency::Inr).unwrap().value(), 171175.0);
        assert_eq!(live.state().metals_source, Some(DataSource::Live));

        let rows = live.view().currency.borrow();
        let inr = rows.iter().find(|row| row.code == "INR").unwrap();
        assert_eq!((inr.rate.as_str(), inr.gold_equivalent.as_str()), ("83.5000", "171175 INR"));
        assert_eq!(rows[5].rate, "n/a");
        assert!(!live.view().last_update.borrow().contains("sample"));
    }

    #[test]
    fn late_currency_table_reconverts_live_metals() {
        let live = controller(ScriptedTransport::default());
        let mut live = live.borrow_mut();
        live.apply_metals(FetchOutcome {
            data: MetalSnapshot::from_usd_prices(0, [(Metal::Gold, 2000.0)]),
            source: DataSource::Live,
        });
        assert_eq!(live.state().metals.as_ref().unwrap().price(Metal::Gold, Currency::Eur), None);

        live.apply_currency(FetchOutcome {
            data: MockDataGenerator::fallback_currency_table("2024-05-01"),
            source: DataSource::Live,
        });
        assert_eq!(live.state().metals.as_ref().unwrap().price(Metal::Gold, Currency::Eur).unwrap().value(), 1840.0);
    }

    #[test]
    fn conversion_errors_reach_the_status_line() {
        let live = controller(ScriptedTransport::default());
        let mut live = live.borrow_mut();
        live.apply_currency(FetchOutcome {
            data: CurrencyTable::new("USD", "2024-05-01", [(Currency::Usd, 1.0)]),
            source: DataSource::Live,
        });
        live.apply_metals(FetchOutcome {
            data: MetalSnapshot::from_usd_prices(0, [(Metal::Gold, 2000.0)]),
            source: DataSource::Live,
        });

        assert!(live.view().status.borrow().starts_with("Data unavailable"));
        assert_eq!(live.view().rates.borrow()[0].sections[0].lines[0], "USD: 64 USD");
    }

    #[test]
    fn pages_request_their_refresh() {
        let dashboard = controller(ScriptedTransport::default());
        let mut dashboard = dashboard.borrow_mut();
        assert_eq!(dashboard.enter_page(Page::Home), PageAction::None);
        assert_eq!(dashboard.enter_page(Page::LiveRates), PageAction::RefreshMetals);
        assert_eq!(dashboard.enter_page(Page::Currency), PageAction::RefreshCurrency);
        assert!(!dashboard.chart().state().is_bound());

        assert_eq!(dashboard.enter_page(Page::Historical), PageAction::None);
        assert!(dashboard.chart().state().is_bound());
        assert_eq!(*dashboard.view().page.borrow(), Some(Page::Historical));
    }

    #[test]
    fn palladium_chart_reports_and_recovers() {
        let dashboard = controller(ScriptedTransport::default());
        let mut dashboard = dashboard.borrow_mut();

        dashboard.update_chart(Metal::Palladium, YearFilter::All);
        assert!(!dashboard.chart().state().is_bound());
        assert!(!dashboard.view().status.borrow().is_empty());

        dashboard.update_chart(Metal::Silver, YearFilter::Year(2022));
        assert!(dashboard.chart().state().is_bound());
        assert_eq!(dashboard.chart().backend().live, 1);
        assert!(dashboard.view().status.borrow().is_empty());
    }

    #[test]
    fn gold_rises_between_2019_and_2023() {
        let dashboard = controller(ScriptedTransport::default());
        let mut dashboard = dashboard.borrow_mut();

        dashboard.compare_years(Metal::Gold, 2019, 2023);
        let text = dashboard.view().comparison.borrow().clone();
        assert!(text.starts_with("Average gold in 2019: $"));
        assert!(text.contains("Difference: +$"));

        dashboard.compare_years(Metal::Gold, 2021, 2021);
        assert_eq!(*dashboard.view().comparison.borrow(), "Select different years!");

        dashboard.compare_years(Metal::Palladium, 2019, 2020);
        assert_eq!(*dashboard.view().comparison.borrow(), "No historical data for palladium");
    }
}
