use crate::domain::{
    chart::YearFilter,
    market_data::{CurrencyTable, HistoricalSeries, Metal, MetalSnapshot},
};
use crate::infrastructure::http::rate_fetcher::DataSource;
use derive_more::Display;
use strum::{AsRefStr, EnumIter, EnumString};

/// Dashboard pages reachable from the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, EnumString, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Page {
    #[default]
    #[display(fmt = "Home")]
    Home,
    #[display(fmt = "Live Rates")]
    LiveRates,
    #[display(fmt = "Currency")]
    Currency,
    #[display(fmt = "Historical")]
    Historical,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Home, Page::LiveRates, Page::Currency, Page::Historical];

    /// The chart page has nothing for the search box to filter.
    pub fn is_searchable(&self) -> bool {
        !matches!(self, Page::Historical)
    }
}

/// The application's single state record; only the controller writes to it.
#[derive(Debug, Clone)]
pub struct AppState {
    pub metals: Option<MetalSnapshot>,
    pub metals_source: Option<DataSource>,
    pub currency: Option<CurrencyTable>,
    pub currency_source: Option<DataSource>,
    pub historical: HistoricalSeries,
    pub page: Page,
    pub chart_metal: Metal,
    pub chart_filter: YearFilter,
    /// Last pipeline error shown to the user; cleared by the next fetch cycle.
    pub status: Option<String>,
}

impl AppState {
    pub fn new(historical: HistoricalSeries) -> Self {
        Self {
            metals: None,
            metals_source: None,
            currency: None,
            currency_source: None,
            historical,
            page: Page::Home,
            chart_metal: Metal::Gold,
            chart_filter: YearFilter::All,
            status: None,
        }
    }
}
