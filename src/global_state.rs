use crate::application::{CurrencyRow, MoversCard, OverviewCard, Page, RateCard};
use crate::global_signals;
use leptos::*;
use once_cell::sync::OnceCell;

/// Reactive mirror of what the dashboard currently shows.
pub struct Globals {
    pub active_page: RwSignal<Page>,
    pub menu_open: RwSignal<bool>,
    pub search_query: RwSignal<String>,
    pub rate_cards: RwSignal<Vec<RateCard>>,
    pub overview_cards: RwSignal<Vec<OverviewCard>>,
    pub currency_rows: RwSignal<Vec<CurrencyRow>>,
    pub movers: RwSignal<MoversCard>,
    pub last_update: RwSignal<String>,
    pub status: RwSignal<String>,
    pub comparison: RwSignal<String>,
    pub live_clock: RwSignal<String>,
}

static GLOBALS: OnceCell<Globals> = OnceCell::new();

pub fn globals() -> &'static Globals {
    GLOBALS.get_or_init(|| Globals {
        active_page: create_rw_signal(Page::Home),
        menu_open: create_rw_signal(false),
        search_query: create_rw_signal(String::new()),
        rate_cards: create_rw_signal(Vec::new()),
        overview_cards: create_rw_signal(Vec::new()),
        currency_rows: create_rw_signal(Vec::new()),
        movers: create_rw_signal(MoversCard::default()),
        last_update: create_rw_signal("Loading...".to_string()),
        status: create_rw_signal(String::new()),
        comparison: create_rw_signal(String::new()),
        live_clock: create_rw_signal(String::new()),
    })
}

global_signals! {
    pub active_page => active_page: Page,
    pub menu_open => menu_open: bool,
    pub search_query => search_query: String,
    pub rate_cards => rate_cards: Vec<RateCard>,
    pub overview_cards => overview_cards: Vec<OverviewCard>,
    pub currency_rows => currency_rows: Vec<CurrencyRow>,
    pub movers => movers: MoversCard,
    pub last_update => last_update: String,
    pub status => status: String,
    pub comparison => comparison: String,
    pub live_clock => live_clock: String,
}
