use crate::application::{CurrencyRow, DashboardView, MoversCard, OverviewCard, Page, RateCard};
use crate::global_state;
use leptos::SignalSet;

/// [`DashboardView`] that writes view models into the global Leptos signals.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalView;

impl DashboardView for SignalView {
    fn show_page(&self, page: Page) {
        global_state::active_page().set(page);
    }

    fn render_rates_grid(&self, cards: Vec<RateCard>) {
        global_state::rate_cards().set(cards);
    }

    fn render_overview(&self, cards: Vec<OverviewCard>) {
        global_state::overview_cards().set(cards);
    }

    fn render_currency_table(&self, rows: Vec<CurrencyRow>) {
        global_state::currency_rows().set(rows);
    }

    fn render_gainers_losers(&self, movers: MoversCard) {
        global_state::movers().set(movers);
    }

    fn render_last_update(&self, text: String) {
        global_state::last_update().set(text);
    }

    fn render_status(&self, text: String) {
        global_state::status().set(text);
    }

    fn render_comparison(&self, text: String) {
        global_state::comparison().set(text);
    }
}
