use gloo_timers::callback::Interval;
use leptos::html::Canvas;
use leptos::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;

use crate::{
    application::{DashboardController, Page, PageAction, SearchFilter, Searchable},
    config::DashboardConfig,
    domain::{
        chart::YearFilter,
        logging::{LogComponent, get_time_provider},
        market_data::{HISTORY_YEARS, Metal},
    },
    global_state,
    infrastructure::{
        http::{GlooHttpClient, rate_fetcher::RateFetcher},
        rendering::CanvasLineChart,
    },
    log_info, log_warn,
    presentation::SignalView,
};

pub const CHART_CANVAS_ID: &str = "historicalChart";
const CHART_WIDTH: u32 = 800;
const CHART_HEIGHT: u32 = 400;

type BrowserDashboard = DashboardController<GlooHttpClient, SignalView, CanvasLineChart>;
type SharedDashboard = Rc<RefCell<BrowserDashboard>>;

const STYLES: &str = r#"
.metals-dashboard {
    font-family: 'SF Pro Display', -apple-system, BlinkMacSystemFont, sans-serif;
    background: linear-gradient(135deg, #0f0f0f 0%, #1a1a1a 100%);
    min-height: 100vh;
    color: white;
}

.navbar {
    display: flex;
    align-items: center;
    justify-content: space-between;
    padding: 12px 24px;
    background: #111;
    border-bottom: 1px solid #FFD700;
}

.brand { font-size: 20px; font-weight: 700; color: #FFD700; }

.nav-menu { display: flex; gap: 18px; list-style: none; margin: 0; padding: 0; }
.nav-menu a { color: #ddd; text-decoration: none; }
.nav-menu a.active { color: #FFD700; }

.menu-toggle {
    display: none;
    background: none;
    border: 1px solid #555;
    color: white;
    font-size: 18px;
    border-radius: 6px;
}

@media (max-width: 720px) {
    .menu-toggle { display: block; }
    .nav-menu { display: none; flex-direction: column; }
    .nav-menu.active { display: flex; }
}

.header {
    display: flex;
    flex-wrap: wrap;
    gap: 16px;
    align-items: center;
    padding: 12px 24px;
    font-size: 13px;
    color: #aaa;
}

.status { color: #ff6b6b; }

.search-input {
    margin-left: auto;
    padding: 8px 12px;
    border-radius: 6px;
    border: 1px solid #444;
    background: #222;
    color: white;
}

.page { display: none; padding: 0 24px 24px; }
.page.active { display: block; }

.cards {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
    gap: 16px;
}

.card {
    background: rgba(255, 255, 255, 0.05);
    border: 1px solid rgba(255, 215, 0, 0.3);
    border-radius: 10px;
    padding: 16px;
}

.card h3 { margin-top: 0; color: #FFD700; }
.card h4 { margin-bottom: 4px; color: #ccc; }
.card p { margin: 2px 0; }

.currency-table { width: 100%; border-collapse: collapse; }
.currency-table th, .currency-table td { padding: 8px; border-bottom: 1px solid #333; text-align: left; }

.chart-controls { display: flex; gap: 12px; margin-bottom: 12px; }
.chart-controls select, .chart-controls button {
    background: #222;
    color: white;
    border: 1px solid #555;
    border-radius: 6px;
    padding: 6px 10px;
}

.compare-result { white-space: pre-line; }

.demo-note { font-size: 11px; color: #888; }

.hidden { display: none; }
"#;

/// Root component: builds the controller, starts the timers and lays out every page.
#[component]
pub fn App(config: DashboardConfig) -> impl IntoView {
    let fetcher = RateFetcher::new(GlooHttpClient::new(), config.clone());
    let backend = CanvasLineChart::new(CHART_CANVAS_ID, CHART_WIDTH, CHART_HEIGHT);
    let dashboard: SharedDashboard =
        Rc::new(RefCell::new(DashboardController::new(fetcher, SignalView, backend)));

    let initial = Rc::clone(&dashboard);
    spawn_local(async move {
        futures::future::join(
            BrowserDashboard::refresh_metals(Rc::clone(&initial)),
            BrowserDashboard::refresh_currency(Rc::clone(&initial)),
        )
        .await;
        log_info!(LogComponent::Presentation("App"), "✅ Initial data loaded");
    });

    start_timers(Rc::clone(&dashboard), &config);

    view! {
        <style>{STYLES}</style>
        <div class="metals-dashboard">
            <NavBar dashboard=Rc::clone(&dashboard) />
            <Header />
            <HomePage />
            <LiveRatesPage />
            <CurrencyPage />
            <HistoricalPage dashboard=dashboard />
        </div>
    }
}

fn start_timers(dashboard: SharedDashboard, config: &DashboardConfig) {
    tick_clock();
    Interval::new(config.clock_interval.as_millis() as u32, tick_clock).forget();
    Interval::new(config.refresh_interval.as_millis() as u32, move || {
        spawn_local(BrowserDashboard::refresh_metals(Rc::clone(&dashboard)));
    })
    .forget();
}

fn tick_clock() {
    let clock = get_time_provider();
    global_state::live_clock().set(format!("Live: {}", clock.format_timestamp(clock.current_timestamp())));
}

fn navigate(dashboard: &SharedDashboard, page: Page) {
    global_state::menu_open().set(false);
    let action = dashboard.borrow_mut().enter_page(page);
    match action {
        PageAction::None => {}
        PageAction::RefreshMetals => spawn_local(BrowserDashboard::refresh_metals(Rc::clone(dashboard))),
        PageAction::RefreshCurrency => spawn_local(BrowserDashboard::refresh_currency(Rc::clone(dashboard))),
    }
}

/// Re-evaluated whenever the query, the page or the element itself changes.
fn hidden_by_search(item: &impl Searchable) -> bool {
    let filter = SearchFilter::new(&global_state::search_query().get());
    !filter.is_visible(global_state::active_page().get(), item)
}

#[component]
fn NavBar(dashboard: SharedDashboard) -> impl IntoView {
    let links = Page::ALL
        .into_iter()
        .map(|page| {
            let dashboard = Rc::clone(&dashboard);
            view! {
                <li>
                    <a
                        href=format!("#{}", page.as_ref())
                        class:active=move || global_state::active_page().get() == page
                        on:click=move |ev| {
                            ev.prevent_default();
                            navigate(&dashboard, page);
                        }
                    >
                        {page.to_string()}
                    </a>
                </li>
            }
        })
        .collect_view();

    view! {
        <nav class="navbar">
            <div class="brand">"🪙 Metals Dashboard"</div>
            <button
                class="menu-toggle"
                on:click=move |_| global_state::menu_open().update(|open| *open = !*open)
            >
                "☰"
            </button>
            <ul class="nav-menu" class:active=move || global_state::menu_open().get()>
                {links}
            </ul>
        </nav>
    }
}

#[component]
fn Header() -> impl IntoView {
    view! {
        <div class="header">
            <span id="liveTime">{move || global_state::live_clock().get()}</span>
            <span id="lastUpdate">{move || global_state::last_update().get()}</span>
            <span class="status" class:hidden=move || global_state::status().with(String::is_empty)>
                {move || global_state::status().get()}
            </span>
            <input
                id="searchInput"
                class="search-input"
                type="search"
                placeholder="Search metals, currencies..."
                prop:value=move || global_state::search_query().get()
                on:input=move |ev| global_state::search_query().set(event_target_value(&ev))
            />
        </div>
    }
}

#[component]
fn HomePage() -> impl IntoView {
    view! {
        <section id="home" class="page" class:active=move || global_state::active_page().get() == Page::Home>
            <h2>"Market Overview"</h2>
            <div class="cards">
                <For
                    each=move || global_state::overview_cards().get()
                    key=|card| card.search_text()
                    children=move |card| {
                        let lines = card.lines.iter().map(|line| view! { <p>{line.clone()}</p> }).collect_view();
                        let title = card.title.clone();
                        view! {
                            <div class="card" class:hidden=move || hidden_by_search(&card)>
                                <h3>{title}</h3>
                                {lines}
                            </div>
                        }
                    }
                />
                <MoversCardView />
            </div>
        </section>
    }
}

#[component]
fn MoversCardView() -> impl IntoView {
    view! {
        <div class="card" class:hidden=move || global_state::movers().with(|movers| hidden_by_search(movers))>
            <h3>"24h Movers"</h3>
            <p>{move || global_state::movers().with(|movers| movers.gainers.clone())}</p>
            <p>{move || global_state::movers().with(|movers| movers.losers.clone())}</p>
            <p class="demo-note">"Demo data"</p>
        </div>
    }
}

#[component]
fn LiveRatesPage() -> impl IntoView {
    view! {
        <section
            id="live-rates"
            class="page"
            class:active=move || global_state::active_page().get() == Page::LiveRates
        >
            <h2>"Live Rates"</h2>
            <div class="cards">
                <For
                    each=move || global_state::rate_cards().get()
                    key=|card| card.search_text()
                    children=move |card| {
                        let sections = card
                            .sections
                            .iter()
                            .map(|section| {
                                let lines =
                                    section.lines.iter().map(|line| view! { <p>{line.clone()}</p> }).collect_view();
                                view! {
                                    <h4>{section.heading.clone()}</h4>
                                    {lines}
                                }
                            })
                            .collect_view();
                        let title = card.title.clone();
                        view! {
                            <div class="card" class:hidden=move || hidden_by_search(&card)>
                                <h3>{title}</h3>
                                {sections}
                            </div>
                        }
                    }
                />
            </div>
        </section>
    }
}

#[component]
fn CurrencyPage() -> impl IntoView {
    view! {
        <section
            id="currency"
            class="page"
            class:active=move || global_state::active_page().get() == Page::Currency
        >
            <h2>"Currency Rates"</h2>
            <table id="currencyTable" class="currency-table">
                <thead>
                    <tr>
                        <th>"Currency"</th>
                        <th>"Rate (per USD)"</th>
                        <th>"Gold (1 oz)"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || global_state::currency_rows().get()
                        key=|row| row.search_text()
                        children=move |row| {
                            let (code, rate, gold) = (row.code.clone(), row.rate.clone(), row.gold_equivalent.clone());
                            view! {
                                <tr class:hidden=move || hidden_by_search(&row)>
                                    <td>{code}</td>
                                    <td>{rate}</td>
                                    <td>{gold}</td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </section>
    }
}

#[component]
fn HistoricalPage(dashboard: SharedDashboard) -> impl IntoView {
    let canvas_ref = create_node_ref::<Canvas>();
    let chart_metal = create_rw_signal(Metal::Gold);
    let chart_year = create_rw_signal(YearFilter::All);
    let compare_year1 = create_rw_signal(HISTORY_YEARS[0]);
    let compare_year2 = create_rw_signal(HISTORY_YEARS[HISTORY_YEARS.len() - 1]);

    let redraw_chart = {
        let dashboard = Rc::clone(&dashboard);
        move || {
            dashboard
                .borrow_mut()
                .update_chart(chart_metal.get_untracked(), chart_year.get_untracked())
        }
    };

    // First draw once the canvas is mounted.
    create_effect({
        let redraw_chart = redraw_chart.clone();
        move |_| {
            if canvas_ref.get().is_some() {
                redraw_chart();
            }
        }
    });

    let on_metal_change = {
        let redraw_chart = redraw_chart.clone();
        move |event: ev::Event| match Metal::from_str(&event_target_value(&event)) {
            Ok(metal) => {
                chart_metal.set(metal);
                redraw_chart();
            }
            Err(err) => {
                log_warn!(LogComponent::Presentation("HistoricalPage"), "Unknown metal: {err}");
            }
        }
    };

    let on_year_change = move |event: ev::Event| match YearFilter::from_str(&event_target_value(&event)) {
        Ok(filter) => {
            chart_year.set(filter);
            redraw_chart();
        }
        Err(err) => {
            log_warn!(LogComponent::Presentation("HistoricalPage"), "{err}");
        }
    };

    let on_compare = move |_: ev::MouseEvent| {
        dashboard.borrow_mut().compare_years(
            chart_metal.get_untracked(),
            compare_year1.get_untracked(),
            compare_year2.get_untracked(),
        )
    };

    let year_options = |selected: u16| {
        HISTORY_YEARS
            .into_iter()
            .map(|year| view! { <option value=year.to_string() selected={year == selected}>{year}</option> })
            .collect_view()
    };
    let compare_select = |signal: RwSignal<u16>| {
        view! {
            <select on:change=move |ev| {
                if let Ok(year) = event_target_value(&ev).parse::<u16>() {
                    signal.set(year);
                }
            }>
                {year_options(signal.get_untracked())}
            </select>
        }
    };

    view! {
        <section
            id="historical"
            class="page"
            class:active=move || global_state::active_page().get() == Page::Historical
        >
            <h2>"Historical Prices"</h2>
            <div class="chart-controls">
                <select id="metalSelect" on:change=on_metal_change>
                    {Metal::ALL
                        .into_iter()
                        .map(|metal| view! { <option value=metal.as_ref().to_string()>{metal.to_string()}</option> })
                        .collect_view()}
                </select>
                <select id="yearSelect" on:change=on_year_change>
                    <option value="all" selected=true>"All Years"</option>
                    {HISTORY_YEARS
                        .into_iter()
                        .map(|year| view! { <option value=year.to_string()>{year}</option> })
                        .collect_view()}
                </select>
            </div>
            <canvas id=CHART_CANVAS_ID node_ref=canvas_ref width=CHART_WIDTH height=CHART_HEIGHT></canvas>
            <div class="chart-controls">
                {compare_select(compare_year1)}
                {compare_select(compare_year2)}
                <button on:click=on_compare>"Compare"</button>
            </div>
            <p id="compareResult" class="compare-result">{move || global_state::comparison().get()}</p>
        </section>
    }
}
