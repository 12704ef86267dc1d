use wasm_bindgen::prelude::*;

use crate::app::App;
use crate::config::DashboardConfig;
use crate::domain::logging::LogComponent;

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod global_state;
pub mod infrastructure;
pub mod macros;
pub mod presentation;

/// Wires logging and the clock, then mounts the dashboard.
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let config = DashboardConfig::from_build_env();

    domain::logging::init_logger(Box::new(infrastructure::services::ConsoleLogger::new(config.log_level)));
    domain::logging::init_time_provider(Box::new(infrastructure::services::BrowserTimeProvider::new()));

    log_info!(
        LogComponent::Presentation("Initialize"),
        "🚀 Metals dashboard starting ({} metal prices)",
        if config.metals_api_key.is_some() { "live" } else { "sample" }
    );

    leptos::mount_to_body(move || leptos::view! { <App config=config /> });
}
