pub mod rate_fetcher;

use crate::domain::{
    errors::{AppError, AppResult},
    logging::{LogComponent, get_logger},
};
use gloo_net::http::Request;

/// Minimal GET transport; rate fetching only ever needs the body text.
#[allow(async_fn_in_trait)]
pub trait HttpTransport {
    async fn get_text(&self, url: &str) -> AppResult<String>;
}

/// Browser `fetch` transport built on gloo-net.
#[derive(Clone, Debug, Default)]
pub struct GlooHttpClient;

impl GlooHttpClient {
    pub fn new() -> Self {
        Self
    }
}

impl HttpTransport for GlooHttpClient {
    async fn get_text(&self, url: &str) -> AppResult<String> {
        get_logger().debug(LogComponent::Infrastructure("HTTP"), &format!("🌐 GET: {url}"));

        let response = Request::get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| AppError::FetchFailure(format!("Request failed: {e:?}")))?;

        if !response.ok() {
            return Err(AppError::FetchFailure(format!(
                "HTTP error: {} - {}",
                response.status(),
                response.status_text()
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| AppError::FetchFailure(format!("Failed to read response: {e:?}")))?;

        get_logger().debug(
            LogComponent::Infrastructure("HTTP"),
            &format!("✅ GET response: {} bytes", text.len()),
        );

        Ok(text)
    }
}
