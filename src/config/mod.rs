use reqwest::Client;
use std::env;
use tracing::info;

use crate::services::countries_client::{CountriesClient, DEFAULT_API_BASE};

#[derive(Clone)]
pub struct AppState {
    pub countries: CountriesClient,
}

pub struct AppConfig {
    pub port: u16,
    pub api_base: String,
    pub external_timeout_ms: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let port: u16 = env::var("PORT").unwrap_or_else(|_| "8080".into()).parse()?;
        let api_base = env::var("COUNTRIES_API_BASE")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.into());
        let external_timeout_ms: u64 = env::var("EXTERNAL_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(12_000);
        Ok(Self { port, api_base, external_timeout_ms })
    }

    pub fn build_state(&self) -> Result<AppState, anyhow::Error> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_millis(self.external_timeout_ms))
            .build()?;

        info!("countries provider: {}", self.api_base);
        Ok(AppState {
            countries: CountriesClient::new(http, self.api_base.clone()),
        })
    }
}
