use reqwest::{Client, StatusCode};
use tracing::{info, warn};

use crate::models::country::CountryRecord;
use crate::services::search::sort_by_name;
use crate::types::external::{RcCountry, RcPayload};
use crate::utils::error::FetchError;

pub const DEFAULT_API_BASE: &str = "https://restcountries.com/v3.1";

pub const LIST_FIELDS: &[&str] = &["name", "cca3", "flags", "region", "population", "languages"];

pub const DETAIL_FIELDS: &[&str] = &[
    "name", "cca3", "flags", "region", "subregion", "population", "languages", "capital", "currencies",
];

/// Read-only access to the REST Countries provider.
#[derive(Clone, Debug)]
pub struct CountriesClient {
    http: Client,
    base_url: String,
}

impl CountriesClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, url: &str, fields: &[&str]) -> Result<reqwest::Response, FetchError> {
        let resp = self
            .http
            .get(url)
            .query(&[("fields", fields.join(","))])
            .send()
            .await
            .map_err(|e| {
                warn!("request to {} failed: {}", url, e);
                FetchError::from(e)
            })?;

        let status = resp.status();
        if !status.is_success() {
            warn!("{} answered {}", url, status);
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(resp)
    }

    /// Every country, sorted by common name.
    pub async fn fetch_all(&self) -> Result<Vec<CountryRecord>, FetchError> {
        let url = format!("{}/all", self.base_url);
        let raw: Vec<RcCountry> = self
            .get(&url, LIST_FIELDS)
            .await?
            .json()
            .await
            .map_err(|e| FetchError::Decode(format!("Could not parse countries: {}", e)))?;

        let mut countries: Vec<CountryRecord> = raw.into_iter().map(CountryRecord::from).collect();
        sort_by_name(&mut countries);
        info!("fetched {} countries", countries.len());
        Ok(countries)
    }

    /// First record for `code`, or `None` when the provider returns nothing.
    pub async fn fetch_by_code(&self, code: &str) -> Result<Option<CountryRecord>, FetchError> {
        let url = format!("{}/alpha/{}", self.base_url, code);
        let resp = self.get(&url, DETAIL_FIELDS).await?;
        let no_content = resp.status() == StatusCode::NO_CONTENT;
        let body = resp.bytes().await.map_err(FetchError::from)?;

        if no_content || body.iter().all(u8::is_ascii_whitespace) {
            info!("no country for code {}", code);
            return Ok(None);
        }

        let payload: Option<RcPayload> = serde_json::from_slice(&body)
            .map_err(|e| FetchError::Decode(format!("Could not parse country: {}", e)))?;

        let record = payload.and_then(RcPayload::into_first).map(CountryRecord::from);
        match &record {
            Some(c) => info!("fetched country {}", c.cca3),
            None => info!("no country for code {}", code),
        }
        Ok(record)
    }
}

/// Country codes are short ASCII alphanumerics (cca2, cca3 or ccn3).
pub fn validate_code(code: &str) -> Result<String, String> {
    let code = code.trim();
    if code.is_empty() {
        return Err("country code is required".into());
    }
    if !(2..=3).contains(&code.len()) || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err("country code must be 2-3 letters or digits (e.g., JPN)".into());
    }
    Ok(code.to_ascii_uppercase())
}
