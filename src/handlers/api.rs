use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use crate::config::AppState;
use crate::handlers::{apply_search, SearchParams};
use crate::models::country::CountryRecord;
use crate::services::countries_client::validate_code;
use crate::services::views::{DetailView, ListView, ViewState};
use crate::utils::error::ApiError;

#[derive(Serialize)]
pub struct CountryList {
    pub total: usize,
    pub showing: usize,
    pub query: String,
    pub region: String,
    pub regions: Vec<String>,
    pub countries: Vec<CountryRecord>,
}

fn validate_search_params(p: &SearchParams) -> Result<(), ApiError> {
    if let Some(q) = p.q.as_deref() {
        if q.chars().count() > 200 {
            return Err(ApiError::Validation("q must be at most 200 characters".into()));
        }
    }
    Ok(())
}

pub async fn list_countries(
    State(state): State<AppState>,
    Query(p): Query<SearchParams>,
) -> Result<impl IntoResponse, ApiError> {
    validate_search_params(&p)?;

    let mut view = ListView::mount(state.countries.clone());
    view.settle().await;
    if let ViewState::Failed(msg) = view.state() {
        return Err(ApiError::External(msg.clone()));
    }
    apply_search(&mut view, &p);

    let countries: Vec<CountryRecord> = view
        .visible()
        .unwrap_or_default()
        .into_iter()
        .cloned()
        .collect();
    let body = CountryList {
        total: view.countries().map(|c| c.len()).unwrap_or(0),
        showing: countries.len(),
        query: view.criteria().query.clone(),
        region: view.criteria().region.to_string(),
        regions: view.region_options().iter().map(|r| r.to_string()).collect(),
        countries,
    };

    Ok((StatusCode::OK, Json(body)))
}

pub async fn get_country(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let code = validate_code(&code).map_err(ApiError::Validation)?;

    let mut view = DetailView::mount(state.countries.clone(), code);
    view.settle().await;
    match view.state() {
        ViewState::Failed(msg) => Err(ApiError::External(msg.clone())),
        ViewState::Loaded(Some(c)) => Ok((StatusCode::OK, Json(c.clone()))),
        _ => Err(ApiError::NotFound(view.code().to_string())),
    }
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "ok": true })))
}
