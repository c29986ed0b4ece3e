//! Per-view fetch state.
//!
//! Each view owns a [`Loader`]. Fetches run as tokio tasks and report back
//! over a channel owned by the loader, tagged with the generation that was
//! current when they started. Only a completion whose generation is still
//! current is applied, so the last-initiated fetch always wins and a
//! superseded result is dropped without touching state.

use std::future::Future;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::models::country::CountryRecord;
use crate::services::countries_client::CountriesClient;
use crate::services::search::{region_options, visible_set, RegionSelector, SearchCriteria};
use crate::utils::error::FetchError;

pub const LIST_FALLBACK: &str = "Failed to load countries";
pub const DETAIL_FALLBACK: &str = "Failed to load country";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState<T> {
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            ViewState::Loaded(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct Completion<T> {
    pub generation: u64,
    pub outcome: Result<T, String>,
}

#[derive(Debug)]
pub struct Loader<T> {
    generation: u64,
    state: ViewState<T>,
    tx: mpsc::UnboundedSender<Completion<T>>,
    rx: mpsc::UnboundedReceiver<Completion<T>>,
    in_flight: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Default for Loader<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + 'static> Loader<T> {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            generation: 0,
            state: ViewState::Loading,
            tx,
            rx,
            in_flight: None,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> &ViewState<T> {
        &self.state
    }

    /// Start a fetch that supersedes any earlier one. The earlier task is
    /// detached rather than aborted; its result is discarded on arrival.
    pub fn start<F>(&mut self, fetch: F, fallback: &'static str) -> u64
    where
        F: Future<Output = Result<T, FetchError>> + Send + 'static,
    {
        self.generation += 1;
        let generation = self.generation;
        self.state = ViewState::Loading;

        let tx = self.tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let outcome = fetch.await.map_err(|e| e.user_message(fallback));
            // send fails only when the view is gone
            let _ = tx.send(Completion { generation, outcome });
        }));
        generation
    }

    /// Apply a completion if it belongs to the current generation.
    /// Returns whether state changed.
    pub fn apply(&mut self, completion: Completion<T>) -> bool {
        if completion.generation != self.generation {
            debug!(
                "dropping stale result (generation {} superseded by {})",
                completion.generation, self.generation
            );
            return false;
        }
        self.in_flight = None;
        self.state = match completion.outcome {
            Ok(v) => ViewState::Loaded(v),
            Err(msg) => ViewState::Failed(msg),
        };
        true
    }

    /// Apply every completion that has already arrived, without waiting.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(c) = self.rx.try_recv() {
            changed |= self.apply(c);
        }
        changed
    }

    /// Wait until the current fetch has resolved.
    pub async fn settle(&mut self) -> &ViewState<T> {
        self.poll();
        while self.state.is_loading() && self.in_flight.is_some() {
            match self.rx.recv().await {
                Some(c) => {
                    self.apply(c);
                }
                None => break,
            }
        }
        &self.state
    }
}

impl<T> Drop for Loader<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

/// The searchable list of all countries.
#[derive(Debug)]
pub struct ListView {
    loader: Loader<Vec<CountryRecord>>,
    criteria: SearchCriteria,
}

impl ListView {
    pub fn mount(client: CountriesClient) -> Self {
        let mut loader = Loader::new();
        loader.start(async move { client.fetch_all().await }, LIST_FALLBACK);
        Self {
            loader,
            criteria: SearchCriteria::default(),
        }
    }

    pub fn state(&self) -> &ViewState<Vec<CountryRecord>> {
        self.loader.state()
    }

    pub fn countries(&self) -> Option<&[CountryRecord]> {
        self.loader.state().loaded().map(|v| v.as_slice())
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.criteria.query = query.into();
    }

    pub fn set_region(&mut self, region: RegionSelector) {
        self.criteria.region = region;
    }

    /// `None` until the list has loaded.
    pub fn visible(&self) -> Option<Vec<&CountryRecord>> {
        self.countries().map(|list| visible_set(list, &self.criteria))
    }

    pub fn region_options(&self) -> Vec<RegionSelector> {
        region_options(self.countries().unwrap_or(&[]))
    }

    pub fn poll(&mut self) -> bool {
        self.loader.poll()
    }

    pub async fn settle(&mut self) -> &ViewState<Vec<CountryRecord>> {
        self.loader.settle().await
    }
}

/// One country, keyed by its code.
#[derive(Debug)]
pub struct DetailView {
    client: CountriesClient,
    code: String,
    loader: Loader<Option<CountryRecord>>,
}

impl DetailView {
    pub fn mount(client: CountriesClient, code: impl Into<String>) -> Self {
        let mut view = Self {
            client,
            code: String::new(),
            loader: Loader::new(),
        };
        view.load(code.into());
        view
    }

    fn load(&mut self, code: String) {
        let client = self.client.clone();
        let key = code.clone();
        self.code = code;
        self.loader
            .start(async move { client.fetch_by_code(&key).await }, DETAIL_FALLBACK);
    }

    /// Switch to another code. Re-navigating to the current code only
    /// refetches after a failure.
    pub fn navigate(&mut self, code: impl Into<String>) {
        let code = code.into();
        if code == self.code && self.loader.state().error().is_none() {
            return;
        }
        self.load(code);
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn generation(&self) -> u64 {
        self.loader.generation()
    }

    pub fn state(&self) -> &ViewState<Option<CountryRecord>> {
        self.loader.state()
    }

    pub fn record(&self) -> Option<&CountryRecord> {
        self.loader.state().loaded().and_then(|r| r.as_ref())
    }

    pub fn poll(&mut self) -> bool {
        self.loader.poll()
    }

    pub async fn settle(&mut self) -> &ViewState<Option<CountryRecord>> {
        self.loader.settle().await
    }
}
