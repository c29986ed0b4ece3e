use std::time::Duration;

use tokio::sync::oneshot;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{client_for, wire_country};
use crate::services::countries_client::{validate_code, DETAIL_FIELDS, LIST_FIELDS};
use crate::services::search::RegionSelector;
use crate::services::views::{Completion, DetailView, ListView, Loader, ViewState};
use crate::utils::error::FetchError;

async fn mount_list(server: &MockServer) {
    // deliberately unsorted; the client sorts by name
    let body = serde_json::json!([
        wire_country("PER", "Peru", "Republic of Peru", "Americas"),
        wire_country("EGY", "Egypt", "Arab Republic of Egypt", "Africa"),
        wire_country("JPN", "Japan", "Japan", "Asia"),
    ]);
    Mock::given(method("GET"))
        .and(path("/all"))
        .and(query_param("fields", LIST_FIELDS.join(",")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn list_view_loads_sorted_and_filters() {
    let server = MockServer::start().await;
    mount_list(&server).await;

    let mut view = ListView::mount(client_for(&server.uri()));
    assert!(view.state().is_loading());
    assert!(view.visible().is_none());
    view.settle().await;

    let names: Vec<&str> = view
        .countries()
        .expect("loaded")
        .iter()
        .map(|c| c.common_name.as_str())
        .collect();
    assert_eq!(names, vec!["Egypt", "Japan", "Peru"]);

    let regions: Vec<String> = view.region_options().iter().map(|r| r.to_string()).collect();
    assert_eq!(regions, vec!["All", "Africa", "Asia", "Americas"]);

    view.set_region(RegionSelector::Region("Asia".into()));
    let visible = view.visible().expect("loaded");
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].cca3, "JPN");

    view.set_region(RegionSelector::All);
    view.set_query("egy");
    let visible = view.visible().expect("loaded");
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].cca3, "EGY");

    view.set_query("");
    assert_eq!(view.visible().map(|v| v.len()), Some(3));
}

#[tokio::test]
async fn list_view_server_error_is_contained() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/all"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut view = ListView::mount(client_for(&server.uri()));
    view.settle().await;

    assert_eq!(
        view.state(),
        &ViewState::Failed("Request failed with status code 500".into())
    );
    assert!(view.visible().is_none());
    assert_eq!(view.region_options(), vec![RegionSelector::All]);
}

#[tokio::test]
async fn list_view_bad_payload_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/all"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let mut view = ListView::mount(client_for(&server.uri()));
    view.settle().await;
    let msg = view.state().error().expect("failed");
    assert!(msg.starts_with("Could not parse countries"), "{}", msg);
}

#[tokio::test]
async fn transport_failure_is_an_error() {
    // nothing listens on the discard port
    let mut view = ListView::mount(client_for("http://127.0.0.1:9"));
    view.settle().await;
    let msg = view.state().error().expect("failed");
    assert!(!msg.is_empty());
}

#[tokio::test]
async fn detail_view_loads_record() {
    let server = MockServer::start().await;
    let body = serde_json::json!([{
        "cca3": "PER",
        "name": { "common": "Peru", "official": "Republic of Peru" },
        "flags": { "svg": "https://flagcdn.com/pe.svg", "alt": "Peru flag with red and white stripes" },
        "region": "Americas",
        "subregion": "South America",
        "population": 32971846,
        "languages": { "aym": "Aymara", "que": "Quechua", "spa": "Spanish" },
        "capital": ["Lima"],
        "currencies": { "PEN": { "name": "Peruvian sol", "symbol": "S/ " } }
    }]);
    Mock::given(method("GET"))
        .and(path("/alpha/PER"))
        .and(query_param("fields", DETAIL_FIELDS.join(",")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let mut view = DetailView::mount(client_for(&server.uri()), "PER");
    view.settle().await;

    let c = view.record().expect("record");
    assert_eq!(c.official_name, "Republic of Peru");
    assert_eq!(c.subregion.as_deref(), Some("South America"));
    assert_eq!(c.capital_display(), "Lima");
    assert_eq!(c.currencies_display(), "Peruvian sol (S/)");
    assert_eq!(c.population_display(), "32,971,846");
}

#[tokio::test]
async fn detail_view_accepts_single_object() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/alpha/JPN"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(wire_country("JPN", "Japan", "Japan", "Asia")),
        )
        .mount(&server)
        .await;

    let mut view = DetailView::mount(client_for(&server.uri()), "JPN");
    view.settle().await;
    assert_eq!(view.record().map(|c| c.cca3.as_str()), Some("JPN"));
}

#[tokio::test]
async fn detail_view_empty_payload_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/alpha/XYZ"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/alpha/NUL"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/alpha/NON"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    for code in ["XYZ", "NUL", "NON"] {
        let mut view = DetailView::mount(client_for(&server.uri()), code);
        view.settle().await;
        assert_eq!(view.state(), &ViewState::Loaded(None), "code {}", code);
        assert!(view.record().is_none());
    }
}

#[tokio::test]
async fn superseded_fetch_is_dropped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/alpha/JPN"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([wire_country("JPN", "Japan", "Japan", "Asia")]))
                .set_delay(Duration::from_millis(400)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/alpha/EGY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([wire_country(
            "EGY",
            "Egypt",
            "Arab Republic of Egypt",
            "Africa"
        )])))
        .expect(1)
        .mount(&server)
        .await;

    let mut view = DetailView::mount(client_for(&server.uri()), "JPN");
    view.navigate("EGY");
    assert_eq!(view.generation(), 2);

    view.settle().await;
    assert_eq!(view.record().map(|c| c.cca3.as_str()), Some("EGY"));

    // let the Japan response arrive
    tokio::time::sleep(Duration::from_millis(800)).await;
    assert!(!view.poll());
    assert_eq!(view.code(), "EGY");
    assert_eq!(view.record().map(|c| c.cca3.as_str()), Some("EGY"));
}

#[tokio::test]
async fn navigate_to_same_code_does_not_refetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/alpha/EGY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([wire_country(
            "EGY",
            "Egypt",
            "Arab Republic of Egypt",
            "Africa"
        )])))
        .expect(1)
        .mount(&server)
        .await;

    let mut view = DetailView::mount(client_for(&server.uri()), "EGY");
    view.settle().await;
    view.navigate("EGY");
    assert_eq!(view.generation(), 1);
    assert!(view.record().is_some());
}

#[tokio::test]
async fn navigate_retries_after_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/alpha/EGY"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let mut view = DetailView::mount(client_for(&server.uri()), "EGY");
    view.settle().await;
    assert_eq!(view.state().error(), Some("Request failed with status code 503"));

    view.navigate("EGY");
    assert_eq!(view.generation(), 2);
    assert!(view.state().is_loading());
    view.settle().await;
    assert!(view.state().error().is_some());
}

#[tokio::test]
async fn loader_ignores_stale_generation() {
    let mut loader: Loader<u32> = Loader::new();
    assert_eq!(loader.start(async { Ok(1) }, "fallback"), 1);
    assert_eq!(loader.start(async { Ok(2) }, "fallback"), 2);

    let applied = loader.apply(Completion { generation: 1, outcome: Ok(99) });
    assert!(!applied);
    assert!(loader.state().is_loading());

    assert_eq!(loader.settle().await, &ViewState::Loaded(2));
}

#[tokio::test]
async fn loader_uses_fallback_for_empty_message() {
    let mut loader: Loader<u32> = Loader::new();
    loader.start(async { Err(FetchError::Transport(String::new())) }, "Failed to load countries");
    assert_eq!(
        loader.settle().await,
        &ViewState::Failed("Failed to load countries".into())
    );
}

#[tokio::test]
async fn dropping_loader_aborts_in_flight_fetch() {
    let (guard_tx, guard_rx) = oneshot::channel::<()>();
    let mut loader: Loader<u32> = Loader::new();
    loader.start(
        async move {
            let _guard = guard_tx;
            std::future::pending::<()>().await;
            Ok(0)
        },
        "fallback",
    );
    drop(loader);

    // the aborted task drops its future, and with it the sender
    let res = tokio::time::timeout(Duration::from_secs(1), guard_rx).await;
    assert!(matches!(res, Ok(Err(_))), "task still running after drop");
}

#[test]
fn code_validation() {
    assert_eq!(validate_code(" jpn "), Ok("JPN".to_string()));
    assert_eq!(validate_code("de"), Ok("DE".to_string()));
    assert!(validate_code("").is_err());
    assert!(validate_code("JAPAN").is_err());
    assert!(validate_code("J/N").is_err());
}
