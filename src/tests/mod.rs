mod views;

use crate::models::country::CountryRecord;
use crate::services::countries_client::CountriesClient;

pub(crate) fn record(cca3: &str, common: &str, official: &str, region: Option<&str>) -> CountryRecord {
    CountryRecord {
        cca3: cca3.into(),
        common_name: common.into(),
        official_name: official.into(),
        flags: None,
        region: region.map(String::from),
        subregion: None,
        population: None,
        languages: None,
        capital: None,
        currencies: None,
    }
}

/// Egypt, Japan, Peru in name order.
pub(crate) fn three_countries() -> Vec<CountryRecord> {
    vec![
        record("EGY", "Egypt", "Arab Republic of Egypt", Some("Africa")),
        record("JPN", "Japan", "Japan", Some("Asia")),
        record("PER", "Peru", "Republic of Peru", Some("Americas")),
    ]
}

pub(crate) fn wire_country(cca3: &str, common: &str, official: &str, region: &str) -> serde_json::Value {
    serde_json::json!({
        "cca3": cca3,
        "name": { "common": common, "official": official, "nativeName": {} },
        "flags": { "svg": format!("https://flagcdn.com/{}.svg", cca3.to_lowercase()), "png": "", "alt": "" },
        "region": region,
        "population": 1000,
        "languages": { "eng": "English" }
    })
}

pub(crate) fn client_for(uri: &str) -> CountriesClient {
    CountriesClient::new(reqwest::Client::new(), uri)
}
