use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Deserialize, Debug, Clone)]
pub struct RcName {
    pub common: String,
    pub official: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct RcFlags {
    pub svg: Option<String>,
    pub png: Option<String>,
    pub alt: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RcCurrency {
    pub name: String,
    pub symbol: Option<String>,
}

/// One country as returned by REST Countries v3.1 with a `fields` projection.
/// Fields outside the projection are simply absent.
#[derive(Deserialize, Debug, Clone)]
pub struct RcCountry {
    pub cca3: String,
    pub name: RcName,
    pub flags: Option<RcFlags>,
    pub region: Option<String>,
    pub subregion: Option<String>,
    pub population: Option<u64>,
    pub languages: Option<BTreeMap<String, String>>,
    pub capital: Option<Vec<String>>,
    pub currencies: Option<BTreeMap<String, RcCurrency>>,
}

/// `/alpha/{code}` answers with an array for some projections and a bare
/// object for others.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum RcPayload {
    Many(Vec<RcCountry>),
    One(Box<RcCountry>),
}

impl RcPayload {
    pub fn into_first(self) -> Option<RcCountry> {
        match self {
            RcPayload::Many(v) => v.into_iter().next(),
            RcPayload::One(c) => Some(*c),
        }
    }
}
