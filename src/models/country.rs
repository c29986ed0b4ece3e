use serde::Serialize;
use std::collections::BTreeMap;

use crate::types::external::{RcCountry, RcCurrency, RcFlags};

/// Placeholder shown for any value the provider did not supply.
pub const MISSING: &str = "—";

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Flags {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub svg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub png: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Currency {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CountryRecord {
    pub cca3: String,
    pub common_name: String,
    pub official_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<Flags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subregion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capital: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currencies: Option<BTreeMap<String, Currency>>,
}

fn clean(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl From<RcFlags> for Flags {
    fn from(f: RcFlags) -> Self {
        Flags {
            svg: clean(f.svg),
            png: clean(f.png),
            alt: clean(f.alt),
        }
    }
}

impl From<RcCurrency> for Currency {
    fn from(c: RcCurrency) -> Self {
        Currency {
            name: c.name.trim().to_string(),
            symbol: clean(c.symbol),
        }
    }
}

impl From<RcCountry> for CountryRecord {
    fn from(c: RcCountry) -> Self {
        CountryRecord {
            cca3: c.cca3.trim().to_string(),
            common_name: c.name.common.trim().to_string(),
            official_name: c.name.official.trim().to_string(),
            flags: c.flags.map(Flags::from),
            region: clean(c.region),
            subregion: clean(c.subregion),
            population: c.population,
            languages: c.languages,
            capital: c.capital,
            currencies: c
                .currencies
                .map(|m| m.into_iter().map(|(k, v)| (k, Currency::from(v))).collect()),
        }
    }
}

impl CountryRecord {
    pub fn flag_svg(&self) -> Option<&str> {
        self.flags.as_ref().and_then(|f| f.svg.as_deref())
    }

    pub fn flag_alt(&self) -> String {
        self.flags
            .as_ref()
            .and_then(|f| f.alt.clone())
            .unwrap_or_else(|| format!("{} flag", self.common_name))
    }

    pub fn population_display(&self) -> String {
        self.population
            .map(group_thousands)
            .unwrap_or_else(|| MISSING.into())
    }

    pub fn languages_display(&self) -> String {
        let names: Vec<&str> = self
            .languages
            .iter()
            .flat_map(|m| m.values())
            .map(|s| s.as_str())
            .filter(|s| !s.is_empty())
            .collect();
        join_or_missing(&names)
    }

    pub fn capital_display(&self) -> String {
        let caps: Vec<&str> = self
            .capital
            .iter()
            .flatten()
            .map(|s| s.as_str())
            .filter(|s| !s.is_empty())
            .collect();
        join_or_missing(&caps)
    }

    pub fn currencies_display(&self) -> String {
        let items: Vec<String> = self
            .currencies
            .iter()
            .flat_map(|m| m.values())
            .map(|c| match c.symbol.as_deref() {
                Some(sym) => format!("{} ({})", c.name, sym),
                None => c.name.clone(),
            })
            .collect();
        let refs: Vec<&str> = items.iter().map(|s| s.as_str()).collect();
        join_or_missing(&refs)
    }

    pub fn region_display(&self) -> &str {
        self.region.as_deref().unwrap_or(MISSING)
    }

    pub fn subregion_display(&self) -> &str {
        self.subregion.as_deref().unwrap_or(MISSING)
    }
}

fn join_or_missing(parts: &[&str]) -> String {
    if parts.is_empty() {
        MISSING.into()
    } else {
        parts.join(", ")
    }
}

/// 1234567 -> "1,234,567"
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
