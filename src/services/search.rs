//! Client-side search over an already fetched country list.
//!
//! Everything here is a pure function of its inputs; callers recompute the
//! visible subset whenever the list or the criteria change.

use std::cmp::Ordering;
use std::fmt;

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::models::country::CountryRecord;

pub const ALL_REGIONS: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RegionSelector {
    #[default]
    All,
    Region(String),
}

impl RegionSelector {
    /// Empty input and the literal "All" both select every region.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw == ALL_REGIONS {
            RegionSelector::All
        } else {
            RegionSelector::Region(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RegionSelector::All => ALL_REGIONS,
            RegionSelector::Region(r) => r,
        }
    }

    pub fn matches(&self, record: &CountryRecord) -> bool {
        match self {
            RegionSelector::All => true,
            RegionSelector::Region(r) => record.region.as_deref() == Some(r.as_str()),
        }
    }
}

impl fmt::Display for RegionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchCriteria {
    pub query: String,
    pub region: RegionSelector,
}

impl SearchCriteria {
    pub fn new(query: impl Into<String>, region: RegionSelector) -> Self {
        Self { query: query.into(), region }
    }
}

/// Lowercase, decompose (NFD) and drop combining marks: "Perú" -> "peru".
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

fn haystack(record: &CountryRecord) -> String {
    let mut hay = normalize(&record.common_name);
    hay.push('\n');
    hay.push_str(&normalize(&record.official_name));
    hay
}

/// `normalized_query` must already be trimmed and normalized.
fn passes_text(record: &CountryRecord, normalized_query: &str) -> bool {
    normalized_query.is_empty() || haystack(record).contains(normalized_query)
}

pub fn visible_set<'a>(list: &'a [CountryRecord], criteria: &SearchCriteria) -> Vec<&'a CountryRecord> {
    let nq = normalize(criteria.query.trim());
    list.iter()
        .filter(|c| criteria.region.matches(c) && passes_text(c, &nq))
        .collect()
}

/// "All" first, then each distinct non-empty region in first-seen order.
pub fn region_options(list: &[CountryRecord]) -> Vec<RegionSelector> {
    let mut out = vec![RegionSelector::All];
    for region in list.iter().filter_map(|c| c.region.as_deref()) {
        if region.is_empty() {
            continue;
        }
        let seen = out
            .iter()
            .any(|o| matches!(o, RegionSelector::Region(r) if r == region));
        if !seen {
            out.push(RegionSelector::Region(region.to_string()));
        }
    }
    out
}

/// Name ordering that ignores case and accents, so "Åland Islands" sorts
/// with the A's. Ties fall back to the raw names to keep the order total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    normalize(a).cmp(&normalize(b)).then_with(|| a.cmp(b))
}

pub fn sort_by_name(list: &mut [CountryRecord]) {
    list.sort_by(|a, b| compare_names(&a.common_name, &b.common_name));
}
