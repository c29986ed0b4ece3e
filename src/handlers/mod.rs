pub mod api;
pub mod pages;

use serde::Deserialize;
use tracing::debug;

use crate::services::search::RegionSelector;
use crate::services::views::ListView;

#[derive(Deserialize, Default, Debug)]
pub struct SearchParams {
    pub q: Option<String>,
    pub region: Option<String>,
}

/// Copy query-string criteria onto a loaded list view. A region the list
/// does not contain falls back to "All".
pub fn apply_search(view: &mut ListView, p: &SearchParams) {
    view.set_query(p.q.clone().unwrap_or_default());

    let region = RegionSelector::parse(p.region.as_deref().unwrap_or_default());
    if view.region_options().contains(&region) {
        view.set_region(region);
    } else {
        debug!("unknown region {:?}, showing all", region.as_str());
        view.set_region(RegionSelector::All);
    }
}
