use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
};

use crate::config::AppState;
use crate::handlers::{apply_search, SearchParams};
use crate::models::country::CountryRecord;
use crate::services::countries_client::validate_code;
use crate::services::views::{DetailView, ListView, ViewState};
use crate::utils::html::{escape, layout, NavItem};

type Page = (StatusCode, Html<String>);

fn page(status: StatusCode, title: &str, active: NavItem, content: &str) -> Page {
    (status, Html(layout(title, active, content)))
}

pub async fn home(State(state): State<AppState>, Query(p): Query<SearchParams>) -> Page {
    let mut view = ListView::mount(state.countries.clone());
    view.settle().await;
    apply_search(&mut view, &p);
    render_home(&view)
}

pub fn render_home(view: &ListView) -> Page {
    let countries = match view.state() {
        ViewState::Loading => {
            return page(
                StatusCode::OK,
                "Home",
                NavItem::Home,
                &format!("{}<div class=\"center\">Loading country data…</div>", search_form(view)),
            );
        }
        ViewState::Failed(msg) => {
            return page(
                StatusCode::BAD_GATEWAY,
                "Home",
                NavItem::Home,
                &format!(
                    "{}<div class=\"center error\">Failed to load data: {}</div>",
                    search_form(view),
                    escape(msg)
                ),
            );
        }
        ViewState::Loaded(countries) => countries,
    };

    let visible = view.visible().unwrap_or_default();
    let mut body = search_form(view);
    body.push_str(&format!(
        "<p>Showing <strong>{}</strong> of {} countries</p>\n",
        visible.len(),
        countries.len()
    ));

    if visible.is_empty() {
        body.push_str("<div class=\"center\">No countries match your search.</div>");
    } else {
        body.push_str("<ul class=\"grid\">\n");
        for c in visible {
            body.push_str(&country_card(c));
        }
        body.push_str("</ul>");
    }
    page(StatusCode::OK, "Home", NavItem::Home, &body)
}

fn search_form(view: &ListView) -> String {
    let criteria = view.criteria();
    let mut options = String::new();
    for r in view.region_options() {
        let selected = if r == criteria.region { " selected" } else { "" };
        options.push_str(&format!(
            "<option value=\"{v}\"{selected}>{v}</option>",
            v = escape(r.as_str()),
            selected = selected
        ));
    }
    format!(
        r#"<form method="get" action="/">
    <input type="search" name="q" value="{q}" placeholder="Search by country (e.g., Egypt, Japan, Peru)…">
    <select name="region" onchange="this.form.submit()">{options}</select>
    <button type="submit">Search</button>
</form>
"#,
        q = escape(&criteria.query),
        options = options
    )
}

fn flag_img(c: &CountryRecord, lazy: bool) -> String {
    match c.flag_svg() {
        Some(src) => format!(
            "<img src=\"{}\" alt=\"{}\"{}>",
            escape(src),
            escape(&c.flag_alt()),
            if lazy { " loading=\"lazy\"" } else { "" }
        ),
        None => "<div class=\"center\">No flag</div>".into(),
    }
}

pub(crate) fn country_card(c: &CountryRecord) -> String {
    format!(
        r#"<li class="card"><a href="/country/{code}">
    {flag}
    <div>
        <h2>{name}</h2>
        <div>Region: {region}</div>
        <div><strong>Population:</strong> {population}</div>
        <div><strong>Languages:</strong> {languages}</div>
    </div>
</a></li>
"#,
        code = urlencoding::encode(&c.cca3),
        flag = flag_img(c, true),
        name = escape(&c.common_name),
        region = escape(c.region_display()),
        population = c.population_display(),
        languages = escape(&c.languages_display()),
    )
}

pub async fn country(State(state): State<AppState>, Path(code): Path<String>) -> Page {
    let code = match validate_code(&code) {
        Ok(code) => code,
        Err(msg) => {
            return page(
                StatusCode::BAD_REQUEST,
                "Country",
                NavItem::Detail,
                &format!("<div class=\"center error\">Error: {}</div>", escape(&msg)),
            );
        }
    };

    let mut view = DetailView::mount(state.countries.clone(), code);
    view.settle().await;
    render_country(&view)
}

pub fn render_country(view: &DetailView) -> Page {
    let c = match view.state() {
        ViewState::Loading => {
            return page(StatusCode::OK, "Country", NavItem::Detail, "<div class=\"center\">Loading…</div>");
        }
        ViewState::Failed(msg) => {
            return page(
                StatusCode::BAD_GATEWAY,
                "Country",
                NavItem::Detail,
                &format!("<div class=\"center error\">Error: {}</div>", escape(msg)),
            );
        }
        ViewState::Loaded(None) => {
            return page(StatusCode::NOT_FOUND, "Country", NavItem::Detail, "<div class=\"center\">Not found.</div>");
        }
        ViewState::Loaded(Some(c)) => c,
    };

    let body = format!(
        r#"<a href="/">← Back</a>
<article class="card">
    {flag}
    <div>
        <h1>{name}</h1>
        <p>{official}</p>
        <dl>
            <dt>Region</dt><dd>{region}</dd>
            <dt>Subregion</dt><dd>{subregion}</dd>
            <dt>Capital</dt><dd>{capital}</dd>
            <dt>Population</dt><dd>{population}</dd>
            <dt>Languages</dt><dd>{languages}</dd>
            <dt>Currencies</dt><dd>{currencies}</dd>
        </dl>
    </div>
</article>"#,
        flag = flag_img(c, false),
        name = escape(&c.common_name),
        official = escape(&c.official_name),
        region = escape(c.region_display()),
        subregion = escape(c.subregion_display()),
        capital = escape(&c.capital_display()),
        population = c.population_display(),
        languages = escape(&c.languages_display()),
        currencies = escape(&c.currencies_display()),
    );
    page(StatusCode::OK, &c.common_name, NavItem::Detail, &body)
}

pub async fn about() -> Page {
    page(
        StatusCode::OK,
        "About",
        NavItem::About,
        r#"<h2>About</h2>
<p>World Data Dashboard lets you search nearly every country and view its flag,
population, and languages. Click a country card for more details.</p>
<ul>
    <li>Data: REST Countries v3 (public API, no key required)</li>
    <li>Stack: Rust, axum and reqwest</li>
    <li>Routing: axum router</li>
</ul>"#,
    )
}
