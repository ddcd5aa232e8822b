//! JSON API for the display layer
//!
//! Thin plumbing over the resolver, index, route join, weather board, and
//! preference store. Lookup misses are explicit no-data payloads with a
//! message, never silently empty bodies.

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    dataset::{Dataset, Resolution},
    departure::Selections,
    index::SearchHit,
    models::{JfkConfigRow, LgaConfigRow, NavaidRecord},
    prefs::{PanelVisibility, PrefStore, Theme},
    routes::{self, AnnotatedRoute},
    watch::{StationReport, WatchPoller},
    weather::{jfk_runway_config, lga_runway_config, parse_wind},
};

/// Shared state injected into every handler.
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub poller: Arc<WatchPoller>,
    pub prefs: Arc<PrefStore>,
}

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub hits: Vec<SearchHit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Navaid payload with display-ready frequency and distance.
#[derive(Serialize)]
pub struct ApiNavaid {
    pub ident: String,
    pub name: String,
    pub kind: String,
    pub frequency: String,
    pub distance: String,
}

impl From<&NavaidRecord> for ApiNavaid {
    fn from(record: &NavaidRecord) -> Self {
        Self {
            ident: record.ident.clone(),
            name: record.name.clone(),
            kind: record.kind.clone(),
            frequency: record.format_frequency(),
            distance: record.format_distance(),
        }
    }
}

#[derive(Serialize)]
pub struct NavaidLookupResponse {
    pub results: Vec<ApiNavaid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Serialize)]
pub struct AirportLookupResponse {
    pub ident: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Serialize)]
pub struct ResolveResponse {
    #[serde(flatten)]
    pub resolution: Resolution,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Serialize)]
pub struct RoutesResponse {
    pub routes: Vec<AnnotatedRoute>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Serialize)]
pub struct WeatherResponse {
    pub reports: Vec<StationReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    /// Suggested LGA configuration from the current KLGA report
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lga_config: Option<String>,
    /// Suggested JFK configuration from the current KJFK report
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jfk_config: Option<String>,
}

#[derive(Serialize)]
pub struct PrefsResponse {
    pub theme: Theme,
    pub panels: PanelVisibility,
    pub weather_watchlist: Vec<String>,
    pub stash_watchlist: Vec<String>,
}

#[derive(Deserialize)]
pub struct WatchlistEdit {
    pub station: String,
}

/// Option lists for the two configuration selectors.
#[derive(Serialize)]
pub struct ConfigsResponse {
    pub lga: Vec<LgaConfigRow>,
    pub jfk: Vec<JfkConfigRow>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/search", get(search))
        .route("/configs", get(list_configs))
        .route("/navaids/{ident}", get(lookup_navaid))
        .route("/airports/{ident}", get(lookup_airport))
        .route("/resolve", post(resolve))
        .route("/routes/{dest}", get(lookup_routes))
        .route("/weather", get(weather_board))
        .route("/prefs", get(get_prefs))
        .route("/prefs/theme", put(set_theme))
        .route("/prefs/panels", put(set_panels))
        .route("/prefs/watchlist", post(add_watchlist_station))
        .route("/prefs/watchlist/{ident}", delete(remove_watchlist_station))
        .with_state(state)
}

async fn list_configs(State(state): State<Arc<AppState>>) -> Json<ConfigsResponse> {
    Json(ConfigsResponse {
        lga: state.dataset.lga_configs.clone(),
        jfk: state.dataset.jfk_configs.clone(),
    })
}

async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResponse> {
    let hits = state.dataset.index.search(&params.q);
    let message = hits
        .is_empty()
        .then(|| format!("no matches for {}", params.q.trim().to_uppercase()));
    Json(SearchResponse { hits, message })
}

async fn lookup_navaid(
    State(state): State<Arc<AppState>>,
    Path(ident): Path<String>,
) -> Json<NavaidLookupResponse> {
    let results: Vec<ApiNavaid> = state
        .dataset
        .index
        .navaids(&ident)
        .iter()
        .map(ApiNavaid::from)
        .collect();
    let message = results
        .is_empty()
        .then(|| format!("no navaid data for {}", ident.trim().to_uppercase()));
    Json(NavaidLookupResponse { results, message })
}

async fn lookup_airport(
    State(state): State<Arc<AppState>>,
    Path(ident): Path<String>,
) -> Json<AirportLookupResponse> {
    match state.dataset.index.airport(&ident) {
        Some(airport) => Json(AirportLookupResponse {
            ident: airport.ident.clone(),
            name: Some(airport.name.clone()),
            message: None,
        }),
        None => Json(AirportLookupResponse {
            ident: ident.trim().to_uppercase(),
            name: None,
            message: Some(format!("no airport data for {}", ident.trim().to_uppercase())),
        }),
    }
}

async fn resolve(
    State(state): State<Arc<AppState>>,
    Json(selections): Json<Selections>,
) -> Json<ResolveResponse> {
    let resolution = state.dataset.resolve(&selections);
    let message = resolution
        .rule
        .is_none()
        .then(|| "no rule found for the current configuration".to_string());
    Json(ResolveResponse { resolution, message })
}

async fn lookup_routes(
    State(state): State<Arc<AppState>>,
    Path(dest): Path<String>,
) -> Json<RoutesResponse> {
    let matched = routes::find_routes(&state.dataset.routes, &state.dataset.index, &dest);
    let message = matched.is_empty().then(|| routes::no_routes_message(&dest));
    Json(RoutesResponse {
        routes: matched,
        message,
    })
}

fn config_suggestion(reports: &[StationReport], station: &str) -> Option<String> {
    let report = reports
        .iter()
        .find(|r| r.station == station && r.error.is_none())?;
    let wind = parse_wind(&report.raw);
    let suggestion = match station {
        "KLGA" => lga_runway_config(&wind, report.category.is_instrument()),
        _ => jfk_runway_config(&wind),
    };
    Some(suggestion.to_string())
}

async fn weather_board(State(state): State<Arc<AppState>>) -> Json<WeatherResponse> {
    let board = state.poller.board();
    let lga_config = config_suggestion(&board.reports, "KLGA");
    let jfk_config = config_suggestion(&board.reports, "KJFK");
    Json(WeatherResponse {
        reports: board.reports,
        updated_at: board.updated_at,
        lga_config,
        jfk_config,
    })
}

async fn get_prefs(State(state): State<Arc<AppState>>) -> Json<PrefsResponse> {
    Json(PrefsResponse {
        theme: state.prefs.theme().await,
        panels: state.prefs.panels().await,
        weather_watchlist: state.prefs.weather_watchlist().await,
        stash_watchlist: state.prefs.stash_watchlist().await,
    })
}

async fn set_theme(
    State(state): State<Arc<AppState>>,
    Json(theme): Json<Theme>,
) -> Result<StatusCode, StatusCode> {
    state
        .prefs
        .set_theme(theme)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(StatusCode::OK)
}

async fn set_panels(
    State(state): State<Arc<AppState>>,
    Json(panels): Json<PanelVisibility>,
) -> Result<StatusCode, StatusCode> {
    state
        .prefs
        .set_panels(panels)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(StatusCode::OK)
}

async fn add_watchlist_station(
    State(state): State<Arc<AppState>>,
    Json(edit): Json<WatchlistEdit>,
) -> Result<Json<Vec<String>>, StatusCode> {
    let list = state
        .prefs
        .add_weather_station(&edit.station)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(list))
}

async fn remove_watchlist_station(
    State(state): State<Arc<AppState>>,
    Path(ident): Path<String>,
) -> Result<Json<Vec<String>>, StatusCode> {
    let list = state
        .prefs
        .remove_weather_station(&ident)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(list))
}
