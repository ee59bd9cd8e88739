use std::net::SocketAddr;

use anyhow::Context;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mortrank::config::{ApiConfig, DataSource};
use mortrank::io::ihme::load_ihme_csv;
use mortrank::io::ihme_pg::load_ihme_pg;
use mortrank::{select_top_k, ProximityHit, RankError, RankedAverage, RecordStore, SelectionResult, Year};

#[derive(Clone)]
struct AppState {
    store: RecordStore,
    default_selector: String,
    default_k: usize,
}

fn redact_conn_str(s: &str) -> String {
    // Avoid logging secrets. Best-effort redaction.
    let mut out = String::new();
    for part in s.split_whitespace() {
        if part.to_lowercase().starts_with("password=") {
            out.push_str("password=*** ");
        } else {
            out.push_str(part);
            out.push(' ');
        }
    }
    out.trim_end().to_string()
}

#[derive(Debug, Deserialize)]
struct TopKQuery {
    selector: Option<String>,
    k: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct LocateQuery {
    selector: Option<String>,
    k: Option<i64>,
    time: f64,
    value: f64,
}

#[derive(Debug, Serialize)]
struct TopKResponse {
    selector: String,
    k: usize,
    time_extent: Option<(Year, Year)>,
    value_max: Option<f64>,
    top_averages: Vec<RankedAverage>,
    #[serde(flatten)]
    result: SelectionResult,
}

#[derive(Debug, Serialize)]
struct LocateResponse {
    label: String,
    #[serde(flatten)]
    hit: ProximityHit,
}

type ApiError = (StatusCode, serde_json::Value);

fn rank_error(e: RankError) -> ApiError {
    let code = match e {
        RankError::NoProximityMatch => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_REQUEST,
    };
    (code, json!({"return_code": 1, "error": e.to_string()}))
}

fn resolve_k(k: Option<i64>, default_k: usize) -> Result<usize, RankError> {
    match k {
        None => Ok(default_k),
        Some(k) => usize::try_from(k).ok().filter(|k| *k > 0).ok_or(RankError::InvalidK),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = ApiConfig::from_env();

    let store = match &cfg.source {
        DataSource::Csv { path } => load_ihme_csv(path)?,
        DataSource::Postgres { conn_str, table } => load_ihme_pg(conn_str, table)
            .with_context(|| format!("postgres load failed (conn_str={})", redact_conn_str(conn_str)))?,
    };
    info!(rows = store.len(), selectors = ?store.selector_values(), "record store ready");

    let state = AppState {
        store,
        default_selector: cfg.default_selector.clone(),
        default_k: cfg.default_k,
    };

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/selectors", get(selectors))
        .route("/top_k", get(top_k))
        .route("/locate", get(locate))
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", cfg.host, cfg.port)
        .parse()
        .context("invalid HOST/PORT")?;
    info!("[mortrank-api] listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.context("bind failed")?;
    axum::serve(listener, app).await.context("server failed")?;
    Ok(())
}

async fn healthz() -> impl IntoResponse {
    Json(json!({"ok": true}))
}

async fn selectors(State(st): State<AppState>) -> impl IntoResponse {
    Json(json!({"selectors": st.store.selector_values()}))
}

async fn top_k(State(st): State<AppState>, Query(q): Query<TopKQuery>) -> impl IntoResponse {
    // Aggregation is CPU work; keep it off the async workers.
    let join = tokio::task::spawn_blocking(move || top_k_sync(&st, q));
    match join.await {
        Ok(Ok(resp)) => (StatusCode::OK, Json(resp)).into_response(),
        Ok(Err((code, body))) => (code, Json(body)).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"return_code": 2, "error": format!("join error: {e}")})),
        )
            .into_response(),
    }
}

fn top_k_sync(st: &AppState, q: TopKQuery) -> Result<TopKResponse, ApiError> {
    let selector = q.selector.unwrap_or_else(|| st.default_selector.clone());
    let k = resolve_k(q.k, st.default_k).map_err(rank_error)?;
    let result = select_top_k(&st.store, &selector, k).map_err(rank_error)?;
    Ok(TopKResponse {
        selector,
        k,
        time_extent: result.time_extent(),
        value_max: result.value_max(),
        top_averages: result.top_averages(),
        result,
    })
}

async fn locate(State(st): State<AppState>, Query(q): Query<LocateQuery>) -> impl IntoResponse {
    let join = tokio::task::spawn_blocking(move || locate_sync(&st, q));
    match join.await {
        Ok(Ok(resp)) => (StatusCode::OK, Json(resp)).into_response(),
        Ok(Err((code, body))) => (code, Json(body)).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"return_code": 2, "error": format!("join error: {e}")})),
        )
            .into_response(),
    }
}

fn locate_sync(st: &AppState, q: LocateQuery) -> Result<LocateResponse, ApiError> {
    let selector = q.selector.unwrap_or_else(|| st.default_selector.clone());
    let k = resolve_k(q.k, st.default_k).map_err(rank_error)?;
    // recomputed per request; the store is the only shared state
    let result = select_top_k(&st.store, &selector, k).map_err(rank_error)?;
    let hit = result.locate(q.time, q.value).map_err(rank_error)?;
    Ok(LocateResponse { label: hit.label(), hit })
}
