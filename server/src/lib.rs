use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::StatusCode, routing::get, Json, Router};
use boolsearch_core::persist::IndexPaths;
use boolsearch_core::present::{Page, DISPLAY_LIMIT};
use boolsearch_core::{Document, SearchIndex, SearchOutcome};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
}
fn default_limit() -> usize { DISPLAY_LIMIT }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub kind: &'static str,
    pub took_s: f64,
    pub total_hits: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<u64>,
    pub errors: Vec<String>,
    pub results: Vec<SearchHit>,
    pub remaining: usize,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub doc_id: u32,
    pub url: String,
    pub title: String,
}

/// The index is immutable once loaded, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub index: Arc<SearchIndex>,
}

pub fn build_app(index_dir: String) -> Result<Router> {
    let index = SearchIndex::open(&IndexPaths::new(&index_dir))?;
    Ok(router(Arc::new(index)))
}

pub fn router(index: Arc<SearchIndex>) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .with_state(AppState { index })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let index = &state.index;
    let outcome = index.search(&params.q);
    let limit = params.limit.clamp(1, DISPLAY_LIMIT);

    let (kind, frequency, errors) = match &outcome {
        SearchOutcome::Term(hit) => ("term", Some(hit.frequency), Vec::new()),
        SearchOutcome::TermNotFound { .. } => ("term", None, Vec::new()),
        SearchOutcome::Boolean(hit) => ("boolean", None, hit.errors.iter().map(|e| e.to_string()).collect()),
    };
    let (results, total_hits, remaining) = match Page::for_outcome(&outcome, index.documents(), limit) {
        Some(page) => {
            let results = page
                .entries
                .iter()
                .map(|(doc_id, doc)| SearchHit { doc_id: *doc_id, url: doc.url.clone(), title: doc.title.clone() })
                .collect();
            (results, page.total, page.remaining)
        }
        None => (Vec::new(), 0, 0),
    };

    let took_s = start.elapsed().as_secs_f64();
    tracing::debug!(query = %params.q, kind, total_hits, took_s, "search");
    Json(SearchResponse { query: params.q, kind, took_s, total_hits, frequency, errors, results, remaining })
}

pub async fn doc_handler(State(state): State<AppState>, Path(doc_id): Path<u32>) -> Result<Json<Document>, (StatusCode, String)> {
    state
        .index
        .documents()
        .get(doc_id)
        .cloned()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, format!("document {doc_id} not found")))
}
