//! `/api/news` proxy. Holds the upstream API key so clients never see it.

use crate::config::ProxyConfig;
use crate::types::*;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use url::Url;

#[derive(Clone, Debug)]
pub struct ProxyState {
    pub upstream_url: Url,
    pub api_key: String,
    pub http_client: reqwest::Client,
}

impl ProxyState {
    pub fn new(upstream_url: Url, api_key: String, http_client: reqwest::Client) -> Self {
        Self {
            upstream_url,
            api_key,
            http_client,
        }
    }

    pub fn from_config(config: &ProxyConfig) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .build()?;
        Ok(Self::new(config.upstream_url.clone(), config.api_key.clone(), http_client))
    }
}

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("missing required query parameter: keyword")]
    MissingKeyword,
    #[error("Failed to fetch news: {0}")]
    Upstream(#[from] reqwest::Error),
    #[error("Unexpected code {status}: {body}")]
    UpstreamStatus { status: u16, body: String },
    #[error("News API error: {0}")]
    Api(String),
    #[error("Articles is null")]
    MissingArticles,
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ProxyError::MissingKeyword => (StatusCode::BAD_REQUEST, "Bad request"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };
        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                details: self.to_string(),
            }),
        )
            .into_response()
    }
}

pub fn router(state: Arc<ProxyState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/news", get(news_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "news-proxy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn news_handler(
    State(state): State<Arc<ProxyState>>,
    Query(params): Query<NewsQueryParams>,
) -> Result<Json<Vec<Article>>, ProxyError> {
    let start = Instant::now();
    let keyword = params
        .keyword
        .filter(|k| !k.trim().is_empty())
        .ok_or(ProxyError::MissingKeyword)?;
    let language = params
        .language
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| Language::default().code().to_string());
    let sort_by = params
        .sort_by
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| SortMode::default().as_str().to_string());

    match fetch_everything(&state, &keyword, &language, &sort_by).await {
        Ok(articles) => {
            info!(
                "Served {} articles for '{}' in {:?}",
                articles.len(),
                keyword,
                start.elapsed()
            );
            Ok(Json(articles))
        }
        Err(e) => {
            error!("Error processing request after {:?}: {}", start.elapsed(), e);
            Err(e)
        }
    }
}

/// Query the upstream `/v2/everything` endpoint and unwrap its envelope.
pub async fn fetch_everything(
    state: &ProxyState,
    keyword: &str,
    language: &str,
    sort_by: &str,
) -> Result<Vec<Article>, ProxyError> {
    let url = format!(
        "{}/v2/everything",
        state.upstream_url.as_str().trim_end_matches('/')
    );
    info!("Fetching news from upstream for: {} ({}, {})", keyword, language, sort_by);

    let resp = state
        .http_client
        .get(&url)
        .query(&[
            ("q", keyword),
            ("language", language),
            ("sortBy", sort_by),
            ("apiKey", state.api_key.as_str()),
        ])
        .header("User-Agent", "news-proxy/0.1")
        .send()
        .await?;

    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        error!("News API Response Error: {}", body);
        return Err(ProxyError::UpstreamStatus {
            status: status.as_u16(),
            body,
        });
    }

    let envelope: UpstreamResponse = serde_json::from_str(&body)
        .map_err(|e| ProxyError::Api(format!("unreadable response: {}", e)))?;
    if envelope.status.as_deref() == Some("error") {
        return Err(ProxyError::Api(
            envelope.message.unwrap_or_else(|| body.clone()),
        ));
    }
    info!("Upstream reported {} total results", envelope.total_results);
    envelope.articles.ok_or(ProxyError::MissingArticles)
}
