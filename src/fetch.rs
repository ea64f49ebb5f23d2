use crate::config::ClientConfig;
use crate::error::FetchError;
use crate::types::*;
use serde_json::Value;
use std::future::Future;
use tracing::{debug, info, warn};
use url::Url;

/// HTTP client for the `/api/news` endpoint.
#[derive(Clone, Debug)]
pub struct NewsClient {
    base_url: Url,
    api_key: Option<String>,
    http_client: reqwest::Client,
}

impl NewsClient {
    pub fn new(base_url: Url, api_key: Option<String>, http_client: reqwest::Client) -> Self {
        Self {
            base_url,
            api_key,
            http_client,
        }
    }

    pub fn from_config(config: &ClientConfig) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent("news-search/0.1");
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::new(
            config.api_url.clone(),
            config.api_key.clone(),
            builder.build()?,
        ))
    }

    pub fn endpoint(&self) -> String {
        format!("{}/api/news", self.base_url.as_str().trim_end_matches('/'))
    }

    fn query_params(&self, query: &QueryState) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("keyword", query.keyword.trim().to_string()),
            ("language", query.language.code().to_string()),
            ("sortBy", query.sort_by.as_str().to_string()),
        ];
        if let Some(key) = &self.api_key {
            params.push(("apiKey", key.clone()));
        }
        params
    }

    /// Issue one request for `query` and classify the response.
    pub async fn fetch(&self, query: &QueryState) -> Result<Vec<Article>, FetchError> {
        info!(
            "Fetching news for keyword: {} language: {} sortBy: {}",
            query.keyword, query.language, query.sort_by
        );

        let resp = self
            .http_client
            .get(self.endpoint())
            .query(&self.query_params(query))
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = resp.status();
        debug!("Response status: {}", status);
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            warn!("News request failed with status {}: {}", status, text);
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body = resp.text().await?;
        let articles = parse_articles(&body)?;
        info!("Received {} articles", articles.len());
        Ok(articles)
    }
}

/// Anything that can answer a news query. The pipeline is generic over it.
pub trait NewsSource: Clone + Send + Sync + 'static {
    fn fetch(
        &self,
        query: &QueryState,
    ) -> impl Future<Output = Result<Vec<Article>, FetchError>> + Send;
}

impl NewsSource for NewsClient {
    fn fetch(
        &self,
        query: &QueryState,
    ) -> impl Future<Output = Result<Vec<Article>, FetchError>> + Send {
        NewsClient::fetch(self, query)
    }
}

/// Classify a 2xx body: an article array, an explicit API error, or garbage.
pub fn parse_articles(body: &str) -> Result<Vec<Article>, FetchError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| FetchError::Format(format!("response is not JSON: {}", e)))?;

    if value.is_array() {
        return serde_json::from_value(value)
            .map_err(|e| FetchError::Format(format!("malformed article: {}", e)));
    }
    if value.get("status").and_then(Value::as_str) == Some("error") {
        let body: ApiErrorBody =
            serde_json::from_value(value).map_err(|e| FetchError::Format(e.to_string()))?;
        return Err(FetchError::Api(body.message.unwrap_or_default()));
    }
    Err(FetchError::Format("expected array of articles".to_string()))
}
