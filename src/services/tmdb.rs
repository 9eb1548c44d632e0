use crate::config::ServicesConfig;
use crate::error::{AppError, Result};
use crate::models::MovieDetail;
use crate::services::MovieDetailService;
use async_trait::async_trait;
use serde::Deserialize;

/// HTTP client for the TMDB-style movie search API
#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<MovieDetail>,
}

impl TmdbClient {
    /// Build a client from configuration.
    pub fn new(config: &ServicesConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.tmdb_base_url.trim_end_matches('/').to_string(),
            api_key: config.tmdb_api_key.clone(),
        })
    }
}

#[async_trait]
impl MovieDetailService for TmdbClient {
    async fn search(&self, title: &str) -> Result<Vec<MovieDetail>> {
        let url = format!("{}/search/movie", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("query", title)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Network(format!(
                "{} returned {}",
                url,
                response.status()
            )));
        }

        let body = response.json::<SearchResponse>().await?;
        Ok(body.results)
    }
}
