use crate::config::ServicesConfig;
use crate::error::{AppError, Result};
use crate::models::{CinemaDetail, CinemaSummary, ListingSummary};
use crate::services::{CinemaDetailService, CinemaFinder, ShowtimeService};
use async_trait::async_trait;
use serde::Deserialize;

/// HTTP client for the CineList-style cinema and showtime API
#[derive(Debug, Clone)]
pub struct CineListClient {
    client: reqwest::Client,
    base_url: String,
}

/// Finder response wrapper
#[derive(Debug, Deserialize)]
struct CinemasResponse {
    #[serde(default)]
    cinemas: Vec<CinemaSummary>,
}

/// Showtime response wrapper; upstream omits `listings` entirely when the
/// cinema has no showings
#[derive(Debug, Deserialize)]
struct ShowtimesResponse {
    #[serde(default)]
    listings: Option<Vec<ListingSummary>>,
}

impl CineListClient {
    /// Build a client from configuration.
    pub fn new(config: &ServicesConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.cinelist_base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(AppError::Network(format!(
                "{} returned {}",
                url,
                response.status()
            )));
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl CinemaFinder for CineListClient {
    async fn find_by_location(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<CinemaSummary>> {
        let response: CinemasResponse = self
            .get_json(&format!(
                "/search/cinemas/location/{}/{}",
                latitude, longitude
            ))
            .await?;
        Ok(response.cinemas)
    }

    async fn find_by_postcode(&self, postcode: &str) -> Result<Vec<CinemaSummary>> {
        // Postcodes may carry an inner space
        let encoded = postcode.replace(' ', "%20");
        let response: CinemasResponse = self
            .get_json(&format!("/search/cinemas/postcode/{}", encoded))
            .await?;
        Ok(response.cinemas)
    }
}

#[async_trait]
impl CinemaDetailService for CineListClient {
    async fn detail(&self, cinema_id: &str) -> Result<CinemaDetail> {
        self.get_json(&format!("/cinema/{}", cinema_id)).await
    }
}

#[async_trait]
impl ShowtimeService for CineListClient {
    async fn showtimes(&self, cinema_id: &str) -> Result<Vec<ListingSummary>> {
        let response: ShowtimesResponse = self
            .get_json(&format!("/get/times/cinema/{}", cinema_id))
            .await?;
        Ok(response.listings.unwrap_or_default())
    }
}
