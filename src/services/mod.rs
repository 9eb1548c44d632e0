/// Remote collaborator contracts
///
/// The pipeline consumes these as trait objects so tests can substitute
/// in-process fakes; `CineListClient` and `TmdbClient` are the HTTP-backed
/// implementations.
pub mod cinelist;
pub mod tmdb;

pub use cinelist::CineListClient;
pub use tmdb::TmdbClient;

use crate::error::Result;
use crate::models::{CinemaDetail, CinemaSummary, ListingSummary, MovieDetail};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Latitude/longitude pair from a location lookup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One-shot location lookup; may be declined by the environment
#[async_trait]
pub trait LocationProvider: Send + Sync + 'static {
    /// Resolve the caller's position, or `AppError::LocationUnsupported`.
    async fn locate(&self) -> Result<Coordinates>;
}

/// Cinema search by position or postcode
#[async_trait]
pub trait CinemaFinder: Send + Sync + 'static {
    async fn find_by_location(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<CinemaSummary>>;

    async fn find_by_postcode(&self, postcode: &str) -> Result<Vec<CinemaSummary>>;
}

/// Per-cinema secondary attribute lookup
#[async_trait]
pub trait CinemaDetailService: Send + Sync + 'static {
    async fn detail(&self, cinema_id: &str) -> Result<CinemaDetail>;
}

/// Listings for a single cinema
#[async_trait]
pub trait ShowtimeService: Send + Sync + 'static {
    /// Returns the listings currently showing; an absent list in the
    /// upstream response is reported as an empty vector.
    async fn showtimes(&self, cinema_id: &str) -> Result<Vec<ListingSummary>>;
}

/// Movie search keyed on title
#[async_trait]
pub trait MovieDetailService: Send + Sync + 'static {
    /// Returns candidate matches, best first. An empty vector means no
    /// enrichment data exists for this title.
    async fn search(&self, title: &str) -> Result<Vec<MovieDetail>>;
}
