use crate::models::status::{Enrichment, EnrichmentFailure, EnrichmentTarget};
use serde::{Deserialize, Serialize};

/// Seed payload for one listing, as returned by the showtime service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListingSummary {
    /// Film title; identity key for movie enrichment
    pub title: String,

    /// Showing times for the selected cinema
    pub times: Vec<String>,
}

/// Secondary attributes fetched per listing from the movie search API.
///
/// Paths are stored exactly as returned; composing full image URLs is the
/// caller's concern.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetail {
    pub backdrop_path: Option<String>,
    pub poster_path: Option<String>,
    pub vote_average: f64,
    pub release_date: Option<String>,
    pub overview: Option<String>,
}

/// A film listing at the selected cinema.
///
/// `title` and `times` are set at creation and immutable thereafter; the
/// movie detail attributes arrive later through enrichment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub title: String,
    pub times: Vec<String>,

    /// Enrichment state carrying the movie detail once loaded
    pub detail: Enrichment<MovieDetail>,
}

impl Listing {
    /// Construct a pending listing from a showtime response entry.
    pub fn from_summary(summary: ListingSummary) -> Self {
        Self {
            title: summary.title,
            times: summary.times,
            detail: Enrichment::Pending,
        }
    }

    /// True once the movie detail fetch for this listing has succeeded.
    pub fn loaded(&self) -> bool {
        self.detail.is_loaded()
    }
}

impl EnrichmentTarget for Listing {
    type Key = String;
    type Detail = MovieDetail;

    fn key(&self) -> String {
        self.title.clone()
    }

    fn status(&self) -> &Enrichment<MovieDetail> {
        &self.detail
    }

    fn apply(&mut self, detail: MovieDetail) {
        self.detail.resolve_loaded(detail);
    }

    fn fail(&mut self, failure: EnrichmentFailure) {
        self.detail.resolve_failed(failure);
    }
}
