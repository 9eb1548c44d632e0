use crate::models::status::{Enrichment, EnrichmentFailure, EnrichmentTarget};
use serde::{Deserialize, Serialize};

/// Seed payload for one cinema, as returned by the cinema finder
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CinemaSummary {
    /// Identifier assigned by the finder service
    pub id: String,

    /// Display name
    pub name: String,

    /// Distance from the search origin
    pub distance: f64,
}

/// Secondary attributes fetched per cinema
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CinemaDetail {
    #[serde(rename = "towncity")]
    pub town: String,
    pub postcode: String,
    pub website: String,
    pub phone: String,
}

/// A cinema in the current search results.
///
/// `id`, `name` and `distance` are set at creation and immutable thereafter;
/// the detail attributes arrive later through enrichment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cinema {
    pub id: String,
    pub name: String,
    pub distance: f64,

    /// Enrichment state carrying the detail payload once loaded
    pub detail: Enrichment<CinemaDetail>,
}

impl Cinema {
    /// Construct a pending cinema from a finder response entry.
    pub fn from_summary(summary: CinemaSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            distance: summary.distance,
            detail: Enrichment::Pending,
        }
    }

    /// True once the detail fetch for this cinema has succeeded.
    pub fn loaded(&self) -> bool {
        self.detail.is_loaded()
    }
}

impl EnrichmentTarget for Cinema {
    type Key = String;
    type Detail = CinemaDetail;

    fn key(&self) -> String {
        self.id.clone()
    }

    fn status(&self) -> &Enrichment<CinemaDetail> {
        &self.detail
    }

    fn apply(&mut self, detail: CinemaDetail) {
        self.detail.resolve_loaded(detail);
    }

    fn fail(&mut self, failure: EnrichmentFailure) {
        self.detail.resolve_failed(failure);
    }
}
