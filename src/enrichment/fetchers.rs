use crate::error::{AppError, Result};
use crate::models::{CinemaDetail, MovieDetail};
use crate::services::{CinemaDetailService, MovieDetailService};
use async_trait::async_trait;
use std::sync::Arc;

/// One remote lookup per target key.
///
/// Fetchers are stateless and receive only the identity key, never the
/// mutable record, so a fetch cannot observe or depend on partial state.
/// Applying the result is the fan-out's responsibility.
#[async_trait]
pub trait DetailFetcher: Send + Sync + 'static {
    type Key: Clone + Send + Sync + std::fmt::Display + 'static;
    type Detail: Send + Sync + 'static;

    async fn fetch(&self, key: &Self::Key) -> Result<Self::Detail>;
}

/// Fetches per-cinema secondary attributes, keyed on cinema id
pub struct CinemaDetailFetcher {
    service: Arc<dyn CinemaDetailService>,
}

impl CinemaDetailFetcher {
    pub fn new(service: Arc<dyn CinemaDetailService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl DetailFetcher for CinemaDetailFetcher {
    type Key = String;
    type Detail = CinemaDetail;

    async fn fetch(&self, key: &String) -> Result<CinemaDetail> {
        self.service.detail(key).await
    }
}

/// Fetches movie details, keyed on listing title.
///
/// Uses the first search result only; an empty result set is surfaced as
/// `AppError::EmptyResult`, which the fan-out records as a terminal no-match
/// rather than leaving the listing pending.
pub struct MovieDetailFetcher {
    service: Arc<dyn MovieDetailService>,
}

impl MovieDetailFetcher {
    pub fn new(service: Arc<dyn MovieDetailService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl DetailFetcher for MovieDetailFetcher {
    type Key = String;
    type Detail = MovieDetail;

    async fn fetch(&self, key: &String) -> Result<MovieDetail> {
        let results = self.service.search(key).await?;
        results
            .into_iter()
            .next()
            .ok_or_else(|| AppError::EmptyResult(format!("no movie match for \"{}\"", key)))
    }
}
