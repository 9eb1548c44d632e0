//! Common test utilities for pipeline testing
//!
//! In-process fakes for the remote service contracts, with a gate mechanism
//! (a `watch` channel) so tests can hold fetches in flight and observe the
//! pipeline mid-enrichment.

#![allow(dead_code)]

use async_trait::async_trait;
use showfinder::error::{AppError, Result};
use showfinder::models::{CinemaDetail, CinemaSummary, ListingSummary, MovieDetail};
use showfinder::services::{
    CinemaDetailService, CinemaFinder, Coordinates, LocationProvider, MovieDetailService,
    ShowtimeService,
};
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tokio::sync::watch;

pub fn summary(id: &str) -> CinemaSummary {
    CinemaSummary {
        id: id.to_string(),
        name: format!("Cinema {}", id),
        distance: 1.0,
    }
}

pub fn cinema_detail(town: &str) -> CinemaDetail {
    CinemaDetail {
        town: town.to_string(),
        postcode: "LS1 8TL".to_string(),
        website: "https://example.com".to_string(),
        phone: "0113 000 0000".to_string(),
    }
}

pub fn listing(title: &str) -> ListingSummary {
    ListingSummary {
        title: title.to_string(),
        times: vec!["14:30".to_string(), "19:45".to_string()],
    }
}

pub fn movie(poster: &str) -> MovieDetail {
    MovieDetail {
        backdrop_path: Some(format!("/{}-backdrop.jpg", poster)),
        poster_path: Some(format!("/{}.jpg", poster)),
        vote_average: 7.5,
        release_date: Some("2016-11-10".to_string()),
        overview: Some("Overview".to_string()),
    }
}

/// Opt-in tracing output for debugging test runs (set RUST_LOG).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Poll a condition with a bounded wait; returns its final value.
pub async fn wait_for(check: impl Fn() -> bool) -> bool {
    for _ in 0..300 {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    check()
}

/// Location lookup that always resolves to a fixed position
pub struct FixedLocation(pub Coordinates);

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn locate(&self) -> Result<Coordinates> {
        Ok(self.0)
    }
}

/// Location lookup declined by the environment
pub struct UnsupportedLocation;

#[async_trait]
impl LocationProvider for UnsupportedLocation {
    async fn locate(&self) -> Result<Coordinates> {
        Err(AppError::LocationUnsupported)
    }
}

/// Finder returning the same cinemas for any position or postcode
pub struct StaticFinder(pub Vec<CinemaSummary>);

#[async_trait]
impl CinemaFinder for StaticFinder {
    async fn find_by_location(&self, _lat: f64, _lon: f64) -> Result<Vec<CinemaSummary>> {
        Ok(self.0.clone())
    }

    async fn find_by_postcode(&self, _postcode: &str) -> Result<Vec<CinemaSummary>> {
        Ok(self.0.clone())
    }
}

/// Finder that fails at the transport layer
pub struct FailingFinder;

#[async_trait]
impl CinemaFinder for FailingFinder {
    async fn find_by_location(&self, _lat: f64, _lon: f64) -> Result<Vec<CinemaSummary>> {
        Err(AppError::Network("connection refused".to_string()))
    }

    async fn find_by_postcode(&self, _postcode: &str) -> Result<Vec<CinemaSummary>> {
        Err(AppError::Network("connection refused".to_string()))
    }
}

/// Cinema detail service backed by a fixed map; ids absent from the map fail
/// with a transport error, ids in `never_resolves` park forever (exercising
/// the fetch deadline).
pub struct MapCinemaDetails {
    pub details: HashMap<String, CinemaDetail>,
    pub never_resolves: HashSet<String>,
}

impl MapCinemaDetails {
    pub fn new(details: HashMap<String, CinemaDetail>) -> Self {
        Self {
            details,
            never_resolves: HashSet::new(),
        }
    }
}

#[async_trait]
impl CinemaDetailService for MapCinemaDetails {
    async fn detail(&self, cinema_id: &str) -> Result<CinemaDetail> {
        if self.never_resolves.contains(cinema_id) {
            std::future::pending::<()>().await;
        }
        self.details
            .get(cinema_id)
            .cloned()
            .ok_or_else(|| AppError::Network(format!("502 for cinema {}", cinema_id)))
    }
}

/// Showtime service with per-cinema listings
pub struct MapShowtimes(pub HashMap<String, Vec<ListingSummary>>);

#[async_trait]
impl ShowtimeService for MapShowtimes {
    async fn showtimes(&self, cinema_id: &str) -> Result<Vec<ListingSummary>> {
        Ok(self.0.get(cinema_id).cloned().unwrap_or_default())
    }
}

/// Movie search backed by a fixed map; titles absent from the map return an
/// empty result set. Titles in `held` wait until the gate opens, so a test
/// can keep one collection's fetches in flight while superseding it.
pub struct GatedMovies {
    pub results: HashMap<String, Vec<MovieDetail>>,
    held: HashSet<String>,
    gate: watch::Receiver<bool>,
}

impl GatedMovies {
    pub fn new(results: HashMap<String, Vec<MovieDetail>>) -> (Self, watch::Sender<bool>) {
        Self::with_held(results, HashSet::new())
    }

    pub fn with_held(
        results: HashMap<String, Vec<MovieDetail>>,
        held: HashSet<String>,
    ) -> (Self, watch::Sender<bool>) {
        let (tx, rx) = watch::channel(false);
        (
            Self {
                results,
                held,
                gate: rx,
            },
            tx,
        )
    }
}

#[async_trait]
impl MovieDetailService for GatedMovies {
    async fn search(&self, title: &str) -> Result<Vec<MovieDetail>> {
        if self.held.contains(title) {
            let mut gate = self.gate.clone();
            while !*gate.borrow() {
                gate.changed()
                    .await
                    .map_err(|_| AppError::Network("gate dropped".to_string()))?;
            }
        }
        Ok(self.results.get(title).cloned().unwrap_or_default())
    }
}
