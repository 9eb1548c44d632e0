use crate::config::Config;
use crate::enrichment::{
    self, CinemaDetailFetcher, Collection, DetailFetcher, FanOutEnricher, Generation,
    MovieDetailFetcher,
};
use crate::error::{AppError, Result};
use crate::models::{Cinema, CinemaDetail, CinemaSummary, Listing, ListingSummary, MovieDetail};
use crate::services::{
    CineListClient, CinemaDetailService, CinemaFinder, LocationProvider, MovieDetailService,
    ShowtimeService, TmdbClient,
};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Two-stage search and enrichment orchestrator.
///
/// Stage A finds cinemas (by position or postcode) and enriches each with
/// its secondary attributes; Stage B, on selecting a cinema, fetches its
/// listings and enriches each with movie details. Each stage replaces its
/// collection wholesale and bumps its generation, so completions still in
/// flight for a superseded collection are discarded. Stage progression is
/// never gated on readiness; callers poll the readiness queries and render
/// partial results as they arrive.
pub struct Pipeline {
    config: Config,

    location: Arc<dyn LocationProvider>,
    finder: Arc<dyn CinemaFinder>,
    showtimes: Arc<dyn ShowtimeService>,
    cinema_fetcher: Arc<dyn DetailFetcher<Key = String, Detail = CinemaDetail>>,
    movie_fetcher: Arc<dyn DetailFetcher<Key = String, Detail = MovieDetail>>,

    /// Current Stage A generation; bumped when a new search begins
    cinema_generation: Arc<AtomicU64>,

    /// Current Stage B generation; bumped when a new cinema is selected
    listing_generation: Arc<AtomicU64>,

    cinemas: RwLock<Collection<Cinema>>,
    listings: RwLock<Collection<Listing>>,
    focused: RwLock<Option<Cinema>>,
}

impl Pipeline {
    /// Wire a pipeline from explicit collaborators.
    pub fn new(
        config: Config,
        location: Arc<dyn LocationProvider>,
        finder: Arc<dyn CinemaFinder>,
        cinema_details: Arc<dyn CinemaDetailService>,
        showtimes: Arc<dyn ShowtimeService>,
        movie_details: Arc<dyn MovieDetailService>,
    ) -> Self {
        Self {
            config,
            location,
            finder,
            showtimes,
            cinema_fetcher: Arc::new(CinemaDetailFetcher::new(cinema_details)),
            movie_fetcher: Arc::new(MovieDetailFetcher::new(movie_details)),
            cinema_generation: Arc::new(AtomicU64::new(0)),
            listing_generation: Arc::new(AtomicU64::new(0)),
            cinemas: RwLock::new(Collection::empty(0)),
            listings: RwLock::new(Collection::empty(0)),
            focused: RwLock::new(None),
        }
    }

    /// Wire a pipeline against the HTTP-backed service clients.
    pub fn from_config(config: Config, location: Arc<dyn LocationProvider>) -> Result<Self> {
        let cinelist = Arc::new(CineListClient::new(&config.services)?);
        let tmdb = Arc::new(TmdbClient::new(&config.services)?);

        Ok(Self::new(
            config,
            location,
            cinelist.clone(),
            cinelist.clone(),
            cinelist,
            tmdb,
        ))
    }

    /// Stage A via the environment's location lookup.
    pub async fn locate_and_search(&self) -> Result<()> {
        let coords = self.location.locate().await?;
        self.search_by_location(coords.latitude, coords.longitude)
            .await
    }

    /// Stage A: search for cinemas around a position and start enrichment.
    pub async fn search_by_location(&self, latitude: f64, longitude: f64) -> Result<()> {
        let generation = self.begin_cinema_stage();
        let summaries = self.finder.find_by_location(latitude, longitude).await?;
        self.seed_cinemas(generation, summaries)
    }

    /// Stage A: search for cinemas around a postcode and start enrichment.
    pub async fn search_by_postcode(&self, postcode: &str) -> Result<()> {
        let generation = self.begin_cinema_stage();
        let summaries = self.finder.find_by_postcode(postcode).await?;
        self.seed_cinemas(generation, summaries)
    }

    /// Stage B: select a cinema by its position in the current results,
    /// fetch its listings and start movie enrichment.
    pub async fn select_cinema(&self, index: usize) -> Result<()> {
        let cinema = self.cinemas.read().get(index).ok_or_else(|| {
            AppError::InvalidSelection(format!("no cinema at index {}", index))
        })?;

        let generation = self.begin_listing_stage(&cinema);
        let summaries = self.showtimes.showtimes(&cinema.id).await?;
        self.seed_listings(generation, &cinema.id, summaries)
    }

    /// Read-only snapshot of the current cinema collection.
    pub fn cinemas(&self) -> Vec<Cinema> {
        self.cinemas.read().snapshot()
    }

    /// Read-only snapshot of the current listing collection.
    pub fn listings(&self) -> Vec<Listing> {
        self.listings.read().snapshot()
    }

    /// The cinema the listings belong to, if one is selected.
    pub fn focused_cinema(&self) -> Option<Cinema> {
        self.focused.read().clone()
    }

    /// True iff every cinema's detail fetch succeeded.
    pub fn cinemas_loaded(&self) -> bool {
        enrichment::all_loaded(&self.cinemas.read())
    }

    /// True iff every cinema reached a terminal state.
    pub fn cinemas_resolved(&self) -> bool {
        enrichment::all_resolved(&self.cinemas.read())
    }

    /// True iff every listing's movie fetch succeeded.
    pub fn listings_loaded(&self) -> bool {
        enrichment::all_loaded(&self.listings.read())
    }

    /// True iff every listing reached a terminal state.
    pub fn listings_resolved(&self) -> bool {
        enrichment::all_resolved(&self.listings.read())
    }

    /// Begin a new Stage A: invalidate both stages' in-flight work and clear
    /// their collections before the finder call goes out.
    fn begin_cinema_stage(&self) -> Generation {
        let generation = self.cinema_generation.fetch_add(1, Ordering::AcqRel) + 1;
        let listing_generation = self.listing_generation.fetch_add(1, Ordering::AcqRel) + 1;

        *self.cinemas.write() = Collection::empty(generation);
        *self.listings.write() = Collection::empty(listing_generation);
        *self.focused.write() = None;

        debug!(generation, "cinema stage reset");
        generation
    }

    /// Begin a new Stage B for the selected cinema.
    fn begin_listing_stage(&self, cinema: &Cinema) -> Generation {
        let generation = self.listing_generation.fetch_add(1, Ordering::AcqRel) + 1;

        *self.listings.write() = Collection::empty(generation);
        *self.focused.write() = Some(cinema.clone());

        debug!(generation, cinema = %cinema.id, "listing stage reset");
        generation
    }

    fn seed_cinemas(&self, generation: Generation, summaries: Vec<CinemaSummary>) -> Result<()> {
        if summaries.is_empty() {
            warn!("cinema search returned no results");
            return Err(AppError::EmptyResult("no cinemas found".to_string()));
        }

        let targets: Vec<Cinema> = summaries.into_iter().map(Cinema::from_summary).collect();
        let collection = Collection::new(generation, targets);
        info!(cinemas = collection.len(), generation, "seeded cinema collection");

        FanOutEnricher::new(
            Arc::clone(&self.cinema_fetcher),
            Arc::clone(&self.cinema_generation),
            self.config.enrichment.clone(),
        )
        .enrich(&collection);

        self.store_cinemas(collection);
        Ok(())
    }

    fn seed_listings(
        &self,
        generation: Generation,
        cinema_id: &str,
        summaries: Vec<ListingSummary>,
    ) -> Result<()> {
        if summaries.is_empty() {
            warn!(cinema = %cinema_id, "no listings for cinema");
            return Err(AppError::EmptyResult(format!(
                "no listings for cinema {}",
                cinema_id
            )));
        }

        let targets: Vec<Listing> = summaries.into_iter().map(Listing::from_summary).collect();
        let collection = Collection::new(generation, targets);
        info!(
            listings = collection.len(),
            generation,
            cinema = %cinema_id,
            "seeded listing collection"
        );

        FanOutEnricher::new(
            Arc::clone(&self.movie_fetcher),
            Arc::clone(&self.listing_generation),
            self.config.enrichment.clone(),
        )
        .enrich(&collection);

        self.store_listings(collection);
        Ok(())
    }

    /// Install the seeded collection unless a newer stage already began
    /// while the finder call was in flight.
    fn store_cinemas(&self, collection: Collection<Cinema>) {
        let mut current = self.cinemas.write();
        if self.cinema_generation.load(Ordering::Acquire) == collection.generation() {
            *current = collection;
        } else {
            debug!(
                generation = collection.generation(),
                "discarding superseded cinema results"
            );
        }
    }

    fn store_listings(&self, collection: Collection<Listing>) {
        let mut current = self.listings.write();
        if self.listing_generation.load(Ordering::Acquire) == collection.generation() {
            *current = collection;
        } else {
            debug!(
                generation = collection.generation(),
                "discarding superseded listing results"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::Coordinates;
    use async_trait::async_trait;

    struct NoLocation;

    #[async_trait]
    impl LocationProvider for NoLocation {
        async fn locate(&self) -> Result<Coordinates> {
            Err(AppError::LocationUnsupported)
        }
    }

    struct StaticFinder(Vec<CinemaSummary>);

    #[async_trait]
    impl CinemaFinder for StaticFinder {
        async fn find_by_location(&self, _lat: f64, _lon: f64) -> Result<Vec<CinemaSummary>> {
            Ok(self.0.clone())
        }

        async fn find_by_postcode(&self, _postcode: &str) -> Result<Vec<CinemaSummary>> {
            Ok(self.0.clone())
        }
    }

    struct StaticDetails;

    #[async_trait]
    impl CinemaDetailService for StaticDetails {
        async fn detail(&self, _cinema_id: &str) -> Result<CinemaDetail> {
            Ok(CinemaDetail {
                town: "Leeds".to_string(),
                postcode: "LS1 8TL".to_string(),
                website: "https://example.com".to_string(),
                phone: "000".to_string(),
            })
        }
    }

    struct NoShowtimes;

    #[async_trait]
    impl ShowtimeService for NoShowtimes {
        async fn showtimes(&self, _cinema_id: &str) -> Result<Vec<ListingSummary>> {
            Ok(vec![])
        }
    }

    struct NoMovies;

    #[async_trait]
    impl MovieDetailService for NoMovies {
        async fn search(&self, _title: &str) -> Result<Vec<MovieDetail>> {
            Ok(vec![])
        }
    }

    fn pipeline(cinemas: Vec<CinemaSummary>) -> Pipeline {
        Pipeline::new(
            Config::default(),
            Arc::new(NoLocation),
            Arc::new(StaticFinder(cinemas)),
            Arc::new(StaticDetails),
            Arc::new(NoShowtimes),
            Arc::new(NoMovies),
        )
    }

    fn summary(id: &str) -> CinemaSummary {
        CinemaSummary {
            id: id.to_string(),
            name: format!("Cinema {}", id),
            distance: 1.0,
        }
    }

    #[tokio::test]
    async fn test_initial_state_is_empty_and_not_ready() {
        let pipeline = pipeline(vec![summary("a")]);

        assert!(pipeline.cinemas().is_empty());
        assert!(pipeline.listings().is_empty());
        assert!(pipeline.focused_cinema().is_none());
        assert!(!pipeline.cinemas_loaded());
        assert!(!pipeline.cinemas_resolved());
    }

    #[tokio::test]
    async fn test_unsupported_location_propagates() {
        let pipeline = pipeline(vec![summary("a")]);

        let err = pipeline.locate_and_search().await.unwrap_err();
        assert!(matches!(err, AppError::LocationUnsupported));
        assert!(pipeline.cinemas().is_empty());
    }

    #[tokio::test]
    async fn test_empty_finder_result_aborts_stage() {
        let pipeline = pipeline(vec![]);

        let err = pipeline.search_by_postcode("LS1 8TL").await.unwrap_err();
        assert!(matches!(err, AppError::EmptyResult(_)));

        // Collection stays empty and reports not-ready, not "resolved"
        assert!(pipeline.cinemas().is_empty());
        assert!(!pipeline.cinemas_loaded());
        assert!(!pipeline.cinemas_resolved());
    }

    #[tokio::test]
    async fn test_select_cinema_out_of_range() {
        let pipeline = pipeline(vec![summary("a")]);
        pipeline.search_by_postcode("LS1 8TL").await.unwrap();

        let err = pipeline.select_cinema(5).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidSelection(_)));
        assert!(pipeline.focused_cinema().is_none());
    }

    #[tokio::test]
    async fn test_empty_showtimes_aborts_stage_b() {
        let pipeline = pipeline(vec![summary("a")]);
        pipeline.search_by_postcode("LS1 8TL").await.unwrap();

        let err = pipeline.select_cinema(0).await.unwrap_err();
        assert!(matches!(err, AppError::EmptyResult(_)));

        // Focused cinema is set, but the listing collection stays empty
        assert_eq!(pipeline.focused_cinema().unwrap().id, "a");
        assert!(pipeline.listings().is_empty());
        assert!(!pipeline.listings_resolved());
    }

    #[tokio::test]
    async fn test_new_search_replaces_collections() {
        let pipeline = pipeline(vec![summary("a"), summary("b")]);
        pipeline.search_by_postcode("LS1 8TL").await.unwrap();
        assert_eq!(pipeline.cinemas().len(), 2);

        pipeline.search_by_postcode("YO1 7HY").await.unwrap();
        let snapshot = pipeline.cinemas();
        assert_eq!(snapshot.len(), 2);

        // Fresh targets, no carried-over state
        assert!(pipeline.focused_cinema().is_none());
        assert!(pipeline.listings().is_empty());
    }
}
