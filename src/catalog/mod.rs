use async_trait::async_trait;
use serde::Serialize;

mod client;
mod error;
pub mod filter;
mod images;

pub use client::CatalogClient;
pub use error::CatalogError;
pub use images::{image_url, ImageSize};

use crate::models::{Episode, MediaType, Show};

/// Result shape of the multi-page discover fetchers. A failed page is
/// logged and recorded here rather than failing the whole sweep, so a
/// short result set stays distinguishable from "nothing matched".
#[derive(Debug, Clone, Default, Serialize)]
pub struct Discovery {
    pub shows: Vec<Show>,
    pub failed_pages: Vec<u32>,
}

/// The catalog operations, as a seam the facade and tests can fake.
/// Every method is a single stateless request/response cycle (or a short
/// fixed sequence of them for the discover sweeps); no state is retained
/// between calls.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// One page of this week's trending movies and TV, tagged with
    /// whatever media type the catalog reports.
    async fn fetch_trending(&self) -> Result<Vec<Show>, CatalogError>;

    /// Popular English-language movies: five discover pages, artwork
    /// required, tagged `movie`, sorted by rating descending.
    async fn fetch_movies(&self) -> Result<Discovery, CatalogError>;

    /// Currently-running non-animation TV: five discover pages, Japanese
    /// market rows excluded, tagged `tv`, sorted by rating descending.
    async fn fetch_tv_shows(&self) -> Result<Discovery, CatalogError>;

    /// Japanese animation: five discover pages, Japanese market rows
    /// only, tagged `tv`, sorted by rating descending.
    async fn fetch_anime(&self) -> Result<Discovery, CatalogError>;

    /// Free-text multi-type search, rows in catalog order. Blank queries
    /// are the caller's responsibility to avoid issuing.
    async fn search_shows(&self, query: &str) -> Result<Vec<Show>, CatalogError>;

    /// Detail record for one id, with `media_type` stamped on (the
    /// detail endpoints do not return it).
    async fn fetch_show_details(
        &self,
        media_type: MediaType,
        id: i32,
    ) -> Result<Show, CatalogError>;

    /// Episode list of one season of one show. Propagates a 404 when the
    /// show or season does not exist.
    async fn fetch_season_episodes(
        &self,
        show_id: i32,
        season_number: i32,
    ) -> Result<Vec<Episode>, CatalogError>;
}
