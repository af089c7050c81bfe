use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::models::{Episode, MediaType, Season, Show};

use super::error::CatalogError;
use super::filter;
use super::{CatalogApi, Discovery};

const CATALOG_BASE: &str = "https://api.themoviedb.org/3";

/// Pages each discover sweep fetches, sequentially.
const DISCOVER_PAGES: u32 = 5;

const MOVIE_FILTERS: &[(&str, &str)] = &[
    ("sort_by", "popularity.desc"),
    ("vote_count.gte", "100"),
    ("include_adult", "false"),
    ("with_original_language", "en"),
    ("vote_average.gte", "6.0"),
];

// Higher rating floor than movies; only shows still running; animation
// excluded here and routed through the anime sweep instead.
const TV_FILTERS: &[(&str, &str)] = &[
    ("sort_by", "popularity.desc"),
    ("vote_count.gte", "50"),
    ("include_adult", "false"),
    ("vote_average.gte", "7.0"),
    ("with_status", "0"),
    ("without_genres", "16"),
];

const ANIME_FILTERS: &[(&str, &str)] = &[
    ("with_genres", "16"),
    ("sort_by", "popularity.desc"),
    ("vote_count.gte", "20"),
    ("include_adult", "false"),
    ("with_original_language", "ja"),
];

#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct ResultsPage {
    #[serde(default)]
    results: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct UpstreamBody {
    status_message: Option<String>,
}

impl CatalogClient {
    pub fn new(api_key: String) -> Result<Self, CatalogError> {
        let user_agent = format!("marquee/{}", env!("CARGO_PKG_VERSION"));
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(30))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { http, api_key })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, CatalogError> {
        let res = self
            .http
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;
        let status = res.status();
        let text = res.text().await?;
        if !status.is_success() {
            let message = serde_json::from_str::<UpstreamBody>(&text)
                .ok()
                .and_then(|b| b.status_message)
                .unwrap_or(text);
            return Err(CatalogError::Upstream {
                status: status.as_u16(),
                message,
            });
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Fetch one list endpoint and decode its rows, dropping any row the
    /// `Show` model cannot represent (the multi-search mixes people in
    /// with movies and TV).
    async fn get_shows(&self, url: &str) -> Result<Vec<Show>, CatalogError> {
        let page: ResultsPage = self.get_json(url).await?;
        Ok(decode_rows(page.results))
    }

    async fn discover(&self, endpoint: &str, filters: &[(&str, &str)]) -> Discovery {
        let query = query_string(filters);
        let mut pages = Vec::with_capacity(DISCOVER_PAGES as usize);
        for page in 1..=DISCOVER_PAGES {
            let url = format!(
                "{CATALOG_BASE}/{endpoint}?api_key={}&page={page}&{query}",
                self.api_key
            );
            pages.push((page, self.get_shows(&url).await));
        }
        filter::flatten_pages(pages)
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn fetch_trending(&self) -> Result<Vec<Show>, CatalogError> {
        let url = format!("{CATALOG_BASE}/trending/all/week?api_key={}", self.api_key);
        self.get_shows(&url).await
    }

    async fn fetch_movies(&self) -> Result<Discovery, CatalogError> {
        let mut sweep = self.discover("discover/movie", MOVIE_FILTERS).await;
        sweep.shows.retain(filter::has_required_artwork);
        tag(&mut sweep.shows, MediaType::Movie);
        filter::sort_by_rating(&mut sweep.shows);
        Ok(sweep)
    }

    async fn fetch_tv_shows(&self) -> Result<Discovery, CatalogError> {
        let mut sweep = self.discover("discover/tv", TV_FILTERS).await;
        sweep.shows.retain(filter::keep_for_tv);
        tag(&mut sweep.shows, MediaType::Tv);
        filter::sort_by_rating(&mut sweep.shows);
        Ok(sweep)
    }

    async fn fetch_anime(&self) -> Result<Discovery, CatalogError> {
        let mut sweep = self.discover("discover/tv", ANIME_FILTERS).await;
        sweep.shows.retain(filter::keep_for_anime);
        tag(&mut sweep.shows, MediaType::Tv);
        filter::sort_by_rating(&mut sweep.shows);
        Ok(sweep)
    }

    async fn search_shows(&self, query: &str) -> Result<Vec<Show>, CatalogError> {
        let url = format!(
            "{CATALOG_BASE}/search/multi?api_key={}&query={}",
            self.api_key,
            urlencoding::encode(query)
        );
        self.get_shows(&url).await
    }

    async fn fetch_show_details(
        &self,
        media_type: MediaType,
        id: i32,
    ) -> Result<Show, CatalogError> {
        let url = format!(
            "{CATALOG_BASE}/{}/{id}?api_key={}",
            media_type.as_path(),
            self.api_key
        );
        let show: Show = self.get_json(&url).await?;
        Ok(stamp(show, media_type))
    }

    async fn fetch_season_episodes(
        &self,
        show_id: i32,
        season_number: i32,
    ) -> Result<Vec<Episode>, CatalogError> {
        let url = format!(
            "{CATALOG_BASE}/tv/{show_id}/season/{season_number}?api_key={}",
            self.api_key
        );
        let season: Season = self.get_json(&url).await?;
        Ok(season.episodes)
    }
}

fn query_string(filters: &[(&str, &str)]) -> String {
    filters
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn decode_rows(rows: Vec<serde_json::Value>) -> Vec<Show> {
    rows.into_iter()
        .filter_map(|row| match serde_json::from_value::<Show>(row) {
            Ok(show) => Some(show),
            Err(err) => {
                debug!("dropping undecodable catalog row: {}", err);
                None
            }
        })
        .collect()
}

fn tag(shows: &mut [Show], media_type: MediaType) {
    for show in shows {
        show.media_type = Some(media_type);
    }
}

/// The detail endpoints omit the discriminator; stamp it back on.
fn stamp(mut show: Show, media_type: MediaType) -> Show {
    show.media_type = Some(media_type);
    show
}
