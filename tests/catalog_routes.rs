use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use marquee::app::{build_router, AppState};
use marquee::catalog::{CatalogApi, CatalogError, Discovery};
use marquee::models::{Episode, MediaType, Show};
use serde_json::Value;
use tower::util::ServiceExt;

#[derive(Default)]
struct FakeCatalog {
    search_calls: AtomicUsize,
}

fn movie(id: i32, title: &str, vote: f32) -> Show {
    Show {
        id,
        title: Some(title.to_string()),
        name: None,
        overview: format!("{title} overview"),
        poster_path: Some(format!("/{id}-poster.jpg")),
        backdrop_path: Some(format!("/{id}-backdrop.jpg")),
        media_type: Some(MediaType::Movie),
        vote_average: vote,
        release_date: Some("2024-01-01".to_string()),
        first_air_date: None,
        original_language: Some("en".to_string()),
        origin_country: vec!["US".to_string()],
        runtime: None,
        number_of_seasons: None,
        genres: None,
    }
}

fn episode(id: i32, number: i32) -> Episode {
    Episode {
        id,
        name: format!("Episode {number}"),
        overview: String::new(),
        still_path: Some(format!("/{id}-still.jpg")),
        episode_number: number,
        season_number: 1,
        air_date: Some("2024-02-02".to_string()),
    }
}

fn not_found() -> CatalogError {
    CatalogError::Upstream {
        status: 404,
        message: "The resource you requested could not be found.".to_string(),
    }
}

#[async_trait::async_trait]
impl CatalogApi for FakeCatalog {
    async fn fetch_trending(&self) -> Result<Vec<Show>, CatalogError> {
        Ok(vec![movie(1, "Trending One", 8.0), movie(2, "Trending Two", 7.5)])
    }

    async fn fetch_movies(&self) -> Result<Discovery, CatalogError> {
        Ok(Discovery {
            shows: vec![movie(10, "Best Movie", 9.1), movie(11, "Next Movie", 8.3)],
            failed_pages: vec![3],
        })
    }

    async fn fetch_tv_shows(&self) -> Result<Discovery, CatalogError> {
        Ok(Discovery::default())
    }

    async fn fetch_anime(&self) -> Result<Discovery, CatalogError> {
        Ok(Discovery::default())
    }

    async fn search_shows(&self, query: &str) -> Result<Vec<Show>, CatalogError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if query == "nothing" {
            return Ok(Vec::new());
        }
        Ok(vec![movie(20, "Search Hit", 7.0)])
    }

    async fn fetch_show_details(
        &self,
        media_type: MediaType,
        id: i32,
    ) -> Result<Show, CatalogError> {
        if id == 603 {
            let mut show = movie(603, "The Matrix", 8.2);
            // Mirrors the client stamping the discriminator the detail
            // payload omits.
            show.media_type = Some(media_type);
            Ok(show)
        } else {
            Err(not_found())
        }
    }

    async fn fetch_season_episodes(
        &self,
        show_id: i32,
        season_number: i32,
    ) -> Result<Vec<Episode>, CatalogError> {
        if show_id == 1399 && season_number == 1 {
            Ok(vec![episode(100, 1), episode(101, 2)])
        } else {
            Err(not_found())
        }
    }
}

fn app_with_fake() -> (Router, Arc<FakeCatalog>) {
    let fake = Arc::new(FakeCatalog::default());
    let state = AppState {
        catalog: fake.clone(),
    };
    (build_router(state), fake)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let res = app
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn health_is_ok() {
    let (app, _) = app_with_fake();
    let res = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn trending_returns_rows() {
    let (app, _) = app_with_fake();
    let (status, body) = get_json(app, "/trending").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().expect("array body");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["title"], "Trending One");
    assert_eq!(rows[0]["media_type"], "movie");
}

#[tokio::test]
async fn movies_surface_failed_pages() {
    let (app, _) = app_with_fake();
    let (status, body) = get_json(app, "/movies").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["shows"].as_array().unwrap().len(), 2);
    assert_eq!(body["failed_pages"], serde_json::json!([3]));
}

#[tokio::test]
async fn blank_search_never_reaches_the_catalog() {
    let (app, fake) = app_with_fake();
    let (status, body) = get_json(app, "/search?q=%20%20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
    assert_eq!(fake.search_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn missing_query_parameter_behaves_like_blank() {
    let (app, fake) = app_with_fake();
    let (status, body) = get_json(app, "/search").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
    assert_eq!(fake.search_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn empty_search_results_are_a_list_not_an_error() {
    let (app, fake) = app_with_fake();
    let (status, body) = get_json(app, "/search?q=nothing").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
    assert_eq!(fake.search_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn show_details_carry_the_requested_media_type() {
    let (app, _) = app_with_fake();
    let (status, body) = get_json(app, "/shows/movie/603").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 603);
    assert_eq!(body["media_type"], "movie");
}

#[tokio::test]
async fn unknown_media_type_segment_is_bad_request() {
    let (app, _) = app_with_fake();
    let res = app
        .oneshot(Request::get("/shows/book/603").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_show_maps_to_not_found() {
    let (app, _) = app_with_fake();
    let (status, body) = get_json(app, "/shows/movie/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("404"));
}

#[tokio::test]
async fn season_episodes_round_trip() {
    let (app, _) = app_with_fake();
    let (status, body) = get_json(app, "/tv/1399/season/1").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().expect("array body");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1]["episode_number"], 2);
}

#[tokio::test]
async fn unknown_season_maps_to_not_found() {
    let (app, _) = app_with_fake();
    let (status, _) = get_json(app, "/tv/1399/season/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
