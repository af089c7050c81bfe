//! Category predicates and result shaping.
//!
//! The catalog has no native anime/TV distinction; `keep_for_tv` and
//! `keep_for_anime` enforce the split client-side over original language
//! and origin country.

use tracing::warn;

use crate::models::Show;

use super::error::CatalogError;
use super::Discovery;

/// Listings require both a poster and a backdrop; rows missing either
/// are dropped instead of rendered with placeholders.
pub fn has_required_artwork(show: &Show) -> bool {
    show.has_artwork()
}

/// General-TV predicate: artwork present, original language not Japanese,
/// and Japan not among the origin countries.
pub fn keep_for_tv(show: &Show) -> bool {
    show.has_artwork()
        && show.original_language.as_deref() != Some("ja")
        && !show.origin_country.iter().any(|c| c == "JP")
}

/// Anime predicate: Japanese original language or Japan among the origin
/// countries, with artwork present.
pub fn keep_for_anime(show: &Show) -> bool {
    (show.original_language.as_deref() == Some("ja")
        || show.origin_country.iter().any(|c| c == "JP"))
        && show.has_artwork()
}

/// Order a category non-increasing by rating.
pub fn sort_by_rating(shows: &mut [Show]) {
    shows.sort_by(|a, b| b.vote_average.total_cmp(&a.vote_average));
}

/// Flatten per-page outcomes into one result set. Successes concatenate
/// in page order; a failed page contributes nothing and its number is
/// recorded, so callers can tell a short sweep from an empty category.
pub fn flatten_pages(pages: Vec<(u32, Result<Vec<Show>, CatalogError>)>) -> Discovery {
    let mut shows = Vec::new();
    let mut failed_pages = Vec::new();
    for (page, outcome) in pages {
        match outcome {
            Ok(mut rows) => shows.append(&mut rows),
            Err(err) => {
                warn!("discover page {} failed: {}", page, err);
                failed_pages.push(page);
            }
        }
    }
    Discovery {
        shows,
        failed_pages,
    }
}
