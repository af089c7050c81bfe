use serde::{Deserialize, Serialize};

/// Discriminator attached to every normalized show record. The catalog
/// omits it on detail responses and on discover rows; the client stamps
/// it back on before records leave the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    /// Path segment the catalog uses for this type ("movie" or "tv").
    pub fn as_path(self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

/// One movie or TV entry in the normalized record shape shared by every
/// listing and the detail endpoints. Movies carry `title`/`release_date`,
/// TV rows carry `name`/`first_air_date`; `runtime`, `number_of_seasons`,
/// and `genres` only appear on detail responses. The numeric id is unique
/// within a media type but not across types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Show {
    pub id: i32,
    pub title: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub media_type: Option<MediaType>,
    #[serde(default)]
    pub vote_average: f32,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub original_language: Option<String>,
    #[serde(default)]
    pub origin_country: Vec<String>,
    pub runtime: Option<i32>,
    pub number_of_seasons: Option<i32>,
    pub genres: Option<Vec<Genre>>,
}

impl Show {
    /// Both image paths present and non-empty. Listings drop anything
    /// less instead of rendering placeholders.
    pub fn has_artwork(&self) -> bool {
        fn present(path: &Option<String>) -> bool {
            path.as_deref().is_some_and(|p| !p.is_empty())
        }
        present(&self.poster_path) && present(&self.backdrop_path)
    }

    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or_default()
    }
}

/// One episode of one season. Fetched fresh per (show, season) query,
/// never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    pub id: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub overview: String,
    pub still_path: Option<String>,
    pub episode_number: i32,
    #[serde(default)]
    pub season_number: i32,
    pub air_date: Option<String>,
}

/// Container the season endpoint returns; callers usually only want the
/// episode list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Season {
    pub id: i32,
    pub season_number: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    pub air_date: Option<String>,
    #[serde(default)]
    pub episodes: Vec<Episode>,
}
