use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Canonical metadata for one movie, as returned by `GET /movies/`.
///
/// Every field is always serialized. Optional values are emitted as `null`
/// rather than omitted, and unknown fields are rejected on decode.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct MovieRecord {
    pub id: i64,
    #[schema(required = true)]
    pub imdb_id: Option<String>,
    #[schema(required = true, format = Uri)]
    pub url: Option<String>,
    pub name: String,
    #[schema(required = true)]
    pub original_name: Option<String>,
    #[schema(required = true)]
    pub alternative_name: Option<String>,
    pub year: i32,
    #[schema(required = true)]
    pub certification: Option<String>,
    /// Minutes.
    pub runtime: i32,
    pub language: String,
    pub overview: String,
    pub tagline: String,
    #[schema(required = true)]
    pub rating: Option<f64>,
    #[schema(required = true)]
    pub votes: Option<i64>,
    #[schema(required = true)]
    pub popularity: Option<i64>,
    pub adult: bool,
    #[schema(required = true)]
    pub budget: Option<i64>,
    #[schema(required = true)]
    pub revenue: Option<i64>,
    #[schema(required = true, format = Uri)]
    pub homepage: Option<String>,
    pub genres: Vec<String>,
    pub posters: Vec<PosterRecord>,
    pub updated: DateTime<Utc>,
}

/// One poster image attached to a [`MovieRecord`]. Closed like its parent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct PosterRecord {
    pub id: i64,
    /// `id` of the movie this poster belongs to.
    pub movie_id: i64,
    /// Absolute URL of the image.
    #[schema(format = Uri)]
    pub url: String,
    /// Image path on the provider, relative to its image base URL.
    pub file_path: String,
    /// Pixels.
    pub width: i32,
    /// Pixels.
    pub height: i32,
    /// `width / height`, e.g. `0.667` for a 2:3 portrait poster.
    pub aspect_ratio: f64,
    /// Average user rating of the image, 0 to 10.
    pub vote_average: f64,
    pub vote_count: i64,
    /// ISO 639-1 code of the text on the image.
    pub language: String,
}

impl MovieRecord {
    /// Whether `title` names this movie under any of its titles.
    pub fn is_titled(&self, title: &str) -> bool {
        let title = title.trim().to_lowercase();
        std::iter::once(Some(self.name.as_str()))
            .chain([
                self.original_name.as_deref(),
                self.alternative_name.as_deref(),
            ])
            .flatten()
            .any(|name| name.trim().to_lowercase() == title)
    }
}
