use super::{LookupCriteria, LookupError, MovieLookup};
use crate::schema::{MovieRecord, SchemaViolation, MOVIE_SCHEMA};
use async_trait::async_trait;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog `{path}` is not a valid list of movies: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("catalog `{path}` entry {index} (id {id}) is not a valid movie: {source}")]
    Invalid {
        path: String,
        index: usize,
        id: i64,
        #[source]
        source: SchemaViolation,
    },
}

/// Read-only set of movies held in memory.
///
/// Resolution order is TMDB ID, then IMDB ID, then title. A title may match
/// several movies: `year` narrows the candidates and the most popular one
/// wins, ties going to the lowest ID.
#[derive(Debug, Default)]
pub struct CatalogLookup {
    movies: Vec<MovieRecord>,
}

impl CatalogLookup {
    pub fn new(movies: Vec<MovieRecord>) -> Self {
        CatalogLookup { movies }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let raw = std::fs::read(path).map_err(|source| CatalogError::Io {
            path: origin.clone(),
            source,
        })?;
        let catalog = CatalogLookup::from_json(&raw, &origin)?;
        tracing::info!("Loaded {} movies from catalog `{}`", catalog.movies.len(), origin);
        Ok(catalog)
    }

    /// Decodes a JSON list of movies, checking each one against the movie
    /// schema. `origin` only names the source in errors.
    pub fn from_json(raw: &[u8], origin: &str) -> Result<Self, CatalogError> {
        let movies: Vec<MovieRecord> =
            serde_json::from_slice(raw).map_err(|source| CatalogError::Parse {
                path: origin.to_string(),
                source,
            })?;
        for (index, movie) in movies.iter().enumerate() {
            MOVIE_SCHEMA
                .to_validated_json(movie)
                .map_err(|source| CatalogError::Invalid {
                    path: origin.to_string(),
                    index,
                    id: movie.id,
                    source,
                })?;
        }
        Ok(CatalogLookup::new(movies))
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    fn by_tmdb_id(&self, raw: &str) -> Result<&MovieRecord, LookupError> {
        let id: i64 = raw
            .trim()
            .parse()
            .map_err(|_| LookupError::NotFound(format!("TMDB ID `{}` is not a number", raw)))?;
        self.movies
            .iter()
            .find(|movie| movie.id == id)
            .ok_or_else(|| LookupError::NotFound(format!("Movie with TMDB ID {} not found", id)))
    }

    fn by_imdb_id(&self, imdb_id: &str) -> Result<&MovieRecord, LookupError> {
        let imdb_id = imdb_id.trim();
        self.movies
            .iter()
            .find(|movie| {
                movie
                    .imdb_id
                    .as_deref()
                    .is_some_and(|known| known.eq_ignore_ascii_case(imdb_id))
            })
            .ok_or_else(|| {
                LookupError::NotFound(format!("Movie with IMDB ID {} not found", imdb_id))
            })
    }

    fn by_title(&self, title: &str, year: Option<i32>) -> Result<&MovieRecord, LookupError> {
        self.movies
            .iter()
            .filter(|movie| movie.is_titled(title))
            .filter(|movie| year.map_or(true, |year| movie.year == year))
            .max_by(|a, b| a.popularity.cmp(&b.popularity).then(b.id.cmp(&a.id)))
            .ok_or_else(|| {
                LookupError::NotFound(match year {
                    Some(year) => format!("No match for title `{}` in {}", title, year),
                    None => format!("No match for title `{}`", title),
                })
            })
    }
}

#[async_trait]
impl MovieLookup for CatalogLookup {
    async fn lookup(&self, criteria: &LookupCriteria) -> Result<MovieRecord, LookupError> {
        tracing::debug!(only_cached = criteria.only_cached(), "Searching catalog");
        let movie = if let Some(tmdb_id) = criteria.tmdb_id.as_deref() {
            self.by_tmdb_id(tmdb_id)?
        } else if let Some(imdb_id) = criteria.imdb_id.as_deref() {
            self.by_imdb_id(imdb_id)?
        } else if let Some(title) = criteria.title.as_deref() {
            self.by_title(title, criteria.year)?
        } else {
            return Err(LookupError::NotFound(
                "No identifier was given to search the catalog".to_string(),
            ));
        };
        Ok(movie.clone())
    }
}
