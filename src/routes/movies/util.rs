use super::get_movie;
use crate::lookup::LookupCriteria;
use crate::middleware::ConditionalGet;
use crate::util::{deserialize_flag, deserialize_non_blank};
use actix_web::{web, Scope};
use serde::Deserialize;
use std::borrow::Cow;
use utoipa::IntoParams;
use validator::{Validate, ValidationError};

pub const MISSING_IDENTIFIER: &str = "Either title, TMDB ID or IMDB ID are required for a lookup";

/// Query string accepted by `GET /movies/`.
#[derive(Deserialize, Debug, Default, Validate, IntoParams)]
#[validate(schema(function = "validate_identifiers"))]
#[into_params(parameter_in = Query)]
pub struct MovieLookupQuery {
    /// Movie title
    #[serde(default, deserialize_with = "deserialize_non_blank")]
    pub title: Option<String>,
    /// TMDB ID
    #[serde(default, deserialize_with = "deserialize_non_blank")]
    pub tmdb_id: Option<String>,
    /// IMDB ID
    #[serde(default, deserialize_with = "deserialize_non_blank")]
    pub imdb_id: Option<String>,
    /// Movie year
    pub year: Option<i32>,
    /// Return only cached results
    #[serde(default, deserialize_with = "deserialize_flag")]
    #[param(value_type = Option<i32>)]
    pub only_cached: Option<bool>,
}

pub fn validate_identifiers(query: &MovieLookupQuery) -> Result<(), ValidationError> {
    if query.title.is_none() && query.tmdb_id.is_none() && query.imdb_id.is_none() {
        return Err(ValidationError::new("missing_identifier")
            .with_message(Cow::from(MISSING_IDENTIFIER)));
    }
    Ok(())
}

impl From<MovieLookupQuery> for LookupCriteria {
    fn from(query: MovieLookupQuery) -> Self {
        LookupCriteria {
            title: query.title,
            tmdb_id: query.tmdb_id,
            imdb_id: query.imdb_id,
            year: query.year,
            only_cached: query.only_cached,
        }
    }
}

pub fn movie_source() -> Scope {
    web::scope("/movies").route(
        "/",
        web::get().to(get_movie).wrap(ConditionalGet),
    )
}
