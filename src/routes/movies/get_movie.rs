use super::{MovieLookupQuery, MISSING_IDENTIFIER};
use crate::error::ApiError;
use crate::lookup::{LookupCriteria, MovieLookup};
use crate::schema::{MovieRecord, MOVIE_SCHEMA};
use crate::util::ResponseMessage;
use actix_web::{
    http::header::ContentType,
    web::{Data, Query},
    HttpResponse,
};
use tracing::Instrument;
use validator::Validate;

/// Get TMDB movie data
///
/// Either title, TMDB ID or IMDB ID are required for a lookup.
#[utoipa::path(
    get,
    path = "/movies/",
    tag = "tmdb",
    params(MovieLookupQuery),
    responses(
        (status = 200, description = "Movie found", body = MovieRecord,
            headers(("ETag" = String, description = "Fingerprint of the response body"))),
        (status = 304, description = "Cached copy identified by If-None-Match is still valid"),
        (status = 400, description = "No identifier was supplied", body = ResponseMessage),
        (status = 404, description = "No movie matches the identifiers", body = ResponseMessage),
        (status = 502, description = "The movie provider failed", body = ResponseMessage)
    )
)]
pub async fn get_movie(
    query: Query<MovieLookupQuery>,
    lookup: Data<dyn MovieLookup>,
) -> Result<HttpResponse, ApiError> {
    let query = query.into_inner();
    tracing::info!("Got movie lookup query: {:?}", query);
    if let Err(error) = query.validate() {
        for errors in error.field_errors().values() {
            for err in errors.iter() {
                if let Some(message) = err.message.as_ref() {
                    tracing::error!("Error: {}", message.as_ref());
                    return Err(ApiError::BadRequest(message.to_string()));
                }
            }
        }
        return Err(ApiError::BadRequest(MISSING_IDENTIFIER.to_string()));
    }

    let criteria = LookupCriteria::from(query);
    let lookup_span = tracing::info_span!("Resolving movie", ?criteria);
    let movie = lookup
        .lookup(&criteria)
        .instrument(lookup_span)
        .await
        .map_err(|err| {
            tracing::warn!("Movie lookup did not succeed: {}", err);
            ApiError::from(err)
        })?;

    let body = MOVIE_SCHEMA.to_validated_json(&movie)?;
    tracing::info!("Resolved movie {} ({})", movie.id, movie.name);
    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(body))
}
