use crate::lookup::LookupError;
use crate::schema::SchemaViolation;
use crate::util::ResponseMessage;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// The lookup capability failed for a reason other than a missing movie.
    #[error("movie lookup failed")]
    Upstream(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The lookup capability produced a record outside the response contract.
    #[error("movie record violates the response schema: {0}")]
    SchemaViolation(#[from] SchemaViolation),
}

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::NotFound(message) => ApiError::NotFound(message),
            LookupError::Upstream(source) => ApiError::Upstream(source),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::SchemaViolation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Upstream(source) => {
                tracing::error!("Movie lookup failed: {}", source);
            }
            ApiError::SchemaViolation(violation) => {
                tracing::error!("Refusing to send non-conforming movie: {}", violation);
            }
            _ => {}
        }
        HttpResponse::build(self.status_code()).json(ResponseMessage::new(self.to_string()))
    }
}
