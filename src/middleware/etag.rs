use actix_web::{
    body::{self, BoxBody, MessageBody},
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorInternalServerError,
    http::{
        header::{self, EntityTag, HeaderValue, IfNoneMatch},
        Method, StatusCode,
    },
    Error, HttpMessage, HttpResponse,
};
use futures_util::{future::LocalBoxFuture, FutureExt};
use sha2::{Digest, Sha256};
use std::{
    future::{ready, Ready},
    rc::Rc,
};

/// Strong entity tag derived from the SHA-256 of a response body.
pub fn fingerprint(body: &[u8]) -> EntityTag {
    EntityTag::new_strong(format!("{:x}", Sha256::digest(body)))
}

/// Whether an `If-None-Match` header lets us answer `304` for `etag`.
pub fn is_fresh(if_none_match: Option<&IfNoneMatch>, etag: &EntityTag) -> bool {
    match if_none_match {
        Some(IfNoneMatch::Any) => true,
        Some(IfNoneMatch::Items(tags)) => tags.iter().any(|tag| tag.weak_eq(etag)),
        None => false,
    }
}

/// Conditional GET support for the wrapped routes.
///
/// Successful `GET` responses get an `ETag` computed from their body. When
/// the request already carries that tag in `If-None-Match`, the body is
/// dropped and `304 Not Modified` is returned instead.
#[derive(Default)]
pub struct ConditionalGet;

impl<S, B> Transform<S, ServiceRequest> for ConditionalGet
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = ConditionalGetMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ConditionalGetMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct ConditionalGetMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for ConditionalGetMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;
    type Error = Error;
    type Response = ServiceResponse<BoxBody>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let is_get = req.method() == Method::GET;
        let if_none_match = req.get_header::<IfNoneMatch>();
        let service = self.service.clone();

        async move {
            let res = service.call(req).await?;
            if !is_get || res.status() != StatusCode::OK {
                return Ok(res.map_into_boxed_body());
            }

            let (http_req, http_res) = res.into_parts();
            let (http_res, res_body) = http_res.into_parts();
            let bytes = body::to_bytes(res_body).await.map_err(|err| {
                let err: Box<dyn std::error::Error> = err.into();
                tracing::error!("Failed to buffer response body: {}", err);
                ErrorInternalServerError(err.to_string())
            })?;

            let etag = fingerprint(&bytes);
            if is_fresh(if_none_match.as_ref(), &etag) {
                tracing::info!("Client copy is fresh, answering 304 for {}", etag);
                let not_modified = HttpResponse::NotModified()
                    .insert_header(header::ETag(etag))
                    .finish();
                return Ok(ServiceResponse::new(http_req, not_modified));
            }

            let etag_value = HeaderValue::from_str(&etag.to_string())
                .map_err(|err| ErrorInternalServerError(err.to_string()))?;
            let mut http_res = http_res.set_body(bytes);
            http_res.headers_mut().insert(header::ETAG, etag_value);
            Ok(ServiceResponse::new(http_req, http_res.map_into_boxed_body()))
        }
        .boxed_local()
    }
}
