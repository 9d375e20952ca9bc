use crate::configuration::LookupSettings;
use crate::error::ApiError;
use crate::lookup::{CatalogLookup, MovieLookup, RemoteLookup};
use crate::routes::{health_check, movie_source, openapi_spec};

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{
    dev::Server,
    web::{self, Data},
    App, HttpServer,
};
use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;
use tracing_actix_web::TracingLogger;

fn configure_cors(allowed_origin: &str) -> Cors {
    let mut cors = Cors::default();
    cors = if allowed_origin == "*" {
        cors.allow_any_origin()
    } else {
        cors.allowed_origin(allowed_origin)
    };
    cors.allowed_methods(vec!["GET"])
        .allowed_headers(vec![header::ACCEPT, header::IF_NONE_MATCH])
        .expose_headers(vec![header::ETAG])
        .max_age(3600)
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        tracing::error!("Rejected query string: {}", err);
        ApiError::BadRequest(err.to_string()).into()
    })
}

/// Instantiates the lookup capability described by the configuration.
pub fn build_lookup(settings: &LookupSettings) -> Result<Arc<dyn MovieLookup>, std::io::Error> {
    match settings {
        LookupSettings::Catalog { path } => {
            let catalog = CatalogLookup::from_file(path).map_err(std::io::Error::other)?;
            Ok(Arc::new(catalog))
        }
        LookupSettings::Remote {
            base_url,
            timeout_seconds,
        } => {
            let remote = RemoteLookup::new(base_url, Duration::from_secs(*timeout_seconds))
                .map_err(std::io::Error::other)?;
            tracing::info!("Delegating movie lookups to {}", base_url);
            Ok(Arc::new(remote))
        }
    }
}

pub fn run_server(
    listener: TcpListener,
    lookup: Arc<dyn MovieLookup>,
    allowed_origin: String,
) -> Result<Server, std::io::Error> {
    let lookup: Data<dyn MovieLookup> = Data::from(lookup);

    let server = HttpServer::new(move || {
        let cors = configure_cors(allowed_origin.as_str());

        App::new()
            .wrap(cors)
            .wrap(TracingLogger::default())
            .app_data(query_config())
            .app_data(lookup.clone())
            .service(movie_source())
            .route("/api-docs/openapi.json", web::get().to(openapi_spec))
            .route("/health_check", web::get().to(health_check))
    })
    .listen(listener)?
    .run();

    Ok(server)
}
