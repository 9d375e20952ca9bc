use dotenv::dotenv;
use movie_lookup_backend::configuration::get_configuration;
use movie_lookup_backend::startup::{build_lookup, run_server};
use movie_lookup_backend::telemetry::{get_subscriber, init_subscriber};
use std::net::TcpListener;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    let configuration = get_configuration("configuration").map_err(|err| {
        std::io::Error::other(format!(
            "Failed to read `configuration.json`. Please make sure it exists and is valid JSON: {}",
            err
        ))
    })?;

    let subscriber = get_subscriber(
        "movie_lookup",
        configuration.log.level.as_str(),
        std::io::stdout,
        configuration.log.format,
    );
    init_subscriber(subscriber);

    let lookup = build_lookup(&configuration.lookup)?;
    let listener = TcpListener::bind(configuration.application.address())?;
    tracing::info!("Listening on {}", configuration.application.address());
    run_server(listener, lookup, configuration.application.allowed_origin)?.await
}
