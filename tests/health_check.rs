use movie_lookup_backend::util::ResponseMessage;
use test_startup::*;

#[actix_rt::test]
async fn check_server_health() {
    let app = spawn_app(StubLookup::new(StubOutcome::Found(inception()))).await;
    let client: reqwest::Client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health_check", app.address.as_str()).as_str())
        .send()
        .await
        .expect("Failed to execute request");

    assert!(res.status().is_success());
    let body = res
        .json::<ResponseMessage>()
        .await
        .expect("Failed to parse the response body");
    assert_eq!(body.message.as_str(), "Movie lookup service is up");
}

#[actix_rt::test]
async fn openapi_document_describes_movie_lookup() {
    let app = spawn_app(StubLookup::new(StubOutcome::Found(inception()))).await;

    let res = reqwest::get(format!("{}/api-docs/openapi.json", app.address))
        .await
        .expect("Failed to execute request");

    assert!(res.status().is_success());
    let doc = res
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse the response body");
    let parameters = doc["paths"]["/movies/"]["get"]["parameters"]
        .as_array()
        .expect("movie lookup parameters are documented");
    let names: Vec<_> = parameters
        .iter()
        .filter_map(|param| param["name"].as_str())
        .collect();
    assert_eq!(names, ["title", "tmdb_id", "imdb_id", "year", "only_cached"]);
    assert!(doc["components"]["schemas"]["MovieRecord"].is_object());
    assert!(doc["components"]["schemas"]["PosterRecord"].is_object());
}
