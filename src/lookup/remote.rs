use super::{LookupCriteria, LookupError, MovieLookup};
use crate::schema::MovieRecord;
use crate::util::ResponseMessage;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;

/// Delegates lookups to another service exposing `GET /movies/`.
///
/// A `404` from the remote side is reported as [`LookupError::NotFound`] with
/// the remote message; anything else that is not a `200` carrying a valid
/// movie is an upstream failure.
#[derive(Debug, Clone)]
pub struct RemoteLookup {
    client: reqwest::Client,
    endpoint: String,
}

impl RemoteLookup {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(RemoteLookup {
            client,
            endpoint: format!("{}/movies/", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl MovieLookup for RemoteLookup {
    async fn lookup(&self, criteria: &LookupCriteria) -> Result<MovieRecord, LookupError> {
        let response = match self
            .client
            .get(self.endpoint.as_str())
            .query(criteria)
            .send()
            .await
        {
            Ok(res) => {
                tracing::info!("Got remote lookup response {}", res.status());
                res
            }
            Err(err) => {
                tracing::error!("Remote lookup request error {:?}", err);
                return Err(LookupError::upstream(err));
            }
        };

        match response.status() {
            StatusCode::OK => response.json::<MovieRecord>().await.map_err(|err| {
                tracing::error!("Remote lookup returned an invalid movie: {}", err);
                LookupError::upstream(err)
            }),
            StatusCode::NOT_FOUND => {
                let body = response
                    .json::<ResponseMessage>()
                    .await
                    .map_err(LookupError::upstream)?;
                Err(LookupError::NotFound(body.message))
            }
            status => Err(LookupError::upstream(format!(
                "remote lookup responded with {}",
                status
            ))),
        }
    }
}
