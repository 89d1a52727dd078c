//! `OmdbClient` - OMDb API client implementation.

use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result as AnyResult};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use super::api::LocalOmdbApi;
use super::error::{OmdbError, Result};
use super::types::{MovieDetail, MovieSummary, OmdbSearchResponse, OmdbStatus, SearchParams};

/// Default base URL for the OMDb API.
pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// OMDb API client.
#[allow(clippy::module_name_repetitions)]
pub struct OmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Endpoint all requests are sent to.
    base_url: Url,
    /// API key sent as the `apikey` query parameter.
    api_key: String,
}

impl fmt::Debug for OmdbClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OmdbClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// Builder for `OmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct OmdbClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl OmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            user_agent: None,
            timeout: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the per-request timeout (default: 10s).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_key` is not set.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> AnyResult<OmdbClient> {
        let api_key = self.api_key.context("api_key is required")?;
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(OmdbClient {
            http_client,
            base_url,
            api_key,
        })
    }
}

impl OmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> OmdbClientBuilder {
        OmdbClientBuilder::new()
    }

    /// Returns the endpoint requests are sent to.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sends a GET request with the API key and returns the response body.
    ///
    /// A non-2xx response carrying an OMDb error envelope is returned as-is,
    /// so callers classify it the same way as a 200 failure. Any other
    /// non-2xx response becomes [`OmdbError::Service`].
    #[instrument(skip_all)]
    async fn get_body(&self, query: &[(&str, &str)]) -> Result<String> {
        let request = self
            .http_client
            .get(self.base_url.clone())
            .query(&[("apikey", self.api_key.as_str())])
            .query(query)
            .build()
            .map_err(OmdbError::network)?;

        tracing::debug!(params = ?query, "OMDb API request");

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(OmdbError::network)?;
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            if serde_json::from_str::<OmdbStatus>(&body)
                .is_ok_and(|envelope| !envelope.is_success() && envelope.error.is_some())
            {
                tracing::debug!(%status, "OMDb API reported failure");
                return Ok(body);
            }
            return Err(OmdbError::Service(format!("HTTP {status}: {body}")));
        }

        response.text().await.map_err(OmdbError::network)
    }
}

/// Decodes a JSON body, reporting malformed payloads as service failures.
fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body)
        .map_err(|e| OmdbError::Service(format!("malformed response: {e}")))
}

/// Whether a search failure message just means "zero matches".
fn is_no_match(message: &str) -> bool {
    message.to_ascii_lowercase().contains("not found")
}

/// Whether a lookup failure message means the identifier is unknown.
fn is_unknown_id(message: &str) -> bool {
    let lower = message.to_ascii_lowercase();
    lower.contains("incorrect imdb id")
        || lower.contains("not found")
        || lower.contains("error getting data")
}

impl LocalOmdbApi for OmdbClient {
    #[instrument(skip_all, fields(term = %params.term, filter = %params.filter))]
    async fn search(&self, params: &SearchParams) -> Result<Vec<MovieSummary>> {
        let mut query: Vec<(&str, &str)> = vec![("s", params.term.as_str())];
        if let Some(kind) = params.filter.query_value() {
            query.push(("type", kind));
        }

        let body = self.get_body(&query).await?;
        let status: OmdbStatus = decode(&body)?;
        if !status.is_success() {
            let message = status.message();
            if is_no_match(&message) {
                tracing::debug!(%message, "OMDb search returned no matches");
                return Ok(Vec::new());
            }
            return Err(OmdbError::Service(message));
        }

        let response: OmdbSearchResponse = decode(&body)?;
        tracing::debug!(
            returned = response.search.len(),
            total = response.total_results.as_deref().unwrap_or("-"),
            "OMDb search complete"
        );
        Ok(response.search)
    }

    #[instrument(skip_all, fields(id = %id))]
    async fn movie_detail(&self, id: &str) -> Result<MovieDetail> {
        let body = self.get_body(&[("i", id), ("plot", "short")]).await?;
        let status: OmdbStatus = decode(&body)?;
        if !status.is_success() {
            let message = status.message();
            if is_unknown_id(&message) {
                return Err(OmdbError::NotFound(String::from(id)));
            }
            return Err(OmdbError::Service(message));
        }
        decode(&body)
    }
}
