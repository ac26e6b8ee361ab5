//! Datura API client with one method per remote endpoint.
//!
//! Handles auth, payload shaping, and input validation before delegating to
//! the shared HTTP executor; raw decoded values are mapped onto the typed
//! structures from [`crate::types`].

use datura_common::{DaturaError, Result};
use datura_http::{Auth, HttpClient, HttpError, RequestOpts};
use reqwest::header::{HeaderValue, AUTHORIZATION};

use crate::config::ClientConfig;
use crate::types::{
    decode_response, validate_date, AiSearchRequest, AiSearchResult, BasicTwitterSearchResponse,
    BasicWebSearchResponse, TwitterByIdResponse, TwitterByUrlsResponse, TwitterLinksRequest,
    TwitterLinksSearchResponse, TwitterSearchRequest, TwitterUrlsRequest, WebLinksRequest,
    WebLinksSearchResponse,
};

/// Production API host. Override with [`Datura::with_base_url`] in tests.
pub const BASE_URL: &str = "https://apis.datura.ai";

/// Client for the Datura search API.
///
/// Holds one pooled HTTP transport and the `Authorization` header value for
/// its whole lifetime; dropping the client releases the connections. The
/// type is `Clone` and every method takes `&self`, so it can be shared
/// across tasks freely.
#[derive(Clone)]
pub struct Datura {
    http: HttpClient,
    auth: HeaderValue,
}

impl Datura {
    /// Create a client for the production API.
    ///
    /// Fails fast with [`DaturaError::Config`] on an empty or malformed key.
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_base_url(api_key, BASE_URL)
    }

    /// Create a client against a custom host (useful for testing).
    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(DaturaError::Config("API key must not be empty".into()));
        }
        let key = datura_http::sanitize_api_key(api_key).map_err(map_http_err)?;
        let auth = HeaderValue::from_str(&key)
            .map_err(|e| DaturaError::Config(format!("invalid Authorization header: {e}")))?;
        let http = HttpClient::new(base_url).map_err(map_http_err)?;
        Ok(Self { http, auth })
    }

    /// Create a client from a [`ClientConfig`], honoring its base URL and
    /// timeout overrides.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let base_url = config.base_url.as_deref().unwrap_or(BASE_URL);
        let mut client = Self::with_base_url(&config.api_key, base_url)?;
        if let Some(timeout) = config.timeout {
            client.http = client.http.with_timeout(timeout);
        }
        Ok(client)
    }

    fn opts(&self) -> RequestOpts<'_> {
        RequestOpts {
            auth: Some(Auth::Header {
                name: AUTHORIZATION,
                value: self.auth.clone(),
            }),
            ..Default::default()
        }
    }

    /// AI search across the requested tools.
    ///
    /// The response shape depends on the server-side synthesis, so the
    /// result is a tagged variant rather than a single structure.
    pub async fn ai_search(&self, request: AiSearchRequest) -> Result<AiSearchResult> {
        if request.tools.is_empty() {
            return Err(DaturaError::Schema(
                "ai_search requires at least one tool".into(),
            ));
        }

        let value = self
            .http
            .post_value("desearch/ai/search", &request, self.opts())
            .await
            .map_err(map_http_err)?;

        let result = AiSearchResult::from_value(value);
        tracing::debug!(
            shape = match &result {
                AiSearchResult::Structured(_) => "structured",
                AiSearchResult::Text(_) => "text",
                AiSearchResult::Raw(_) => "raw",
            },
            "ai_search resolved"
        );
        Ok(result)
    }

    /// AI link search over web verticals.
    pub async fn web_links_search(&self, request: WebLinksRequest) -> Result<WebLinksSearchResponse> {
        if request.tools.is_empty() {
            return Err(DaturaError::Schema(
                "web_links_search requires at least one tool".into(),
            ));
        }

        let value = self
            .http
            .post_value("desearch/ai/search/links/web", &request, self.opts())
            .await
            .map_err(map_http_err)?;
        decode_response(value)
    }

    /// AI link search over tweets.
    pub async fn twitter_links_search(
        &self,
        request: TwitterLinksRequest,
    ) -> Result<TwitterLinksSearchResponse> {
        let value = self
            .http
            .post_value("desearch/ai/search/links/twitter", &request, self.opts())
            .await
            .map_err(map_http_err)?;
        decode_response(value)
    }

    /// Filtered tweet search. Unset filters never reach the wire.
    pub async fn basic_twitter_search(
        &self,
        request: TwitterSearchRequest,
    ) -> Result<BasicTwitterSearchResponse> {
        if request.query.trim().is_empty() {
            return Err(DaturaError::Schema("query must not be empty".into()));
        }
        if let Some(date) = &request.start_date {
            validate_date("start_date", date)?;
        }
        if let Some(date) = &request.end_date {
            validate_date("end_date", date)?;
        }

        let value = self
            .http
            .post_value("twitter", &request, self.opts())
            .await
            .map_err(map_http_err)?;
        let resp: BasicTwitterSearchResponse = decode_response(value)?;
        tracing::debug!(tweet_count = resp.data.len(), "basic_twitter_search done");
        Ok(resp)
    }

    /// Plain web search, paginated via `num`/`start` query parameters.
    pub async fn basic_web_search(
        &self,
        query: &str,
        num: u32,
        start: u32,
    ) -> Result<BasicWebSearchResponse> {
        if query.trim().is_empty() {
            return Err(DaturaError::Schema("query must not be empty".into()));
        }

        let mut opts = self.opts();
        opts.query = Some(vec![
            ("query", query.into()),
            ("num", num.to_string().into()),
            ("start", start.to_string().into()),
        ]);

        let value = self
            .http
            .get_value("web", opts)
            .await
            .map_err(map_http_err)?;
        decode_response(value)
    }

    /// Look up tweets by their canonical URLs.
    pub async fn twitter_by_urls(&self, urls: Vec<String>) -> Result<TwitterByUrlsResponse> {
        if urls.is_empty() {
            return Err(DaturaError::Schema(
                "twitter_by_urls requires at least one URL".into(),
            ));
        }

        let request = TwitterUrlsRequest { urls };
        let value = self
            .http
            .post_value("twitter/urls", &request, self.opts())
            .await
            .map_err(map_http_err)?;
        decode_response(value)
    }

    /// Look up one tweet by id. The id becomes a path segment, so it must
    /// not carry URL delimiters.
    pub async fn twitter_by_id(&self, id: &str) -> Result<TwitterByIdResponse> {
        if id.is_empty() || id.contains(['/', '?', '#']) {
            return Err(DaturaError::Schema(format!("invalid tweet id: {id:?}")));
        }

        let value = self
            .http
            .get_value(&format!("twitter/{id}"), self.opts())
            .await
            .map_err(map_http_err)?;
        decode_response(value)
    }
}

/// Fold transport errors into the caller-facing taxonomy, preserving status
/// and body for HTTP failures.
fn map_http_err(e: HttpError) -> DaturaError {
    match e {
        HttpError::Url(m) | HttpError::Build(m) => DaturaError::Config(m),
        HttpError::Network(m) => DaturaError::Network(m),
        HttpError::Decode(m, _) => DaturaError::Decode(m),
        HttpError::Api { status, body } => DaturaError::Http {
            status: status.as_u16(),
            body,
        },
    }
}
