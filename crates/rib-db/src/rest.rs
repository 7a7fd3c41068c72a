//! PostgREST client for the hosted backend.
//!
//! Renders [`SelectQuery`] values as PostgREST query strings, authenticates
//! with the project API key (plus an optional user access token so
//! row-level security applies), and maps PostgREST error bodies to
//! [`DatabaseError::Api`].

use reqwest::Url;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::Value;

use rib_config::BackendConfig;

use crate::error::DatabaseError;
use crate::query::SelectQuery;
use crate::retry::{RetryConfig, is_transient_status, is_transient_transport_error};
use crate::store::{RemoteStore, single_row};

/// HTTP client for a PostgREST endpoint.
pub struct RestClient {
    http: reqwest::Client,
    rest_url: String,
    schema: String,
    retry: RetryConfig,
}

impl RestClient {
    /// Build a client from the backend configuration.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` if the backend is not configured
    /// or a credential is not a valid header value, and `DatabaseError::Http`
    /// if the underlying `reqwest::Client` fails to build.
    pub fn from_config(config: &BackendConfig) -> Result<Self, DatabaseError> {
        if !config.is_configured() {
            return Err(DatabaseError::InvalidState(
                "backend is not configured: set backend.url and an API key".into(),
            ));
        }

        let mut headers = HeaderMap::new();
        headers.insert("apikey", header_value("api key", config.api_key())?);
        headers.insert(
            AUTHORIZATION,
            header_value("bearer token", &format!("Bearer {}", config.bearer_token()))?,
        );

        let http = reqwest::Client::builder()
            .user_agent(concat!("ribctl/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            rest_url: config.rest_url(),
            schema: config.schema.clone(),
            retry: RetryConfig::with_retries(config.max_retries),
        })
    }

    /// Override the retry policy.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    fn table_url(&self, query: &SelectQuery) -> Result<Url, DatabaseError> {
        let mut url = parse_url(&format!(
            "{}/{}",
            self.rest_url,
            urlencoding::encode(&query.table)
        ))?;
        url.query_pairs_mut().extend_pairs(query.to_query_pairs());
        Ok(url)
    }

    fn rpc_url(&self, function: &str) -> Result<Url, DatabaseError> {
        parse_url(&format!(
            "{}/rpc/{}",
            self.rest_url,
            urlencoding::encode(function)
        ))
    }

    /// Send a request, retrying transient failures with backoff.
    async fn send_with_retry<F>(&self, build: F) -> Result<reqwest::Response, DatabaseError>
    where
        F: Fn() -> reqwest::RequestBuilder + Send + Sync,
    {
        let mut attempt = 1;
        loop {
            let retries_left = attempt < self.retry.max_attempts;
            match build().send().await {
                Ok(resp) if retries_left && is_transient_status(resp.status().as_u16()) => {
                    tracing::warn!(
                        status = resp.status().as_u16(),
                        attempt,
                        "transient backend response, retrying"
                    );
                }
                Ok(resp) => return check_response(resp).await,
                Err(e) if retries_left && is_transient_transport_error(&e) => {
                    tracing::warn!(%e, attempt, "transient transport error, retrying");
                }
                Err(e) => return Err(DatabaseError::Http(e)),
            }
            tokio::time::sleep(self.retry.delay_for(attempt)).await;
            attempt += 1;
        }
    }
}

impl RemoteStore for RestClient {
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Value>, DatabaseError> {
        let url = self.table_url(query)?;
        tracing::debug!(%query, "select");
        let resp = self
            .send_with_retry(|| {
                self.http
                    .get(url.clone())
                    .header("Accept-Profile", &self.schema)
            })
            .await?;
        decode_rows(resp, &query.table).await
    }

    async fn select_single(&self, query: &SelectQuery) -> Result<Option<Value>, DatabaseError> {
        // Two rows are enough to tell "one" from "several".
        let rows = self.select(&at_most_two(query)).await;
        into_single(rows, query)
    }

    async fn rpc(&self, function: &str, args: &Value) -> Result<Value, DatabaseError> {
        let url = self.rpc_url(function)?;
        tracing::debug!(function, "rpc");
        let resp = self
            .send_with_retry(|| {
                self.http
                    .post(url.clone())
                    .header("Content-Profile", &self.schema)
                    .json(args)
            })
            .await?;
        resp.json::<Value>()
            .await
            .map_err(|e| DatabaseError::Decode(format!("rpc {function}: {e}")))
    }
}

fn header_value(what: &str, value: &str) -> Result<HeaderValue, DatabaseError> {
    HeaderValue::from_str(value)
        .map_err(|e| DatabaseError::InvalidState(format!("invalid {what}: {e}")))
}

fn parse_url(raw: &str) -> Result<Url, DatabaseError> {
    Url::parse(raw).map_err(|e| DatabaseError::InvalidState(format!("invalid URL '{raw}': {e}")))
}

/// Error body returned by PostgREST.
#[derive(Debug, Deserialize)]
struct PostgrestError {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

/// Return the response unchanged on success, else decode the error body.
async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, DatabaseError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(api_error(status.as_u16(), &body))
}

fn api_error(status: u16, body: &str) -> DatabaseError {
    match serde_json::from_str::<PostgrestError>(body) {
        Ok(err) => {
            let mut message = err.message.unwrap_or_else(|| String::from("request failed"));
            for extra in [err.details, err.hint].into_iter().flatten() {
                message.push_str("; ");
                message.push_str(&extra);
            }
            DatabaseError::Api {
                status,
                code: err.code,
                message,
            }
        }
        Err(_) => DatabaseError::Api {
            status,
            code: None,
            message: if body.is_empty() {
                String::from("request failed")
            } else {
                body.to_string()
            },
        },
    }
}

async fn decode_rows(resp: reqwest::Response, table: &str) -> Result<Vec<Value>, DatabaseError> {
    resp.json::<Vec<Value>>()
        .await
        .map_err(|e| DatabaseError::Decode(format!("{table}: {e}")))
}

fn at_most_two(query: &SelectQuery) -> SelectQuery {
    let limit = query.limit.map_or(2, |limit| limit.min(2));
    query.clone().limit(limit)
}

/// Map an array read onto the `Option` contract: zero rows is `None`, more
/// than one is an error.
fn into_single(
    rows: Result<Vec<Value>, DatabaseError>,
    query: &SelectQuery,
) -> Result<Option<Value>, DatabaseError> {
    match rows {
        Ok(rows) => single_row(rows, query),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}
