//! REST client for the stock exchange backend.
//!
//! This crate provides a small client for the two list endpoints the backend
//! exposes. It focuses on:
//!
//! - Constructing an HTTP client with sensible defaults
//! - Resolving and validating the base URL from `MSE_API_BASE`
//! - Fetching JSON array endpoints and mapping failures onto
//!   [`FetchError`]
//!
//! The primary entry point is [`MseClient`]. Create an instance via
//! [`MseClient::new_from_env`] (or [`MseClient::with_base_url`] when the
//! caller supplies the URL), then call [`MseClient::fetch_records`] with one
//! of the endpoint path constants.

use std::time::Duration;
use std::{env, fmt};

use anyhow::{Context, Result, anyhow};
use mse_types::{FetchError, Record};
use reqwest::{Client, Url, header};
use tracing::{debug, warn};

/// Base URL used when `MSE_API_BASE` is not set. Matches the backend's
/// development default.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Environment variable that overrides the base URL.
pub const BASE_URL_ENV_VAR: &str = "MSE_API_BASE";

/// Path of the issuer list endpoint.
pub const ISSUERS_PATH: &str = "/api/issuers";

/// Path of the historical trading data endpoint.
pub const HISTORICAL_DATA_PATH: &str = "/api/historicaldata";

/// Hostnames allowed to use plain HTTP for local development.
const LOCALHOST_DOMAINS: &[&str] = &["localhost", "127.0.0.1"];

/// Thin wrapper around a configured `reqwest::Client` bound to a validated
/// base URL. Cloning is cheap; the underlying client is shared.
#[derive(Clone)]
pub struct MseClient {
    base_url: String,
    http: Client,
    user_agent: String,
}

impl fmt::Debug for MseClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MseClient").field("base_url", &self.base_url).finish()
    }
}

impl MseClient {
    /// Construct a client from `MSE_API_BASE`, falling back to
    /// [`DEFAULT_BASE_URL`].
    pub fn new_from_env() -> Result<Self> {
        let base_url = env::var(BASE_URL_ENV_VAR).unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        Self::with_base_url(&base_url)
    }

    /// Construct a client against an explicit base URL. A trailing slash is
    /// stripped so endpoint paths can always start with `/`.
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        validate_base_url(base_url)?;

        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(default_headers)
            .timeout(Duration::from_secs(30))
            .build()
            .context("build http client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            user_agent: format!("mseview/0.1; {}", env::consts::OS),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a JSON array endpoint and return its records.
    ///
    /// Failures map onto the three [`FetchError`] kinds: transport problems
    /// are `Network`, non-2xx responses are `Status`, and a 2xx body that is
    /// not a JSON array of objects is `Parse`.
    pub async fn fetch_records(&self, path: &str) -> Result<Vec<Record>, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "fetching records");

        let response = self
            .http
            .get(&url)
            .header(header::USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|error| {
                warn!(%url, %error, "request failed");
                FetchError::Network(error.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "non-success response");
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|error| FetchError::Network(error.to_string()))?;
        let records = parse_record_array(&body)?;
        debug!(%url, count = records.len(), "fetch complete");
        Ok(records)
    }
}

/// Parse a response body as a JSON array of objects.
pub fn parse_record_array(body: &str) -> Result<Vec<Record>, FetchError> {
    serde_json::from_str::<Vec<Record>>(body).map_err(|error| FetchError::Parse(error.to_string()))
}

/// Validate that a base URL is acceptable for use by the client.
///
/// Rules:
/// - `localhost` or `127.0.0.1`: any scheme is allowed
/// - otherwise: scheme must be HTTPS
fn validate_base_url(base: &str) -> Result<()> {
    let parsed = Url::parse(base).map_err(|e| anyhow!("invalid {} URL '{}': {}", BASE_URL_ENV_VAR, base, e))?;

    let host = parsed
        .host_str()
        .ok_or_else(|| anyhow!("{} must include a host", BASE_URL_ENV_VAR))?;

    if LOCALHOST_DOMAINS.iter().any(|&allowed| host.eq_ignore_ascii_case(allowed)) {
        return Ok(());
    }

    if parsed.scheme() != "https" {
        return Err(anyhow!(
            "{} must use https for non-localhost hosts; got '{}://'",
            BASE_URL_ENV_VAR,
            parsed.scheme()
        ));
    }

    Ok(())
}
