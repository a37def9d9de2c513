//! Thin JSON client over `reqwest`.
//!
//! Every request carries the configured bearer token and company header.
//! Each call has exactly one outcome; nothing is retried.

use std::time::Duration;

use finnza_shared::config::{BackendConfig, HttpConfig};
use finnza_shared::{AppConfig, AppError, AppResult};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

/// `X-Empresa-Id`: selects the active company on the backend.
pub const COMPANY_HEADER: &str = "x-empresa-id";

/// Query string pairs; empty values are never pushed.
pub type QueryParams = Vec<(&'static str, String)>;

/// Pushes `key=value` when `value` is non-blank.
pub fn push_param(params: &mut QueryParams, key: &'static str, value: Option<&str>) {
    if let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) {
        params.push((key, v.to_string()));
    }
}

/// JSON client bound to one backend.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client from the `backend` and `http` sections.
    pub fn new(backend: &BackendConfig, http: &HttpConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(http.timeout_secs))
            .connect_timeout(Duration::from_secs(http.connect_timeout_secs))
            .default_headers(default_headers(backend)?)
            .build()
            .map_err(|e| AppError::Config(format!("HTTP client: {e}")))?;

        debug!(
            base_url = %backend.base_url,
            company_id = ?backend.company_id,
            timeout_secs = http.timeout_secs,
            "API client configured"
        );

        Ok(Self {
            client,
            base_url: backend.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Builds a client from the full configuration.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        Self::new(&config.backend, &config.http)
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// `GET path?query` and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> AppResult<T> {
        let url = self.url(path);
        debug!(%url, params = query.len(), "GET");
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(transport_error)?;
        decode(response).await
    }

    /// `POST path` with a JSON body and decode the JSON response.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!(%url, "POST");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;
        decode(response).await
    }
}

/// Headers sent with every request.
pub fn default_headers(backend: &BackendConfig) -> AppResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    if let Some(token) = backend.token.as_deref().filter(|t| !t.is_empty()) {
        let value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| AppError::Config("backend.token is not a valid header value".into()))?;
        headers.insert(AUTHORIZATION, value);
    }
    if let Some(id) = backend.company_id.filter(|id| *id > 0) {
        headers.insert(COMPANY_HEADER, HeaderValue::from(id));
    }
    Ok(headers)
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

async fn decode<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    let status = response.status();
    let body = response.text().await.map_err(transport_error)?;

    if !status.is_success() {
        let err = error_from_status(status, &body);
        warn!(status = status.as_u16(), code = err.error_code(), "Request failed");
        return Err(err);
    }
    Ok(serde_json::from_str(&body)?)
}

fn transport_error(err: reqwest::Error) -> AppError {
    warn!(error = %err, "Transport failure");
    AppError::ExternalService {
        status: err.status().map(|s| s.as_u16()),
        message: String::new(),
    }
}

/// Maps a non-2xx response into an [`AppError`].
pub fn error_from_status(status: StatusCode, body: &str) -> AppError {
    let message = error_message(body);
    match status {
        StatusCode::UNAUTHORIZED => AppError::Unauthorized(message),
        StatusCode::FORBIDDEN => AppError::Forbidden(message),
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        _ => AppError::ExternalService {
            status: Some(status.as_u16()),
            message,
        },
    }
}

/// `mensagem` (or `message` / `erro`) from a JSON error body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            ["mensagem", "message", "erro"]
                .iter()
                .find_map(|k| v.get(*k)?.as_str().map(str::to_string))
        })
        .unwrap_or_default()
}
