use std::time::Duration;

use diary_core::RawPost;
use diary_logging::diary_debug;
use futures_util::StreamExt;
use reqwest::Url;
use serde_json::Value;

use crate::{ApiError, FailureKind};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
    /// Scheme used to reach `{host}`; servers are always `https` in practice.
    pub scheme: String,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
            scheme: "https".to_string(),
            user_agent: format!("mastodon-diary/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// The two read-only endpoints of the Mastodon client API the diary needs.
#[async_trait::async_trait]
pub trait MastodonApi: Send + Sync {
    /// `GET /api/v1/accounts/lookup?acct={acct}`, returned as raw JSON so the
    /// caller can tell an `error` body from an account.
    async fn lookup_account(&self, host: &str, acct: &str) -> Result<Value, ApiError>;

    /// `GET /api/v1/accounts/{id}/statuses[?max_id={n}]`.
    async fn account_statuses(
        &self,
        host: &str,
        account_id: &str,
        max_id: Option<i64>,
    ) -> Result<Vec<RawPost>, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestMastodonClient {
    settings: FetchSettings,
    client: reqwest::Client,
}

impl ReqwestMastodonClient {
    pub fn new(settings: FetchSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, host: &str, path: &str) -> Result<Url, ApiError> {
        let raw = format!("{}://{}{}", self.settings.scheme, host, path);
        Url::parse(&raw)
            .map_err(|err| ApiError::new(FailureKind::InvalidProfileUrl, err.to_string()))
    }

    async fn get_json(&self, url: Url) -> Result<Value, ApiError> {
        diary_debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(ApiError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(ApiError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        serde_json::from_slice(&bytes)
            .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))
    }
}

#[async_trait::async_trait]
impl MastodonApi for ReqwestMastodonClient {
    async fn lookup_account(&self, host: &str, acct: &str) -> Result<Value, ApiError> {
        let mut url = self.endpoint(host, "/api/v1/accounts/lookup")?;
        url.query_pairs_mut().append_pair("acct", acct);
        self.get_json(url).await
    }

    async fn account_statuses(
        &self,
        host: &str,
        account_id: &str,
        max_id: Option<i64>,
    ) -> Result<Vec<RawPost>, ApiError> {
        let mut url = self.endpoint(host, &format!("/api/v1/accounts/{account_id}/statuses"))?;
        if let Some(max_id) = max_id {
            url.query_pairs_mut()
                .append_pair("max_id", &max_id.to_string());
        }
        let body = self.get_json(url).await?;
        serde_json::from_value(body)
            .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
