use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt::Debug;
use tracing::{debug, warn};

use crate::error::{Result, WeatherError};

/// Status and body of a completed GET, whatever the status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// The single network capability the client needs.
///
/// Implementations return `Ok` for any response that arrived, including
/// 4xx/5xx, and `Err` only when no response was received.
#[async_trait]
pub trait HttpTransport: Send + Sync + Debug {
    async fn get(&self, url: &Url) -> Result<HttpResponse>;
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &Url) -> Result<HttpResponse> {
        let res = self.http.get(url.clone()).send().await?;

        let status = res.status().as_u16();
        let body = res.text().await?;

        Ok(HttpResponse { status, body })
    }
}

/// GET `url` and classify the result.
///
/// Any JSON object carrying a `cod` field is an API error, regardless of
/// status code. Everything else that parses as JSON is the payload.
pub(crate) async fn fetch(transport: &dyn HttpTransport, url: &Url) -> Result<Value> {
    debug!(path = url.path(), "sending request");

    let res = transport.get(url).await?;

    let body: Value = serde_json::from_str(&res.body).map_err(|e| {
        WeatherError::MalformedResponse(format!(
            "status {}: {e}: {}",
            res.status,
            truncate_body(&res.body)
        ))
    })?;

    if body.get("cod").is_some() {
        warn!(status = res.status, body = %truncate_body(&res.body), "upstream returned an error");
        return Err(WeatherError::UpstreamError(body.to_string()));
    }

    Ok(body)
}

/// Deserialize a classified payload into the shape the caller expects.
pub(crate) fn decode<T: DeserializeOwned>(body: Value) -> Result<T> {
    serde_json::from_value(body).map_err(|e| WeatherError::MalformedResponse(e.to_string()))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
