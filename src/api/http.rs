use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use super::CodeRefineApi;
use super::types::{ErrorBody, ReviewRequest, ReviewResult, TranslateRequest, TranslateResponse};
use crate::errors::ApiError;

/// Default backend address.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// `reqwest`-backed client for the review/translate endpoints.
///
/// No request timeout is configured; resolution is left to the remote service.
#[derive(Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("coderefine/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn post<B: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<reqwest::Response, ApiError> {
        debug!(url, "POST");
        self.client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })
    }
}

/// Message for a failed review: `detail` from the body when present,
/// otherwise `Server Error: <status>`.
fn review_failure_message(status: StatusCode, body: Option<ErrorBody>) -> String {
    body.and_then(|b| b.message())
        .unwrap_or_else(|| format!("Server Error: {}", status.as_u16()))
}

/// Message for a failed translation. The body is ignored.
fn translate_failure_message(status: StatusCode) -> String {
    format!(
        "Translation failed: {}",
        status.canonical_reason().unwrap_or("")
    )
}

#[async_trait]
impl CodeRefineApi for HttpApi {
    async fn review(&self, request: &ReviewRequest) -> Result<ReviewResult, ApiError> {
        let url = self.endpoint("review");
        let resp = self.post(&url, request).await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.json::<ErrorBody>().await.ok();
            return Err(ApiError::Server {
                status: status.as_u16(),
                message: review_failure_message(status, body),
            });
        }
        resp.json::<ReviewResult>()
            .await
            .map_err(|source| ApiError::Decode { url, source })
    }

    async fn translate(&self, request: &TranslateRequest) -> Result<TranslateResponse, ApiError> {
        let url = self.endpoint("translate");
        let result = async {
            let resp = self.post(&url, request).await?;
            let status = resp.status();
            if !status.is_success() {
                return Err(ApiError::Server {
                    status: status.as_u16(),
                    message: translate_failure_message(status),
                });
            }
            resp.json::<TranslateResponse>()
                .await
                .map_err(|source| ApiError::Decode {
                    url: url.clone(),
                    source,
                })
        }
        .await;

        if let Err(e) = &result {
            debug!("Translate request failed: {}", e);
        }
        result
    }
}
