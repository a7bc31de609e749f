//! Upstream Executor (C8): issues the HTTP call to the chosen provider
//! endpoint under a combined cancellation+timeout signal and classifies the
//! outcome. Grounded in the teacher's `reqwest`-based provider clients
//! (`core/providers/openai/client.rs`) for the HTTP call shape and
//! `core/providers/bedrock`'s binary event-stream handling for the
//! non-SSE path named in spec §4.8.

use std::time::Duration;

use thiserror::Error;
use tokio::select;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamErrorKind {
    Timeout,
    Canceled,
    UpstreamError,
}

#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("upstream request timed out")]
    Timeout,
    #[error("request canceled by client")]
    Canceled,
    #[error("upstream error: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl ExecutorError {
    pub fn kind(&self) -> UpstreamErrorKind {
        match self {
            Self::Timeout => UpstreamErrorKind::Timeout,
            Self::Canceled => UpstreamErrorKind::Canceled,
            Self::Upstream(_) => UpstreamErrorKind::UpstreamError,
        }
    }
}

/// Non-error shape of a completed (non-streaming) attempt.
#[derive(Debug)]
pub struct UpstreamOutcome {
    pub status: u16,
    pub body: bytes::Bytes,
    pub duration: Duration,
}

/// Extra headers merged onto every upstream call: `Content-Type` plus any
/// Anthropic beta flags resolved by C6 (spec §4.8).
pub fn merged_headers(beta_flags: &[String]) -> reqwest::header::HeaderMap {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(reqwest::header::CONTENT_TYPE, "application/json".parse().unwrap());
    if !beta_flags.is_empty() {
        if let Ok(value) = beta_flags.join(",").parse() {
            headers.insert("anthropic-beta", value);
        }
    }
    headers
}

/// Runs `request` under a combined client-abort-or-timeout-deadline signal,
/// per spec §4.8/§5. `streaming` selects the longer streaming timeout tier.
pub async fn execute(
    client: &reqwest::Client,
    request: reqwest::Request,
    cancel: &CancellationToken,
    unary_timeout: Duration,
    streaming_timeout: Duration,
    streaming: bool,
) -> Result<UpstreamOutcome, ExecutorError> {
    let deadline = if streaming { streaming_timeout } else { unary_timeout };
    let start = tokio::time::Instant::now();

    select! {
        biased;
        _ = cancel.cancelled() => Err(ExecutorError::Canceled),
        result = tokio::time::timeout(deadline, client.execute(request)) => {
            match result {
                Err(_) => Err(ExecutorError::Timeout),
                Ok(Err(e)) => Err(ExecutorError::Upstream(e)),
                Ok(Ok(response)) => {
                    let status = response.status().as_u16();
                    let body = response.bytes().await.map_err(ExecutorError::Upstream)?;
                    Ok(UpstreamOutcome { status, body, duration: start.elapsed() })
                }
            }
        }
    }
}

/// Classifies a status code into the spec's coarse attempt outcome shape,
/// used by `core::routing::retry::AttemptOutcome`.
pub fn is_client_error(status: u16) -> bool {
    (400..500).contains(&status) && status != 408 && status != 429
}

pub fn is_content_filter(status: u16, finish_reason: Option<&str>) -> bool {
    status == 200 && finish_reason == Some("content_filter")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_4xx_excludes_retryable_408_429() {
        assert!(!is_client_error(408));
        assert!(!is_client_error(429));
        assert!(is_client_error(400));
        assert!(is_client_error(404));
    }

    #[test]
    fn content_filter_requires_200_and_matching_finish_reason() {
        assert!(is_content_filter(200, Some("content_filter")));
        assert!(!is_content_filter(200, Some("stop")));
        assert!(!is_content_filter(500, Some("content_filter")));
    }

    #[test]
    fn merged_headers_include_json_content_type() {
        let headers = merged_headers(&[]);
        assert_eq!(headers.get(reqwest::header::CONTENT_TYPE).unwrap(), "application/json");
    }
}
