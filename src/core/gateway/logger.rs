//! Logger (C12): emits one attempt record per request attempt, with
//! parent/child linkage for retried attempts. Persistent log table layout is
//! an external collaborator per scope (spec §1); this module only defines
//! the row shape and the sink seam, writing through the teacher's
//! `utils::logging` facilities independent of operational `tracing` spans
//! (SPEC_FULL §0.1).

use crate::core::gateway::cost::CostBreakdown;
use crate::core::routing::RoutingMetadata;

/// One attempt record (spec §4.12). `retried_by_log_id` links a failed,
/// retried attempt to the attempt that finally succeeded or finally failed.
#[derive(Debug, Clone)]
pub struct AttemptLogRow {
    pub log_id: String,
    pub retried: bool,
    pub retried_by_log_id: Option<String>,

    pub api_key_id: String,
    pub project_id: String,
    pub organization_id: String,

    pub requested_model: String,
    pub requested_provider: Option<String>,
    pub used_model: String,
    pub used_provider: String,
    pub native_model_name: String,

    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub max_tokens: Option<u32>,
    pub frequency_penalty: Option<f32>,
    pub presence_penalty: Option<f32>,

    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
    pub cached_tokens: u32,
    pub reasoning_tokens: u32,

    pub duration_ms: u64,
    pub time_to_first_token_ms: Option<u64>,
    pub time_to_first_reasoning_token_ms: Option<u64>,

    pub cost: CostBreakdown,
    pub routing_metadata: RoutingMetadata,

    pub finish_reason: Option<String>,
    pub has_error: bool,
    pub error_details: Option<String>,
    pub streamed: bool,
    pub canceled: bool,
    pub cached: bool,

    pub tool_results: Vec<serde_json::Value>,
    pub plugins: Vec<String>,
    pub plugin_results: Vec<serde_json::Value>,

    /// Retention-gated fields; only populated when `retention_level=retain`.
    pub content: Option<String>,
    pub reasoning_content: Option<String>,
    /// Raw request/response payloads, bounded at 1 MiB, only captured in
    /// debug mode (spec §4.12).
    pub raw_request: Option<Vec<u8>>,
    pub raw_response: Option<Vec<u8>>,
}

pub const RAW_PAYLOAD_CAP_BYTES: usize = 1024 * 1024;

/// Truncates a raw payload to the debug-mode capture cap.
pub fn cap_raw_payload(payload: &[u8]) -> Vec<u8> {
    payload[..payload.len().min(RAW_PAYLOAD_CAP_BYTES)].to_vec()
}

/// Persistent log sink; implemented by storage (database schema ownership
/// is out of scope per spec §1).
#[async_trait::async_trait]
pub trait GatewayLogger: Send + Sync {
    async fn write(&self, row: AttemptLogRow);
}

/// Aggregate error-rate computation used by invariant #10 in spec §8:
/// `error_count / request_count * 100`, `0` when `request_count == 0`.
pub fn error_rate(error_count: u64, request_count: u64) -> f64 {
    if request_count == 0 {
        0.0
    } else {
        error_count as f64 / request_count as f64 * 100.0
    }
}

/// `cache_rate` boundary case: `100` when every request was cached.
pub fn cache_rate(cached_count: u64, request_count: u64) -> f64 {
    if request_count == 0 {
        0.0
    } else {
        cached_count as f64 / request_count as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_rate_is_zero_with_no_requests() {
        assert_eq!(error_rate(0, 0), 0.0);
    }

    #[test]
    fn cache_rate_is_100_when_all_cached() {
        assert_eq!(cache_rate(10, 10), 100.0);
    }

    #[test]
    fn raw_payload_is_capped() {
        let payload = vec![0u8; RAW_PAYLOAD_CAP_BYTES + 10];
        assert_eq!(cap_raw_payload(&payload).len(), RAW_PAYLOAD_CAP_BYTES);
    }
}
