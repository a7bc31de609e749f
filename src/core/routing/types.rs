//! Routing metadata types
//!
//! These mirror the Routing Metadata data model: the set of providers
//! considered, the one chosen, why, and the per-candidate scores that led to
//! the decision. `RoutingMetadata` is built during selection and enriched by
//! the retry orchestrator on every subsequent attempt.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a particular provider was selected for this request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionReason {
    CheapestAvailable,
    LowUptimeFallback,
    DirectProviderSpecified,
    SingleProviderAvailable,
    FallbackFirstAvailable,
}

/// One candidate's standing at the moment scoring ran.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderScore {
    pub provider_id: String,
    pub score: f64,
    pub price: f64,
    pub uptime: f64,
    pub latency: f64,
    pub throughput: f64,
    pub priority: i32,
    pub failed: bool,
    pub status_code: Option<u16>,
    pub error_type: Option<String>,
}

impl ProviderScore {
    pub fn new(provider_id: impl Into<String>, metrics: super::metrics::ProviderMetrics) -> Self {
        Self {
            provider_id: provider_id.into(),
            score: 0.0,
            price: metrics.price,
            uptime: metrics.uptime,
            latency: metrics.average_latency,
            throughput: metrics.throughput,
            priority: metrics.priority,
            failed: false,
            status_code: None,
            error_type: None,
        }
    }
}

/// Accumulated routing decision, attached to the request envelope and logged
/// verbatim on every attempt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoutingMetadata {
    pub available_providers: Vec<String>,
    pub selected_provider: Option<String>,
    pub selection_reason: Option<SelectionReason>,
    pub provider_scores: Vec<ProviderScore>,
    /// Attempt log: one entry appended per dispatch by the retry orchestrator.
    pub routing: Vec<String>,
    pub no_fallback: Option<bool>,
}

/// Inputs the routing engine needs to pick a provider.
#[derive(Debug, Clone)]
pub struct RoutingRequest {
    /// Raw model field from the request, e.g. `"auto"`, `"anthropic/claude..."`, `"gpt-4.1"`.
    pub requested_model: String,
    /// Explicit provider parsed from the `provider/model` form, if present.
    pub requested_provider: Option<String>,
    pub no_fallback: bool,
    pub free_models_only: bool,
    pub no_reasoning: bool,
    pub required_context_size: u32,
    /// Provider ids visible under the caller's project mode (api-keys / credits / hybrid).
    pub visible_provider_ids: Vec<String>,
}

#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("no provider supports model `{0}`")]
    NoProviderForModel(String),
    #[error("requested capability is unavailable for model `{0}`")]
    CapabilityUnavailable(String),
    #[error("custom provider is not configured for this organization")]
    CustomProviderNotConfigured,
    #[error("no candidate models remain after filtering")]
    NoCandidates,
}
